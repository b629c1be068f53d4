//! Tests that the public command surface parses the way the menu
//! advertises it.

use teloxide::utils::command::BotCommands;
use valet_telegram::Command;

const BOT_NAME: &str = "valetbot";

#[test]
fn parses_bare_commands() {
    assert!(matches!(
        Command::parse("/lock", BOT_NAME),
        Ok(Command::Lock)
    ));
    assert!(matches!(
        Command::parse("/unlock", BOT_NAME),
        Ok(Command::Unlock)
    ));
    assert!(matches!(
        Command::parse("/wake", BOT_NAME),
        Ok(Command::Wake)
    ));
    assert!(matches!(
        Command::parse("/honk", BOT_NAME),
        Ok(Command::Honk)
    ));
    assert!(matches!(
        Command::parse("/flash", BOT_NAME),
        Ok(Command::Flash)
    ));
    assert!(matches!(
        Command::parse("/vent", BOT_NAME),
        Ok(Command::Vent)
    ));
    assert!(matches!(
        Command::parse("/boombox", BOT_NAME),
        Ok(Command::Boombox)
    ));
    assert!(matches!(
        Command::parse("/info", BOT_NAME),
        Ok(Command::Info)
    ));
    assert!(matches!(
        Command::parse("/cars", BOT_NAME),
        Ok(Command::Cars)
    ));
}

#[test]
fn parses_commands_with_arguments() {
    match Command::parse("/climate on", BOT_NAME) {
        Ok(Command::Climate(arg)) => assert_eq!(arg, "on"),
        other => panic!("unexpected parse: {:?}", other),
    }

    match Command::parse("/sentry off", BOT_NAME) {
        Ok(Command::Sentry(arg)) => assert_eq!(arg, "off"),
        other => panic!("unexpected parse: {:?}", other),
    }

    match Command::parse("/trunk rear", BOT_NAME) {
        Ok(Command::Trunk(arg)) => assert_eq!(arg, "rear"),
        other => panic!("unexpected parse: {:?}", other),
    }

    match Command::parse("/car 2", BOT_NAME) {
        Ok(Command::Car(arg)) => assert_eq!(arg, "2"),
        other => panic!("unexpected parse: {:?}", other),
    }
}

#[test]
fn argument_commands_accept_missing_argument() {
    // The handlers answer with usage text; parsing must not reject these.
    match Command::parse("/climate", BOT_NAME) {
        Ok(Command::Climate(arg)) => assert!(arg.is_empty()),
        other => panic!("unexpected parse: {:?}", other),
    }
    match Command::parse("/trunk", BOT_NAME) {
        Ok(Command::Trunk(arg)) => assert!(arg.is_empty()),
        other => panic!("unexpected parse: {:?}", other),
    }
}

#[test]
fn parses_commands_addressed_to_the_bot() {
    assert!(matches!(
        Command::parse("/lock@valetbot", BOT_NAME),
        Ok(Command::Lock)
    ));
}

#[test]
fn rejects_unknown_commands() {
    assert!(Command::parse("/teleport", BOT_NAME).is_err());
    assert!(Command::parse("hello", BOT_NAME).is_err());
}

//! The remote-command vocabulary.
//!
//! Each command maps to a POST endpoint under
//! `/api/1/vehicles/{id}/command/` plus a JSON body.

use serde_json::{json, Value};

/// Which trunk to actuate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrunkWhich {
    /// Front trunk (frunk).
    Front,
    /// Rear trunk.
    Rear,
}

impl TrunkWhich {
    /// Wire value for the `which_trunk` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrunkWhich::Front => "front",
            TrunkWhich::Rear => "rear",
        }
    }
}

/// Window movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    /// Crack all windows open.
    Vent,
    /// Close all windows.
    Close,
}

impl WindowCommand {
    /// Wire value for the `command` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowCommand::Vent => "vent",
            WindowCommand::Close => "close",
        }
    }
}

/// A remote command the bot can issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleCommand {
    /// Lock the doors.
    Lock,
    /// Unlock the doors.
    Unlock,
    /// Start climate conditioning.
    ClimateOn,
    /// Stop climate conditioning.
    ClimateOff,
    /// Enable or disable Sentry Mode.
    SetSentryMode {
        /// Desired state.
        on: bool,
    },
    /// Flash the headlights.
    FlashLights,
    /// Honk the horn.
    HonkHorn,
    /// Open or close a trunk.
    ActuateTrunk {
        /// Which trunk.
        which: TrunkWhich,
    },
    /// Vent or close the windows.
    WindowControl {
        /// Direction of movement.
        command: WindowCommand,
    },
    /// Play the boombox sound.
    RemoteBoombox,
}

impl VehicleCommand {
    /// The command endpoint name.
    pub fn endpoint(&self) -> &'static str {
        match self {
            VehicleCommand::Lock => "door_lock",
            VehicleCommand::Unlock => "door_unlock",
            VehicleCommand::ClimateOn => "auto_conditioning_start",
            VehicleCommand::ClimateOff => "auto_conditioning_stop",
            VehicleCommand::SetSentryMode { .. } => "set_sentry_mode",
            VehicleCommand::FlashLights => "flash_lights",
            VehicleCommand::HonkHorn => "honk_horn",
            VehicleCommand::ActuateTrunk { .. } => "actuate_trunk",
            VehicleCommand::WindowControl { .. } => "window_control",
            VehicleCommand::RemoteBoombox => "remote_boombox",
        }
    }

    /// The JSON body to POST with the command.
    ///
    /// `window_control` requires lat/lon fields; they are only consulted for
    /// the `close` command when issued away from the car, and the API accepts
    /// zeroes.
    pub fn body(&self) -> Value {
        match self {
            VehicleCommand::SetSentryMode { on } => json!({ "on": on }),
            VehicleCommand::ActuateTrunk { which } => json!({ "which_trunk": which.as_str() }),
            VehicleCommand::WindowControl { command } => json!({
                "command": command.as_str(),
                "lat": 0,
                "lon": 0,
            }),
            _ => json!({}),
        }
    }

    /// Whether the vehicle must be awake before this command is issued.
    ///
    /// Trunk actuation works on a sleeping car; everything else needs a wake
    /// first.
    pub fn requires_wake(&self) -> bool {
        !matches!(self, VehicleCommand::ActuateTrunk { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(VehicleCommand::Lock.endpoint(), "door_lock");
        assert_eq!(VehicleCommand::Unlock.endpoint(), "door_unlock");
        assert_eq!(
            VehicleCommand::ClimateOn.endpoint(),
            "auto_conditioning_start"
        );
        assert_eq!(
            VehicleCommand::SetSentryMode { on: true }.endpoint(),
            "set_sentry_mode"
        );
        assert_eq!(VehicleCommand::RemoteBoombox.endpoint(), "remote_boombox");
    }

    #[test]
    fn test_empty_bodies() {
        assert_eq!(VehicleCommand::Lock.body(), serde_json::json!({}));
        assert_eq!(VehicleCommand::HonkHorn.body(), serde_json::json!({}));
    }

    #[test]
    fn test_sentry_body() {
        assert_eq!(
            VehicleCommand::SetSentryMode { on: true }.body(),
            serde_json::json!({"on": true})
        );
        assert_eq!(
            VehicleCommand::SetSentryMode { on: false }.body(),
            serde_json::json!({"on": false})
        );
    }

    #[test]
    fn test_trunk_body() {
        assert_eq!(
            VehicleCommand::ActuateTrunk {
                which: TrunkWhich::Front
            }
            .body(),
            serde_json::json!({"which_trunk": "front"})
        );
        assert_eq!(
            VehicleCommand::ActuateTrunk {
                which: TrunkWhich::Rear
            }
            .body(),
            serde_json::json!({"which_trunk": "rear"})
        );
    }

    #[test]
    fn test_window_body() {
        let body = VehicleCommand::WindowControl {
            command: WindowCommand::Vent,
        }
        .body();
        assert_eq!(body["command"], "vent");
        assert_eq!(body["lat"], 0);
        assert_eq!(body["lon"], 0);
    }

    #[test]
    fn test_requires_wake() {
        assert!(VehicleCommand::Lock.requires_wake());
        assert!(VehicleCommand::HonkHorn.requires_wake());
        assert!(!VehicleCommand::ActuateTrunk {
            which: TrunkWhich::Rear
        }
        .requires_wake());
    }
}

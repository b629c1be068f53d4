//! Rendering of the `/info` readout.
//!
//! Everything here is pure string building over a telemetry snapshot so the
//! whole readout is testable without a car or a network.

use valet_api::{ChargeState, ChargingState, ShiftState, VehicleData};
use valet_core::geocode::Place;
use valet_core::units::{format_minutes, group_thousands, miles_to_km, miles_to_km_padded};

/// Battery level at or below which the empty-battery glyph is shown.
const LOW_BATTERY_PERCENT: i64 = 20;

/// Escape HTML special characters for Telegram HTML mode.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Human label for the gear selector, `Parked` when absent.
pub fn drive_status(shift: Option<&ShiftState>) -> &'static str {
    match shift {
        None | Some(ShiftState::Park) => "Parked",
        Some(ShiftState::Drive) => "Driving",
        Some(ShiftState::Reverse) => "Reversing",
        Some(ShiftState::Neutral) => "Neutral",
        Some(ShiftState::Other(_)) => "Unknown",
    }
}

/// Heading line for the charge section.
pub fn charge_heading(charge: &ChargeState) -> String {
    match charge.charging_state {
        ChargingState::Disconnected => {
            let glyph = if charge.battery_level > LOW_BATTERY_PERCENT {
                "🔋"
            } else {
                "🪫"
            };
            format!("{} Not Charging", glyph)
        }
        ChargingState::Complete => "🟩 Charge Complete".to_string(),
        ChargingState::Charging => "⚡ Charging".to_string(),
        ChargingState::Stopped => "🟥 Charge Interrupted".to_string(),
        ChargingState::Starting => "🟦 Starting Charge".to_string(),
        ChargingState::NoPower => "⚠️ No Power".to_string(),
        ChargingState::Other(_) => "❓ Unknown State".to_string(),
    }
}

/// Detail block under the charge heading: battery level, and while charging
/// the session figures (energy/range added, power, time to limit).
fn charge_details(charge: &ChargeState) -> String {
    let mut text = format!(
        "<b>Battery Level:</b> {}% ({} km)",
        charge.battery_level,
        miles_to_km(charge.battery_range)
    );

    if charge.charging_state == ChargingState::Charging {
        text.push_str(&format!(
            " — <b>+{} kWh</b> ({} km)",
            charge.charge_energy_added as i64 + 1,
            miles_to_km_padded(charge.charge_miles_added_rated)
        ));
        let kw = (charge.charger_actual_current * charge.charger_voltage) as f64 / 1000.0;
        text.push_str(&format!(
            "\n<b>Charging Rate:</b> {:.2} kW ({} km/hr)",
            kw,
            miles_to_km_padded(charge.charge_rate)
        ));
        text.push_str(&format!(
            "\n<b>{}</b> until the limit is reached",
            format_minutes(charge.minutes_to_full_charge)
        ));
    }

    text
}

/// Render the full readout as a Telegram HTML message.
pub fn render_info(data: &VehicleData, place: Option<&Place>) -> String {
    let mut text = String::new();

    // Header
    text.push_str(&format!("🚘 <b>{}</b>", html_escape(&data.display_name)));
    if let Some(letter) = data.model_letter() {
        text.push_str(&format!(" — Model {}", letter));
    }
    text.push_str("\n\n");

    // Status lines
    let vehicle = &data.vehicle_state;
    if vehicle.locked {
        text.push_str("🔒 Your car is <b>locked</b>\n");
    } else {
        text.push_str("🔓 Your car is <b>unlocked</b>\n");
    }
    if vehicle.sentry_mode {
        text.push_str("🔴 Sentry Mode is <b>enabled</b>\n");
    } else {
        text.push_str("⭕ Sentry Mode is <b>disabled</b>\n");
    }
    if data.climate_state.is_climate_on {
        text.push_str(&format!(
            "🌡️ Climate is <b>on</b> (going to <b>{}°C</b>)\n",
            data.climate_state.driver_temp_setting
        ));
    }
    if data.charge_state.charge_port_door_open {
        text.push_str("🔌 Charge port is <b>open</b>\n");
    }
    if vehicle.software_update.is_pending() {
        text.push_str(&format!(
            "🔄 A <b>software update</b> ({}) is available\n",
            html_escape(vehicle.software_update.version.trim())
        ));
    }

    let status = drive_status(data.drive_state.shift_state.as_ref());
    if status != "Parked" {
        if let Some(speed) = data.drive_state.speed {
            text.push_str(&format!(
                "<b>Driving Speed:</b> {} km/h\n",
                miles_to_km(speed)
            ));
        }
    }

    // Location and temperatures
    text.push('\n');
    if let Some(place) = place {
        if let Some(municipality) = &place.municipality {
            text.push_str(&format!("🗺️ Location: {}\n", html_escape(municipality)));
            if let Some(road) = &place.road {
                text.push_str(&format!(
                    "<tg-spoiler><b>{}</b></tg-spoiler> <i>(tap to reveal)</i>\n",
                    html_escape(road)
                ));
            }
        }
    }
    if let Some(inside) = data.climate_state.inside_temp {
        text.push_str(&format!("🌡️ Car Temperature: {}°C\n", inside as i64));
    }
    if let Some(outside) = data.climate_state.outside_temp {
        text.push_str(&format!("🌆 Ext. Temperature: {}°C\n", outside as i64));
    }

    // Charge section
    text.push('\n');
    text.push_str(&charge_heading(&data.charge_state));
    text.push('\n');
    text.push_str(&charge_details(&data.charge_state));
    text.push_str("\n\n");

    // Footer
    let version = vehicle.car_version.split(' ').next().unwrap_or("");
    text.push_str(&format!(
        "<i>Software {} — {} km — {}</i>",
        html_escape(version),
        group_thousands(miles_to_km_padded(vehicle.odometer)),
        status
    ));

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use valet_api::{ClimateState, DriveState, SoftwareUpdate, VehicleState};

    fn sample_data() -> VehicleData {
        VehicleData {
            id: 90210,
            vin: "5YJ3E1EA7KF000000".to_string(),
            display_name: "Crimson".to_string(),
            option_codes: None,
            vehicle_state: VehicleState {
                locked: true,
                sentry_mode: false,
                fd_window: 0,
                odometer: 14567.8,
                car_version: "2024.8.7 afd9e1e39ab2".to_string(),
                software_update: SoftwareUpdate::default(),
            },
            climate_state: ClimateState {
                is_climate_on: false,
                inside_temp: Some(21.4),
                outside_temp: Some(13.0),
                driver_temp_setting: 21.5,
            },
            charge_state: ChargeState {
                charging_state: ChargingState::Disconnected,
                battery_level: 72,
                battery_range: 211.4,
                charge_port_door_open: false,
                charge_energy_added: 0.0,
                charge_miles_added_rated: 0.0,
                charger_actual_current: 0,
                charger_voltage: 0,
                charge_rate: 0.0,
                minutes_to_full_charge: 0,
            },
            drive_state: DriveState {
                latitude: 52.0115,
                longitude: 4.7105,
                shift_state: None,
                speed: None,
            },
        }
    }

    #[test]
    fn test_drive_status() {
        assert_eq!(drive_status(None), "Parked");
        assert_eq!(drive_status(Some(&ShiftState::Park)), "Parked");
        assert_eq!(drive_status(Some(&ShiftState::Drive)), "Driving");
        assert_eq!(drive_status(Some(&ShiftState::Reverse)), "Reversing");
        assert_eq!(drive_status(Some(&ShiftState::Neutral)), "Neutral");
        assert_eq!(
            drive_status(Some(&ShiftState::Other("SNA".to_string()))),
            "Unknown"
        );
    }

    #[test]
    fn test_charge_heading_not_charging() {
        let mut charge = sample_data().charge_state;
        assert_eq!(charge_heading(&charge), "🔋 Not Charging");

        charge.battery_level = 15;
        assert_eq!(charge_heading(&charge), "🪫 Not Charging");
    }

    #[test]
    fn test_charge_heading_states() {
        let mut charge = sample_data().charge_state;
        charge.charging_state = ChargingState::Charging;
        assert_eq!(charge_heading(&charge), "⚡ Charging");
        charge.charging_state = ChargingState::Complete;
        assert_eq!(charge_heading(&charge), "🟩 Charge Complete");
        charge.charging_state = ChargingState::NoPower;
        assert_eq!(charge_heading(&charge), "⚠️ No Power");
        charge.charging_state = ChargingState::Other("Calibrating".to_string());
        assert_eq!(charge_heading(&charge), "❓ Unknown State");
    }

    #[test]
    fn test_render_info_parked_and_locked() {
        let data = sample_data();
        let text = render_info(&data, None);

        assert!(text.contains("<b>Crimson</b> — Model 3"));
        assert!(text.contains("🔒 Your car is <b>locked</b>"));
        assert!(text.contains("⭕ Sentry Mode is <b>disabled</b>"));
        assert!(text.contains("🔋 Not Charging"));
        assert!(text.contains("<b>Battery Level:</b> 72% (340 km)"));
        assert!(text.contains("Software 2024.8.7"));
        assert!(text.contains("Parked"));
        // No climate or charge-port lines when off/closed
        assert!(!text.contains("Climate is"));
        assert!(!text.contains("Charge port"));
        assert!(!text.contains("Location"));
    }

    #[test]
    fn test_render_info_charging_details() {
        let mut data = sample_data();
        data.charge_state.charging_state = ChargingState::Charging;
        data.charge_state.charge_energy_added = 11.53;
        data.charge_state.charge_miles_added_rated = 39.5;
        data.charge_state.charger_actual_current = 16;
        data.charge_state.charger_voltage = 230;
        data.charge_state.charge_rate = 32.2;
        data.charge_state.minutes_to_full_charge = 70;
        data.charge_state.charge_port_door_open = true;

        let text = render_info(&data, None);
        assert!(text.contains("⚡ Charging"));
        assert!(text.contains("+12 kWh"));
        assert!(text.contains("<b>Charging Rate:</b> 3.68 kW (52 km/hr)"));
        assert!(text.contains("<b>1 hour and 10 minutes</b> until the limit is reached"));
        assert!(text.contains("🔌 Charge port is <b>open</b>"));
    }

    #[test]
    fn test_render_info_driving() {
        let mut data = sample_data();
        data.drive_state.shift_state = Some(ShiftState::Drive);
        data.drive_state.speed = Some(62.0);

        let text = render_info(&data, None);
        assert!(text.contains("<b>Driving Speed:</b> 99 km/h"));
        assert!(text.ends_with("Driving</i>"));
    }

    #[test]
    fn test_render_info_location_spoiler() {
        let data = sample_data();
        let place = Place {
            municipality: Some("Westminster".to_string()),
            road: Some("Baker Street".to_string()),
        };

        let text = render_info(&data, Some(&place));
        assert!(text.contains("🗺️ Location: Westminster"));
        assert!(text.contains("<tg-spoiler><b>Baker Street</b></tg-spoiler>"));
    }

    #[test]
    fn test_render_info_escapes_html() {
        let mut data = sample_data();
        data.display_name = "A<B&C".to_string();
        let text = render_info(&data, None);
        assert!(text.contains("A&lt;B&amp;C"));
    }

    #[test]
    fn test_render_info_software_update() {
        let mut data = sample_data();
        data.vehicle_state.software_update = SoftwareUpdate {
            status: "available".to_string(),
            version: "2024.20.1".to_string(),
        };
        let text = render_info(&data, None);
        assert!(text.contains("🔄 A <b>software update</b> (2024.20.1) is available"));
    }
}

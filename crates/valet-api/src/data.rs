//! Telemetry models for the owner API.
//!
//! Only the fields the bot actually reads are modelled; everything else in
//! the (large) telemetry payload is ignored on deserialization.

use serde::Deserialize;

/// A vehicle as returned by the vehicle list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleSummary {
    /// Vehicle id used in API paths.
    pub id: u64,
    /// Vehicle identification number.
    pub vin: String,
    /// User-assigned display name.
    pub display_name: String,
    /// Connectivity state: `online`, `asleep`, `offline`.
    pub state: String,
}

impl VehicleSummary {
    /// Whether the vehicle is reachable for commands and telemetry.
    pub fn is_online(&self) -> bool {
        self.state == "online"
    }
}

/// Full telemetry snapshot for one vehicle.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleData {
    /// Vehicle id used in API paths.
    pub id: u64,
    /// Vehicle identification number.
    pub vin: String,
    /// User-assigned display name.
    pub display_name: String,
    /// Comma-separated option codes. Deprecated server-side; often empty.
    #[serde(default)]
    pub option_codes: Option<String>,
    /// Body/lock/sentry/software state.
    pub vehicle_state: VehicleState,
    /// HVAC state.
    pub climate_state: ClimateState,
    /// Battery and charging state.
    pub charge_state: ChargeState,
    /// Position and motion state.
    pub drive_state: DriveState,
}

impl VehicleData {
    /// Model letter from the VIN (4th character): S, 3, X, Y.
    pub fn model_letter(&self) -> Option<char> {
        self.vin.chars().nth(3)
    }
}

/// Body, lock and software state.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleState {
    /// Doors locked.
    pub locked: bool,
    /// Sentry Mode active.
    #[serde(default)]
    pub sentry_mode: bool,
    /// Driver-front window position; 0 when closed.
    #[serde(default)]
    pub fd_window: i64,
    /// Odometer in miles.
    pub odometer: f64,
    /// Installed software version.
    #[serde(default)]
    pub car_version: String,
    /// Pending software update, if any.
    #[serde(default)]
    pub software_update: SoftwareUpdate,
}

/// Pending software update descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoftwareUpdate {
    /// Update status; empty string when no update is pending.
    #[serde(default)]
    pub status: String,
    /// Version the update installs.
    #[serde(default)]
    pub version: String,
}

impl SoftwareUpdate {
    /// Whether an update is pending or installing.
    pub fn is_pending(&self) -> bool {
        !self.status.is_empty()
    }
}

/// HVAC state.
#[derive(Debug, Clone, Deserialize)]
pub struct ClimateState {
    /// Conditioning running.
    pub is_climate_on: bool,
    /// Cabin temperature in °C.
    #[serde(default)]
    pub inside_temp: Option<f64>,
    /// Outside temperature in °C.
    #[serde(default)]
    pub outside_temp: Option<f64>,
    /// Driver-side target temperature in °C.
    #[serde(default)]
    pub driver_temp_setting: f64,
}

/// Battery and charging state.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeState {
    /// Current charging state.
    pub charging_state: ChargingState,
    /// Battery level in percent.
    pub battery_level: i64,
    /// Rated range in miles.
    pub battery_range: f64,
    /// Charge port door open.
    #[serde(default)]
    pub charge_port_door_open: bool,
    /// Energy added this session in kWh.
    #[serde(default)]
    pub charge_energy_added: f64,
    /// Rated range added this session in miles.
    #[serde(default)]
    pub charge_miles_added_rated: f64,
    /// Actual charger current in A.
    #[serde(default)]
    pub charger_actual_current: i64,
    /// Charger voltage in V.
    #[serde(default)]
    pub charger_voltage: i64,
    /// Charge rate in mi/hr.
    #[serde(default)]
    pub charge_rate: f64,
    /// Minutes until the configured charge limit is reached.
    #[serde(default)]
    pub minutes_to_full_charge: u32,
}

/// Charging state reported by the vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ChargingState {
    /// No cable connected.
    Disconnected,
    /// Actively charging.
    Charging,
    /// Reached the configured limit.
    Complete,
    /// Charge interrupted.
    Stopped,
    /// About to start charging.
    Starting,
    /// Cable connected but no power available.
    NoPower,
    /// A state this client does not know.
    Other(String),
}

impl From<String> for ChargingState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Disconnected" => ChargingState::Disconnected,
            "Charging" => ChargingState::Charging,
            "Complete" => ChargingState::Complete,
            "Stopped" => ChargingState::Stopped,
            "Starting" => ChargingState::Starting,
            "NoPower" => ChargingState::NoPower,
            _ => ChargingState::Other(s),
        }
    }
}

impl ChargingState {
    /// The wire name of the state (used for the charging log).
    pub fn as_str(&self) -> &str {
        match self {
            ChargingState::Disconnected => "Disconnected",
            ChargingState::Charging => "Charging",
            ChargingState::Complete => "Complete",
            ChargingState::Stopped => "Stopped",
            ChargingState::Starting => "Starting",
            ChargingState::NoPower => "NoPower",
            ChargingState::Other(s) => s,
        }
    }
}

impl std::fmt::Display for ChargingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gear selector position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ShiftState {
    /// Park.
    Park,
    /// Drive.
    Drive,
    /// Reverse.
    Reverse,
    /// Neutral.
    Neutral,
    /// A state this client does not know.
    Other(String),
}

impl From<String> for ShiftState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "P" => ShiftState::Park,
            "D" => ShiftState::Drive,
            "R" => ShiftState::Reverse,
            "N" => ShiftState::Neutral,
            _ => ShiftState::Other(s),
        }
    }
}

/// Position and motion state.
#[derive(Debug, Clone, Deserialize)]
pub struct DriveState {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Gear selector position; absent while parked and asleep.
    #[serde(default)]
    pub shift_state: Option<ShiftState>,
    /// Speed in mph; absent while parked.
    #[serde(default)]
    pub speed: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A trimmed-down telemetry payload with the fields the bot reads.
    const VEHICLE_DATA_JSON: &str = r#"{
        "id": 90210,
        "vin": "5YJ3E1EA7KF000000",
        "display_name": "Crimson",
        "option_codes": "AD15,MDL3,PBSB",
        "vehicle_state": {
            "locked": true,
            "sentry_mode": false,
            "fd_window": 0,
            "odometer": 14567.8,
            "car_version": "2024.8.7 afd9e1e39ab2",
            "software_update": {
                "status": "",
                "version": " "
            }
        },
        "climate_state": {
            "is_climate_on": true,
            "inside_temp": 21.4,
            "outside_temp": 13.0,
            "driver_temp_setting": 21.5
        },
        "charge_state": {
            "charging_state": "Charging",
            "battery_level": 72,
            "battery_range": 211.4,
            "charge_port_door_open": true,
            "charge_energy_added": 11.53,
            "charge_miles_added_rated": 39.5,
            "charger_actual_current": 16,
            "charger_voltage": 230,
            "charge_rate": 32.2,
            "minutes_to_full_charge": 70
        },
        "drive_state": {
            "latitude": 52.0115,
            "longitude": 4.7105,
            "shift_state": null,
            "speed": null
        }
    }"#;

    #[test]
    fn test_vehicle_data_deserialization() {
        let data: VehicleData = serde_json::from_str(VEHICLE_DATA_JSON).unwrap();
        assert_eq!(data.id, 90210);
        assert_eq!(data.display_name, "Crimson");
        assert_eq!(data.model_letter(), Some('3'));
        assert!(data.vehicle_state.locked);
        assert!(!data.vehicle_state.sentry_mode);
        assert!(!data.vehicle_state.software_update.is_pending());
        assert!(data.climate_state.is_climate_on);
        assert_eq!(data.charge_state.charging_state, ChargingState::Charging);
        assert_eq!(data.charge_state.battery_level, 72);
        assert_eq!(data.charge_state.minutes_to_full_charge, 70);
        assert_eq!(data.drive_state.shift_state, None);
    }

    #[test]
    fn test_unknown_charging_state() {
        let state: ChargingState = serde_json::from_str(r#""Calibrating""#).unwrap();
        assert_eq!(state, ChargingState::Other("Calibrating".to_string()));
        assert_eq!(state.as_str(), "Calibrating");
    }

    #[test]
    fn test_shift_state_mapping() {
        let state: ShiftState = serde_json::from_str(r#""D""#).unwrap();
        assert_eq!(state, ShiftState::Drive);
        let state: ShiftState = serde_json::from_str(r#""P""#).unwrap();
        assert_eq!(state, ShiftState::Park);
        let state: ShiftState = serde_json::from_str(r#""SNA""#).unwrap();
        assert_eq!(state, ShiftState::Other("SNA".to_string()));
    }

    #[test]
    fn test_vehicle_summary_online() {
        let json = r#"{
            "id": 1,
            "vin": "5YJSA1E26JF000000",
            "display_name": "Tin Can",
            "state": "asleep"
        }"#;
        let summary: VehicleSummary = serde_json::from_str(json).unwrap();
        assert!(!summary.is_online());
        assert_eq!(summary.display_name, "Tin Can");
    }
}

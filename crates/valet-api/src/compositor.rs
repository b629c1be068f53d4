//! Vehicle render URLs for the status readout.
//!
//! The manufacturer exposes a public image compositor keyed by model and
//! option codes; the chat platform fetches the URL itself, so no image bytes
//! pass through the bot.

/// Public image-compositor endpoint.
const COMPOSITOR_BASE: &str = "https://static-assets.tesla.com/v1/compositor/";

/// Camera angle used for the readout photo.
const COMPOSITOR_VIEW: &str = "STUD_3QTR";

/// Map the VIN's model character (4th position) to the compositor's model
/// code.
pub fn model_code_from_vin(vin: &str) -> Option<&'static str> {
    match vin.chars().nth(3)? {
        'S' => Some("ms"),
        '3' => Some("m3"),
        'X' => Some("mx"),
        'Y' => Some("my"),
        _ => None,
    }
}

/// Build a compositor URL for the given model code and comma-separated
/// option codes.
pub fn compositor_url(model_code: &str, options: &str, size: u32) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("model", model_code)
        .append_pair("options", options)
        .append_pair("view", COMPOSITOR_VIEW)
        .append_pair("size", &size.to_string())
        .finish();
    format!("{}?{}", COMPOSITOR_BASE, query)
}

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::SaveData;

pub fn save_to_json_string(save_data: &SaveData) -> Result<String> {
    serde_json::to_string_pretty(save_data).context("failed to serialize save data to JSON")
}

pub fn load_from_json_string(json: &str) -> Result<SaveData> {
    serde_json::from_str(json).context("failed to parse save JSON")
}

/// Compact single-line export suitable for copy and paste.
pub fn export_to_base64(save_data: &SaveData) -> Result<String> {
    let json = serde_json::to_string(save_data).context("failed to serialize save data to JSON")?;
    Ok(STANDARD.encode(json.as_bytes()))
}

/// Inverse of [`export_to_base64`]. Whitespace from wrapped pastes is ignored.
pub fn import_from_base64(encoded: &str) -> Result<SaveData> {
    let compact: String = encoded.split_whitespace().collect();
    let raw = STANDARD
        .decode(compact.as_bytes())
        .context("failed to decode base64 save payload")?;
    let json = String::from_utf8(raw).context("decoded base64 payload is not UTF-8")?;
    load_from_json_string(&json)
}

/// Accepts either a JSON save file or a base64 export.
pub fn decode_save(text: &str) -> Result<SaveData> {
    if text.trim_start().starts_with('{') {
        load_from_json_string(text)
    } else {
        import_from_base64(text)
    }
}

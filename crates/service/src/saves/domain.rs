use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

pub const MISSING_SAVE_FIELDS: &str = "Missing player_id or data";
pub const PLAYER_ID_REQUIRED: &str = "player_id is required";
pub const SAVE_NOT_FOUND: &str = "Save not found";

/// One player's save as returned by a load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub player_id: String,
    pub data: Value,
}

/// String form of a `player_id` field, so `42` and `"42"` name the same player.
///
/// Strings are used as-is and integers as their exact decimal text of any
/// size (`-0` becomes `"0"`). Other values use compact JSON text: `true`,
/// `null` and `{"id":1}` key as `"true"`, `"null"` and `"{\"id\":1}"`, not
/// as `True`, `None` or `{'id': 1}`.
pub fn coerce_player_id(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_key(n),
        other => other.to_string(),
    }
}

fn number_key(n: &Number) -> String {
    let text = n.to_string();
    if text.contains(&['.', 'e', 'E'][..]) {
        return text;
    }
    // JSON integers carry no leading zeros, so only `-0` needs folding.
    if text.trim_start_matches('-').bytes().all(|b| b == b'0') {
        return "0".to_string();
    }
    text
}

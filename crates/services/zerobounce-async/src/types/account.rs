//! Account endpoint types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw response of `GET /getcredits`
///
/// The API reports the count as a string (`{"Credits": "2375323"}`); `-1` means the
/// key was rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditsResponse {
    /// Remaining credits as returned by the API
    #[serde(rename = "Credits")]
    pub credits: Value,
}

impl CreditsResponse {
    /// Parses the credit count, accepting either a JSON string or number
    #[must_use]
    pub fn count(&self) -> Option<i64> {
        match &self.credits {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_accepts_string_and_number() {
        let r: CreditsResponse = serde_json::from_str(r#"{"Credits": "2375323"}"#).unwrap();
        assert_eq!(r.count(), Some(2_375_323));

        let r: CreditsResponse = serde_json::from_str(r#"{"Credits": 12}"#).unwrap();
        assert_eq!(r.count(), Some(12));

        let r: CreditsResponse = serde_json::from_str(r#"{"Credits": "n/a"}"#).unwrap();
        assert_eq!(r.count(), None);
    }
}

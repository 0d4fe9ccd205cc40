use serde::{Deserialize, Serialize};

/// Payload of `GET /api/status`.
///
/// Unlike the other endpoints there is no `success` flag; every field is
/// optional on the wire and defaults to "nothing happening".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub recording: bool,
    #[serde(default)]
    pub current_symbol: Option<String>,
    #[serde(default)]
    pub last_update: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_symbol_and_missing_fields_decode() {
        let s: StatusReport =
            serde_json::from_str(r#"{"connected":true,"current_symbol":null}"#).unwrap();
        assert!(s.connected);
        assert!(!s.recording);
        assert_eq!(s.current_symbol, None);
        assert_eq!(s.last_update, None);
    }
}

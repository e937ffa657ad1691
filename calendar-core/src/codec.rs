use crate::model::BoardState;

/// Serialize a board into the compact URL-safe share code.
///
/// The JSON form is run through the lz-string URI-component variant, whose
/// output alphabet needs no escaping inside a URL path segment. A
/// serialization failure degrades to an empty code.
pub fn encode(state: &BoardState) -> String {
    match serde_json::to_string(state) {
        Ok(json) => lz_str::compress_to_encoded_uri_component(json.as_str()),
        Err(_) => String::new(),
    }
}

/// Inverse of [`encode`]. Total: any malformed, truncated or foreign input
/// yields `None` and the caller falls back to defaults.
pub fn decode(code: &str) -> Option<BoardState> {
    if code.is_empty() {
        return None;
    }
    let wide = lz_str::decompress_from_encoded_uri_component(code)?;
    let json = String::from_utf16(&wide).ok()?;
    serde_json::from_str(&json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoardState, DoorPatch, Outline};
    use chrono::NaiveDate;

    fn board() -> BoardState {
        BoardState::default_board(NaiveDate::from_ymd_opt(2026, 11, 30).unwrap())
    }

    #[test]
    fn round_trip_default_board() {
        let state = board();
        let code = encode(&state);
        assert!(!code.is_empty());
        assert_eq!(decode(&code), Some(state));
    }

    #[test]
    fn round_trip_preserves_order_and_edits() {
        let mut state = board();
        state.doors.swap(0, 23);
        state.name = "Jul 🎄".to_string();
        state.bg = Some("blob:abc123".to_string());
        state.patch(
            5,
            DoorPatch {
                content: Some("<b>Grüße</b> 🎁".to_string()),
                outline: Some(Outline::Glow),
                x: Some(311.5),
                ..Default::default()
            },
        );
        let decoded = decode(&encode(&state)).unwrap();
        assert_eq!(decoded, state);
        assert_eq!(decoded.doors[0].id, 24);
    }

    #[test]
    fn round_trip_zero_doors_no_background() {
        let state = BoardState {
            doors: Vec::new(),
            bg: None,
            name: String::new(),
        };
        assert_eq!(decode(&encode(&state)), Some(state));
    }

    #[test]
    fn open_flag_is_not_persisted() {
        let mut state = board();
        state.doors[0].open = true;
        let decoded = decode(&encode(&state)).unwrap();
        assert!(!decoded.doors[0].open);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("not-a-real-code"), None);
        assert_eq!(decode("!!!%%%"), None);
    }

    #[test]
    fn decode_rejects_truncated_code() {
        let code = encode(&board());
        let truncated = &code[..code.len() / 2];
        assert_eq!(decode(truncated), None);
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        // a valid compressed payload that is JSON but not a board
        let code = lz_str::compress_to_encoded_uri_component("{\"pieces\":[]}");
        assert_eq!(decode(&code), None);
    }

    #[test]
    fn code_is_url_path_safe() {
        let mut state = board();
        state.name = "spaces & <markup> / slashes?".to_string();
        let code = encode(&state);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_alphanumeric() || "+-$".contains(c))
        );
    }
}

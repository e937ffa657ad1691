use crate::codec;
use crate::model::BoardState;

const EDIT_SEGMENT: &str = "editmode";
const EDIT_DEFAULTS: &str = "edit";

/// Result of interpreting the startup location path. `state: None` means
/// "nothing usable, caller substitutes the default board".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hydration {
    pub state: Option<BoardState>,
    pub edit_mode: bool,
}

/// Interpret a location path: `/<code>` loads view mode,
/// `/editmode/<code>` loads edit mode, a bare `/edit` or `/editmode`
/// opens the editor on defaults. Malformed or absent codes hydrate to
/// defaults.
pub fn parse_path(path: &str) -> Hydration {
    let path = path.trim_start_matches('/');
    if path == EDIT_DEFAULTS || path == EDIT_SEGMENT {
        return Hydration {
            state: None,
            edit_mode: true,
        };
    }
    if let Some(code) = path
        .strip_prefix(EDIT_SEGMENT)
        .and_then(|rest| rest.strip_prefix('/'))
    {
        return Hydration {
            state: codec::decode(code),
            edit_mode: true,
        };
    }
    Hydration {
        state: codec::decode(path),
        edit_mode: false,
    }
}

/// Path string embedding the current state, ready to copy and share.
pub fn export_path(state: &BoardState, edit: bool) -> String {
    let code = codec::encode(state);
    if edit {
        format!("/{EDIT_SEGMENT}/{code}")
    } else {
        format!("/{code}")
    }
}

/// Rehydrate from a raw pasted code (not a full path).
pub fn import_code(code: &str) -> Option<BoardState> {
    codec::decode(code.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DoorPatch;
    use chrono::NaiveDate;

    fn board() -> BoardState {
        BoardState::default_board(NaiveDate::from_ymd_opt(2026, 12, 1).unwrap())
    }

    #[test]
    fn view_path_round_trip() {
        let state = board();
        let path = export_path(&state, false);
        assert!(!path.starts_with("/editmode/"));
        let hydrated = parse_path(&path);
        assert!(!hydrated.edit_mode);
        assert_eq!(hydrated.state, Some(state));
    }

    #[test]
    fn edit_path_round_trip() {
        let state = board();
        let hydrated = parse_path(&export_path(&state, true));
        assert!(hydrated.edit_mode);
        assert_eq!(hydrated.state, Some(state));
    }

    #[test]
    fn bare_edit_opens_editor_on_defaults() {
        let hydrated = parse_path("/edit");
        assert!(hydrated.edit_mode);
        assert_eq!(hydrated.state, None);
    }

    #[test]
    fn bare_editmode_opens_editor_on_defaults() {
        for path in ["/editmode", "/editmode/"] {
            let hydrated = parse_path(path);
            assert!(hydrated.edit_mode, "{path}");
            assert_eq!(hydrated.state, None, "{path}");
        }
    }

    #[test]
    fn import_without_background_drops_bg_reference() {
        let mut state = board();
        state.bg = Some("blob:old".to_string());
        let exported = {
            let mut s = state.clone();
            s.bg = None;
            export_path(&s, false)
        };
        let imported = parse_path(&exported).state.unwrap();
        assert_eq!(imported.bg, None);
    }

    #[test]
    fn malformed_paths_fall_back() {
        assert_eq!(parse_path("/"), Hydration::default());
        assert_eq!(parse_path(""), Hydration::default());
        assert_eq!(parse_path("/garbage-code"), Hydration::default());
        let h = parse_path("/editmode/garbage");
        assert!(h.edit_mode);
        assert_eq!(h.state, None);
    }

    #[test]
    fn export_import_cycle_preserves_edits() {
        let mut state = board();
        state.patch(
            7,
            DoorPatch {
                color: Some("#123456".to_string()),
                x: Some(900.0),
                y: Some(10.0),
                ..Default::default()
            },
        );
        let path = export_path(&state, false);
        let hydrated = parse_path(&path);
        // view-mode export must not force edit mode on import
        assert!(!hydrated.edit_mode);
        let imported = hydrated.state.unwrap();
        let door = imported.door(7).unwrap();
        assert_eq!(door.color, "#123456");
        assert_eq!((door.x, door.y), (900.0, 10.0));

        // the same code pasted raw imports too
        let code = path.trim_start_matches('/');
        assert_eq!(import_code(code), Some(imported));
    }
}

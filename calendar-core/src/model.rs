use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Number of doors on a freshly created board.
pub const DEFAULT_DOOR_COUNT: u32 = 24;
/// Smallest accepted door edge length in base-space units.
pub const MIN_DOOR_SIZE: f64 = 20.0;

const DEFAULT_DOOR_COLOR: &str = "#09a2e9ff";
const DEFAULT_BOARD_NAME: &str = "My Calendar";

/// Edge the door panel is hinged on for the open animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningSide {
    #[default]
    Right,
    Left,
    Top,
    Bottom,
}

/// Decorative outline drawn on top of the door panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outline {
    None,
    #[default]
    Thin,
    Thick,
    Double,
    Glow,
}

/// One calendar panel. Geometry lives in base space; `open` is session
/// state and is not part of the persisted payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Door {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub color: String,
    pub border_radius: f64,
    pub opening_side: OpeningSide,
    pub outline: Outline,
    /// Window a region of the shared background image instead of a flat fill.
    pub background: bool,
    pub show_number: bool,
    pub closed_label: String,
    pub content: String,
    pub opening_date: NaiveDateTime,
    #[serde(skip)]
    pub open: bool,
}

/// Field-level update for a single door. `None` leaves the field untouched.
#[derive(Clone, Debug, Default)]
pub struct DoorPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub color: Option<String>,
    pub border_radius: Option<f64>,
    pub opening_side: Option<OpeningSide>,
    pub outline: Option<Outline>,
    pub background: Option<bool>,
    pub show_number: Option<bool>,
    pub closed_label: Option<String>,
    pub content: Option<String>,
    pub opening_date: Option<NaiveDateTime>,
    pub open: Option<bool>,
}

/// The full persisted configuration: doors in z-order, an optional
/// background image reference and the calendar display name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    pub doors: Vec<Door>,
    pub bg: Option<String>,
    pub name: String,
}

impl BoardState {
    /// Built-in default: 24 doors laid out six per row, door *k* opening on
    /// December *k* of the given day's year.
    pub fn default_board(today: NaiveDate) -> Self {
        let doors = (0..DEFAULT_DOOR_COUNT)
            .map(|i| {
                let day = i + 1;
                let opening = NaiveDate::from_ymd_opt(today.year(), 12, day)
                    .unwrap_or(today)
                    .and_time(NaiveTime::MIN);
                Door {
                    id: day,
                    x: f64::from(i % 6) * 150.0 + 20.0,
                    y: f64::from(i / 6) * 120.0 + 20.0,
                    w: 120.0,
                    h: 90.0,
                    color: DEFAULT_DOOR_COLOR.to_string(),
                    border_radius: 0.0,
                    opening_side: OpeningSide::Right,
                    outline: Outline::Thin,
                    background: true,
                    show_number: true,
                    closed_label: String::new(),
                    content: day.to_string(),
                    opening_date: opening,
                    open: false,
                }
            })
            .collect();
        BoardState {
            doors,
            bg: None,
            name: DEFAULT_BOARD_NAME.to_string(),
        }
    }

    pub fn door(&self, id: u32) -> Option<&Door> {
        self.doors.iter().find(|d| d.id == id)
    }

    pub fn door_mut(&mut self, id: u32) -> Option<&mut Door> {
        self.doors.iter_mut().find(|d| d.id == id)
    }

    /// Apply a patch to one door. Unknown ids are a no-op. Sizes are clamped
    /// to the minimum edge length and the radius to zero so malformed form
    /// input degrades instead of corrupting geometry.
    pub fn patch(&mut self, id: u32, patch: DoorPatch) {
        let Some(door) = self.door_mut(id) else {
            return;
        };
        if let Some(x) = patch.x {
            door.x = x.max(0.0);
        }
        if let Some(y) = patch.y {
            door.y = y.max(0.0);
        }
        if let Some(w) = patch.w {
            door.w = w.max(MIN_DOOR_SIZE);
        }
        if let Some(h) = patch.h {
            door.h = h.max(MIN_DOOR_SIZE);
        }
        if let Some(color) = patch.color {
            door.color = color;
        }
        if let Some(r) = patch.border_radius {
            door.border_radius = r.max(0.0);
        }
        if let Some(side) = patch.opening_side {
            door.opening_side = side;
        }
        if let Some(outline) = patch.outline {
            door.outline = outline;
        }
        if let Some(background) = patch.background {
            door.background = background;
        }
        if let Some(show) = patch.show_number {
            door.show_number = show;
        }
        if let Some(label) = patch.closed_label {
            door.closed_label = label;
        }
        if let Some(content) = patch.content {
            door.content = content;
        }
        if let Some(date) = patch.opening_date {
            door.opening_date = date;
        }
        if let Some(open) = patch.open {
            door.open = open;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 12, 24).unwrap()
    }

    #[test]
    fn default_board_has_24_sequential_doors() {
        let board = BoardState::default_board(today());
        assert_eq!(board.doors.len(), 24);
        for (i, door) in board.doors.iter().enumerate() {
            assert_eq!(door.id, i as u32 + 1);
            assert_eq!(door.opening_date.date().month(), 12);
            assert_eq!(door.opening_date.date().day(), i as u32 + 1);
            assert!(!door.open);
        }
    }

    #[test]
    fn default_board_grid_layout() {
        let board = BoardState::default_board(today());
        let first = &board.doors[0];
        assert_eq!((first.x, first.y), (20.0, 20.0));
        // seventh door wraps to the second row
        let seventh = &board.doors[6];
        assert_eq!((seventh.x, seventh.y), (20.0, 140.0));
    }

    #[test]
    fn patch_updates_only_named_fields() {
        let mut board = BoardState::default_board(today());
        board.patch(
            3,
            DoorPatch {
                color: Some("#ff0000".to_string()),
                x: Some(42.0),
                ..Default::default()
            },
        );
        let door = board.door(3).unwrap();
        assert_eq!(door.color, "#ff0000");
        assert_eq!(door.x, 42.0);
        assert_eq!(door.w, 120.0);
    }

    #[test]
    fn patch_clamps_sizes_and_radius() {
        let mut board = BoardState::default_board(today());
        board.patch(
            1,
            DoorPatch {
                w: Some(0.0),
                h: Some(-5.0),
                border_radius: Some(-1.0),
                ..Default::default()
            },
        );
        let door = board.door(1).unwrap();
        assert_eq!(door.w, MIN_DOOR_SIZE);
        assert_eq!(door.h, MIN_DOOR_SIZE);
        assert_eq!(door.border_radius, 0.0);
    }

    #[test]
    fn patch_unknown_id_is_a_noop() {
        let mut board = BoardState::default_board(today());
        let before = board.clone();
        board.patch(
            99,
            DoorPatch {
                color: Some("#000".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(board, before);
    }
}

use chrono::NaiveDateTime;

use crate::model::Door;

/// Delay between flipping a door open and surfacing its content, covering
/// the hinge animation (milliseconds).
pub const REVEAL_DELAY_MS: u32 = 700;

/// Time-derived door state. Recomputed against the supplied clock on every
/// evaluation so a door due today unlocks without a reload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorPhase {
    /// Opening date is still in the future.
    Locked,
    /// Unlockable but not yet flipped open.
    Closed,
    /// Flipped open this session.
    Open,
}

pub fn phase(door: &Door, now: NaiveDateTime) -> DoorPhase {
    if now < door.opening_date {
        DoorPhase::Locked
    } else if door.open {
        DoorPhase::Open
    } else {
        DoorPhase::Closed
    }
}

/// What a view-mode click on a door should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Locked; nothing happens.
    Ignored,
    /// Flip open and reveal the content after [`REVEAL_DELAY_MS`].
    Opens,
    /// Already open; reveal the content immediately.
    RevealNow,
}

pub fn view_click(door: &Door, now: NaiveDateTime) -> ClickOutcome {
    match phase(door, now) {
        DoorPhase::Locked => ClickOutcome::Ignored,
        DoorPhase::Closed => ClickOutcome::Opens,
        DoorPhase::Open => ClickOutcome::RevealNow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoardState;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn future_door_stays_locked_regardless_of_clicks() {
        let board = BoardState::default_board(at(2026, 12, 10).date());
        let door = board.door(24).unwrap();
        let now = at(2026, 12, 10);
        for _ in 0..5 {
            assert_eq!(view_click(door, now), ClickOutcome::Ignored);
            assert_eq!(phase(door, now), DoorPhase::Locked);
        }
    }

    #[test]
    fn due_door_opens_then_reveals_immediately() {
        let mut board = BoardState::default_board(at(2026, 12, 24).date());
        let now = at(2026, 12, 24);
        // after all other openings, door 24 waits unopened until clicked
        assert_eq!(phase(board.door(24).unwrap(), now), DoorPhase::Closed);
        assert_eq!(view_click(board.door(24).unwrap(), now), ClickOutcome::Opens);
        board.door_mut(24).unwrap().open = true;
        assert_eq!(
            view_click(board.door(24).unwrap(), now),
            ClickOutcome::RevealNow
        );
    }

    #[test]
    fn unlock_boundary_is_exact_midnight() {
        let board = BoardState::default_board(at(2026, 6, 1).date());
        let door = board.door(1).unwrap();
        let before = NaiveDate::from_ymd_opt(2026, 11, 30)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let midnight = NaiveDate::from_ymd_opt(2026, 12, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(phase(door, before), DoorPhase::Locked);
        assert_eq!(phase(door, midnight), DoorPhase::Closed);
    }
}

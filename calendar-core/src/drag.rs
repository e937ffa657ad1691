use crate::geometry::{Point, Viewport};
use crate::model::Door;

/// Edit-mode drag session for a single door. At most one session exists at
/// a time; constructing a new one supersedes the previous.
#[derive(Clone, Copy, Debug)]
pub struct DragSession {
    pub door_id: u32,
    /// Pointer-to-door offset in base space, fixed at grab time.
    grab_offset: Point,
}

impl DragSession {
    /// Grab a door at the given pointer position (display space).
    pub fn begin(door: &Door, pointer_display: Point, vp: &Viewport) -> Self {
        let pointer = vp.to_base(pointer_display);
        DragSession {
            door_id: door.id,
            grab_offset: Point {
                x: pointer.x - door.x,
                y: pointer.y - door.y,
            },
        }
    }

    /// New base-space door position for the current pointer, clamped so the
    /// door never leaves the non-negative quadrant.
    pub fn update(&self, pointer_display: Point, vp: &Viewport) -> Point {
        let pointer = vp.to_base(pointer_display);
        Point {
            x: (pointer.x - self.grab_offset.x).max(0.0),
            y: (pointer.y - self.grab_offset.y).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoardState, DoorPatch};
    use chrono::NaiveDate;

    fn setup() -> (BoardState, Viewport) {
        let board = BoardState::default_board(NaiveDate::from_ymd_opt(2026, 12, 1).unwrap());
        let vp = Viewport::new(1920.0, 1080.0, 960.0, 540.0);
        (board, vp)
    }

    #[test]
    fn drag_keeps_grab_offset() {
        let (board, vp) = setup();
        let door = board.door(1).unwrap();
        // grab the door center: (20+60, 20+45) base -> display
        let grab = vp.to_display(Point { x: 80.0, y: 65.0 });
        let session = DragSession::begin(door, grab, &vp);
        // move the pointer 100 base units right, 50 down
        let moved = vp.to_display(Point { x: 180.0, y: 115.0 });
        let pos = session.update(moved, &vp);
        assert!((pos.x - 120.0).abs() < 1e-9);
        assert!((pos.y - 70.0).abs() < 1e-9);
    }

    #[test]
    fn drag_clamps_to_origin() {
        let (mut board, vp) = setup();
        let door = board.door(1).unwrap();
        let grab = vp.to_display(Point { x: 80.0, y: 65.0 });
        let session = DragSession::begin(door, grab, &vp);
        let pos = session.update(Point { x: -500.0, y: -500.0 }, &vp);
        assert_eq!((pos.x, pos.y), (0.0, 0.0));
        board.patch(
            session.door_id,
            DoorPatch {
                x: Some(pos.x),
                y: Some(pos.y),
                ..Default::default()
            },
        );
        let door = board.door(1).unwrap();
        assert!(door.x >= 0.0 && door.y >= 0.0);
    }

    #[test]
    fn stationary_pointer_leaves_position_unchanged() {
        let (board, vp) = setup();
        let door = board.door(7).unwrap();
        let grab = vp.to_display(Point {
            x: door.x + 1.0,
            y: door.y + 1.0,
        });
        let session = DragSession::begin(door, grab, &vp);
        let pos = session.update(grab, &vp);
        assert!((pos.x - door.x).abs() < 1e-9);
        assert!((pos.y - door.y).abs() < 1e-9);
    }
}

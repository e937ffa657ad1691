use serde::{Deserialize, Serialize};

use crate::model::Door;

/// Width of the fixed logical canvas all door geometry is stored in.
pub const BASE_WIDTH: f64 = 1920.0;
/// Aspect ratio used while no background image supplies a natural one.
pub const FALLBACK_ASPECT: f64 = 1920.0 / 1080.0;

/// Basic two dimensional point used for geometry operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

/// Base height derived from an aspect ratio; non-finite or non-positive
/// aspects fall back to the 16:9 default.
pub fn base_height(aspect: f64) -> f64 {
    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        FALLBACK_ASPECT
    };
    (BASE_WIDTH / aspect).round()
}

/// Snapshot of the current mapping between base space and the rendered
/// pixel box. Derived on demand, never cached across mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub base_w: f64,
    pub base_h: f64,
    pub display_w: f64,
    pub display_h: f64,
}

impl Viewport {
    pub fn new(base_w: f64, base_h: f64, display_w: f64, display_h: f64) -> Self {
        Viewport {
            base_w,
            base_h,
            display_w,
            display_h,
        }
    }

    /// Scale factor pair mapping base to display. Degenerate inputs yield
    /// a unit scale instead of NaN or infinity.
    pub fn scale(&self) -> (f64, f64) {
        let axis = |base: f64, display: f64| {
            if base > 0.0 && display > 0.0 {
                display / base
            } else {
                1.0
            }
        };
        (
            axis(self.base_w, self.display_w),
            axis(self.base_h, self.display_h),
        )
    }

    pub fn to_display(&self, p: Point) -> Point {
        let (sx, sy) = self.scale();
        Point {
            x: p.x * sx,
            y: p.y * sy,
        }
    }

    pub fn to_base(&self, p: Point) -> Point {
        let (sx, sy) = self.scale();
        Point {
            x: p.x / sx,
            y: p.y / sy,
        }
    }
}

/// Largest box of the given base aspect that fits the available box,
/// rounded to whole pixels and floored at 1x1.
pub fn fit_viewport(base_w: f64, base_h: f64, avail_w: f64, avail_h: f64) -> (f64, f64) {
    if base_w <= 0.0 || base_h <= 0.0 {
        return (1.0, 1.0);
    }
    let scale = (avail_w / base_w).min(avail_h / base_h).max(0.0);
    (
        (base_w * scale).round().max(1.0),
        (base_h * scale).round().max(1.0),
    )
}

/// A door's box in display pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

impl DisplayRect {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left
            && p.x <= self.left + self.width
            && p.y >= self.top
            && p.y <= self.top + self.height
    }
}

/// Project a door's base-space geometry into display space. The corner
/// radius scales with the smaller axis so circles stay circular.
pub fn door_rect(door: &Door, vp: &Viewport) -> DisplayRect {
    let (sx, sy) = vp.scale();
    DisplayRect {
        left: door.x * sx,
        top: door.y * sy,
        width: door.w * sx,
        height: door.h * sy,
        radius: (door.border_radius * sx.min(sy)).max(0.0),
    }
}

/// Offset of the shared background image for a door that windows it.
/// The image itself is sized to the full display box, so shifting it by
/// the door's negated position exposes exactly the region under the door.
pub fn projection_offset(rect: &DisplayRect) -> (f64, f64) {
    (-rect.left, -rect.top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoardState;
    use chrono::NaiveDate;

    #[test]
    fn coordinate_round_trip() {
        let vp = Viewport::new(1920.0, 1080.0, 1280.0, 720.0);
        let p = Point { x: 333.3, y: 777.7 };
        let back = vp.to_base(vp.to_display(p));
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn degenerate_viewport_uses_unit_scale() {
        let vp = Viewport::new(0.0, 1080.0, 0.0, 0.0);
        assert_eq!(vp.scale(), (1.0, 1.0));
        let p = Point { x: 5.0, y: 6.0 };
        assert_eq!(vp.to_display(p), p);
    }

    #[test]
    fn fit_preserves_aspect_and_bounds() {
        let (w, h) = fit_viewport(1920.0, 1080.0, 800.0, 800.0);
        assert!(w <= 800.0 && h <= 800.0);
        let aspect = w / h;
        assert!((aspect - 1920.0 / 1080.0).abs() < 0.01);
    }

    #[test]
    fn fit_never_collapses_to_zero() {
        assert_eq!(fit_viewport(1920.0, 1080.0, 0.0, 0.0), (1.0, 1.0));
        assert_eq!(fit_viewport(0.0, 0.0, 800.0, 600.0), (1.0, 1.0));
    }

    #[test]
    fn base_height_falls_back_on_bad_aspect() {
        assert_eq!(base_height(0.0), 1080.0);
        assert_eq!(base_height(f64::NAN), 1080.0);
        assert_eq!(base_height(2.0), 960.0);
    }

    #[test]
    fn door_rect_and_projection_agree() {
        let today = NaiveDate::from_ymd_opt(2026, 12, 1).unwrap();
        let board = BoardState::default_board(today);
        let vp = Viewport::new(1920.0, 1080.0, 960.0, 540.0);
        let rect = door_rect(&board.doors[0], &vp);
        assert_eq!(rect.left, 10.0);
        assert_eq!(rect.top, 10.0);
        assert_eq!(rect.width, 60.0);
        assert_eq!(projection_offset(&rect), (-10.0, -10.0));
    }
}

/// Presentation tuning constants. Values are display pixels at unit scale
/// unless noted otherwise; the renderer multiplies them by the smaller
/// viewport scale factor.
pub const OUTLINE_THIN_PX: f64 = 2.0;
pub const OUTLINE_THICK_PX: f64 = 6.0;
pub const OUTLINE_DOUBLE_PX: f64 = 4.0;
pub const GLOW_RADIUS_PX: f64 = 12.0;
/// Duration of the hinge fold animation (ms).
pub const FOLD_ANIM_MS: f64 = 650.0;

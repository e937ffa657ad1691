use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

// Non-deprecated helpers to set canvas styles via property assignment.
pub fn set_fill_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(color),
    );
}

pub fn set_stroke_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(color),
    );
}

pub fn set_shadow(ctx: &CanvasRenderingContext2d, color: &str, blur: f64) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("shadowColor"),
        &JsValue::from_str(color),
    );
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("shadowBlur"),
        &JsValue::from_f64(blur),
    );
}

pub fn clear_shadow(ctx: &CanvasRenderingContext2d) {
    set_shadow(ctx, "rgba(0,0,0,0)", 0.0);
}

/// Trace a rounded rectangle path; radius is clamped to half the shorter edge.
pub fn rounded_rect_path(
    ctx: &CanvasRenderingContext2d,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    radius: f64,
) {
    let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    let right = left + width;
    let bottom = top + height;
    ctx.begin_path();
    ctx.move_to(left + r, top);
    let _ = ctx.arc_to(right, top, right, bottom, r);
    let _ = ctx.arc_to(right, bottom, left, bottom, r);
    let _ = ctx.arc_to(left, bottom, left, top, r);
    let _ = ctx.arc_to(left, top, right, top, r);
    ctx.close_path();
}

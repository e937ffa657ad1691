use crate::canvas::{
    clear_shadow, rounded_rect_path, set_fill_style, set_shadow, set_stroke_style,
};
use crate::constants::{
    FOLD_ANIM_MS, GLOW_RADIUS_PX, OUTLINE_DOUBLE_PX, OUTLINE_THICK_PX, OUTLINE_THIN_PX,
};
use crate::state::State;
use crate::utils::now_local;
use calendar_core::geometry::{DisplayRect, door_rect, projection_offset};
use calendar_core::model::{Door, OpeningSide, Outline};
use calendar_core::unlock::{self, DoorPhase};

/// Render one frame: board background, then every door in registry order.
pub fn draw(state: &mut State) {
    sync_canvas_size(state);
    let (w, h) = (state.display.0, state.display.1);
    state.ctx.clear_rect(0.0, 0.0, w, h);

    if let Some(img) = &state.bg_image {
        let _ = state
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, w, h);
    } else {
        set_fill_style(&state.ctx, "#10141f");
        state.ctx.fill_rect(0.0, 0.0, w, h);
    }

    let vp = state.viewport();
    let now = now_local();
    let anim_now = js_sys::Date::now();
    for door in &state.board.doors {
        let rect = door_rect(door, &vp);
        let fold = fold_progress(state, door, anim_now);
        draw_door(state, door, &rect, fold, now);
        if state.edit_mode && state.selected == Some(door.id) {
            draw_selection(state, &rect);
        }
    }
}

/// Keep the canvas backing store in sync with the fitted display box.
fn sync_canvas_size(state: &State) {
    let target_w = state.display.0.round().max(1.0) as u32;
    let target_h = state.display.1.round().max(1.0) as u32;
    if state.canvas.width() != target_w {
        state.canvas.set_width(target_w);
    }
    if state.canvas.height() != target_h {
        state.canvas.set_height(target_h);
    }
}

/// 0.0 = fully closed panel, 1.0 = fully folded away.
fn fold_progress(state: &State, door: &Door, anim_now: f64) -> f64 {
    if let Some(anim) = &state.opening_anim
        && anim.door_id == door.id
    {
        return ((anim_now - anim.started) / FOLD_ANIM_MS).clamp(0.0, 1.0);
    }
    if door.open { 1.0 } else { 0.0 }
}

fn draw_door(state: &State, door: &Door, rect: &DisplayRect, fold: f64, now: chrono::NaiveDateTime) {
    let ctx = &state.ctx;

    // recess behind the panel, visible once the panel starts folding
    if fold > 0.0 {
        ctx.save();
        rounded_rect_path(ctx, rect.left, rect.top, rect.width, rect.height, rect.radius);
        let _ = ctx.clip();
        set_fill_style(ctx, "#14101a");
        ctx.fill_rect(rect.left, rect.top, rect.width, rect.height);
        ctx.restore();
    }

    if fold < 1.0 {
        ctx.save();
        apply_fold_transform(ctx, door.opening_side, rect, fold);
        rounded_rect_path(ctx, rect.left, rect.top, rect.width, rect.height, rect.radius);
        let _ = ctx.clip();
        if door.background && state.bg_image.is_some() {
            // the shared image is sized to the full display box for every
            // door, so each panel windows its own region of one backdrop
            let (ox, oy) = projection_offset(rect);
            if let Some(img) = &state.bg_image {
                let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    rect.left + ox,
                    rect.top + oy,
                    state.display.0,
                    state.display.1,
                );
            }
        } else {
            set_fill_style(ctx, &door.color);
            ctx.fill_rect(rect.left, rect.top, rect.width, rect.height);
        }
        draw_label(state, door, rect, now);
        ctx.restore();
    }

    draw_outline(state, door, rect);
}

/// Collapse the panel toward its hinge edge as `fold` goes to 1.
fn apply_fold_transform(
    ctx: &web_sys::CanvasRenderingContext2d,
    side: OpeningSide,
    rect: &DisplayRect,
    fold: f64,
) {
    if fold <= 0.0 {
        return;
    }
    let remain = (1.0 - fold).max(0.001);
    let (px, py, sx, sy) = match side {
        OpeningSide::Right => (rect.left + rect.width, rect.top, remain, 1.0),
        OpeningSide::Left => (rect.left, rect.top, remain, 1.0),
        OpeningSide::Top => (rect.left, rect.top, 1.0, remain),
        OpeningSide::Bottom => (rect.left, rect.top + rect.height, 1.0, remain),
    };
    let _ = ctx.translate(px, py);
    let _ = ctx.scale(sx, sy);
    let _ = ctx.translate(-px, -py);
}

fn draw_label(state: &State, door: &Door, rect: &DisplayRect, now: chrono::NaiveDateTime) {
    let text = if door.show_number {
        door.id.to_string()
    } else {
        door.closed_label.clone()
    };
    if text.is_empty() {
        return;
    }
    let ctx = &state.ctx;
    let (sx, sy) = state.viewport().scale();
    let size = (24.0 * sx.min(sy)).clamp(10.0, 40.0);
    ctx.set_font(&format!("bold {size}px sans-serif"));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    if unlock::phase(door, now) == DoorPhase::Locked {
        ctx.set_global_alpha(0.55);
    }
    let cx = rect.left + rect.width / 2.0;
    let cy = rect.top + rect.height / 2.0;
    ctx.set_line_width((size / 6.0).clamp(1.5, 4.0));
    set_stroke_style(ctx, "rgba(0,0,0,0.5)");
    let _ = ctx.stroke_text(&text, cx, cy);
    set_fill_style(ctx, "#fff");
    let _ = ctx.fill_text(&text, cx, cy);
    ctx.set_global_alpha(1.0);
}

/// Outline overlay; sits on top of the panel and never affects the
/// background projection.
fn draw_outline(state: &State, door: &Door, rect: &DisplayRect) {
    let ctx = &state.ctx;
    let (sx, sy) = state.viewport().scale();
    let smin = sx.min(sy);
    rounded_rect_path(ctx, rect.left, rect.top, rect.width, rect.height, rect.radius);
    match door.outline {
        Outline::None => {}
        Outline::Thin => {
            ctx.set_line_width((OUTLINE_THIN_PX * smin).max(1.0));
            set_stroke_style(ctx, "rgba(255,255,255,0.9)");
            ctx.stroke();
        }
        Outline::Thick => {
            ctx.set_line_width((OUTLINE_THICK_PX * smin).max(2.0));
            set_stroke_style(ctx, "rgba(0,0,0,0.18)");
            ctx.stroke();
        }
        Outline::Double => {
            let width = (OUTLINE_DOUBLE_PX * smin).max(2.0);
            ctx.set_line_width(width / 3.0);
            set_stroke_style(ctx, "rgba(255,255,255,0.8)");
            ctx.stroke();
            rounded_rect_path(
                ctx,
                rect.left + width,
                rect.top + width,
                (rect.width - 2.0 * width).max(1.0),
                (rect.height - 2.0 * width).max(1.0),
                (rect.radius - width).max(0.0),
            );
            ctx.stroke();
        }
        Outline::Glow => {
            set_shadow(ctx, "rgba(255,255,255,0.6)", (GLOW_RADIUS_PX * smin).max(6.0));
            ctx.set_line_width((OUTLINE_THIN_PX * smin).max(1.0));
            set_stroke_style(ctx, "rgba(255,255,255,0.7)");
            ctx.stroke();
            clear_shadow(ctx);
        }
    }
}

fn draw_selection(state: &State, rect: &DisplayRect) {
    let ctx = &state.ctx;
    let dash = js_sys::Array::of2(&6.0.into(), &4.0.into());
    let _ = ctx.set_line_dash(&dash);
    ctx.set_line_width(2.0);
    set_stroke_style(ctx, "#ffd54a");
    rounded_rect_path(
        ctx,
        rect.left - 3.0,
        rect.top - 3.0,
        rect.width + 6.0,
        rect.height + 6.0,
        rect.radius,
    );
    ctx.stroke();
    let _ = ctx.set_line_dash(&js_sys::Array::new());
}

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, MouseEvent};

use calendar_core::drag::DragSession;
use calendar_core::geometry::{Point, door_rect, fit_viewport};
use calendar_core::model::{BoardState, DoorPatch};
use calendar_core::share;
use calendar_core::unlock::{self, ClickOutcome, REVEAL_DELAY_MS};

mod canvas;
mod constants;
mod render;
mod sidebar;
mod state;
mod upload;
mod utils;

use constants::FOLD_ANIM_MS;
use render::draw;
use state::{OpeningAnim, STATE, State};
use utils::{event_canvas_coords, log, now_local, today_local};

fn init_canvas(
    document: &Document,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let cv = document
        .get_element_by_id("board")
        .ok_or_else(|| JsValue::from_str("canvas #board not found"))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = cv
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((cv, ctx))
}

/// Recompute the display box by fitting the base aspect into the window.
pub(crate) fn measure(state: &mut State) {
    let (bw, bh) = state.base_size();
    let avail_w = state
        .window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(bw);
    let avail_h = state
        .window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(bh);
    state.display = fit_viewport(bw, bh, avail_w, avail_h);
}

/// Topmost door under the pointer; doors later in registry order win.
fn hit_test(state: &State, p: Point) -> Option<u32> {
    let vp = state.viewport();
    state
        .board
        .doors
        .iter()
        .rev()
        .find(|d| door_rect(d, &vp).contains(p))
        .map(|d| d.id)
}

fn show_modal(document: &Document, content: &str) {
    let Some(modal) = document
        .get_element_by_id("modal")
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    if let Some(body) = document
        .get_element_by_id("modalContent")
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    {
        // markup content renders as markup, everything else as plain text
        if content.trim_start().starts_with('<') {
            body.set_inner_html(content);
        } else {
            body.set_inner_text(content);
        }
    }
    let _ = modal.style().set_property("display", "flex");
}

fn hide_modal(document: &Document) {
    if let Some(modal) = document
        .get_element_by_id("modal")
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    {
        let _ = modal.style().set_property("display", "none");
    }
}

/// Cancel any scheduled reveal so it cannot fire on stale state.
fn cancel_pending_reveal(state: &mut State) {
    if let Some(handle) = state.pending_reveal.take() {
        state.window.clear_timeout_with_handle(handle);
    }
}

/// Surface the door's content after the hinge animation has settled.
fn schedule_reveal(state_rc: Rc<RefCell<State>>, door_id: u32) {
    let mut s = state_rc.borrow_mut();
    cancel_pending_reveal(&mut s);
    let window = s.window.clone();
    let st = state_rc.clone();
    let on_fire = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        let content = {
            let mut s = st.borrow_mut();
            s.pending_reveal = None;
            s.board.door(door_id).map(|d| d.content.clone())
        };
        if let Some(content) = content {
            show_modal(&st.borrow().document, &content);
        }
    }));
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        on_fire.as_ref().unchecked_ref(),
        REVEAL_DELAY_MS as i32,
    ) {
        Ok(handle) => s.pending_reveal = Some(handle),
        Err(e) => log(&format!("could not schedule reveal: {e:?}")),
    }
    on_fire.forget();
}

/// View-mode click on a door: run the unlock evaluator and act on it.
fn click_door(state_rc: Rc<RefCell<State>>, door_id: u32) {
    let outcome = {
        let s = state_rc.borrow();
        let now = now_local();
        s.board.door(door_id).map(|d| unlock::view_click(d, now))
    };
    match outcome {
        Some(ClickOutcome::Opens) => {
            {
                let mut s = state_rc.borrow_mut();
                s.board.patch(
                    door_id,
                    DoorPatch {
                        open: Some(true),
                        ..Default::default()
                    },
                );
                s.opening_anim = Some(OpeningAnim {
                    door_id,
                    started: js_sys::Date::now(),
                });
                draw(&mut s);
            }
            schedule_reveal(state_rc, door_id);
        }
        Some(ClickOutcome::RevealNow) => {
            let s = state_rc.borrow();
            if let Some(door) = s.board.door(door_id) {
                show_modal(&s.document, &door.content);
            }
        }
        Some(ClickOutcome::Ignored) | None => {}
    }
}

/// Replace the board from a pasted code. Malformed codes leave everything
/// untouched; a successful import tears down session state first so no
/// stale reveal or drag survives.
pub(crate) fn import_board(state_rc: Rc<RefCell<State>>, code: String, edit: bool) {
    let Some(board) = share::import_code(&code) else {
        log("import code did not decode; keeping current board");
        return;
    };
    let bg = board.bg.clone();
    {
        let mut s = state_rc.borrow_mut();
        cancel_pending_reveal(&mut s);
        s.opening_anim = None;
        s.drag = None;
        s.selected = None;
        s.board = board;
        if edit {
            s.edit_mode = true;
        }
        // a board without a background must not keep projecting the old one
        if bg.is_none() {
            upload::clear_background(&mut s);
        }
        measure(&mut s);
        draw(&mut s);
        sidebar::populate_board_dom(&s);
        sidebar::apply_sidebar_visibility(&s);
        hide_modal(&s.document);
    }
    if let Some(src) = bg {
        upload::load_background(state_rc, src, false);
    }
}

fn attach_mouse(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    // mousedown grabs a door in edit mode and selects it for editing
    {
        let st = state.clone();
        let mousedown = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            if !s.edit_mode {
                return;
            }
            let p = event_canvas_coords(&e, &s.canvas);
            if let Some(id) = hit_test(&s, p) {
                let vp = s.viewport();
                // a new session implicitly supersedes any prior one
                let session = s.board.door(id).map(|door| DragSession::begin(door, p, &vp));
                s.drag = session;
                s.selected = Some(id);
                sidebar::update_door_panel_dom(&s);
                draw(&mut s);
            }
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())?;
        mousedown.forget();
    }
    {
        let st = state.clone();
        let mousemove = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            let Some(session) = s.drag else {
                return;
            };
            let p = event_canvas_coords(&e, &s.canvas);
            let pos = session.update(p, &s.viewport());
            s.board.patch(
                session.door_id,
                DoorPatch {
                    x: Some(pos.x),
                    y: Some(pos.y),
                    ..Default::default()
                },
            );
            draw(&mut s);
        }));
        state
            .borrow()
            .window
            .add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;
        mousemove.forget();
    }
    {
        let st = state.clone();
        let mouseup = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_e: MouseEvent| {
            let mut s = st.borrow_mut();
            if s.drag.take().is_some() {
                sidebar::update_share_dom(&s);
            }
        }));
        state
            .borrow()
            .window
            .add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())?;
        mouseup.forget();
    }
    // clicks only unlock in view mode; edit-mode clicks were handled above
    {
        let st = state.clone();
        let click = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let hit = {
                let s = st.borrow();
                if s.edit_mode {
                    None
                } else {
                    hit_test(&s, event_canvas_coords(&e, &s.canvas))
                }
            };
            if let Some(id) = hit {
                click_door(st.clone(), id);
            }
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        click.forget();
    }
    Ok(())
}

/// Coalesce resize bursts through rAF so geometry recomputes at most once
/// per paint; the last measurement before the next paint wins.
fn attach_resize(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let st = state.clone();
    let on_frame = Closure::<dyn FnMut(f64)>::wrap(Box::new(move |_ts: f64| {
        let mut s = st.borrow_mut();
        s.resize_raf = None;
        measure(&mut s);
        draw(&mut s);
    }));
    let st = state.clone();
    let onresize = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        let window = st.borrow().window.clone();
        if let Some(handle) = st.borrow_mut().resize_raf.take() {
            let _ = window.cancel_animation_frame(handle);
        }
        if let Ok(handle) = window.request_animation_frame(on_frame.as_ref().unchecked_ref()) {
            st.borrow_mut().resize_raf = Some(handle);
        }
    }));
    state
        .borrow()
        .window
        .add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
    onresize.forget();
    Ok(())
}

fn attach_modal(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();
    if let Some(btn) = doc
        .get_element_by_id("modalClose")
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    {
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            hide_modal(&st.borrow().document);
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }
    // backdrop click closes; clicks inside the content box do not
    if let Some(backdrop) = doc
        .get_element_by_id("modal")
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    {
        let st = state.clone();
        let onclick = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let on_backdrop = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlElement>().ok())
                .is_some_and(|t| t.id() == "modal");
            if on_backdrop {
                hide_modal(&st.borrow().document);
            }
        }));
        backdrop.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }
    Ok(())
}

/// rAF loop driving the hinge fold animation; idle frames draw nothing.
fn start_animation(state: Rc<RefCell<State>>) {
    type RafClosure = Closure<dyn FnMut(f64)>;
    let f: Rc<RefCell<Option<RafClosure>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        {
            let mut s = state.borrow_mut();
            if let Some(anim) = s.opening_anim {
                if js_sys::Date::now() - anim.started >= FOLD_ANIM_MS {
                    s.opening_anim = None;
                }
                draw(&mut s);
            }
        }
        let _ = web_sys::window()
            .unwrap()
            .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }) as Box<dyn FnMut(f64)>));
    let _ = web_sys::window()
        .unwrap()
        .request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
}

fn attach_ui(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    upload::attach_bg_input(state.clone())?;
    sidebar::attach_sidebar(state.clone())?;
    attach_mouse(state.clone())?;
    attach_resize(state.clone())?;
    attach_modal(state)?;
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let (canvas, ctx) = init_canvas(&document)?;

    // the location path is the only state source at startup
    let path = window.location().pathname().unwrap_or_default();
    let hydration = share::parse_path(&utils::decode_path(&path));
    let board = hydration
        .state
        .unwrap_or_else(|| BoardState::default_board(today_local()));
    let bg = board.bg.clone();

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        canvas,
        ctx,
        board,
        edit_mode: hydration.edit_mode,
        selected: None,
        bg_image: None,
        bg_url: None,
        bg_aspect: None,
        display: (1.0, 1.0),
        drag: None,
        pending_reveal: None,
        opening_anim: None,
        resize_raf: None,
    }));
    STATE.with(|st| st.replace(Some(state.clone())));

    attach_ui(state.clone())?;
    {
        let mut s = state.borrow_mut();
        measure(&mut s);
        sidebar::populate_board_dom(&s);
        sidebar::apply_sidebar_visibility(&s);
        draw(&mut s);
    }
    if let Some(src) = bg {
        upload::load_background(state.clone(), src, false);
    }
    start_animation(state);
    Ok(())
}

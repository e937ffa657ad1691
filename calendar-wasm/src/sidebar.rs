use std::cell::RefCell;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveTime};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlInputElement, HtmlSelectElement, KeyboardEvent};

use crate::render::draw;
use crate::state::State;
use calendar_core::model::{DoorPatch, MIN_DOOR_SIZE, OpeningSide, Outline};
use calendar_core::share;

fn input(doc: &Document, id: &str) -> Option<HtmlInputElement> {
    doc.get_element_by_id(id)?.dyn_into().ok()
}

fn select(doc: &Document, id: &str) -> Option<HtmlSelectElement> {
    doc.get_element_by_id(id)?.dyn_into().ok()
}

fn element(doc: &Document, id: &str) -> Option<HtmlElement> {
    doc.get_element_by_id(id)?.dyn_into().ok()
}

fn outline_from(v: &str) -> Outline {
    match v {
        "none" => Outline::None,
        "thick" => Outline::Thick,
        "double" => Outline::Double,
        "glow" => Outline::Glow,
        _ => Outline::Thin,
    }
}

fn outline_value(o: Outline) -> &'static str {
    match o {
        Outline::None => "none",
        Outline::Thin => "thin",
        Outline::Thick => "thick",
        Outline::Double => "double",
        Outline::Glow => "glow",
    }
}

fn side_from(v: &str) -> OpeningSide {
    match v {
        "left" => OpeningSide::Left,
        "top" => OpeningSide::Top,
        "bottom" => OpeningSide::Bottom,
        _ => OpeningSide::Right,
    }
}

fn side_value(s: OpeningSide) -> &'static str {
    match s {
        OpeningSide::Right => "right",
        OpeningSide::Left => "left",
        OpeningSide::Top => "top",
        OpeningSide::Bottom => "bottom",
    }
}

/// Apply a patch to the currently selected door and refresh the frame and
/// share codes. No-op outside an active selection.
fn patch_selected(state: &Rc<RefCell<State>>, patch: DoorPatch) {
    let mut s = state.borrow_mut();
    let Some(id) = s.selected else {
        return;
    };
    s.board.patch(id, patch);
    draw(&mut s);
    update_share_dom(&s);
}

fn wire_door_text(
    state: &Rc<RefCell<State>>,
    doc: &Document,
    id: &str,
    make: impl Fn(String) -> DoorPatch + 'static,
) {
    let Some(field) = input(doc, id) else {
        return;
    };
    let field_read = field.clone();
    let st = state.clone();
    let oninput = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        patch_selected(&st, make(field_read.value()));
    }));
    field.set_oninput(Some(oninput.as_ref().unchecked_ref()));
    oninput.forget();
}

fn wire_door_checkbox(
    state: &Rc<RefCell<State>>,
    doc: &Document,
    id: &str,
    make: impl Fn(bool) -> DoorPatch + 'static,
) {
    let Some(field) = input(doc, id) else {
        return;
    };
    let field_read = field.clone();
    let st = state.clone();
    let onchange = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        patch_selected(&st, make(field_read.checked()));
    }));
    field.set_onchange(Some(onchange.as_ref().unchecked_ref()));
    onchange.forget();
}

fn wire_door_select(
    state: &Rc<RefCell<State>>,
    doc: &Document,
    id: &str,
    make: impl Fn(String) -> DoorPatch + 'static,
) {
    let Some(field) = select(doc, id) else {
        return;
    };
    let field_read = field.clone();
    let st = state.clone();
    let onchange = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        patch_selected(&st, make(field_read.value()));
    }));
    field.set_onchange(Some(onchange.as_ref().unchecked_ref()));
    onchange.forget();
}

pub fn attach_sidebar(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();

    // Calendar name feeds the share payload directly.
    if let Some(name) = input(&doc, "calendarName") {
        let name_read = name.clone();
        let st = state.clone();
        let oninput = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            s.board.name = name_read.value();
            update_share_dom(&s);
        }));
        name.set_oninput(Some(oninput.as_ref().unchecked_ref()));
        oninput.forget();
    }

    // Pasted code imports on Enter and switches to edit mode.
    if let Some(import) = input(&doc, "importCode") {
        let import_read = import.clone();
        let st = state.clone();
        let onkeydown = Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(
            move |e: KeyboardEvent| {
                if e.key() == "Enter" {
                    crate::import_board(st.clone(), import_read.value(), true);
                }
            },
        ));
        import.set_onkeydown(Some(onkeydown.as_ref().unchecked_ref()));
        onkeydown.forget();
    }

    wire_door_text(&state, &doc, "doorContent", |v| DoorPatch {
        content: Some(v),
        ..Default::default()
    });
    wire_door_text(&state, &doc, "doorClosedLabel", |v| DoorPatch {
        closed_label: Some(v),
        ..Default::default()
    });
    wire_door_checkbox(&state, &doc, "doorShowNumber", |v| DoorPatch {
        show_number: Some(v),
        ..Default::default()
    });
    wire_door_text(&state, &doc, "doorColor", |v| DoorPatch {
        color: Some(v),
        ..Default::default()
    });
    wire_door_text(&state, &doc, "doorDate", |v| {
        match NaiveDate::parse_from_str(&v, "%Y-%m-%d") {
            Ok(date) => DoorPatch {
                opening_date: Some(date.and_time(NaiveTime::MIN)),
                ..Default::default()
            },
            Err(_) => DoorPatch::default(),
        }
    });
    wire_door_text(&state, &doc, "doorRadius", |v| DoorPatch {
        border_radius: Some(v.parse().unwrap_or(0.0)),
        ..Default::default()
    });
    // invalid numeric input clamps to the size floor instead of rejecting
    wire_door_text(&state, &doc, "doorWidth", |v| DoorPatch {
        w: Some(v.parse().unwrap_or(MIN_DOOR_SIZE)),
        ..Default::default()
    });
    wire_door_text(&state, &doc, "doorHeight", |v| DoorPatch {
        h: Some(v.parse().unwrap_or(MIN_DOOR_SIZE)),
        ..Default::default()
    });
    wire_door_select(&state, &doc, "doorOutline", |v| DoorPatch {
        outline: Some(outline_from(&v)),
        ..Default::default()
    });
    wire_door_select(&state, &doc, "doorSide", |v| DoorPatch {
        opening_side: Some(side_from(&v)),
        ..Default::default()
    });
    wire_door_checkbox(&state, &doc, "doorProjected", |v| DoorPatch {
        background: Some(v),
        ..Default::default()
    });

    if let Some(btn) = element(&doc, "closeDoorPanel") {
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            s.selected = None;
            update_door_panel_dom(&s);
            draw(&mut s);
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    Ok(())
}

/// Refresh the read-only share code and edit link fields.
pub fn update_share_dom(state: &State) {
    let doc = &state.document;
    if let Some(field) = input(doc, "shareCode") {
        field.set_value(&share::export_path(&state.board, false));
    }
    if let Some(field) = input(doc, "editLink") {
        field.set_value(&share::export_path(&state.board, true));
    }
}

/// Push board-level values into the sidebar after hydration or import.
pub fn populate_board_dom(state: &State) {
    if let Some(field) = input(&state.document, "calendarName") {
        field.set_value(&state.board.name);
    }
    update_share_dom(state);
    update_door_panel_dom(state);
}

/// Show the per-door editor for the current selection, or hide it.
pub fn update_door_panel_dom(state: &State) {
    let doc = &state.document;
    let Some(panel) = element(doc, "doorPanel") else {
        return;
    };
    let door = state.selected.and_then(|id| state.board.door(id));
    let Some(door) = door else {
        let _ = panel.style().set_property("display", "none");
        return;
    };
    let _ = panel.style().set_property("display", "block");
    if let Some(title) = element(doc, "doorTitle") {
        title.set_inner_text(&format!("Door {} settings", door.id));
    }
    if let Some(f) = input(doc, "doorContent") {
        f.set_value(&door.content);
    }
    if let Some(f) = input(doc, "doorClosedLabel") {
        f.set_value(&door.closed_label);
    }
    if let Some(f) = input(doc, "doorShowNumber") {
        f.set_checked(door.show_number);
    }
    if let Some(f) = input(doc, "doorColor") {
        f.set_value(&door.color);
    }
    if let Some(f) = input(doc, "doorDate") {
        f.set_value(&door.opening_date.date().format("%Y-%m-%d").to_string());
    }
    if let Some(f) = input(doc, "doorRadius") {
        f.set_value(&door.border_radius.to_string());
    }
    if let Some(f) = input(doc, "doorWidth") {
        f.set_value(&door.w.to_string());
    }
    if let Some(f) = input(doc, "doorHeight") {
        f.set_value(&door.h.to_string());
    }
    if let Some(f) = select(doc, "doorOutline") {
        f.set_value(outline_value(door.outline));
    }
    if let Some(f) = select(doc, "doorSide") {
        f.set_value(side_value(door.opening_side));
    }
    if let Some(f) = input(doc, "doorProjected") {
        f.set_checked(door.background);
    }
}

/// The sidebar only exists in edit mode.
pub fn apply_sidebar_visibility(state: &State) {
    if let Some(sidebar) = element(&state.document, "sidebar") {
        let display = if state.edit_mode { "flex" } else { "none" };
        let _ = sidebar.style().set_property("display", display);
    }
}

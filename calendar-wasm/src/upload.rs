use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlImageElement, HtmlInputElement, Url};

use crate::render::draw;
use crate::state::State;
use crate::utils::log;

// Wires up the file input for choosing a background image.
pub fn attach_bg_input(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();
    let Some(input) = doc.get_element_by_id("bgFile") else {
        return Ok(());
    };
    let input: HtmlInputElement = input.dyn_into()?;
    let input_for_closure = input.clone();
    let st = state.clone();
    let onchange = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_e: Event| {
        let Some(files) = input_for_closure.files() else {
            return;
        };
        let Some(file) = files.item(0) else {
            return;
        };
        // Object URL instead of a base64 blob so decoding stays off the
        // interaction path.
        match Url::create_object_url_with_blob(&file) {
            Ok(url) => load_background(st.clone(), url, true),
            Err(e) => log(&format!("could not create object URL: {e:?}")),
        }
    }));
    input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
    onchange.forget();
    Ok(())
}

/// Drop the current background and release its object URL. The viewport
/// aspect falls back to the default on the next measure.
pub fn clear_background(s: &mut State) {
    if let Some(old) = s.bg_url.take() {
        let _ = Url::revoke_object_url(&old);
    }
    s.bg_image = None;
    s.bg_aspect = None;
}

/// Decode an image and swap it into the visible state only once its natural
/// dimensions are known, so layout never flashes with a wrong aspect.
/// `owned` marks an object URL whose lifetime this session manages; a
/// decode failure revokes it and leaves the previous background untouched.
pub fn load_background(state: Rc<RefCell<State>>, src: String, owned: bool) {
    let img = match HtmlImageElement::new() {
        Ok(img) => img,
        Err(e) => {
            if owned {
                let _ = Url::revoke_object_url(&src);
            }
            log(&format!("could not create image element: {e:?}"));
            return;
        }
    };
    img.set_src(&src);
    wasm_bindgen_futures::spawn_local(async move {
        match wasm_bindgen_futures::JsFuture::from(img.decode()).await {
            Ok(_) => {
                let mut s = state.borrow_mut();
                // release the object URL of the image being replaced
                if let Some(old) = s.bg_url.take() {
                    let _ = Url::revoke_object_url(&old);
                }
                let aspect =
                    f64::from(img.natural_width()) / f64::from(img.natural_height()).max(1.0);
                s.bg_aspect = Some(aspect);
                s.bg_image = Some(img);
                s.bg_url = owned.then(|| src.clone());
                s.board.bg = Some(src);
                crate::measure(&mut s);
                draw(&mut s);
                crate::sidebar::update_share_dom(&s);
            }
            Err(_) => {
                if owned {
                    let _ = Url::revoke_object_url(&src);
                }
                log("background image decode failed; keeping previous background");
            }
        }
    });
}

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, Window};

use calendar_core::drag::DragSession;
use calendar_core::geometry::{self, Viewport};
use calendar_core::model::BoardState;

/// A door currently playing its hinge fold animation.
#[derive(Clone, Copy, Debug)]
pub struct OpeningAnim {
    pub door_id: u32,
    /// `Date.now()` at the moment the door was clicked open.
    pub started: f64,
}

/// Global application state stored behind an `Rc<RefCell<_>>` so it can be
/// shared across the WASM callbacks.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub board: BoardState,
    pub edit_mode: bool,
    pub selected: Option<u32>,
    /// Decoded background image, swapped in only once its natural size is known.
    pub bg_image: Option<HtmlImageElement>,
    /// Object URL owned by this session; revoked when replaced or unused.
    pub bg_url: Option<String>,
    pub bg_aspect: Option<f64>,
    /// Current display box from viewport fitting.
    pub display: (f64, f64),
    pub drag: Option<DragSession>,
    /// Handle of the scheduled content reveal, cleared on supersede/teardown.
    pub pending_reveal: Option<i32>,
    pub opening_anim: Option<OpeningAnim>,
    /// rAF handle coalescing resize re-measurement.
    pub resize_raf: Option<i32>,
}

impl State {
    pub fn base_size(&self) -> (f64, f64) {
        let aspect = self.bg_aspect.unwrap_or(geometry::FALLBACK_ASPECT);
        (geometry::BASE_WIDTH, geometry::base_height(aspect))
    }

    /// Current base-to-display mapping, derived on demand.
    pub fn viewport(&self) -> Viewport {
        let (bw, bh) = self.base_size();
        Viewport::new(bw, bh, self.display.0, self.display.1)
    }
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}

//! Host-independent logic for the advent calendar board: the board data
//! model, the compact share-code codec, base/display coordinate mapping,
//! the unlock state machine and the edit-mode drag controller.
//!
//! Nothing here touches the browser; "now", pointer positions and viewport
//! sizes are always inputs, so the whole crate runs under plain `cargo
//! test` off wasm.

pub mod codec;
pub mod drag;
pub mod geometry;
pub mod model;
pub mod share;
pub mod unlock;

pub use drag::DragSession;
pub use geometry::{DisplayRect, Point, Viewport};
pub use model::{BoardState, Door, DoorPatch, OpeningSide, Outline};
pub use share::Hydration;
pub use unlock::{ClickOutcome, DoorPhase};

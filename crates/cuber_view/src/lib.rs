//! Camera and pointer gestures for twisting an NxNxN cube by dragging it.
//!
//! A [`GestureResolver`] receives pointer events, casts them through a
//! [`Viewport`] onto the cube's visible faces, and turns drags into twists of
//! the matching group on a [`cuber_core::Cube`].

mod camera;
mod event;
mod resolver;

pub use camera::{PerspectiveCamera, Viewport};
pub use event::{PointerAction, PointerEvent};
pub use resolver::{DragState, GestureResolver, Holder};

use cuber_math::prelude::*;

/// Kind of pointer input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum PointerAction {
    MouseDown,
    MouseMove,
    MouseUp,
    MouseOut,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    Wheel,
    Hover,
}
impl PointerAction {
    /// Returns whether the action presses the pointer.
    pub fn is_down(self) -> bool {
        matches!(self, Self::MouseDown | Self::TouchStart)
    }
    /// Returns whether the action moves a pressed pointer.
    pub fn is_move(self) -> bool {
        matches!(self, Self::MouseMove | Self::TouchMove)
    }
    /// Returns whether the action releases or cancels the pointer.
    pub fn is_up(self) -> bool {
        matches!(
            self,
            Self::MouseUp | Self::MouseOut | Self::TouchEnd | Self::TouchCancel,
        )
    }
}

/// Pointer input at a screen position, in pixels from the top-left corner of
/// the viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    /// Kind of input.
    pub action: PointerAction,
    /// Screen position of the pointer.
    pub position: Point2<f32>,
}
impl PointerEvent {
    /// Constructs a pointer event.
    pub fn new(action: PointerAction, x: f32, y: f32) -> Self {
        Self {
            action,
            position: Point2::new(x, y),
        }
    }
}

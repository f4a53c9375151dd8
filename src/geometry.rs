//! Basic geometry types plus the captured anchor rectangle that drives a
//! transition.

use std::sync::Arc;

/// A 2D point in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// The size of the screen the transition plays on. Collision bounds and the
/// launch corner are derived from this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Screen corner the element is launched towards during free fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn is_right(&self) -> bool {
        matches!(self, Corner::TopRight | Corner::BottomRight)
    }

    pub fn is_bottom(&self) -> bool {
        matches!(self, Corner::BottomLeft | Corner::BottomRight)
    }
}

/// Callback invoked by the engine when a transition leg completes.
pub type CompletionCallback = Arc<dyn Fn() + Send + Sync>;

/// The measured geometry of a rendered element at one point in time.
///
/// `x`/`y` are local coordinates within the element's parent; `page_x`/`page_y`
/// are absolute screen coordinates. An anchor is captured once and never
/// mutated afterwards.
#[derive(Clone)]
pub struct AnchorGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub page_x: f32,
    pub page_y: f32,
    pub on_complete: Option<CompletionCallback>,
}

impl AnchorGeometry {
    pub fn new(x: f32, y: f32, width: f32, height: f32, page_x: f32, page_y: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            page_x,
            page_y,
            on_complete: None,
        }
    }

    /// Attach a completion callback to this anchor.
    pub fn with_on_complete(mut self, on_complete: CompletionCallback) -> Self {
        self.on_complete = Some(on_complete);
        self
    }

    /// Attach an optional completion callback to this anchor.
    pub fn with_on_complete_opt(mut self, on_complete: Option<CompletionCallback>) -> Self {
        self.on_complete = on_complete;
        self
    }

    /// Absolute screen position of the element's top-left corner.
    pub fn page_pos(&self) -> Point {
        Point::new(self.page_x, self.page_y)
    }
}

impl PartialEq for AnchorGeometry {
    fn eq(&self, other: &Self) -> bool {
        // Callbacks compare by identity: a re-capture always carries a fresh
        // callback allocation and must register as a change.
        let cb_eq = match (&self.on_complete, &other.on_complete) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height
            && self.page_x == other.page_x
            && self.page_y == other.page_y
            && cb_eq
    }
}

impl std::fmt::Debug for AnchorGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnchorGeometry")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("page_x", &self.page_x)
            .field("page_y", &self.page_y)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

//! Carousel inputs and the table that routes them.
//!
//! Every event source the page wires to the carousel is an [`Input`]. The
//! [`route`] function is the single place deciding what each one means:
//!
//! | Input | Route |
//! |-------|-------|
//! | `NextButton` | manual `Next` |
//! | `PrevButton` | manual `Prev` |
//! | `Indicator { index }` | manual `To(index)` |
//! | `Key { ArrowRight }` | manual `Next` |
//! | `Key { ArrowLeft }` | manual `Prev` |
//! | `Key { Other }` | ignored |
//! | `TouchStart { x }` | record swipe origin |
//! | `TouchEnd { x }` | resolve swipe, manual `Next`/`Prev` if past threshold |
//! | `MouseEnter` | pause auto-advance |
//! | `MouseLeave` | resume auto-advance |
//!
//! Inputs are serde-tagged so scripted sessions can be written as JSON:
//! `{"type": "indicator", "index": 2}`.

use serde::{Deserialize, Serialize};

/// Keyboard keys the carousel reacts to. Listening is page-wide, not scoped
/// to carousel focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    #[serde(other)]
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Input {
    NextButton,
    PrevButton,
    Indicator { index: usize },
    Key { key: Key },
    /// Horizontal client coordinate of the first touch point.
    TouchStart { x: f64 },
    /// Horizontal client coordinate of the lifted touch point.
    TouchEnd { x: f64 },
    MouseEnter,
    MouseLeave,
}

/// Slide transition requested by an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Next,
    Prev,
    To(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route {
    /// Transition, then the manual-pause protocol.
    Manual(Nav),
    SwipeStart(f64),
    SwipeEnd(f64),
    /// Stop auto-advance immediately.
    Pause,
    /// Start auto-advance immediately.
    Resume,
    Ignore,
}

impl Route {
    /// Whether the route needs the hover/touch container to exist.
    pub fn needs_container(&self) -> bool {
        matches!(
            self,
            Route::SwipeStart(_) | Route::SwipeEnd(_) | Route::Pause | Route::Resume
        )
    }
}

pub fn route(input: &Input) -> Route {
    match *input {
        Input::NextButton => Route::Manual(Nav::Next),
        Input::PrevButton => Route::Manual(Nav::Prev),
        Input::Indicator { index } => Route::Manual(Nav::To(index)),
        Input::Key { key: Key::ArrowRight } => Route::Manual(Nav::Next),
        Input::Key { key: Key::ArrowLeft } => Route::Manual(Nav::Prev),
        Input::Key { key: Key::Other } => Route::Ignore,
        Input::TouchStart { x } => Route::SwipeStart(x),
        Input::TouchEnd { x } => Route::SwipeEnd(x),
        Input::MouseEnter => Route::Pause,
        Input::MouseLeave => Route::Resume,
    }
}

/// Decide a swipe from `delta = start_x - end_x`.
///
/// Travel must be strictly greater than `threshold`. A finger moving left
/// (positive delta) advances.
pub fn classify_swipe(delta: f64, threshold: f64) -> Option<Nav> {
    if delta.abs() > threshold {
        Some(if delta > 0.0 { Nav::Next } else { Nav::Prev })
    } else {
        None
    }
}

/// Pairs touch starts with touch ends.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
        }
    }

    pub fn begin(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Resolve the gesture. A touch end without a recorded start is dropped.
    pub fn finish(&mut self, end_x: f64) -> Option<Nav> {
        let start_x = self.start_x.take()?;
        classify_swipe(start_x - end_x, self.threshold)
    }

    pub fn in_progress(&self) -> bool {
        self.start_x.is_some()
    }
}

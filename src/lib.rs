//! # Vitrine
//!
//! Interactive behavior for a small business landing page, modelled without a
//! browser. The centerpiece is the services carousel: one service visible at a
//! time, automatic advance every few seconds, and a pause after any manual
//! interaction that lifts on its own.
//!
//! # Architecture
//!
//! Every behavior reads and writes a [`page::Page`] (a minimal element tree
//! with classes, inline styles and attributes) and schedules work on a
//! [`timers::TimerQueue`]:
//!
//! ```text
//! markup  ──►  Page  ◄──  carousel / navbar / scroll / contact
//!                              │
//!                              ▼
//!                         TimerQueue (virtual ms clock)
//! ```
//!
//! [`site::Site`] wires them all onto one page and one clock, like the page
//! script does on load. [`session`] replays scripted visitor input against the
//! carousel alone and records a timeline.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`carousel`] | Slide index, auto-advance and the manual-pause protocol |
//! | [`input`] | Visitor inputs, the input→action routing table, swipe detection |
//! | [`timers`] | Timer queue trait and the virtual-time implementation |
//! | [`page`] | Element tree the behaviors render to |
//! | [`markup`] | Services section HTML (Maud) and the matching element tree |
//! | [`navbar`] | Mobile menu, hide-on-scroll header, frame coalescing |
//! | [`scroll`] | Scroll hint, hero parallax, scroll-up button, anchor offsets |
//! | [`contact`] | WhatsApp link, phone formatting, email shape check |
//! | [`site`] | Page-load wiring of every behavior |
//! | [`session`] | JSON input scripts replayed on virtual time |
//! | [`config`] | `vitrine.toml` loading, validation and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## State Without a Toolkit
//!
//! The carousel never touches a DOM. It renders through
//! [`carousel::CarouselSurface`] and schedules through
//! [`timers::TimerQueue`], both passed into each call. Tests use a recording
//! surface and virtual time, so a 10 second pause is checked in microseconds
//! and timer ordering is exact.
//!
//! ## Wraparound by Euclidean Remainder
//!
//! Any integer slide index is normalized with `rem_euclid`, so `-1` is the
//! last slide and `total` is the first. There are no bounds to check.
//!
//! ## One Pending Resume
//!
//! After a manual interaction auto-advance resumes once the visitor has left
//! the carousel alone for the full delay. A new interaction replaces the
//! pending resume rather than adding another. Set
//! `resume_policy = "stack"` to let every armed resume fire instead.

pub mod carousel;
pub mod config;
pub mod contact;
pub mod input;
pub mod markup;
pub mod navbar;
pub mod output;
pub mod page;
pub mod scroll;
pub mod session;
pub mod site;
pub mod timers;

#[cfg(test)]
pub(crate) mod test_helpers;

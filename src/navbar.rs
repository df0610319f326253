//! Site header: mobile menu and hide-on-scroll.
//!
//! The mobile menu is a plain toggle. Opening it marks `.nav-toggle` and
//! `.nav-menu` active and locks body scrolling; following any `.nav-link`
//! closes it again.
//!
//! The header slides away while reading down and comes back on the way up:
//!
//! | Position | Direction | Header |
//! |----------|-----------|--------|
//! | inside the hero | any | shown |
//! | past `hero + reveal_margin` | down | hidden |
//! | past the hero | up | shown |
//! | otherwise | | unchanged |
//!
//! Scroll events arrive far more often than frames, so handling is coalesced:
//! the first scroll requests a frame, later ones are dropped until it runs,
//! and the frame reads whatever the position is by then.

use crate::config::NavbarConfig;
use crate::page::{ElementRef, Page};
use crate::timers::{Fired, TimerId, TimerKind, TimerQueue};
use tracing::debug;

/// One frame at 60 Hz.
pub const FRAME_MS: u64 = 16;

/// Scroll position and layout sizes as read at frame time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_top: f64,
    pub hero_height: f64,
    /// Height of the visible window.
    pub window_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderChange {
    Show,
    Hide,
    Keep,
}

/// Decide header visibility for a scroll step from `last` to `now`.
pub fn header_change(last: f64, now: f64, hero_height: f64, reveal_margin: f64) -> HeaderChange {
    if now <= hero_height {
        return HeaderChange::Show;
    }
    if now > last && now > hero_height + reveal_margin {
        HeaderChange::Hide
    } else if now < last {
        HeaderChange::Show
    } else {
        HeaderChange::Keep
    }
}

#[derive(Debug)]
pub struct Navbar {
    toggle: Option<ElementRef>,
    menu: Option<ElementRef>,
    header: Option<ElementRef>,
    reveal_margin: f64,
    menu_open: bool,
    last_scroll_top: f64,
    frame: Option<TimerId>,
}

impl Navbar {
    pub fn bind(page: &Page, config: &NavbarConfig) -> Self {
        let navbar = Self {
            toggle: page.first_with_class("nav-toggle"),
            menu: page.first_with_class("nav-menu"),
            header: page.first_with_class("header"),
            reveal_margin: config.reveal_margin_px,
            menu_open: false,
            last_scroll_top: 0.0,
            frame: None,
        };
        debug!(
            menu = navbar.toggle.is_some() && navbar.menu.is_some(),
            header = navbar.header.is_some(),
            "navbar initialized"
        );
        navbar
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Click on `.nav-toggle`. Does nothing unless both toggle and menu exist.
    pub fn toggle_menu(&mut self, page: &mut Page) {
        let (Some(toggle), Some(menu)) = (self.toggle, self.menu) else {
            return;
        };
        self.menu_open = !self.menu_open;
        page.toggle_class(toggle, "active", None);
        page.toggle_class(menu, "active", None);
        let overflow = if self.menu_open { "hidden" } else { "" };
        let body = page.body();
        page.set_style(body, "overflow", overflow);
    }

    /// Click on any `.nav-link`.
    pub fn link_clicked(&mut self, page: &mut Page) {
        if !self.menu_open {
            return;
        }
        if let Some(toggle) = self.toggle {
            page.remove_class(toggle, "active");
        }
        if let Some(menu) = self.menu {
            page.remove_class(menu, "active");
        }
        let body = page.body();
        page.set_style(body, "overflow", "");
        self.menu_open = false;
    }

    /// A scroll event. Requests a frame unless one is already pending.
    pub fn on_scroll<T: TimerQueue>(&mut self, timers: &mut T) {
        if self.frame.is_none() {
            self.frame = Some(timers.set_timeout(TimerKind::Frame, FRAME_MS));
        }
    }

    /// Deliver a fired timer. Returns false if it is not our frame.
    pub fn on_frame(&mut self, fired: Fired, page: &mut Page, viewport: Viewport) -> bool {
        if self.frame != Some(fired.id) {
            return false;
        }
        self.frame = None;
        self.update_header(page, viewport);
        true
    }

    /// Apply one scroll step to the header.
    pub fn update_header(&mut self, page: &mut Page, viewport: Viewport) {
        if let Some(header) = self.header {
            match header_change(
                self.last_scroll_top,
                viewport.scroll_top,
                viewport.hero_height,
                self.reveal_margin,
            ) {
                HeaderChange::Hide => page.add_class(header, "hidden"),
                HeaderChange::Show => page.remove_class(header, "hidden"),
                HeaderChange::Keep => {}
            }
            page.add_class(header, "scrolled");
        }
        self.last_scroll_top = viewport.scroll_top;
    }
}

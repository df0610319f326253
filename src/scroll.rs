//! Scroll-driven effects outside the header.
//!
//! - **Scroll-down hint** (`.scroll-down`): fades out once a fraction of the
//!   hero has scrolled by. Clicking it scrolls to the about section.
//! - **Hero parallax** (`.hero`): translated down by a fixed fraction of the
//!   scroll offset.
//! - **Scroll-up button** (`.scroll-up-btn`): carries `show` past a threshold.
//!   Clicking it scrolls to the top.
//! - **Card reveal** ([`REVEAL_CLASSES`]): cards start transparent and shifted
//!   down, and settle into place the first time enough of them is on screen.
//!   Positions come from [`Page::rect`]; a card without one stays hidden.
//! - **In-page links**: scroll so the target section clears the fixed header.
//!
//! Missing elements simply switch their effect off.

use crate::config::ScrollConfig;
use crate::navbar::Viewport;
use crate::page::{ElementRef, Page, Rect};
use tracing::debug;

/// Id of the section the scroll-down hint leads to.
pub const ABOUT_SECTION_ID: &str = "quienes-somos";

/// Elements that fade in when scrolled into view.
pub const REVEAL_CLASSES: [&str; 4] = ["feature", "service-card", "product-card", "contact-item"];

const HINT_VISIBLE_OPACITY: &str = "0.8";
const REVEAL_TRANSITION: &str = "opacity 0.6s ease-out, transform 0.6s ease-out";

/// Where the page should smoothly scroll to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTarget {
    pub top: f64,
}

pub fn hint_visible(scroll_top: f64, hero_height: f64, fraction: f64) -> bool {
    scroll_top <= hero_height * fraction
}

pub fn parallax_offset(scroll_top: f64, factor: f64) -> f64 {
    scroll_top * factor
}

pub fn scroll_up_visible(scroll_top: f64, threshold: f64) -> bool {
    scroll_top > threshold
}

/// Target for an in-page link, leaving room for the header plus a gap.
pub fn anchor_target(section_top: f64, header_height: f64, gap: f64) -> ScrollTarget {
    ScrollTarget {
        top: section_top - header_height - gap,
    }
}

/// Share of `rect` inside the window, ignoring a `bottom_margin` strip at its
/// bottom edge. A zero-height box counts as fully visible when inside.
pub fn visible_fraction(rect: Rect, viewport: Viewport, bottom_margin: f64) -> f64 {
    let window_top = viewport.scroll_top;
    let window_bottom = viewport.scroll_top + viewport.window_height - bottom_margin;
    if rect.height <= 0.0 {
        let inside = rect.top >= window_top && rect.top <= window_bottom;
        return if inside { 1.0 } else { 0.0 };
    }
    let overlap = rect.bottom().min(window_bottom) - rect.top.max(window_top);
    (overlap / rect.height).clamp(0.0, 1.0)
}

/// Whether a card at `rect` has come into view.
pub fn should_reveal(rect: Rect, viewport: Viewport, threshold: f64, bottom_margin: f64) -> bool {
    let fraction = visible_fraction(rect, viewport, bottom_margin);
    fraction > 0.0 && fraction >= threshold
}

#[derive(Debug)]
pub struct ScrollEffects {
    config: ScrollConfig,
    hint: Option<ElementRef>,
    hero: Option<ElementRef>,
    scroll_up: Option<ElementRef>,
    /// Cards still waiting to be revealed, in document order.
    hidden: Vec<ElementRef>,
}

impl ScrollEffects {
    /// Bind to `page` and put every reveal card in its hidden state.
    pub fn bind(page: &mut Page, config: &ScrollConfig) -> Self {
        let hidden = page.with_any_class(&REVEAL_CLASSES);
        let offset = format!("translateY({}px)", config.reveal_offset_px);
        for &card in &hidden {
            page.set_style(card, "opacity", "0");
            page.set_style(card, "transform", &offset);
            page.set_style(card, "transition", REVEAL_TRANSITION);
        }
        debug!(cards = hidden.len(), "scroll effects initialized");
        Self {
            config: config.clone(),
            hint: page.first_with_class("scroll-down"),
            hero: page.first_with_class("hero"),
            scroll_up: page.first_with_class("scroll-up-btn"),
            hidden,
        }
    }

    /// Cards not revealed yet.
    pub fn hidden_cards(&self) -> &[ElementRef] {
        &self.hidden
    }

    /// Apply every effect for the current scroll position.
    pub fn on_scroll(&mut self, page: &mut Page, viewport: Viewport) {
        if let Some(hint) = self.hint {
            let visible = hint_visible(
                viewport.scroll_top,
                viewport.hero_height,
                self.config.scroll_hint_fraction,
            );
            let (opacity, visibility) = if visible {
                (HINT_VISIBLE_OPACITY, "visible")
            } else {
                ("0", "hidden")
            };
            page.set_style(hint, "opacity", opacity);
            page.set_style(hint, "visibility", visibility);
        }

        if let Some(hero) = self.hero {
            let offset = parallax_offset(viewport.scroll_top, self.config.parallax_factor);
            page.set_style(hero, "transform", &format!("translateY({offset}px)"));
        }

        if let Some(button) = self.scroll_up {
            let show = scroll_up_visible(viewport.scroll_top, self.config.scroll_up_threshold_px);
            page.toggle_class(button, "show", Some(show));
        }

        self.reveal(page, viewport);
    }

    /// Reveal cards that came into view. Revealed cards stay revealed.
    fn reveal(&mut self, page: &mut Page, viewport: Viewport) {
        let threshold = self.config.reveal_threshold;
        let margin = self.config.reveal_bottom_margin_px;
        self.hidden.retain(|&card| {
            let in_view = page
                .rect(card)
                .is_some_and(|rect| should_reveal(rect, viewport, threshold, margin));
            if in_view {
                page.set_style(card, "opacity", "1");
                page.set_style(card, "transform", "translateY(0)");
            }
            !in_view
        });
    }

    /// Click on the scroll-down hint. `None` without a hint or about section.
    pub fn scroll_down_clicked(&self, page: &Page, about_top: f64) -> Option<ScrollTarget> {
        self.hint?;
        page.by_id(ABOUT_SECTION_ID)?;
        Some(ScrollTarget { top: about_top })
    }

    /// Click on the scroll-up button.
    pub fn scroll_up_clicked(&self) -> Option<ScrollTarget> {
        self.scroll_up.map(|_| ScrollTarget { top: 0.0 })
    }

    /// Click on an in-page `#id` link. `None` if the target does not exist.
    pub fn anchor_clicked(
        &self,
        page: &Page,
        href: &str,
        section_top: f64,
        header_height: f64,
    ) -> Option<ScrollTarget> {
        let id = href.strip_prefix('#')?;
        page.by_id(id)?;
        Some(anchor_target(
            section_top,
            header_height,
            self.config.anchor_offset_px,
        ))
    }
}

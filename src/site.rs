//! Page-load wiring for the whole landing page.
//!
//! [`Site::load`] binds every behavior to one [`Page`] and one timer queue,
//! the way the page script does on `DOMContentLoaded`: navbar, scroll
//! effects, the services carousel and the WhatsApp button. A missing element
//! only switches its own behavior off.
//!
//! Events go in through [`Site::dispatch`]; time moves with
//! [`Site::run_until`], which routes each due timer to its owner.

use crate::carousel::PageCarousel;
use crate::config::SiteConfig;
use crate::contact::wire_whatsapp_button;
use crate::input::Input;
use crate::navbar::{Navbar, Viewport};
use crate::page::Page;
use crate::scroll::{ScrollEffects, ScrollTarget};
use crate::timers::{Fired, TimerKind, TimerQueue, VirtualTimers};
use tracing::{info, warn};

/// A visitor action on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteEvent {
    /// Window scrolled to `viewport.scroll_top`.
    Scroll(Viewport),
    MenuToggle,
    NavLinkClick,
    /// Click on the scroll-down hint; `about_top` is the about section's
    /// document offset.
    ScrollDownClick { about_top: f64 },
    ScrollUpClick,
    /// Click on an in-page link such as `#servicios`.
    AnchorClick {
        href: String,
        section_top: f64,
        header_height: f64,
    },
    Carousel(Input),
}

#[derive(Debug)]
pub struct Site {
    page: Page,
    timers: VirtualTimers,
    navbar: Navbar,
    scroll: ScrollEffects,
    carousel: Option<PageCarousel>,
    viewport: Viewport,
}

impl Site {
    pub fn load(mut page: Page, config: &SiteConfig) -> Self {
        let mut timers = VirtualTimers::new();
        let navbar = Navbar::bind(&page, &config.navbar);
        let scroll = ScrollEffects::bind(&mut page, &config.scroll);
        let carousel = PageCarousel::mount(&mut page, &config.carousel, &mut timers);
        match wire_whatsapp_button(&mut page, &config.contact) {
            Ok(wired) => info!(whatsapp = wired, "site ready"),
            Err(e) => warn!("whatsapp link not set: {e}"),
        }
        Self {
            page,
            timers,
            navbar,
            scroll,
            carousel,
            viewport: Viewport::default(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    pub fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    pub fn carousel(&self) -> Option<&PageCarousel> {
        self.carousel.as_ref()
    }

    /// Handle one event at the current time. Clicks that scroll the window
    /// return where to scroll to.
    pub fn dispatch(&mut self, event: SiteEvent) -> Option<ScrollTarget> {
        match event {
            SiteEvent::Scroll(viewport) => {
                self.viewport = viewport;
                self.scroll.on_scroll(&mut self.page, viewport);
                self.navbar.on_scroll(&mut self.timers);
                None
            }
            SiteEvent::MenuToggle => {
                self.navbar.toggle_menu(&mut self.page);
                None
            }
            SiteEvent::NavLinkClick => {
                self.navbar.link_clicked(&mut self.page);
                None
            }
            SiteEvent::ScrollDownClick { about_top } => {
                self.scroll.scroll_down_clicked(&self.page, about_top)
            }
            SiteEvent::ScrollUpClick => self.scroll.scroll_up_clicked(),
            SiteEvent::AnchorClick {
                href,
                section_top,
                header_height,
            } => self
                .scroll
                .anchor_clicked(&self.page, &href, section_top, header_height),
            SiteEvent::Carousel(input) => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.handle(input, &mut self.page, &mut self.timers);
                }
                None
            }
        }
    }

    /// Fire every timer due up to `until_ms`, then park the clock there.
    pub fn run_until(&mut self, until_ms: u64) {
        while let Some(fired) = self.timers.next_due(until_ms) {
            self.fire(fired);
        }
        self.timers.advance_to(until_ms);
    }

    fn fire(&mut self, fired: Fired) {
        match fired.kind {
            TimerKind::Frame => {
                self.navbar.on_frame(fired, &mut self.page, self.viewport);
            }
            TimerKind::AutoAdvance | TimerKind::Resume => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.on_timer(fired, &mut self.page, &mut self.timers);
                }
            }
        }
    }
}

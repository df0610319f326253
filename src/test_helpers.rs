//! Shared test utilities.
//!
//! Page fixtures mirroring the live site's markup, plus a driver that runs a
//! mounted carousel's timers up to a point in virtual time.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut page = services_page();
//! let mut timers = VirtualTimers::new();
//! let mut c = PageCarousel::try_mount(&mut page, &config, &mut timers).unwrap();
//! run_until(&mut c, &mut page, &mut timers, 5_000);
//! assert_eq!(c.carousel.current_slide(), 1);
//! ```

use crate::carousel::PageCarousel;
use crate::markup::{Part, ServicesSection};
use crate::page::Page;
use crate::timers::VirtualTimers;

// =========================================================================
// Page fixtures
// =========================================================================

/// Just the services section, with every part present.
pub fn services_page() -> Page {
    ServicesSection::default().to_page()
}

/// The services section with `parts` left out.
pub fn services_page_without(parts: &[Part]) -> Page {
    parts
        .iter()
        .fold(ServicesSection::default(), |s, part| s.without(*part))
        .to_page()
}

/// The whole landing page: header with mobile menu, hero with scroll hint,
/// about, services and contact sections with their cards, floating buttons.
pub fn site_page() -> Page {
    let mut page = Page::new();
    let body = page.body();

    let header = page.append(body, "header", None, &["header"]);
    page.append(header, "button", None, &["nav-toggle"]);
    let menu = page.append(header, "ul", None, &["nav-menu"]);
    for target in ["#inicio", "#quienes-somos", "#servicios", "#contacto"] {
        let link = page.append(menu, "a", None, &["nav-link"]);
        page.set_attr(link, "href", target);
    }

    let hero = page.append(body, "section", Some("inicio"), &["hero"]);
    page.append(hero, "button", None, &["scroll-down"]);
    let about = page.append(body, "section", Some("quienes-somos"), &["about"]);
    for _ in 0..3 {
        page.append(about, "div", None, &["feature"]);
    }
    ServicesSection::default().append_to(&mut page, body);
    let contact = page.append(body, "section", Some("contacto"), &["contact"]);
    for _ in 0..3 {
        page.append(contact, "div", None, &["contact-item"]);
    }

    page.append(body, "a", None, &["scroll-up-btn"]);
    page.append(body, "a", None, &["whatsapp-btn"]);
    page
}

// =========================================================================
// Timer driving
// =========================================================================

/// Deliver every timer due up to `until_ms`, then park the clock there.
pub fn run_until(
    carousel: &mut PageCarousel,
    page: &mut Page,
    timers: &mut VirtualTimers,
    until_ms: u64,
) {
    while let Some(fired) = timers.next_due(until_ms) {
        carousel.on_timer(fired, page, timers);
    }
    timers.advance_to(until_ms);
}

//! Services section markup.
//!
//! [`ServicesSection`] describes the carousel markup once and produces it two
//! ways: as HTML via [maud](https://maud.lambda.xyz/) for the published page,
//! and as a [`Page`] element tree for the behaviors to bind against. Both come
//! from the same description, so ids and classes cannot drift apart.
//!
//! ```text
//! section#servicios.services
//! ├── div#services-carousel.services-carousel     (hover / touch target)
//! │   ├── button#services-prev.carousel-btn
//! │   ├── div.carousel-viewport
//! │   │   └── div#services-track.carousel-track
//! │   │       └── div.carousel-slide × N
//! │   │           └── div.service-card
//! │   └── button#services-next.carousel-btn
//! └── div#services-indicators.carousel-indicators
//!     └── button.indicator × N                    (first one .active)
//! ```
//!
//! Any part can be left out with [`ServicesSection::without`], which is how
//! degraded pages are exercised.

use crate::carousel::{ACTIVE_CLASS, INDICATOR_CLASS, SLIDE_CLASS};
use crate::config::{AnchorIds, SiteConfig};
use crate::page::{ElementRef, Page};
use maud::{Markup, html};
use serde::Deserialize;

const CARD_CLASS: &str = "service-card";

/// Optional pieces of the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Track,
    PrevButton,
    NextButton,
    Indicators,
    Container,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSlide {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct ServicesSection {
    pub slides: Vec<ServiceSlide>,
    pub anchors: AnchorIds,
    omitted: Vec<Part>,
}

impl Default for ServicesSection {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

/// Blurbs for the stock services, by position.
const DESCRIPTIONS: [&str; 4] = [
    "Extintores certificados para hogares, vehículos y empresas.",
    "Revisión anual y mantención preventiva de sus equipos.",
    "Recarga de extintores de polvo químico seco y CO2.",
    "Orientación para cumplir la normativa de seguridad vigente.",
];

impl ServicesSection {
    /// One slide per configured service.
    pub fn from_config(config: &SiteConfig) -> Self {
        let slides = config
            .contact
            .services
            .iter()
            .enumerate()
            .map(|(i, title)| ServiceSlide {
                title: title.clone(),
                description: DESCRIPTIONS.get(i).copied().unwrap_or_default().to_string(),
            })
            .collect();
        Self {
            slides,
            anchors: config.carousel.anchors.clone(),
            omitted: Vec::new(),
        }
    }

    pub fn without(mut self, part: Part) -> Self {
        if !self.omitted.contains(&part) {
            self.omitted.push(part);
        }
        self
    }

    pub fn has(&self, part: Part) -> bool {
        !self.omitted.contains(&part)
    }

    pub fn render(&self) -> Markup {
        let ids = &self.anchors;
        let track_width = format!("width: {}%", self.slides.len() * 100);
        let inner = html! {
            @if self.has(Part::PrevButton) {
                button
                    id=(ids.prev)
                    class="carousel-btn prev"
                    type="button"
                    aria-label="Anterior"
                {
                    "‹"
                }
            }
            div class="carousel-viewport" {
                @if self.has(Part::Track) {
                    div id=(ids.track) class="carousel-track" style=(track_width) {
                        @for slide in &self.slides {
                            div class=(SLIDE_CLASS) {
                                div class=(CARD_CLASS) {
                                    h3 { (slide.title) }
                                    p { (slide.description) }
                                }
                            }
                        }
                    }
                }
            }
            @if self.has(Part::NextButton) {
                button
                    id=(ids.next)
                    class="carousel-btn next"
                    type="button"
                    aria-label="Siguiente"
                {
                    "›"
                }
            }
        };
        html! {
            section id="servicios" class="services" {
                @if self.has(Part::Container) {
                    div id=(ids.container) class="services-carousel" { (inner) }
                } @else {
                    (inner)
                }
                @if self.has(Part::Indicators) {
                    div id=(ids.indicators) class="carousel-indicators" {
                        @for i in 0..self.slides.len() {
                            button.indicator.active[i == 0] type="button" data-slide=(i) {}
                        }
                    }
                }
            }
        }
    }

    /// Build the element tree matching [`render`](Self::render).
    pub fn to_page(&self) -> Page {
        let mut page = Page::new();
        let body = page.body();
        self.append_to(&mut page, body);
        page
    }

    /// Append the section under `parent` of an existing page.
    pub fn append_to(&self, page: &mut Page, parent: ElementRef) -> ElementRef {
        let ids = &self.anchors;
        let section = page.append(parent, "section", Some("servicios"), &["services"]);
        let frame = if self.has(Part::Container) {
            let id = Some(ids.container.as_str());
            page.append(section, "div", id, &["services-carousel"])
        } else {
            section
        };

        if self.has(Part::PrevButton) {
            let id = Some(ids.prev.as_str());
            page.append(frame, "button", id, &["carousel-btn", "prev"]);
        }
        let viewport = page.append(frame, "div", None, &["carousel-viewport"]);
        if self.has(Part::Track) {
            let id = Some(ids.track.as_str());
            let track = page.append(viewport, "div", id, &["carousel-track"]);
            for _ in &self.slides {
                let slide = page.append(track, "div", None, &[SLIDE_CLASS]);
                page.append(slide, "div", None, &[CARD_CLASS]);
            }
        }
        if self.has(Part::NextButton) {
            let id = Some(ids.next.as_str());
            page.append(frame, "button", id, &["carousel-btn", "next"]);
        }

        if self.has(Part::Indicators) {
            let id = Some(ids.indicators.as_str());
            let list = page.append(section, "div", id, &["carousel-indicators"]);
            for i in 0..self.slides.len() {
                let dot = if i == 0 {
                    page.append(list, "button", None, &[INDICATOR_CLASS, ACTIVE_CLASS])
                } else {
                    page.append(list, "button", None, &[INDICATOR_CLASS])
                };
                page.set_attr(dot, "data-slide", &i.to_string());
            }
        }
        section
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_section_has_four_service_slides() {
        let section = ServicesSection::default();
        assert_eq!(section.slides.len(), 4);
        assert_eq!(section.slides[2].title, "Recarga de extintores");
        assert!(!section.slides[2].description.is_empty());
    }

    #[test]
    fn render_includes_anchor_ids() {
        let html = ServicesSection::default().render().into_string();
        assert!(html.contains(r#"id="services-track""#));
        assert!(html.contains(r#"id="services-prev""#));
        assert!(html.contains(r#"id="services-next""#));
        assert!(html.contains(r#"id="services-indicators""#));
        assert!(html.contains(r#"id="services-carousel""#));
        assert!(html.contains("width: 400%"));
    }

    #[test]
    fn render_marks_only_first_indicator_active() {
        let html = ServicesSection::default().render().into_string();
        assert_eq!(html.matches(r#"class="indicator active""#).count(), 1);
        assert_eq!(html.matches(r#"class="indicator""#).count(), 3);
    }

    #[test]
    fn render_escapes_slide_text() {
        let mut section = ServicesSection::default();
        section.slides[0].title = "<b>Extintores & más</b>".to_string();
        let html = section.render().into_string();
        assert!(html.contains("&lt;b&gt;Extintores &amp; más&lt;/b&gt;"));
    }

    #[test]
    fn without_drops_part_from_both_outputs() {
        let section = ServicesSection::default()
            .without(Part::Indicators)
            .without(Part::Container);
        let html = section.render().into_string();
        assert!(!html.contains("services-indicators"));
        assert!(!html.contains("services-carousel"));

        let page = section.to_page();
        assert!(page.by_id("services-indicators").is_none());
        assert!(page.by_id("services-carousel").is_none());
        assert!(page.by_id("services-track").is_some());
    }

    #[test]
    fn page_mirrors_markup_structure() {
        let page = ServicesSection::default().to_page();
        let track = page.by_id("services-track").unwrap();
        assert_eq!(page.get(track).children.len(), 4);
        assert_eq!(page.descendants_with_class(track, CARD_CLASS).len(), 4);

        let list = page.by_id("services-indicators").unwrap();
        let dots = page.descendants_with_class(list, INDICATOR_CLASS);
        assert_eq!(dots.len(), 4);
        assert!(page.has_class(dots[0], ACTIVE_CLASS));
        assert_eq!(page.attr(dots[3], "data-slide"), Some("3"));

        let container = page.by_id("services-carousel").unwrap();
        let prev = page.by_id("services-prev").unwrap();
        assert_eq!(page.get(prev).parent, Some(container));
    }

    #[test]
    fn custom_anchor_ids_are_used() {
        let mut config = SiteConfig::default();
        config.carousel.anchors.track = "promo-track".to_string();
        let section = ServicesSection::from_config(&config);
        assert!(section.render().into_string().contains(r#"id="promo-track""#));
        assert!(section.to_page().by_id("promo-track").is_some());
    }
}

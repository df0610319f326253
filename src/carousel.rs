//! Services carousel controller.
//!
//! A [`Carousel`] owns the slide index, the auto-advance timer handle and any
//! pending resume, and is the only thing that mutates them. It has two
//! independent axes of state:
//!
//! - **Which slide is shown.** [`go_to`](Carousel::go_to) normalizes any
//!   integer into `0..total` with euclidean remainder, then writes the track
//!   offset and indicator classes. [`next`](Carousel::next) and
//!   [`prev`](Carousel::prev) are `go_to(current ± 1)`.
//! - **Whether auto-advance runs.** [`start`](Carousel::start) arms a
//!   recurring timer unless one is already armed; [`stop`](Carousel::stop)
//!   cancels it and is idempotent.
//!
//! Manual navigation (buttons, indicators, arrow keys, swipes) follows the
//! manual-pause protocol: transition, stop, then arm a one-shot resume that
//! calls `start` after `resume_delay_ms`. Hovering the container pauses and
//! un-hovering resumes immediately, without touching pending resumes.
//!
//! ## Context passing
//!
//! The controller holds state only. Every operation takes the
//! [`CarouselSurface`] it renders to and/or the [`TimerQueue`] it schedules
//! on, so one page and one timer queue can be shared by every behavior of the
//! site. [`PageCarousel`] pairs a controller with the anchors it resolved on a
//! [`Page`].
//!
//! ## Setup
//!
//! [`PageCarousel::try_mount`] resolves the anchors by id. The track, prev and
//! next anchors are required; if any is missing nothing is wired and no timer
//! is armed. [`PageCarousel::mount`] is the page-script flavor: it logs the
//! failure as a warning and returns `None`.

use crate::config::{AnchorIds, CarouselConfig, ResumePolicy};
use crate::input::{self, Input, Nav, Route, SwipeTracker};
use crate::page::{ElementRef, Page};
use crate::timers::{Fired, TimerId, TimerKind, TimerQueue};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Class marking the indicator of the visible slide.
pub const ACTIVE_CLASS: &str = "active";
/// Class of indicator elements under the indicators anchor.
pub const INDICATOR_CLASS: &str = "indicator";
/// Class of slide elements inside the track.
pub const SLIDE_CLASS: &str = "carousel-slide";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("carousel anchors not found: {}", .missing.join(", "))]
    MissingAnchors { missing: Vec<String> },
    #[error("carousel expects {expected} slides but the page has {found} {what}")]
    SlideCount {
        expected: usize,
        found: usize,
        what: &'static str,
    },
}

/// Where the carousel renders.
pub trait CarouselSurface {
    /// Set the track's CSS transform, e.g. `translateX(-25%)`.
    fn set_track_transform(&mut self, transform: &str);

    fn indicator_count(&self) -> usize;

    fn set_indicator_active(&mut self, index: usize, active: bool);

    /// Whether a hover/touch target exists. Without one, touch and hover
    /// inputs are dropped.
    fn has_container(&self) -> bool;
}

/// Normalize any integer index into `0..total`.
pub fn wrap_index(index: i64, total: usize) -> usize {
    // `total` is validated non-zero at config load; guard anyway.
    let total = total.max(1) as i64;
    index.rem_euclid(total) as usize
}

/// Track offset for a slide, in percent of the track width.
pub fn track_offset_percent(slide: usize, total: usize) -> f64 {
    let width = 100.0 / total.max(1) as f64;
    // `0.0 - x` keeps slide 0 at `0` rather than `-0`.
    0.0 - slide as f64 * width
}

pub fn track_transform(slide: usize, total: usize) -> String {
    format!("translateX({}%)", track_offset_percent(slide, total))
}

#[derive(Debug, Clone)]
pub struct Carousel {
    current: usize,
    total: usize,
    auto_advance_ms: u64,
    resume_delay_ms: u64,
    resume_policy: ResumePolicy,
    auto_advance: Option<TimerId>,
    /// At most one entry under [`ResumePolicy::Supersede`].
    pending_resumes: Vec<TimerId>,
    swipe: SwipeTracker,
}

impl Carousel {
    /// A stopped carousel on slide 0. Nothing is rendered until the first
    /// transition or [`render`](Self::render).
    pub fn new(config: &CarouselConfig) -> Self {
        Self {
            current: 0,
            total: config.total_slides.max(1),
            auto_advance_ms: config.auto_advance_ms,
            resume_delay_ms: config.resume_delay_ms,
            resume_policy: config.resume_policy,
            auto_advance: None,
            pending_resumes: Vec::new(),
            swipe: SwipeTracker::new(config.swipe_threshold_px),
        }
    }

    pub fn current_slide(&self) -> usize {
        self.current
    }

    pub fn total_slides(&self) -> usize {
        self.total
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.auto_advance.is_some()
    }

    /// Most recently armed resume still pending.
    pub fn pending_resume(&self) -> Option<TimerId> {
        self.pending_resumes.last().copied()
    }

    pub fn pending_resume_count(&self) -> usize {
        self.pending_resumes.len()
    }

    pub fn go_to(&mut self, index: i64, surface: &mut impl CarouselSurface) {
        self.current = wrap_index(index, self.total);
        debug!(slide = self.current, "carousel moved");
        self.render(surface);
    }

    pub fn next(&mut self, surface: &mut impl CarouselSurface) {
        self.go_to(self.current as i64 + 1, surface);
    }

    pub fn prev(&mut self, surface: &mut impl CarouselSurface) {
        self.go_to(self.current as i64 - 1, surface);
    }

    pub fn start(&mut self, timers: &mut impl TimerQueue) {
        if self.auto_advance.is_some() {
            return;
        }
        let id = timers.set_interval(TimerKind::AutoAdvance, self.auto_advance_ms);
        debug!(timer = %id, every_ms = self.auto_advance_ms, "auto-advance started");
        self.auto_advance = Some(id);
    }

    pub fn stop(&mut self, timers: &mut impl TimerQueue) {
        if let Some(id) = self.auto_advance.take() {
            timers.cancel(id);
            debug!(timer = %id, "auto-advance stopped");
        }
    }

    /// Apply a transition followed by the manual-pause protocol.
    pub fn navigate_manually(
        &mut self,
        nav: Nav,
        surface: &mut impl CarouselSurface,
        timers: &mut impl TimerQueue,
    ) {
        match nav {
            Nav::Next => self.next(surface),
            Nav::Prev => self.prev(surface),
            Nav::To(index) => self.go_to((index % self.total) as i64, surface),
        }
        self.stop(timers);
        self.arm_resume(timers);
    }

    fn arm_resume(&mut self, timers: &mut impl TimerQueue) {
        if self.resume_policy == ResumePolicy::Supersede {
            for id in self.pending_resumes.drain(..) {
                timers.cancel(id);
            }
        }
        let id = timers.set_timeout(TimerKind::Resume, self.resume_delay_ms);
        debug!(timer = %id, in_ms = self.resume_delay_ms, "auto-advance resume armed");
        self.pending_resumes.push(id);
    }

    pub fn handle(
        &mut self,
        input: Input,
        surface: &mut impl CarouselSurface,
        timers: &mut impl TimerQueue,
    ) {
        let route = input::route(&input);
        if route.needs_container() && !surface.has_container() {
            debug!(?input, "no carousel container, input dropped");
            return;
        }
        match route {
            Route::Manual(nav) => self.navigate_manually(nav, surface, timers),
            Route::SwipeStart(x) => self.swipe.begin(x),
            Route::SwipeEnd(x) => {
                if let Some(nav) = self.swipe.finish(x) {
                    self.navigate_manually(nav, surface, timers);
                }
            }
            Route::Pause => self.stop(timers),
            Route::Resume => self.start(timers),
            Route::Ignore => {}
        }
    }

    /// Deliver a fired timer. Returns false if the timer is not ours (or is
    /// stale), in which case nothing happens.
    pub fn on_timer(
        &mut self,
        fired: Fired,
        surface: &mut impl CarouselSurface,
        timers: &mut impl TimerQueue,
    ) -> bool {
        if self.auto_advance == Some(fired.id) {
            self.next(surface);
            return true;
        }
        if let Some(pos) = self.pending_resumes.iter().position(|id| *id == fired.id) {
            self.pending_resumes.remove(pos);
            debug!(timer = %fired.id, "resuming auto-advance");
            self.start(timers);
            return true;
        }
        false
    }

    /// Write the current slide to `surface`.
    pub fn render(&self, surface: &mut impl CarouselSurface) {
        surface.set_track_transform(&track_transform(self.current, self.total));
        for i in 0..surface.indicator_count() {
            surface.set_indicator_active(i, i == self.current);
        }
    }
}

// =============================================================================
// Binding to a page
// =============================================================================

/// Elements the carousel is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselAnchors {
    pub track: ElementRef,
    pub prev: ElementRef,
    pub next: ElementRef,
    /// In slide order. May be empty.
    pub indicators: Vec<ElementRef>,
    pub container: Option<ElementRef>,
}

impl CarouselAnchors {
    /// Look up every anchor, reporting all missing required ones at once.
    pub fn resolve(page: &Page, ids: &AnchorIds) -> Result<Self, InitError> {
        let track = page.by_id(&ids.track);
        let prev = page.by_id(&ids.prev);
        let next = page.by_id(&ids.next);

        let (Some(track), Some(prev), Some(next)) = (track, prev, next) else {
            let missing = [(&ids.track, track), (&ids.prev, prev), (&ids.next, next)]
                .into_iter()
                .filter(|(_, found)| found.is_none())
                .map(|(id, _)| format!("#{id}"))
                .collect();
            return Err(InitError::MissingAnchors { missing });
        };

        let indicators = page
            .by_id(&ids.indicators)
            .map(|root| page.descendants_with_class(root, INDICATOR_CLASS))
            .unwrap_or_default();
        let container = page
            .by_id(&ids.container)
            .or_else(|| page.first_with_class(&ids.container));

        Ok(Self {
            track,
            prev,
            next,
            indicators,
            container,
        })
    }

    pub fn track_transform<'p>(&self, page: &'p Page) -> Option<&'p str> {
        page.style(self.track, "transform")
    }

    /// Indices of indicators currently carrying the active class.
    pub fn active_indicators(&self, page: &Page) -> Vec<usize> {
        self.indicators
            .iter()
            .enumerate()
            .filter(|(_, r)| page.has_class(**r, ACTIVE_CLASS))
            .map(|(i, _)| i)
            .collect()
    }
}

/// A [`Page`] seen through resolved carousel anchors.
#[derive(Debug)]
pub struct PageSurface<'a> {
    pub page: &'a mut Page,
    pub anchors: &'a CarouselAnchors,
}

impl CarouselSurface for PageSurface<'_> {
    fn set_track_transform(&mut self, transform: &str) {
        self.page.set_style(self.anchors.track, "transform", transform);
    }

    fn indicator_count(&self) -> usize {
        self.anchors.indicators.len()
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        if let Some(&r) = self.anchors.indicators.get(index) {
            self.page.toggle_class(r, ACTIVE_CLASS, Some(active));
        }
    }

    fn has_container(&self) -> bool {
        self.anchors.container.is_some()
    }
}

/// A carousel mounted on a page.
#[derive(Debug, Clone)]
pub struct PageCarousel {
    pub carousel: Carousel,
    pub anchors: CarouselAnchors,
}

impl PageCarousel {
    /// Bind to `page`, render slide 0 and start auto-advance.
    pub fn try_mount(
        page: &mut Page,
        config: &CarouselConfig,
        timers: &mut impl TimerQueue,
    ) -> Result<Self, InitError> {
        let anchors = CarouselAnchors::resolve(page, &config.anchors)?;
        let slides = page.descendants_with_class(anchors.track, SLIDE_CLASS).len();
        // Empty counts mean the page leaves slides or indicators out entirely.
        for (found, what) in [(slides, "slides"), (anchors.indicators.len(), "indicators")] {
            if found != 0 && found != config.total_slides {
                return Err(InitError::SlideCount {
                    expected: config.total_slides,
                    found,
                    what,
                });
            }
        }
        let mut mounted = Self {
            carousel: Carousel::new(config),
            anchors,
        };
        mounted.carousel.render(&mut mounted.surface(page));
        mounted.carousel.start(timers);
        info!(
            slides = mounted.carousel.total_slides(),
            indicators = mounted.anchors.indicators.len(),
            hover = mounted.anchors.container.is_some(),
            "services carousel initialized"
        );
        Ok(mounted)
    }

    /// Like [`try_mount`](Self::try_mount) but warns and returns `None`
    /// instead of failing.
    pub fn mount(
        page: &mut Page,
        config: &CarouselConfig,
        timers: &mut impl TimerQueue,
    ) -> Option<Self> {
        match Self::try_mount(page, config, timers) {
            Ok(mounted) => Some(mounted),
            Err(e) => {
                warn!("services carousel not initialized: {e}");
                None
            }
        }
    }

    pub fn surface<'a>(&'a self, page: &'a mut Page) -> PageSurface<'a> {
        PageSurface {
            page,
            anchors: &self.anchors,
        }
    }

    pub fn handle(&mut self, input: Input, page: &mut Page, timers: &mut impl TimerQueue) {
        let mut surface = PageSurface {
            page,
            anchors: &self.anchors,
        };
        self.carousel.handle(input, &mut surface, timers);
    }

    pub fn on_timer(
        &mut self,
        fired: Fired,
        page: &mut Page,
        timers: &mut impl TimerQueue,
    ) -> bool {
        let mut surface = PageSurface {
            page,
            anchors: &self.anchors,
        };
        self.carousel.on_timer(fired, &mut surface, timers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Part;
    use crate::test_helpers::*;
    use crate::timers::VirtualTimers;

    /// Surface that only records the last writes.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        transform: String,
        indicators: Vec<bool>,
        container: bool,
    }

    impl CarouselSurface for RecordingSurface {
        fn set_track_transform(&mut self, transform: &str) {
            self.transform = transform.to_string();
        }
        fn indicator_count(&self) -> usize {
            self.indicators.len()
        }
        fn set_indicator_active(&mut self, index: usize, active: bool) {
            self.indicators[index] = active;
        }
        fn has_container(&self) -> bool {
            self.container
        }
    }

    /// A carousel with its surface and timers.
    struct Rig {
        c: Carousel,
        surface: RecordingSurface,
        timers: VirtualTimers,
    }

    impl Rig {
        fn with_config(config: &CarouselConfig) -> Self {
            let c = Carousel::new(config);
            let mut surface = RecordingSurface {
                indicators: vec![false; 4],
                container: true,
                ..RecordingSurface::default()
            };
            c.render(&mut surface);
            Self {
                c,
                surface,
                timers: VirtualTimers::new(),
            }
        }

        fn new() -> Self {
            Self::with_config(&CarouselConfig::default())
        }

        fn go_to(&mut self, i: i64) {
            self.c.go_to(i, &mut self.surface);
        }

        fn start(&mut self) {
            self.c.start(&mut self.timers);
        }

        fn handle(&mut self, input: Input) {
            self.c.handle(input, &mut self.surface, &mut self.timers);
        }

        fn run_until(&mut self, until_ms: u64) {
            while let Some(fired) = self.timers.next_due(until_ms) {
                self.c.on_timer(fired, &mut self.surface, &mut self.timers);
            }
            self.timers.advance_to(until_ms);
        }

        fn slide(&self) -> usize {
            self.c.current_slide()
        }

        fn active(&self) -> Vec<usize> {
            self.surface
                .indicators
                .iter()
                .enumerate()
                .filter(|(_, on)| **on)
                .map(|(i, _)| i)
                .collect()
        }
    }

    // =========================================================================
    // slide transitions
    // =========================================================================

    #[test]
    fn wrap_index_normalizes_any_integer() {
        assert_eq!(wrap_index(-1, 4), 3);
        assert_eq!(wrap_index(4, 4), 0);
        assert_eq!(wrap_index(-9, 4), 3);
        assert_eq!(wrap_index(1_000_003, 4), 3);
        assert_eq!(wrap_index(i64::MIN, 4), 0);
        assert_eq!(wrap_index(i64::MAX, 4), 3);
    }

    #[test]
    fn go_to_negative_wraps_to_last() {
        let mut rig = Rig::new();
        rig.go_to(-1);
        assert_eq!(rig.slide(), 3);
        assert_eq!(rig.surface.transform, "translateX(-75%)");
    }

    #[test]
    fn go_to_matches_euclidean_remainder_for_range() {
        let mut rig = Rig::new();
        for i in -20..20 {
            rig.go_to(i);
            assert_eq!(rig.slide() as i64, ((i % 4) + 4) % 4, "i = {i}");
        }
    }

    #[test]
    fn next_then_prev_round_trips() {
        let mut rig = Rig::new();
        for start in 0..4 {
            rig.go_to(start);
            rig.c.next(&mut rig.surface);
            rig.c.prev(&mut rig.surface);
            assert_eq!(rig.slide() as i64, start);
            rig.c.prev(&mut rig.surface);
            rig.c.next(&mut rig.surface);
            assert_eq!(rig.slide() as i64, start);
        }
    }

    #[test]
    fn track_offset_uses_equal_fractions() {
        assert_eq!(track_transform(0, 4), "translateX(0%)");
        assert_eq!(track_transform(1, 4), "translateX(-25%)");
        assert_eq!(track_transform(3, 4), "translateX(-75%)");
        assert_eq!(track_offset_percent(1, 5), -20.0);
    }

    #[test]
    fn exactly_one_indicator_active_after_every_transition() {
        let mut rig = Rig::new();
        assert_eq!(rig.active(), vec![0]);
        for step in [1i64, 7, -2, 0, 3] {
            rig.go_to(step);
            assert_eq!(rig.active(), vec![rig.slide()]);
        }
    }

    // =========================================================================
    // auto-advance
    // =========================================================================

    #[test]
    fn start_is_not_reentrant() {
        let mut rig = Rig::new();
        rig.start();
        rig.start();
        assert_eq!(rig.timers.pending(), 1);
        assert!(rig.c.is_auto_advancing());
    }

    #[test]
    fn stop_twice_is_harmless() {
        let mut rig = Rig::new();
        rig.start();
        rig.c.stop(&mut rig.timers);
        rig.c.stop(&mut rig.timers);
        assert!(!rig.c.is_auto_advancing());
        assert_eq!(rig.timers.pending(), 0);
    }

    #[test]
    fn auto_advance_moves_every_interval() {
        let mut rig = Rig::new();
        rig.start();
        rig.run_until(4_999);
        assert_eq!(rig.slide(), 0);
        rig.run_until(5_000);
        assert_eq!(rig.slide(), 1);
        rig.run_until(20_000);
        // Four advances wrap back around to slide 0.
        assert_eq!(rig.slide(), 0);
    }

    // =========================================================================
    // manual-pause protocol
    // =========================================================================

    #[test]
    fn manual_navigation_pauses_until_resume_delay() {
        let mut rig = Rig::new();
        rig.start();
        rig.run_until(1_000);

        rig.handle(Input::NextButton);
        assert_eq!(rig.slide(), 1);
        assert!(!rig.c.is_auto_advancing());
        assert!(rig.c.pending_resume().is_some());

        rig.run_until(10_999);
        assert!(!rig.c.is_auto_advancing());
        assert_eq!(rig.slide(), 1);

        rig.run_until(11_000);
        assert!(rig.c.is_auto_advancing());
        assert!(rig.c.pending_resume().is_none());

        // Next advance one full interval after the resume.
        rig.run_until(15_999);
        assert_eq!(rig.slide(), 1);
        rig.run_until(16_000);
        assert_eq!(rig.slide(), 2);
    }

    #[test]
    fn supersede_restarts_the_window() {
        let mut rig = Rig::new();
        rig.start();
        rig.handle(Input::NextButton);
        rig.run_until(6_000);
        rig.handle(Input::PrevButton);
        assert_eq!(rig.c.pending_resume_count(), 1);

        // The first resume (due at 10s) was cancelled.
        rig.run_until(15_999);
        assert!(!rig.c.is_auto_advancing());
        rig.run_until(16_000);
        assert!(rig.c.is_auto_advancing());
    }

    #[test]
    fn stack_policy_lets_earlier_resume_fire() {
        let mut rig = Rig::with_config(&CarouselConfig {
            resume_policy: ResumePolicy::Stack,
            ..CarouselConfig::default()
        });
        rig.start();
        rig.handle(Input::NextButton);
        rig.run_until(6_000);
        rig.handle(Input::PrevButton);
        assert_eq!(rig.c.pending_resume_count(), 2);

        rig.run_until(10_000);
        assert!(rig.c.is_auto_advancing());
        assert_eq!(rig.c.pending_resume_count(), 1);

        // The later resume finds auto-advance running and leaves it alone.
        rig.run_until(16_000);
        assert_eq!(rig.timers.pending(), 1);
    }

    #[test]
    fn indicator_click_jumps_and_pauses() {
        let mut rig = Rig::new();
        rig.start();
        rig.handle(Input::Indicator { index: 2 });
        assert_eq!(rig.slide(), 2);
        assert!(!rig.c.is_auto_advancing());
        assert_eq!(rig.active(), vec![2]);
    }

    #[test]
    fn out_of_range_indicator_wraps() {
        let mut rig = Rig::new();
        rig.handle(Input::Indicator { index: 9 });
        assert_eq!(rig.slide(), 1);
    }

    #[test]
    fn huge_indicator_index_wraps() {
        let mut rig = Rig::new();
        rig.handle(Input::Indicator { index: usize::MAX });
        assert_eq!(rig.slide(), usize::MAX % 4);
        assert_eq!(rig.active(), vec![3]);
    }

    #[test]
    fn arrow_keys_navigate() {
        let mut rig = Rig::new();
        rig.start();
        rig.handle(Input::Key {
            key: input::Key::ArrowLeft,
        });
        assert_eq!(rig.slide(), 3);
        assert!(!rig.c.is_auto_advancing());
        assert!(rig.c.pending_resume().is_some());
        rig.handle(Input::Key {
            key: input::Key::ArrowRight,
        });
        assert_eq!(rig.slide(), 0);
        rig.handle(Input::Key {
            key: input::Key::Other,
        });
        assert_eq!(rig.slide(), 0);

        rig.run_until(9_999);
        assert!(!rig.c.is_auto_advancing());
        rig.run_until(10_000);
        assert!(rig.c.is_auto_advancing());
        assert!(rig.c.pending_resume().is_none());
    }

    // =========================================================================
    // swipe and hover
    // =========================================================================

    #[test]
    fn short_swipe_changes_nothing() {
        let mut rig = Rig::new();
        rig.start();
        rig.handle(Input::TouchStart { x: 200.0 });
        rig.handle(Input::TouchEnd { x: 150.0 });
        assert_eq!(rig.slide(), 0);
        assert!(rig.c.is_auto_advancing());
        assert!(rig.c.pending_resume().is_none());
    }

    #[test]
    fn long_swipes_navigate_and_pause() {
        let mut rig = Rig::new();
        rig.start();
        rig.handle(Input::TouchStart { x: 200.0 });
        rig.handle(Input::TouchEnd { x: 140.0 });
        assert_eq!(rig.slide(), 1);
        assert!(!rig.c.is_auto_advancing());

        assert!(rig.c.pending_resume().is_some());

        rig.run_until(2_000);
        rig.handle(Input::TouchStart { x: 140.0 });
        rig.handle(Input::TouchEnd { x: 200.0 });
        assert_eq!(rig.slide(), 0);

        // The second swipe restarted the pause.
        rig.run_until(11_999);
        assert!(!rig.c.is_auto_advancing());
        rig.run_until(12_000);
        assert!(rig.c.is_auto_advancing());
        assert!(rig.c.pending_resume().is_none());
    }

    #[test]
    fn hover_pauses_and_resumes_immediately() {
        let mut rig = Rig::new();
        rig.start();
        rig.handle(Input::MouseEnter);
        assert!(!rig.c.is_auto_advancing());
        rig.run_until(30_000);
        assert_eq!(rig.slide(), 0);
        rig.handle(Input::MouseLeave);
        assert!(rig.c.is_auto_advancing());
    }

    #[test]
    fn hover_does_not_cancel_pending_resume() {
        let mut rig = Rig::new();
        rig.start();
        rig.handle(Input::NextButton);
        rig.handle(Input::MouseEnter);
        assert!(rig.c.pending_resume().is_some());
        rig.run_until(10_000);
        assert!(rig.c.is_auto_advancing());
    }

    #[test]
    fn without_container_touch_and_hover_are_dropped() {
        let mut rig = Rig::new();
        rig.surface.container = false;
        rig.start();
        rig.handle(Input::MouseEnter);
        assert!(rig.c.is_auto_advancing());
        rig.handle(Input::TouchStart { x: 300.0 });
        rig.handle(Input::TouchEnd { x: 0.0 });
        assert_eq!(rig.slide(), 0);
        rig.handle(Input::NextButton);
        assert_eq!(rig.slide(), 1);
    }

    #[test]
    fn foreign_timers_are_ignored() {
        let mut rig = Rig::new();
        let stray = rig.timers.set_timeout(TimerKind::Frame, 1);
        let fired = rig.timers.next_due(1).unwrap();
        assert_eq!(fired.id, stray);
        assert!(!rig.c.on_timer(fired, &mut rig.surface, &mut rig.timers));
        assert_eq!(rig.slide(), 0);
    }

    // =========================================================================
    // mounting on a page
    // =========================================================================

    #[test]
    fn mount_binds_and_starts() {
        let mut page = services_page();
        let mut timers = VirtualTimers::new();
        let mounted =
            PageCarousel::try_mount(&mut page, &CarouselConfig::default(), &mut timers).unwrap();
        assert!(mounted.carousel.is_auto_advancing());
        assert_eq!(timers.pending(), 1);
        assert_eq!(mounted.anchors.track_transform(&page), Some("translateX(0%)"));
        assert_eq!(mounted.anchors.active_indicators(&page), vec![0]);
        assert_eq!(mounted.anchors.indicators.len(), 4);
        assert!(mounted.anchors.container.is_some());
    }

    #[test]
    fn mount_reports_every_missing_required_anchor() {
        let mut timers = VirtualTimers::new();
        let err = PageCarousel::try_mount(&mut Page::new(), &CarouselConfig::default(), &mut timers)
            .unwrap_err();
        assert_eq!(
            err,
            InitError::MissingAnchors {
                missing: vec![
                    "#services-track".to_string(),
                    "#services-prev".to_string(),
                    "#services-next".to_string(),
                ]
            }
        );
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn mount_rejects_slide_count_mismatch() {
        let mut page = services_page();
        let mut timers = VirtualTimers::new();
        let config = CarouselConfig {
            total_slides: 6,
            ..CarouselConfig::default()
        };
        let err = PageCarousel::try_mount(&mut page, &config, &mut timers).unwrap_err();
        assert_eq!(
            err,
            InitError::SlideCount {
                expected: 6,
                found: 4,
                what: "slides"
            }
        );
        assert_eq!(
            err.to_string(),
            "carousel expects 6 slides but the page has 4 slides"
        );
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn mount_without_next_button_returns_none() {
        let mut page = services_page_without(&[Part::NextButton]);
        let mut timers = VirtualTimers::new();
        let mounted = PageCarousel::mount(&mut page, &CarouselConfig::default(), &mut timers);
        assert!(mounted.is_none());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn mount_without_indicators_still_runs() {
        let mut page = services_page_without(&[Part::Indicators]);
        let mut timers = VirtualTimers::new();
        let mut mounted =
            PageCarousel::try_mount(&mut page, &CarouselConfig::default(), &mut timers).unwrap();
        assert!(mounted.anchors.indicators.is_empty());
        mounted.handle(Input::NextButton, &mut page, &mut timers);
        assert_eq!(mounted.anchors.track_transform(&page), Some("translateX(-25%)"));
    }

    #[test]
    fn page_indicators_follow_slide() {
        let mut page = services_page();
        let mut timers = VirtualTimers::new();
        let mut mounted =
            PageCarousel::try_mount(&mut page, &CarouselConfig::default(), &mut timers).unwrap();
        mounted.handle(Input::PrevButton, &mut page, &mut timers);
        assert_eq!(mounted.anchors.active_indicators(&page), vec![3]);
        mounted.handle(Input::Indicator { index: 1 }, &mut page, &mut timers);
        assert_eq!(mounted.anchors.active_indicators(&page), vec![1]);
    }

    #[test]
    fn page_timers_drive_the_track() {
        let mut page = services_page();
        let mut timers = VirtualTimers::new();
        let mut mounted =
            PageCarousel::try_mount(&mut page, &CarouselConfig::default(), &mut timers).unwrap();
        run_until(&mut mounted, &mut page, &mut timers, 10_000);
        assert_eq!(mounted.anchors.track_transform(&page), Some("translateX(-50%)"));
        assert_eq!(mounted.anchors.active_indicators(&page), vec![2]);
    }
}

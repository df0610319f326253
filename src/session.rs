//! Scripted carousel sessions.
//!
//! A script is a JSON list of timed inputs replayed against a freshly mounted
//! carousel on virtual time. Timers due before an input fire first, in order,
//! so the resulting timeline is exactly what a visitor would have seen:
//!
//! ```json
//! {
//!   "omit": ["container"],
//!   "until_ms": 30000,
//!   "events": [
//!     { "at_ms": 1200, "input": { "type": "next_button" } },
//!     { "at_ms": 2500, "input": { "type": "key", "key": "ArrowLeft" } },
//!     { "at_ms": 4000, "input": { "type": "touch_start", "x": 300 } },
//!     { "at_ms": 4150, "input": { "type": "touch_end", "x": 220 } }
//!   ]
//! }
//! ```
//!
//! `omit` drops parts of the services markup before mounting, to replay a
//! degraded page.
//!
//! Times are capped at [`MAX_SCRIPT_MS`] and a replay records at most
//! [`MAX_STEPS`] steps; scripts beyond either are rejected.

use crate::carousel::{InitError, PageCarousel};
use crate::config::SiteConfig;
use crate::input::Input;
use crate::markup::{Part, ServicesSection};
use crate::page::Page;
use crate::timers::{Fired, TimerKind, TimerQueue, VirtualTimers};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Latest virtual time a script may reach: one day.
pub const MAX_SCRIPT_MS: u64 = 24 * 60 * 60 * 1000;
/// Most steps a single replay may record.
pub const MAX_STEPS: usize = 100_000;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Init(#[from] InitError),
    #[error("{field} = {value} ms is past the {MAX_SCRIPT_MS} ms script limit")]
    TimeOutOfRange { field: &'static str, value: u64 },
    #[error("replay stopped after {MAX_STEPS} steps")]
    TooManySteps,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub omit: Vec<Part>,
    /// Keep running timers until this time. Defaults to one full pause plus
    /// one advance after the last event, capped at [`MAX_SCRIPT_MS`].
    #[serde(default)]
    pub until_ms: Option<u64>,
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptEvent {
    pub at_ms: u64,
    pub input: Input,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Reject times past [`MAX_SCRIPT_MS`].
    pub fn check_times(&self) -> Result<(), ScriptError> {
        let times = self
            .events
            .iter()
            .map(|e| ("at_ms", e.at_ms))
            .chain(self.until_ms.map(|ms| ("until_ms", ms)));
        for (field, value) in times {
            if value > MAX_SCRIPT_MS {
                return Err(ScriptError::TimeOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

/// Why the carousel state changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cause {
    Mounted,
    Input(Input),
    AutoAdvance,
    Resume,
}

/// Carousel state right after one cause was handled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub at_ms: u64,
    pub cause: Cause,
    pub slide: usize,
    pub total: usize,
    pub auto_advance: bool,
    pub pending_resume: bool,
}

struct Recorder {
    page: Page,
    timers: VirtualTimers,
    carousel: PageCarousel,
    steps: Vec<Step>,
}

impl Recorder {
    fn record(&mut self, cause: Cause) {
        let c = &self.carousel.carousel;
        self.steps.push(Step {
            at_ms: self.timers.now(),
            cause,
            slide: c.current_slide(),
            total: c.total_slides(),
            auto_advance: c.is_auto_advancing(),
            pending_resume: c.pending_resume().is_some(),
        });
    }

    fn run_until(&mut self, until_ms: u64) -> Result<(), ScriptError> {
        while let Some(fired) = self.timers.next_due(until_ms) {
            self.fire(fired);
            if self.steps.len() > MAX_STEPS {
                return Err(ScriptError::TooManySteps);
            }
        }
        self.timers.advance_to(until_ms);
        Ok(())
    }

    fn input(&mut self, input: Input) {
        self.carousel.handle(input, &mut self.page, &mut self.timers);
        self.record(Cause::Input(input));
    }

    fn fire(&mut self, fired: Fired) {
        if self
            .carousel
            .on_timer(fired, &mut self.page, &mut self.timers)
        {
            let cause = match fired.kind {
                TimerKind::Resume => Cause::Resume,
                _ => Cause::AutoAdvance,
            };
            self.record(cause);
        }
    }
}

/// Replay `script` against a carousel built from `config`.
pub fn replay(script: &Script, config: &SiteConfig) -> Result<Vec<Step>, ScriptError> {
    script.check_times()?;
    let section = script
        .omit
        .iter()
        .fold(ServicesSection::from_config(config), |s, part| s.without(*part));
    let mut page = section.to_page();
    let mut timers = VirtualTimers::new();
    let carousel = PageCarousel::try_mount(&mut page, &config.carousel, &mut timers)?;
    let mut recorder = Recorder {
        page,
        timers,
        carousel,
        steps: Vec::new(),
    };
    recorder.record(Cause::Mounted);

    let mut events = script.events.clone();
    events.sort_by_key(|e| e.at_ms);

    for event in &events {
        recorder.run_until(event.at_ms)?;
        recorder.input(event.input);
    }

    let last = events.last().map(|e| e.at_ms).unwrap_or(0);
    let until = script.until_ms.unwrap_or_else(|| {
        last.saturating_add(config.carousel.resume_delay_ms)
            .saturating_add(config.carousel.auto_advance_ms)
            .min(MAX_SCRIPT_MS)
    });
    recorder.run_until(until)?;

    Ok(recorder.steps)
}

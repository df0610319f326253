//! CLI output formatting.
//!
//! Each report has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.
//!
//! ## Timeline
//!
//! ```text
//!     0.0s  mounted           slide 1/4  ●○○○  auto
//!     1.2s  next button       slide 2/4  ○●○○  paused (resume armed)
//!    11.2s  resume            slide 2/4  ○●○○  auto
//!    16.2s  auto-advance      slide 3/4  ○○●○  auto
//! ```
//!
//! ## Check
//!
//! ```text
//! Carousel
//!     4 slides, advance every 5.0s, pause 10.0s after interaction
//!     Swipe threshold: 50px
//!     Resume policy: supersede
//!     Anchors: #services-track #services-prev #services-next
//! Contact
//!     Extintores Villarrica, Colo Colo 1410, Villarrica
//!     +56 9 9186 4681
//!     +56 9 9381 1272
//! ```

use crate::config::{ResumePolicy, SiteConfig};
use crate::contact::format_phone;
use crate::input::{Input, Key};
use crate::session::{Cause, Step};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Milliseconds as seconds with one decimal, e.g. `11.2s`.
fn seconds(ms: u64) -> String {
    format!("{:.1}s", ms as f64 / 1000.0)
}

/// One dot per slide, filled for the current one.
fn dots(slide: usize, total: usize) -> String {
    (0..total)
        .map(|i| if i == slide { '●' } else { '○' })
        .collect()
}

fn describe_input(input: &Input) -> String {
    match input {
        Input::NextButton => "next button".to_string(),
        Input::PrevButton => "prev button".to_string(),
        Input::Indicator { index } => format!("indicator {}", index + 1),
        Input::Key { key: Key::ArrowLeft } => "key ←".to_string(),
        Input::Key { key: Key::ArrowRight } => "key →".to_string(),
        Input::Key { key: Key::Other } => "key (ignored)".to_string(),
        Input::TouchStart { x } => format!("touch start x={x}"),
        Input::TouchEnd { x } => format!("touch end x={x}"),
        Input::MouseEnter => "mouse enter".to_string(),
        Input::MouseLeave => "mouse leave".to_string(),
    }
}

fn describe_cause(cause: &Cause) -> String {
    match cause {
        Cause::Mounted => "mounted".to_string(),
        Cause::Input(input) => describe_input(input),
        Cause::AutoAdvance => "auto-advance".to_string(),
        Cause::Resume => "resume".to_string(),
    }
}

fn describe_timer_state(step: &Step) -> &'static str {
    match (step.auto_advance, step.pending_resume) {
        (true, _) => "auto",
        (false, true) => "paused (resume armed)",
        (false, false) => "paused",
    }
}

pub fn format_step(step: &Step) -> String {
    format!(
        "{:>8}  {:<16}  slide {}/{}  {}  {}",
        seconds(step.at_ms),
        describe_cause(&step.cause),
        step.slide + 1,
        step.total,
        dots(step.slide, step.total),
        describe_timer_state(step),
    )
}

pub fn format_timeline(steps: &[Step]) -> Vec<String> {
    steps.iter().map(format_step).collect()
}

pub fn print_timeline(steps: &[Step]) {
    for line in format_timeline(steps) {
        println!("{}", line);
    }
}

pub fn format_check_output(config: &SiteConfig) -> Vec<String> {
    let c = &config.carousel;
    let policy = match c.resume_policy {
        ResumePolicy::Supersede => "supersede",
        ResumePolicy::Stack => "stack",
    };
    let mut lines = vec![
        "Carousel".to_string(),
        format!(
            "{}{} slides, advance every {}, pause {} after interaction",
            indent(1),
            c.total_slides,
            seconds(c.auto_advance_ms),
            seconds(c.resume_delay_ms)
        ),
        format!("{}Swipe threshold: {}px", indent(1), c.swipe_threshold_px),
        format!("{}Resume policy: {}", indent(1), policy),
        format!(
            "{}Anchors: #{} #{} #{}",
            indent(1),
            c.anchors.track,
            c.anchors.prev,
            c.anchors.next
        ),
        "Contact".to_string(),
        format!(
            "{}{}, {}",
            indent(1),
            config.contact.name,
            config.contact.address
        ),
    ];
    for phone in &config.contact.phones {
        lines.push(format!("{}{}", indent(1), format_phone(phone)));
    }
    lines
}

pub fn print_check_output(config: &SiteConfig) {
    for line in format_check_output(config) {
        println!("{}", line);
    }
}

//! Progress bar over the address universe.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::output;
use crate::domain::Address;
use crate::port::outbound::progress::ProgressSink;

const TEMPLATE: &str = "  {bar:30.cyan/blue} {pos}/{len} {msg:.dim} [{elapsed_precise}]";

/// [`ProgressSink`] drawing an `indicatif` bar on stderr.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    /// A visible bar, or a hidden one in JSON or quiet mode.
    #[must_use]
    pub fn new(visible: bool) -> Self {
        let bar = ProgressBar::new(0);
        if !visible || output::is_json() || output::is_quiet() {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style.progress_chars("█▉▊▋▌▍▎▏ "));
        }
        Self { bar }
    }
}

impl ProgressSink for BarProgress {
    fn started(&self, total: usize, resumed_at: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(resumed_at as u64);
        if resumed_at > 0 {
            self.bar.println(format!("  resuming at address {}", resumed_at + 1));
        }
    }

    fn advanced(&self, address: &Address) {
        self.bar.set_message(address.short().to_string());
        self.bar.inc(1);
    }

    fn finished(&self) {
        self.bar.finish_and_clear();
    }
}

//! Wall-clock timing of a block or a closure call.

use std::fmt;
use std::time::{Duration, Instant};

use super::{NotebookDisplay, ToMarkdown};
use crate::time::format_duration;

/// A finished measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub elapsed: Duration,
    /// `elapsed` formatted by [`format_duration`]
    pub text: String,
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*Execution time*: {}", self.text)
    }
}

impl ToMarkdown for Timing {
    fn to_markdown(&self) -> String {
        self.to_string()
    }
}

/// Scope guard measuring the time until it is stopped or dropped.
///
/// The measurement is shown on the display when the guard goes away,
/// including while unwinding from a panic inside the timed scope.
///
/// ```
/// use tap_client::display::{ExecutionTimer, StdoutDisplay};
///
/// let timer = ExecutionTimer::start(&StdoutDisplay);
/// let total: u64 = (0..1000).sum();
/// let timing = timer.stop();
/// assert!(timing.text.ends_with('s'));
/// # let _ = total;
/// ```
pub struct ExecutionTimer<'a> {
    start: Instant,
    display: &'a dyn NotebookDisplay,
    stopped: bool,
}

impl<'a> ExecutionTimer<'a> {
    pub fn start(display: &'a dyn NotebookDisplay) -> Self {
        Self {
            start: Instant::now(),
            display,
            stopped: false,
        }
    }

    /// Time since the guard was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop, show and return the measurement.
    pub fn stop(mut self) -> Timing {
        self.stopped = true;
        self.record()
    }

    fn record(&self) -> Timing {
        let elapsed = self.start.elapsed();
        let timing = Timing {
            elapsed,
            text: format_duration(elapsed),
        };
        self.display.show(&timing);
        timing
    }
}

impl fmt::Debug for ExecutionTimer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionTimer")
            .field("start", &self.start)
            .field("stopped", &self.stopped)
            .finish()
    }
}

impl Drop for ExecutionTimer<'_> {
    fn drop(&mut self) {
        if !self.stopped {
            self.record();
        }
    }
}

/// Call `f` inside an [`ExecutionTimer`] and return its result.
pub fn timeit<T>(display: &dyn NotebookDisplay, f: impl FnOnce() -> T) -> T {
    let _timer = ExecutionTimer::start(display);
    f()
}

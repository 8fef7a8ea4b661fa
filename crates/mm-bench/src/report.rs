use std::fmt;
use std::time::{Duration, Instant};

use mm_core::VerifyReport;

/// Runs `f` and measures how long it took.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

/// Wall-clock time of one N x N multiplication.
#[derive(Debug, Clone)]
pub struct Timing {
    pub label: String,
    pub n: usize,
    pub elapsed: Duration,
}

impl Timing {
    pub fn new(label: impl Into<String>, n: usize, elapsed: Duration) -> Self {
        Timing {
            label: label.into(),
            n,
            elapsed,
        }
    }

    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Throughput in millions of floating-point operations per second,
    /// counting `2 * N^3` operations. Zero when nothing measurable elapsed.
    pub fn mflops(&self) -> f64 {
        let secs = self.seconds();
        if secs == 0.0 {
            return 0.0;
        }
        let n = self.n as f64;
        2.0 * n * n * n / secs / 1e6
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} time: {:.6}", self.label, self.seconds())?;
        write!(f, "{} speed: {:.3} MFLOPS", self.label, self.mflops())
    }
}

/// Prints the mismatch lines of `report`, then a one-line verdict.
pub fn print_verification(label: &str, report: &VerifyReport) {
    for mismatch in &report.mismatches {
        println!("{}", mismatch);
    }
    println!("{}", verdict(label, report));
}

fn verdict(label: &str, report: &VerifyReport) -> String {
    if report.is_match() {
        format!(
            "{}: matches sequential ({} cells, max diff {:e})",
            label, report.cells, report.max_abs_diff
        )
    } else {
        format!(
            "{}: {} of {} cells differ from sequential",
            label,
            report.mismatches.len(),
            report.cells
        )
    }
}

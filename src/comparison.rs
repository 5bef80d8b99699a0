use std::io::Write;
use std::time::Duration;

use crate::collaborator::Collaborator;
use crate::error::{Error, Result};
use crate::format;
use crate::measurement::{Measurement, WallTime};

/// The elapsed time of one collaborator call.
#[derive(Debug, Clone, PartialEq)]
pub struct Measured {
    pub label: String,
    pub elapsed: Duration,
}

/// Both measurements of a completed comparison and the resulting speedup.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub baseline: Measured,
    pub contender: Measured,
    pub speedup: f64,
}

/// Divides the baseline time by the contender time.
///
/// A contender that took no measurable time has no defined ratio; this returns
/// `Error::ZeroDuration` rather than an infinite or NaN speedup.
pub fn speedup(baseline: &Measured, contender: &Measured) -> Result<f64> {
    if contender.elapsed == Duration::from_secs(0) {
        return Err(Error::ZeroDuration {
            label: contender.label.clone(),
        });
    }
    Ok(baseline.elapsed.as_secs_f64() / contender.elapsed.as_secs_f64())
}

/// The comparison driver and its configuration.
///
/// Times the baseline collaborator, then the contender, each called exactly once with the same
/// workload size, and reports how many times faster the contender was.
///
/// ```no_run
/// use speedup::Comparison;
///
/// fn slow(n: u64) -> Result<(), String> {
///     std::thread::sleep(std::time::Duration::from_millis(2 * n));
///     Ok(())
/// }
///
/// fn fast(n: u64) -> Result<(), String> {
///     std::thread::sleep(std::time::Duration::from_millis(n));
///     Ok(())
/// }
///
/// let report = Comparison::default()
///     .labels("Slow", "Fast")
///     .run_and_print(&mut std::io::stdout(), slow, fast)
///     .unwrap();
/// assert!(report.speedup > 1.0);
/// ```
pub struct Comparison<M: Measurement = WallTime> {
    workload: u64,
    baseline_label: String,
    contender_label: String,
    measurement: M,
}

impl Default for Comparison {
    /// Creates a comparison with the default settings: a workload size of 10, labels `Python`
    /// and `Cython`, and wall-clock timing.
    fn default() -> Comparison {
        Comparison {
            workload: 10,
            baseline_label: "Python".to_owned(),
            contender_label: "Cython".to_owned(),
            measurement: WallTime,
        }
    }
}

impl<M: Measurement> Comparison<M> {
    /// Changes the measurement for the comparison. By default, wall-clock time is used.
    pub fn with_measurement<M2: Measurement>(self, m: M2) -> Comparison<M2> {
        Comparison {
            workload: self.workload,
            baseline_label: self.baseline_label,
            contender_label: self.contender_label,
            measurement: m,
        }
    }

    /// Changes the workload size passed to both collaborators.
    pub fn workload(mut self, n: u64) -> Comparison<M> {
        self.workload = n;
        self
    }

    /// Changes the labels printed for the baseline and the contender.
    pub fn labels<A, B>(mut self, baseline: A, contender: B) -> Comparison<M>
    where
        A: Into<String>,
        B: Into<String>,
    {
        self.baseline_label = baseline.into();
        self.contender_label = contender.into();
        self
    }

    /// Times a single call of `collaborator`.
    pub fn measure<C: Collaborator>(&self, label: &str, collaborator: &mut C) -> Result<Measured> {
        let start = self.measurement.start();
        let outcome = collaborator.run(self.workload);
        let elapsed = self.measurement.end(start);

        match outcome {
            Ok(()) => {
                debug!("{} took {}", label, format::time(elapsed.as_nanos() as f64));
                Ok(Measured {
                    label: label.to_owned(),
                    elapsed,
                })
            }
            Err(message) => Err(Error::Collaborator {
                label: label.to_owned(),
                message,
            }),
        }
    }

    /// Times the baseline and then the contender without printing anything.
    pub fn run<A, B>(&self, baseline: A, contender: B) -> Result<Report>
    where
        A: Collaborator,
        B: Collaborator,
    {
        self.run_and_print(&mut std::io::sink(), baseline, contender)
    }

    /// Times the baseline and then the contender, writing each report line to `out` as soon as
    /// it is known.
    ///
    /// If the baseline fails nothing is written. If the contender fails only the baseline line
    /// is written. If the contender took no measurable time both time lines are written and
    /// `Error::ZeroDuration` is returned in place of the speedup.
    pub fn run_and_print<W, A, B>(
        &self,
        out: &mut W,
        mut baseline: A,
        mut contender: B,
    ) -> Result<Report>
    where
        W: Write,
        A: Collaborator,
        B: Collaborator,
    {
        info!(
            "Comparing {} against {} with workload {}",
            self.baseline_label, self.contender_label, self.workload
        );

        let baseline = self.measure(&self.baseline_label, &mut baseline)?;
        writeln!(out, "{}", format::time_line(&baseline.label, baseline.elapsed))?;

        let contender = self.measure(&self.contender_label, &mut contender)?;
        writeln!(out, "{}", format::time_line(&contender.label, contender.elapsed))?;

        let speedup = speedup(&baseline, &contender)?;
        writeln!(out, "{}", format::speedup_line(speedup))?;

        Ok(Report {
            baseline,
            contender,
            speedup,
        })
    }
}

//! This module defines the clock that a comparison reads. The default is
//! [WallTime](struct.WallTime.html), the elapsed wall-clock time between two readings of a
//! monotonic clock. Other measurements (eg. a scripted clock in tests) can be plugged in through
//! [`Comparison::with_measurement`](../struct.Comparison.html#method.with_measurement).

use std::time::{Duration, Instant};

/// Trait for all types which define something a comparison can measure.
///
/// This trait defines two core methods, `start` and `end`. `start` is called immediately before
/// a collaborator is invoked to produce some intermediate value (for example, the wall-clock
/// time at the start of the call) and `end` is called as soon as the collaborator returns, with
/// the value returned by `start`.
pub trait Measurement {
    /// This type represents an intermediate value for the measurement. It is produced by `start`
    /// and passed to `end`.
    type Intermediate;

    /// Called before the collaborator runs.
    fn start(&self) -> Self::Intermediate;

    /// Called after the collaborator returns to get the elapsed time.
    fn end(&self, i: Self::Intermediate) -> Duration;
}

/// `WallTime` is the default measurement. It measures the elapsed time from the beginning of a
/// collaborator call to its end.
pub struct WallTime;
impl Measurement for WallTime {
    type Intermediate = Instant;

    fn start(&self) -> Self::Intermediate {
        Instant::now()
    }
    fn end(&self, i: Self::Intermediate) -> Duration {
        i.elapsed()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::thread;

    #[test]
    fn wall_time_covers_a_sleep() {
        let m = WallTime;
        let start = m.start();
        thread::sleep(Duration::from_millis(5));
        assert!(m.end(start) >= Duration::from_millis(5));
    }
}

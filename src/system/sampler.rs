use crate::error::Error;
use crate::model::record::ProcessRecord;

use super::platform;

/// Source of raw per-process counter readings.
///
/// One call returns the full current process table; the sampled pid set
/// is the source of truth for which processes are alive. A failed call
/// is recoverable and must leave callers free to retry next cycle.
pub trait Sampler {
    fn sample_all(&mut self) -> Result<Vec<ProcessRecord>, Error>;
}

/// Production sampler backed by the platform process table.
#[derive(Default)]
pub struct ProcSampler;

impl ProcSampler {
    pub fn new() -> Self {
        ProcSampler
    }
}

impl Sampler for ProcSampler {
    fn sample_all(&mut self) -> Result<Vec<ProcessRecord>, Error> {
        #[cfg(feature = "perf-tracing")]
        let _sample_span = tracing::debug_span!("sampler.sample_all").entered();

        platform::sample_all()
    }
}

/// Schedulable tick capacity used to scale tick deltas to percentages:
/// `cpu% = 100 * Δticks / (elapsed_secs * ticks_per_second * units)`.
///
/// With this convention a fully busy machine sums to 100% across all
/// processes regardless of core count.
#[derive(Clone, Copy, Debug)]
pub struct TickCapacity {
    pub ticks_per_second: f64,
    pub execution_units: usize,
}

impl TickCapacity {
    pub fn new(ticks_per_second: f64, execution_units: usize) -> Self {
        TickCapacity {
            ticks_per_second: if ticks_per_second > 0.0 {
                ticks_per_second
            } else {
                100.0
            },
            execution_units: execution_units.max(1),
        }
    }

    /// Detects the scheduler tick rate and logical CPU count at runtime.
    pub fn detect() -> Self {
        let units = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        TickCapacity::new(clock_ticks_per_second(), units)
    }

    pub fn total_ticks_per_second(&self) -> f64 {
        self.ticks_per_second * self.execution_units as f64
    }

    /// Upper clamp for the aggregate data point under this convention.
    pub fn max_aggregate_percent(&self) -> f64 {
        100.0
    }
}

#[cfg(unix)]
fn clock_ticks_per_second() -> f64 {
    // SAFETY: sysconf(_SC_CLK_TCK) takes no pointers and is documented
    // to return -1 on error, which the > 0 check handles.
    let ticks = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if ticks > 0 { ticks as f64 } else { 100.0 }
}

#[cfg(not(unix))]
fn clock_ticks_per_second() -> f64 {
    100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_scales_with_units() {
        let capacity = TickCapacity::new(100.0, 4);
        assert!((capacity.total_ticks_per_second() - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn degenerate_inputs_are_normalized() {
        let capacity = TickCapacity::new(0.0, 0);
        assert!((capacity.ticks_per_second - 100.0).abs() < f64::EPSILON);
        assert_eq!(capacity.execution_units, 1);
    }

    #[test]
    fn detect_does_not_panic() {
        let capacity = TickCapacity::detect();
        assert!(capacity.total_ticks_per_second() > 0.0);
    }
}

//! Process-wide configuration block.
//!
//! All tunables of the crate live here: the continuous Fréchet tolerance and
//! rounding switch, diagnostic verbosity, worker-pool size, the distance
//! matrix memoization toggle, the DTW contingency switch and the memory
//! budget consulted by the clustering engine. Values are stored in atomics
//! so they can be read without locking from parallel regions; they are meant
//! to be written once at setup.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, AtomicU8, AtomicUsize, Ordering};

use log::warn;

static CONTINUOUS_FRECHET_ERROR: AtomicU64 = AtomicU64::new(0x3F847AE147AE147B); // 0.01
static CONTINUOUS_FRECHET_ROUNDING: AtomicBool = AtomicBool::new(true);
static VERBOSITY: AtomicU8 = AtomicU8::new(0);
static NUMBER_THREADS: AtomicI64 = AtomicI64::new(0);
static USE_DISTANCE_MATRIX: AtomicBool = AtomicBool::new(true);
static DTW_CONTINGENCY: AtomicBool = AtomicBool::new(false);
static AVAILABLE_MEMORY: AtomicUsize = AtomicUsize::new(8 * 1024 * 1024 * 1024);

/// Relative tolerance of the continuous Fréchet binary search (default 1%).
#[inline]
pub fn continuous_frechet_error() -> f64 {
    f64::from_bits(CONTINUOUS_FRECHET_ERROR.load(Ordering::Relaxed))
}

/// Set the relative tolerance of the continuous Fréchet binary search.
///
/// Non-finite or non-positive values are rejected with a warning.
pub fn set_continuous_frechet_error(error: f64) {
    if !error.is_finite() || error <= 0.0 {
        warn!("ignoring invalid continuous Fréchet error {error}");
        return;
    }
    CONTINUOUS_FRECHET_ERROR.store(error.to_bits(), Ordering::Relaxed);
}

/// Whether the final Fréchet value is rounded to the digits implied by the
/// achieved precision (default true).
#[inline]
pub fn continuous_frechet_rounding() -> bool {
    CONTINUOUS_FRECHET_ROUNDING.load(Ordering::Relaxed)
}

/// Enable or disable result rounding.
pub fn set_continuous_frechet_rounding(rounding: bool) {
    CONTINUOUS_FRECHET_ROUNDING.store(rounding, Ordering::Relaxed);
}

/// Diagnostic verbosity: 0 silent, 1 phase messages, 2 detailed, 3 per-item.
///
/// Warnings are emitted regardless of this value.
#[inline]
pub fn verbosity() -> u8 {
    VERBOSITY.load(Ordering::Relaxed)
}

/// Set the diagnostic verbosity (clamped to 0..=3).
pub fn set_verbosity(level: u8) {
    VERBOSITY.store(level.min(3), Ordering::Relaxed);
}

/// Configured worker-pool size; values ≤ 0 leave the pool at its default.
#[inline]
pub fn number_threads() -> i64 {
    NUMBER_THREADS.load(Ordering::Relaxed)
}

/// Set the worker-pool size.
///
/// With the `parallel` feature and `threads > 0`, installs a global rayon
/// pool of that size. The pool can only be installed once per process; later
/// calls keep the stored value for reporting and log a warning.
pub fn set_number_threads(threads: i64) {
    NUMBER_THREADS.store(threads, Ordering::Relaxed);
    #[cfg(feature = "parallel")]
    if threads > 0 {
        let built = rayon::ThreadPoolBuilder::new()
            .num_threads(threads as usize)
            .build_global();
        if built.is_err() {
            warn!("worker pool already initialized, thread count {threads} not applied");
        }
    }
}

/// Whether the clustering engine memoizes distances (default true).
#[inline]
pub fn use_distance_matrix() -> bool {
    USE_DISTANCE_MATRIX.load(Ordering::Relaxed)
}

/// Enable or disable distance-matrix memoization.
pub fn set_use_distance_matrix(use_matrix: bool) {
    USE_DISTANCE_MATRIX.store(use_matrix, Ordering::Relaxed);
}

/// Whether DTW applies warp-counter contingency caps (default false).
#[inline]
pub fn dtw_contingency() -> bool {
    DTW_CONTINGENCY.load(Ordering::Relaxed)
}

/// Enable or disable the DTW contingency constraint.
pub fn set_dtw_contingency(contingency: bool) {
    DTW_CONTINGENCY.store(contingency, Ordering::Relaxed);
}

/// Memory budget in bytes for the distance-matrix gating heuristic
/// (default 8 GiB).
#[inline]
pub fn available_memory() -> usize {
    AVAILABLE_MEMORY.load(Ordering::Relaxed)
}

/// Set the memory budget in bytes.
pub fn set_available_memory(bytes: usize) {
    AVAILABLE_MEMORY.store(bytes, Ordering::Relaxed);
}

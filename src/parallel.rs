//! Parallel iteration abstraction.
//!
//! This module provides conditional parallel/sequential iteration based on
//! the `parallel` feature flag. With the feature enabled, hot inner loops
//! (free-space diagram rows, shortcut-graph edges, projection sweeps) run on
//! the rayon worker pool; without it they fall back to sequential iteration.
//! All parallel regions join before returning.
//!
//! # Usage
//!
//! Use the `iter_maybe_parallel!` macro to conditionally parallelize
//! iteration:
//!
//! ```ignore
//! let results: Vec<_> = iter_maybe_parallel!((0..n))
//!     .map(|i| expensive_computation(i))
//!     .collect();
//! ```

/// Macro for conditionally parallel iteration over ranges and vectors.
///
/// When the `parallel` feature is enabled, uses `into_par_iter()`.
/// Otherwise, uses `into_iter()` for sequential execution.
#[macro_export]
macro_rules! iter_maybe_parallel {
    ($expr:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::IntoParallelIterator;

            IntoParallelIterator::into_par_iter($expr)
        }
        #[cfg(not(feature = "parallel"))]
        {
            IntoIterator::into_iter($expr)
        }
    }};
}

// Re-export macro at module level
pub use iter_maybe_parallel;

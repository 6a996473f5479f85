//! Time source abstraction

/// Monotonic microsecond clock
///
/// Only differences between readings are meaningful.
pub trait Clock {
    /// Microseconds since an arbitrary epoch
    fn now_us(&self) -> u64;

    /// Microseconds elapsed since `earlier`
    fn elapsed_since(&self, earlier: u64) -> u64 {
        self.now_us().saturating_sub(earlier)
    }
}

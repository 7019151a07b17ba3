use std::time::{SystemTime, UNIX_EPOCH};

/// A source of current wall-clock time in integer milliseconds.
///
/// The generator reads time exclusively through this trait, both to detect
/// clock regression and to wait out an exhausted millisecond, so tests can
/// plug in a deterministic clock.
///
/// Implementations are expected to be monotonic in the *absence* of external
/// clock adjustment; defending against adjustment is the generator's job.
///
/// # Example
///
/// ```
/// use graupel::{Generator, GraupelId, TimeSource};
///
/// struct FrozenClock(i64);
///
/// impl TimeSource for FrozenClock {
///     fn current_millis(&self) -> i64 {
///         self.0
///     }
/// }
///
/// let generator = Generator::with_time_source(0, FrozenClock(GraupelId::EPOCH_MS + 1))?;
/// let id = generator.next_id()?;
/// assert_eq!(id.timestamp(), 1);
/// # Ok::<(), graupel::Error>(())
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> i64;
}

/// The production clock: [`SystemTime`] truncated to milliseconds.
///
/// # Panics
///
/// [`current_millis`](TimeSource::current_millis) panics if the system clock
/// reports a time before the Unix epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX_EPOCH")
            .as_millis() as i64
    }
}

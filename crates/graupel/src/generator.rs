use core::cmp::Ordering;
use std::{thread, time::Duration};

use parking_lot::RwLock;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Error, GraupelId, Result, SystemClock, TimeSource};

/// Pause between clock re-samples once a millisecond's sequence space is
/// exhausted. Long enough to stay off the CPU, short enough to observe the
/// next tick promptly.
const EXHAUSTED_POLL: Duration = Duration::from_micros(100);

/// Mutable generator state. Guarded by a single lock so a
/// timestamp/sequence pair is never observed torn.
#[derive(Debug)]
struct State {
    sequence: i64,
    last_millisecond: i64,
}

/// A stateful generator producing unique, roughly time-ordered
/// [`GraupelId`]s for one worker.
///
/// Each instance owns its state exclusively; nothing is shared between
/// instances, so generators with distinct worker ids may run in the same
/// process or on independent machines and never collide. Wrap an instance in
/// an [`Arc`](std::sync::Arc) to share it across threads: all methods take
/// `&self`.
///
/// [`next_id`](Self::next_id) runs as one exclusive critical section per
/// instance, including the wait for the next millisecond when a tick's
/// sequence space is spent. Ids from a single instance are therefore strictly
/// increasing as long as the clock does not move backward.
///
/// State lives only in process memory. After a restart the generator relies
/// on the host clock not having regressed past the previous run's last issued
/// millisecond.
///
/// # Example
///
/// ```
/// use graupel::Generator;
///
/// let generator = Generator::new(0)?;
///
/// let a = generator.next_id()?;
/// let b = generator.next_id()?;
/// assert!(b > a);
/// # Ok::<(), graupel::Error>(())
/// ```
#[derive(Debug)]
pub struct Generator<T = SystemClock>
where
    T: TimeSource,
{
    worker_id: i64,
    state: RwLock<State>,
    time: T,
}

impl Generator<SystemClock> {
    /// Creates a generator for `worker_id` backed by the system clock.
    ///
    /// The worker id is immutable for the generator's lifetime and must be
    /// unique among all simultaneously active generators; handing out worker
    /// ids is the deployment's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerId`] if `worker_id` is outside
    /// `0..=`[`GraupelId::MAX_WORKER_ID`].
    pub fn new(worker_id: i64) -> Result<Self> {
        Self::with_time_source(worker_id, SystemClock)
    }
}

impl<T> Generator<T>
where
    T: TimeSource,
{
    /// Creates a generator reading time from `time` instead of the system
    /// clock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerId`] if `worker_id` is outside
    /// `0..=`[`GraupelId::MAX_WORKER_ID`].
    pub fn with_time_source(worker_id: i64, time: T) -> Result<Self> {
        if !(0..=GraupelId::MAX_WORKER_ID).contains(&worker_id) {
            return Err(Error::InvalidWorkerId { worker_id });
        }
        Ok(Self {
            worker_id,
            state: RwLock::new(State {
                sequence: 0,
                last_millisecond: 0,
            }),
            time,
        })
    }

    /// Returns the worker id this generator was constructed with.
    pub fn worker_id(&self) -> i64 {
        self.worker_id
    }

    /// Returns a snapshot of the current sequence value.
    ///
    /// Taken under a shared lock: it may be stale relative to a concurrent
    /// [`next_id`](Self::next_id), but is never torn.
    pub fn sequence(&self) -> i64 {
        self.state.read().sequence
    }

    /// Returns a snapshot of the most recent millisecond an id was issued
    /// for (Unix ms), or 0 if none has been.
    ///
    /// Same staleness caveat as [`sequence`](Self::sequence).
    pub fn last_millisecond(&self) -> i64 {
        self.state.read().last_millisecond
    }

    /// Produces the next identifier.
    ///
    /// Within one millisecond the sequence field distinguishes up to 4096
    /// ids. When a call finds the current millisecond exhausted it blocks,
    /// re-sampling the clock with a short sleep between samples, until the
    /// clock advances — still inside the critical section, so concurrent
    /// callers queue behind it and ordering is preserved. There is no way to
    /// cancel an in-progress wait.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockMovedBackward`] if the clock reports an earlier
    /// millisecond than the last id was issued for. State is untouched and
    /// the call may be retried once the clock catches up.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<GraupelId> {
        let mut state = self.state.write();

        let now = self.time.current_millis();
        match now.cmp(&state.last_millisecond) {
            Ordering::Less => {
                return Err(Self::cold_clock_behind(state.last_millisecond, now));
            }
            Ordering::Greater => {
                state.last_millisecond = now;
                state.sequence = 0;
            }
            Ordering::Equal => {
                state.sequence = (state.sequence + 1) & GraupelId::MAX_SEQUENCE;
                if state.sequence == 0 {
                    // 4096 ids already issued this millisecond. Hold the lock
                    // and wait for the next tick; the wrapped sequence is
                    // reused at 0.
                    state.last_millisecond = self.next_millisecond(now);
                }
            }
        }

        Ok(GraupelId::from_parts(
            state.last_millisecond - GraupelId::EPOCH_MS,
            self.worker_id,
            state.sequence,
        ))
    }

    /// Samples the clock until it reports a value strictly greater than
    /// `now`, sleeping [`EXHAUSTED_POLL`] between samples.
    fn next_millisecond(&self, now: i64) -> i64 {
        loop {
            let sampled = self.time.current_millis();
            if sampled > now {
                return sampled;
            }
            thread::sleep(EXHAUSTED_POLL);
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(last: i64, now: i64) -> Error {
        Error::ClockMovedBackward { last, now }
    }
}

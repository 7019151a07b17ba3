use crate::GraupelId;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error conditions `graupel` can produce.
///
/// Every variant is returned to the caller as an ordinary error value; none
/// is treated as fatal to the process, and the crate performs no internal
/// retries on the caller's behalf.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The worker id handed to a constructor is outside the encodable range.
    ///
    /// No generator is created. Retrying with the same argument fails the
    /// same way.
    #[error("invalid worker id {worker_id}, expected 0..={max}", max = GraupelId::MAX_WORKER_ID)]
    InvalidWorkerId {
        /// The rejected worker id.
        worker_id: i64,
    },

    /// The clock reported a time earlier than the generator last observed
    /// (e.g. an NTP step backward).
    ///
    /// Generator state is left unmodified, so the call is safely retryable
    /// once the clock catches back up. Whether to wait, retry, or escalate is
    /// the caller's decision.
    #[error("clock moved backward, refusing to generate an id ({now}ms < {last}ms)")]
    ClockMovedBackward {
        /// The millisecond the generator last issued an id for.
        last: i64,
        /// The earlier millisecond the clock just reported.
        now: i64,
    },

    /// The value cannot be a generator-produced identifier.
    #[error("invalid id {id}")]
    InvalidId {
        /// The rejected raw value.
        id: i64,
    },
}

use crate::{Error, Result};
use core::fmt;

/// A generator-produced 64-bit identifier.
///
/// - 1 sign bit, always zero
/// - 41 bits timestamp (ms since [`GraupelId::EPOCH_MS`])
/// - 10 bits worker ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63        63 62            22 21            12 11             0
///              +------------+----------------+----------------+---------------+
///  Field:      |  sign (1)  | timestamp (41) | worker ID (10) | sequence (12) |
///              +------------+----------------+----------------+---------------+
///              |<---------- MSB ---------- 64 bits ---------- LSB ----------->|
/// ```
///
/// Identifiers order by timestamp first, then worker id, then sequence, so
/// ids from a single generator sort in issue order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GraupelId {
    id: i64,
}

impl GraupelId {
    /// Reference instant all timestamps are measured from:
    /// 2017-11-14 19:24:45.246 UTC, in milliseconds since the Unix epoch.
    ///
    /// The 41-bit timestamp field counts milliseconds from here, which keeps
    /// identifiers positive for roughly 69 years past the epoch.
    pub const EPOCH_MS: i64 = 1_510_687_485_246;

    /// Width of the timestamp field.
    pub const TIMESTAMP_BITS: u32 = 41;

    /// Width of the worker ID field.
    pub const WORKER_ID_BITS: u32 = 10;

    /// Width of the sequence field.
    pub const SEQUENCE_BITS: u32 = 12;

    /// Largest encodable timestamp offset. Doubles as the field's bitmask.
    pub const MAX_TIMESTAMP: i64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Largest encodable worker id (1023). Doubles as the field's bitmask.
    pub const MAX_WORKER_ID: i64 = (1 << Self::WORKER_ID_BITS) - 1;

    /// Largest encodable sequence value (4095). Doubles as the field's
    /// bitmask.
    pub const MAX_SEQUENCE: i64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Number of bits to shift the timestamp to its position (bit 22).
    pub const TIMESTAMP_SHIFT: u32 = Self::WORKER_ID_BITS + Self::SEQUENCE_BITS;

    /// Number of bits to shift the worker ID to its position (bit 12).
    pub const WORKER_ID_SHIFT: u32 = Self::SEQUENCE_BITS;

    /// Packs the three fields into an identifier.
    ///
    /// `timestamp` is milliseconds relative to [`Self::EPOCH_MS`]. Each field
    /// is masked to its width.
    pub const fn from_parts(timestamp: i64, worker_id: i64, sequence: i64) -> Self {
        debug_assert!(timestamp <= Self::MAX_TIMESTAMP, "timestamp overflow");
        debug_assert!(worker_id <= Self::MAX_WORKER_ID, "worker id overflow");
        debug_assert!(sequence <= Self::MAX_SEQUENCE, "sequence overflow");
        Self {
            id: (timestamp & Self::MAX_TIMESTAMP) << Self::TIMESTAMP_SHIFT
                | (worker_id & Self::MAX_WORKER_ID) << Self::WORKER_ID_SHIFT
                | (sequence & Self::MAX_SEQUENCE),
        }
    }

    /// Decodes an identifier received from an untrusted source.
    ///
    /// Field extraction inverts [`Self::from_parts`] exactly, masking with
    /// the same constants the encoder shifts by. A value with the sign bit
    /// set cannot have come out of a correctly functioning generator and is
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidId`] if `raw` is negative.
    ///
    /// # Example
    ///
    /// ```
    /// use graupel::GraupelId;
    ///
    /// let id = GraupelId::from_parts(1000, 2, 1);
    /// let parsed = GraupelId::parse(id.to_raw())?;
    /// assert_eq!(parsed.timestamp(), 1000);
    /// assert_eq!(parsed.worker_id(), 2);
    /// assert_eq!(parsed.sequence(), 1);
    ///
    /// assert!(GraupelId::parse(-1).is_err());
    /// # Ok::<(), graupel::Error>(())
    /// ```
    pub fn parse(raw: i64) -> Result<Self> {
        let id = Self::from_raw(raw);
        if !id.is_valid() {
            return Err(Error::InvalidId { id: raw });
        }
        Ok(id)
    }

    /// Extracts the timestamp, in milliseconds relative to
    /// [`Self::EPOCH_MS`]. Add the epoch back for absolute time.
    pub const fn timestamp(&self) -> i64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::MAX_TIMESTAMP
    }

    /// Extracts the worker ID.
    pub const fn worker_id(&self) -> i64 {
        (self.id >> Self::WORKER_ID_SHIFT) & Self::MAX_WORKER_ID
    }

    /// Extracts the sequence number.
    pub const fn sequence(&self) -> i64 {
        self.id & Self::MAX_SEQUENCE
    }

    /// Returns true if this value could have been produced by a correctly
    /// functioning generator.
    pub const fn is_valid(&self) -> bool {
        self.id >= 0
    }

    /// Returns the raw packed value.
    pub const fn to_raw(&self) -> i64 {
        self.id
    }

    /// Wraps a raw value without validation. Prefer [`Self::parse`] for
    /// untrusted input.
    pub const fn from_raw(raw: i64) -> Self {
        Self { id: raw }
    }

    /// Returns the ID as a zero-padded 19-digit string, so string-sorted ids
    /// keep their numeric order.
    pub fn to_padded_string(&self) -> String {
        format!("{:019}", self.id)
    }
}

impl fmt::Display for GraupelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for GraupelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraupelId")
            .field("id", &format_args!("{} (0x{:x})", self.id, self.id))
            .field("timestamp", &self.timestamp())
            .field("worker_id", &self.worker_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for GraupelId {
    /// Serializes the ID as its raw `i64` representation.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.id)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for GraupelId {
    /// Deserializes a raw `i64`, applying the same validation as
    /// [`GraupelId::parse`].
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <i64 as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

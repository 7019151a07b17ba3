//! Unique, roughly time-ordered 64-bit identifiers with no generation-time
//! coordination.
//!
//! Each [`Generator`] owns an externally-assigned worker id and packs
//! `(timestamp, worker id, sequence)` into one signed 64-bit value: 41 bits
//! of milliseconds since a fixed epoch, 10 bits of worker id, and a 12-bit
//! per-millisecond sequence. Generators handed distinct worker ids never
//! collide, whether they run in one process or across a fleet.
//!
//! [`GraupelId::parse`] is the inverse: any consumer can decode an
//! identifier's fields without talking to the generator that produced it.
//!
//! # Example
//!
//! ```
//! use graupel::{Generator, GraupelId};
//!
//! let generator = Generator::new(0)?;
//!
//! let id = generator.next_id()?;
//! let decoded = GraupelId::parse(id.to_raw())?;
//! assert_eq!(decoded.worker_id(), 0);
//! # Ok::<(), graupel::Error>(())
//! ```
//!
//! Worker id uniqueness among simultaneously active generators is the
//! deployment's responsibility, as is host clock sanity; generator state is
//! not persisted across restarts.

mod error;
mod generator;
mod id;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::time::*;

//! Memory Store
//!
//! A flat directory where sibling files sharing a base name form one logical
//! "memory": `{base}.thumb` (existence marker), `{base}.jpg`, optional
//! `{base}.m4a` audio annotation and `{base}.txt` transcript.

pub mod disk;
pub mod record;

pub use disk::MemoryStore;
pub use record::{MemoryRecord, RecordId};

//! Ledger - ordered record collections
//!
//! Records carry a `pinned` flag and a dense per-partition `order`. The
//! store keeps both partitions dense across every mutation and renders
//! pinned records first. Persistence goes through the [`Storage`] seam as a
//! full read, in-memory mutation, full write cycle.

pub mod actions;
pub mod collection;
pub mod config;
pub mod error;
pub mod payload;
pub mod profile;
pub mod record;
pub mod storage;
pub mod store;

pub use actions::{NoteAction, Session, View};
pub use collection::Collection;
pub use config::PinboardConfig;
pub use error::{LedgerError, Result, StorageError};
pub use payload::{JobDescription, Note};
pub use profile::{ApplicationProfile, ProfileStore};
pub use record::{parse_tags, Record, RecordId, Searchable};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{RecordStore, ReorderOutcome};

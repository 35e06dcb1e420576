//! # webwords core
//!
//! Runtime-free logic for webwords: learning statuses, text normalization,
//! the session word registry, status projection onto occurrence nodes, and
//! the record-store abstraction used to synchronize with a remote sheet.
//!
//! This crate contains no tokio, reqwest, or filesystem I/O. Anything that
//! implements [`occurrence::Occurrence`] can be painted, whether it is a real
//! DOM element behind a binding or the in-memory [`occurrence::TextElement`].
//!
//! ```text
//!  text / node ──▶ Normalizer ──▶ WordRegistry ──▶ Word ──▶ project()
//!                                      ▲                      │
//!                                      │                      ▼
//!                               sync::pull/push        L2 + status class
//!                                      │
//!                                 RecordStore
//! ```

pub mod error;
pub mod normalize;
pub mod occurrence;
pub mod projector;
pub mod registry;
pub mod status;
pub mod sync;
pub mod word;

pub use error::SyncError;
pub use normalize::Normalizer;
pub use occurrence::{Occurrence, TextElement, WordInput};
pub use registry::{StatusCounts, WordRegistry};
pub use status::LearningStatus;
pub use sync::{RecordId, RecordStore, RemoteRecord};
pub use word::Word;

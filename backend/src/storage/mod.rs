//! # Storage Module
//!
//! Persistence for duties and occurrences.
//!
//! The domain layer only sees the [`DutyStorage`] and [`OccurrenceStorage`]
//! traits. The shipped implementation keeps everything in memory; a database
//! backend would implement the same traits.
//!
//! ## Key Responsibilities
//!
//! - **Storage Abstraction**: One async interface regardless of backend
//! - **Ownership**: Occurrences belong to a duty and go away with it
//! - **Snapshots**: Reads hand out owned copies, never references into storage

pub mod memory;
pub mod traits;

pub use memory::{InMemoryStorage, StorageError};
pub use traits::{DutyStorage, OccurrenceStorage};

//! Side payload storage for pairdiff.
//!
//! Each identifier owns one [`PayloadRecord`]: the latest left payload, the
//! latest right payload, and the memoized [`Outcome`] of the last full
//! comparison. The three are guarded by a single per-identifier lock so that
//! a write and its cache invalidation are observed together.
//!
//! # Storage Backends
//!
//! All backends implement the [`SideStore`] trait:
//!
//! - [`InMemorySideStore`] -- `HashMap`-based store, empty at process start
//!
//! # Design Rules
//!
//! 1. Payloads are overwritten on every write, never merged.
//! 2. Any write to either side clears the cached outcome for that identifier.
//! 3. Operations on different identifiers never wait on each other.
//! 4. The store never interprets payload contents.

pub mod error;
pub mod memory;
pub mod outcome;
pub mod record;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemorySideStore;
pub use outcome::{ComparisonFailure, Outcome};
pub use record::PayloadRecord;
pub use traits::SideStore;

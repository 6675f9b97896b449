//! Account persistence.
//!
//! [`AccountStore`] is the contract the runtime writes through; every write to an
//! existing account is a conditional update. [`InMemoryAccountStore`] backs tests
//! and local runs, and [`TimedStore`] bounds each call with a deadline.

mod error;
mod memory;
mod timed;
mod traits;

pub use error::{Result, StoreError};
pub use memory::InMemoryAccountStore;
pub use timed::TimedStore;
pub use traits::{AccountStore, UpdateOutcome};

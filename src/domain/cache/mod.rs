//! Cache domain - session cache keys and entries

mod entry;
mod key;

pub use entry::{CacheEntrySummary, CacheLookup, CachedSession, LoadTiming};
pub use key::SessionKey;

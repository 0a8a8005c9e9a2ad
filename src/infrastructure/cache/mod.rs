//! Cache implementations: the in-process session cache and the on-disk
//! response cache

mod disk;
mod fifo;
mod session_cache;

pub use disk::{DiskCache, DiskCacheStats};
pub use fifo::FifoCache;
pub use session_cache::SessionCache;

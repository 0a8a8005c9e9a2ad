//! Session domain - resolved sessions, drivers, laps and the data source seam

mod entity;
mod lap;
mod provider;

pub use entity::{Driver, SessionInfo};
pub use lap::{format_timedelta, Lap, Laps};
pub use provider::{LoadOptions, LoadedSession, SessionDescriptor, SessionProvider};

#[cfg(test)]
pub use provider::mock;
#[cfg(test)]
pub use provider::MockSessionProvider;

//! OpenF1 data source - https://openf1.org

mod client;
mod models;
mod provider;

pub use client::OpenF1Client;
pub use provider::{OpenF1Provider, OpenF1Session};

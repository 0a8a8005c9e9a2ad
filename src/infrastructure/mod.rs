//! Infrastructure layer - External service implementations

pub mod cache;
pub mod observability;
pub mod openf1;
pub mod services;

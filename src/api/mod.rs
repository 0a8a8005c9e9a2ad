//! API layer - HTTP endpoints and middleware

pub mod cache;
pub mod health;
pub mod middleware;
pub mod router;
pub mod session;
pub mod state;
pub mod types;

pub use router::{create_router, create_router_with_state};
pub use state::AppState;

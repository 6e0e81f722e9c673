//! API layer - HTTP endpoints

pub mod health;
pub mod pages;
pub mod router;
pub mod state;

pub use router::create_router_with_state;
pub use state::AppState;

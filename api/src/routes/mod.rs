//! API route definitions.
//!
//! This module organizes all HTTP routes for the Logview API server.

mod health;
mod logs;
mod ws;

pub use health::health_routes;
pub use logs::logs_routes;
pub use ws::ws_routes;

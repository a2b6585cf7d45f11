//! HTTP adapters - REST API implementations.
//!
//! `router` assembles the intake endpoints and the health check into one
//! stateless `Router` ready for middleware layers.

pub mod health;
pub mod intake;

use axum::Router;

pub use health::{health_routes, HealthResponse};
pub use intake::{intake_routes, ErrorResponse, IntakeAppState};

/// Build the full application router.
pub fn router(state: IntakeAppState) -> Router {
    Router::new()
        .merge(intake_routes())
        .merge(health_routes())
        .with_state(state)
}

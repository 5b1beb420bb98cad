//! Visitor Badge Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, window arithmetic, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Counting Model
//! - Every admitted badge request appends one visit event, repeats included
//! - A badge shows the number of distinct sources in the requested window
//! - Storage failures never fail a request: counts degrade to 0 and lost
//!   writes are only logged

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::VisitsConfig;
pub use error::{VisitsError, VisitsResult};
pub use infra::sqlite::SqliteVisitRepository;
pub use presentation::router::{badge_router, badge_router_generic};

//! Presentation Layer
//!
//! HTTP handlers and router for the badge API.

pub mod handlers;
pub mod router;

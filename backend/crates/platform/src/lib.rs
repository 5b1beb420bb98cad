//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Rate limiting infrastructure (sliding window, in-memory)
//! - Client address resolution
//! - Badge image rendering

pub mod badge;
pub mod client;
pub mod rate_limit;

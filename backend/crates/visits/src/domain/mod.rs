//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (VisitEvent)
//! - Domain value objects (Subject, Period, TimeWindow)
//! - Domain services (window calculation)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;

//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::VisitEvent;
use crate::domain::value_objects::{Subject, TimeWindow};
use crate::error::VisitsResult;

/// Visit event repository trait
#[trait_variant::make(VisitRepository: Send)]
pub trait LocalVisitRepository {
    /// Append a visit event
    async fn append(&self, event: &VisitEvent) -> VisitsResult<()>;

    /// Count distinct sources that visited `subject` within `window`
    async fn count_distinct_sources(
        &self,
        subject: &Subject,
        window: &TimeWindow,
    ) -> VisitsResult<u64>;
}

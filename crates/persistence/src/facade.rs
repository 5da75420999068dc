use async_trait::async_trait;

use crate::{Entity, Query, Result};

/// Read-only access for lookups that do not need transactional consistency.
#[async_trait]
pub trait ReadDbFacade: Send + Sync {
    /// Runs the query and returns the first row, if any.
    ///
    /// Reads are non-locking and may observe uncommitted data.
    async fn query_first_or_default<T: Entity>(&self, query: &Query) -> Result<Option<T>>;
}

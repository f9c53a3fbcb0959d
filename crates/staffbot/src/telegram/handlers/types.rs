//! Handler types and dependencies

use std::sync::Arc;

use staffcore::assistant::Assistant;
use staffcore::core::Clock;
use staffcore::scoring::EngagementSource;
use staffcore::DbPool;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub db_pool: Arc<DbPool>,
    pub assistant: Arc<Assistant>,
    pub clock: Arc<dyn Clock>,
    pub engagement: Arc<dyn EngagementSource>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(
        db_pool: Arc<DbPool>,
        assistant: Arc<Assistant>,
        clock: Arc<dyn Clock>,
        engagement: Arc<dyn EngagementSource>,
    ) -> Self {
        Self {
            db_pool,
            assistant,
            clock,
            engagement,
        }
    }
}

use std::sync::Arc;

use researchsnap_core::CitationRecord;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::resolver::CitationResolver;

/// The one "current citation" slot shown by a front end.
///
/// The slot starts with the bundled sample record and is only replaced
/// after a resolution succeeds. Concurrent submits are not cancelled; the
/// last one to finish wins.
pub struct CitationSession {
    resolver: Arc<CitationResolver>,
    current: RwLock<Arc<CitationRecord>>,
}

impl CitationSession {
    pub fn new(resolver: Arc<CitationResolver>) -> Self {
        Self::with_record(resolver, CitationRecord::sample())
    }

    pub fn with_record(resolver: Arc<CitationResolver>, record: CitationRecord) -> Self {
        Self {
            resolver,
            current: RwLock::new(Arc::new(record)),
        }
    }

    pub async fn current(&self) -> Arc<CitationRecord> {
        Arc::clone(&*self.current.read().await)
    }

    /// Resolves `url` and makes the result current. On failure the
    /// previous record stays in place.
    pub async fn submit(&self, url: &str) -> Result<Arc<CitationRecord>> {
        let record = Arc::new(self.resolver.resolve(url).await?);
        *self.current.write().await = Arc::clone(&record);
        debug!(identifier = %record.identifier, "current citation replaced");
        Ok(record)
    }
}

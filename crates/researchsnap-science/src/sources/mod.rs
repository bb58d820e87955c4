use async_trait::async_trait;
use researchsnap_core::CitationRecord;

use crate::error::Result;

/// One tier of the resolution chain.
///
/// `key` is whatever the tier looks up by: a DOI for the registry, a bare
/// arXiv ID for the preprint API, the submitted URL for the page scraper.
#[async_trait]
pub trait CitationSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn lookup(&self, key: &str) -> Result<CitationRecord>;
}

pub mod crossref;
pub mod webpage;

pub use crossref::CrossRefSource;
pub use webpage::WebPageSource;

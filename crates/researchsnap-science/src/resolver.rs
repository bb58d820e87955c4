use std::sync::Arc;

use researchsnap_core::{CitationRecord, NetworkConfig};
use tracing::{debug, info, warn};

use crate::arxiv::ArxivClient;
use crate::error::{Result, ScienceError};
use crate::http::HttpClient;
use crate::identifiers::extract_identifiers;
use crate::sources::{CitationSource, CrossRefSource, WebPageSource};

/// One step of a resolution plan: which source to ask, and with what key.
#[derive(Clone)]
pub struct Attempt {
    pub source: Arc<dyn CitationSource>,
    pub key: String,
}

impl Attempt {
    fn new(source: &Arc<dyn CitationSource>, key: impl Into<String>) -> Self {
        Self {
            source: Arc::clone(source),
            key: key.into(),
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }
}

impl std::fmt::Debug for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attempt")
            .field("source", &self.source.name())
            .field("key", &self.key)
            .finish()
    }
}

/// What happened on the way to a record.
#[derive(Debug, Default)]
pub struct ResolutionTrace {
    /// Source names in the order they were tried.
    pub attempted: Vec<&'static str>,
    /// Every tier that failed before the winning one.
    pub failures: Vec<ScienceError>,
    pub resolved_by: Option<&'static str>,
}

impl ResolutionTrace {
    pub fn fell_back(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// URL → citation record through the registry, preprint and page tiers.
pub struct CitationResolver {
    registry: Arc<dyn CitationSource>,
    preprint: Arc<dyn CitationSource>,
    page: Arc<dyn CitationSource>,
}

impl CitationResolver {
    pub fn new(
        registry: Arc<dyn CitationSource>,
        preprint: Arc<dyn CitationSource>,
        page: Arc<dyn CitationSource>,
    ) -> Self {
        Self {
            registry,
            preprint,
            page,
        }
    }

    pub fn from_config(config: &NetworkConfig) -> Result<Self> {
        let client = HttpClient::from_config(config)?;
        Ok(Self::new(
            Arc::new(CrossRefSource::from_config(client.clone(), config)),
            Arc::new(ArxivClient::from_config(client.clone(), config)),
            Arc::new(WebPageSource::new(client)),
        ))
    }

    /// The ordered attempts for `url`. A DOI wins over an arXiv ID, and
    /// whichever identifier tier runs is followed only by the page scraper.
    pub fn plan(&self, url: &str) -> Vec<Attempt> {
        let ids = extract_identifiers(url);
        let mut attempts = Vec::with_capacity(2);

        if let Some(doi) = ids.doi {
            attempts.push(Attempt::new(&self.registry, doi.into_string()));
        } else if let Some(arxiv_id) = ids.arxiv_id {
            attempts.push(Attempt::new(&self.preprint, arxiv_id.into_string()));
        }
        attempts.push(Attempt::new(&self.page, url));
        attempts
    }

    pub async fn resolve(&self, url: &str) -> Result<CitationRecord> {
        self.resolve_traced(url).await.map(|(record, _)| record)
    }

    pub async fn resolve_traced(&self, url: &str) -> Result<(CitationRecord, ResolutionTrace)> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ScienceError::ResolutionFailed("empty URL".to_string()));
        }

        let plan = self.plan(url);
        debug!(%url, plan = ?plan, "resolving");

        let mut trace = ResolutionTrace::default();
        for attempt in plan {
            let name = attempt.source_name();
            trace.attempted.push(name);

            match attempt.source.lookup(&attempt.key).await {
                Ok(record) => {
                    info!(%url, source = name, identifier = %record.identifier, "resolved");
                    trace.resolved_by = Some(name);
                    return Ok((record, trace));
                }
                Err(e) => {
                    if e.is_timeout() {
                        warn!(%url, source = name, "lookup timed out");
                    } else {
                        warn!(%url, source = name, error = %e, "lookup failed");
                    }
                    trace.failures.push(ScienceError::adapter_failed(name, e));
                }
            }
        }

        let reason = trace
            .failures
            .last()
            .map(ToString::to_string)
            .unwrap_or_else(|| "no applicable source".to_string());
        Err(ScienceError::ResolutionFailed(reason))
    }
}

//! Research Snap Science — identifier extraction, Crossref, arXiv, page
//! scraping, and the resolver that chains them.

pub mod error;
pub mod http;
pub mod identifiers;
pub mod arxiv;
pub mod sources;
pub mod resolver;
pub mod session;

pub use error::{RESOLUTION_FAILED_MESSAGE, Result, ScienceError};
pub use http::HttpClient;
pub use identifiers::{ExtractedIdentifiers, extract_identifiers};
pub use resolver::{Attempt, CitationResolver, ResolutionTrace};
pub use session::CitationSession;
pub use sources::CitationSource;

pub mod card;
pub mod config;
pub mod error;
pub mod models;

pub use card::{AuthorLine, CardFooter, CardView, Marker};
pub use config::{AppConfig, ExportConfig, NetworkConfig, UiConfig};
pub use error::{CoreError, ExitCode, Result};
pub use models::*;

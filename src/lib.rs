//! UADetector - User-Agent string detection
//!
//! Classifies HTTP clients (browsers, crawlers, feed readers, libraries)
//! and the operating system they run on, driven by a versioned database of
//! regular expression rules serialized as JSON.
//!
//! # Architecture
//! - `model`: immutable detection result records
//! - `data`: rule entities and the validated, cross-linked container
//! - `loader`: rule file parsing, regex compilation and validation
//! - `store`: in-memory container cache with background refresh, local
//!   cache files and a bundled fallback
//! - `parser`: the detection engine
//! - `config`: configuration management
//!
//! # Example
//! ```no_run
//! use uadetector::{DataStore, DetectorConfig, UserAgentStringParser};
//!
//! # #[tokio::main]
//! # async fn main() -> uadetector::Result<()> {
//! let store = DataStore::new(DetectorConfig::load())?;
//! let parser = UserAgentStringParser::new(store.clone());
//!
//! let agent = parser.parse("Googlebot/2.1 (+http://www.google.com/bot.html)");
//! println!("{}", agent);
//!
//! store.shutdown();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod errors;
pub mod loader;
pub mod model;
pub mod parser;
pub mod store;
pub mod utils;

pub use config::DetectorConfig;
pub use errors::{Result, UaDetectorError};
pub use model::{OperatingSystem, UserAgent, UserAgentType};
pub use parser::UserAgentStringParser;
pub use store::{DataStore, RefreshOutcome};

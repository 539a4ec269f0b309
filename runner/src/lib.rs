pub mod discovery;
pub mod error;
pub mod script;

pub use discovery::{find_sources, find_sources_from_cwd};
pub use error::{DiscoveryError, RunError};
pub use script::{ScriptOptions, run};

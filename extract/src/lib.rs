//! Clients for the external face pipeline services: the feature extractor
//! (image -> embedding vector) and the comparison oracle (image vs stored
//! content address -> raw similarity).
//!
//! Both services are opaque collaborators; this crate only transports
//! their output. Statistical validation of extracted vectors and every
//! threshold decision happen downstream, never here.

mod error;
mod extract;
mod http;
mod oracle;

pub use error::ExtractError;
pub use extract::Extractor;
pub use http::HttpExtractor;
pub use oracle::CompareOracle;

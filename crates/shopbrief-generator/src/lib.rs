//! Client for a text-generation-inference server and the generator selection
//! used by the CLI and the server.

pub mod backend;
pub mod client;
pub mod error;
pub mod types;

pub use backend::AnyGenerator;
pub use client::TgiClient;
pub use error::GeneratorError;
pub use types::GenerateParameters;

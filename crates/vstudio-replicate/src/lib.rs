//! Client for hosted video models on Replicate.
//!
//! [`VideoGenerator`] is the single "run model" operation the API server
//! depends on; [`ReplicateClient`] implements it over the Replicate HTTP API.

pub mod client;
pub mod error;
pub mod generator;
pub mod model_id;

pub use client::{ReplicateClient, ReplicateConfig, DEFAULT_API_BASE_URL};
pub use error::{ReplicateError, ReplicateResult};
pub use generator::VideoGenerator;
pub use model_id::{ModelId, ModelIdParseError, DEFAULT_MODEL_ID};

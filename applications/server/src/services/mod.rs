/// Server services
pub mod ingest;

pub use ingest::{CountPolicy, Ingestor};

// top-level library module


pub mod codec;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod scheduler;

pub use config::BatchConfig;
pub use error::PipelineError;
pub use scheduler::{BatchReport, WorkerReport, partition, run_batch, run_partitioned};

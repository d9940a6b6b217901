//! Frame processing: configuration and the three-stage matching pipeline.
//!
//! # Types
//!
//! - [`PipelineConfig`] - IoU/similarity thresholds and the eviction timeout
//! - [`TrackingPipeline`] - Owned tracking state and the per-frame entry point

pub mod config;
pub mod engine;

pub use config::PipelineConfig;
pub use engine::TrackingPipeline;

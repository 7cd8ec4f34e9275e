//! The core module of the classification pipeline.
//!
//! This module contains the fundamental components shared by the rest of the
//! crate:
//! - Error handling
//! - Configuration validation
//! - Capability traits for pretrained artifacts
//!
//! It also provides re-exports of commonly used types and the tracing
//! initialization helper.

pub mod config;
pub mod errors;
pub mod traits;

pub use config::{ConfigError, ConfigValidator, ConfigValidatorExt};
pub use errors::{ClassifyError, ClassifyResult, ProcessingStage};
pub use traits::{Classifier, Scaler};

/// Initializes the tracing subscriber for logging.
///
/// Sets up the tracing subscriber with an environment filter and a formatting
/// layer writing to stderr, keeping stdout free for the single JSON result
/// document the CLI prints. Typically called once at the start of a binary.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

//! Playbook and analyzer configuration errors
use shopdx_core::MetricId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaybookError {
    #[error("PLAYBOOK/parse: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("PLAYBOOK/cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PLAYBOOK/entry '{0}' has an empty title")]
    EmptyTitle(MetricId),

    #[error("PLAYBOOK/severity cutoffs must satisfy 0 <= critical <= major <= minor <= 100, got {critical}/{major}/{minor}")]
    InvalidCutoffs { critical: f64, major: f64, minor: f64 },
}

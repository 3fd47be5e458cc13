//! Run Context: identity of one diagnosis run
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::data_model::{RawMetrics, ReportMeta};
use crate::ENGINE_VERSION;

#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub input_hash: String,
}

impl RunContext {
    /// Context for a run over `raw`; the hash covers the canonical JSON form
    pub fn for_metrics(raw: &RawMetrics) -> Self {
        let bytes = serde_json::to_vec(raw).unwrap_or_default();
        Self::for_bytes(&bytes)
    }

    pub fn for_bytes(bytes: &[u8]) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            input_hash: blake3::hash(bytes).to_hex().to_string(),
        }
    }

    pub fn into_meta(self) -> ReportMeta {
        ReportMeta {
            engine_version: ENGINE_VERSION.to_string(),
            run_id: self.run_id,
            generated_at: self.generated_at,
            input_hash: self.input_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::demo_shop;

    #[test]
    fn test_hash_is_stable_and_run_id_is_not() {
        let a = RunContext::for_metrics(&demo_shop());
        let b = RunContext::for_metrics(&demo_shop());
        assert_eq!(a.input_hash, b.input_hash);
        assert_ne!(a.run_id, b.run_id);
        assert_eq!(a.input_hash.len(), 64);
    }

    #[test]
    fn test_hash_tracks_input() {
        let mut other = demo_shop();
        other.rating = 4.9;
        assert_ne!(
            RunContext::for_metrics(&demo_shop()).input_hash,
            RunContext::for_metrics(&other).input_hash
        );
    }
}

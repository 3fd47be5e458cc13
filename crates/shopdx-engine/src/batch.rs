//! Parallel batch diagnosis
//!
//! One blocking task per shop on the tokio runtime. The catalog and playbook
//! are shared through the engine's `Arc`s; results come back in input order.

use shopdx_core::{DiagnosisReport, RawMetrics};
use tokio::task::JoinSet;
use tracing::debug;

use crate::error::EngineError;
use crate::pipeline::DiagnosisEngine;

impl DiagnosisEngine {
    pub async fn diagnose_batch(
        &self,
        shops: Vec<RawMetrics>,
    ) -> Result<Vec<DiagnosisReport>, EngineError> {
        let total = shops.len();
        let mut tasks = JoinSet::new();
        for (index, raw) in shops.into_iter().enumerate() {
            let engine = self.clone();
            tasks.spawn_blocking(move || (index, engine.diagnose(&raw)));
        }

        let mut slots: Vec<Option<DiagnosisReport>> = vec![None; total];
        while let Some(joined) = tasks.join_next().await {
            let (index, report) = joined.map_err(|e| EngineError::Worker(e.to_string()))?;
            slots[index] = Some(report);
        }
        debug!(shops = total, "batch complete");

        Ok(slots.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdx_core::demo_shop;

    fn named(name: &str, rating: f64) -> RawMetrics {
        let mut raw = demo_shop();
        raw.profile.name = name.to_string();
        raw.rating = rating;
        raw
    }

    #[tokio::test]
    async fn test_batch_keeps_input_order() {
        let engine = DiagnosisEngine::builtin();
        let shops: Vec<RawMetrics> = (0..12)
            .map(|i| named(&format!("shop-{i}"), 4.0 + i as f64 * 0.08))
            .collect();

        let reports = engine.diagnose_batch(shops.clone()).await.unwrap();
        assert_eq!(reports.len(), 12);
        for (raw, report) in shops.iter().zip(&reports) {
            assert_eq!(report.shop.name, raw.profile.name);
            assert_eq!(
                report.without_run_identity(),
                engine.diagnose(raw).without_run_identity()
            );
        }
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let reports = DiagnosisEngine::builtin().diagnose_batch(Vec::new()).await.unwrap();
        assert!(reports.is_empty());
    }
}

//! Shopdx Engine: runs the diagnosis pipeline
//!
//! # Pipeline Flow
//!
//! ```text
//! ShopInput → validate → RawMetrics → Calculator → Evaluator → Analyzer → DiagnosisReport
//!                 ↓                        ↓            ↓           ↓
//!          InputError              DerivedMetrics  Evaluation   Issues + Plan
//! ```
//!
//! # Example
//!
//! ```ignore
//! use shopdx_core::demo_shop;
//! use shopdx_engine::DiagnosisEngine;
//!
//! let engine = DiagnosisEngine::builtin();
//! let report = engine.diagnose(&demo_shop());
//! println!("{} {:.1}", report.grade.code, report.overall_score);
//! ```

mod batch;
pub mod config;
pub mod error;
pub mod pipeline;

pub use config::EngineConfig;
pub use error::EngineError;
pub use pipeline::DiagnosisEngine;

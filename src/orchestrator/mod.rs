//! 编排层（Orchestration Layer）
//!
//! ```text
//! orchestrator::App (路由 + 并发提交多个 CSV)
//!     ↓
//! workflow::SubmissionFlow (处理单次提交)
//!     ↓
//! clients / services (提交、展示、存储)
//! ```

pub mod app;

pub use app::{App, RunStats};

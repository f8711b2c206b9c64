//! # ChronoLogic Client
//!
//! ChronoLogic 计算后端的客户端：收集 CSV 文件和工人名单，
//! 以 `multipart/form-data` 提交到 `/api/process` 或 `/api/process-fixed`，
//! 展示返回的总时间和最小并行时间，并持久化结果供结果页读取。
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `WorkerListForm` - 纯数据的工人名单，行号始终由当前位置推导
//! - `UploadPayload` / `ResultPayload` - 请求体和响应体
//!
//! ### ② 能力层（Clients / Services）
//! - `SubmissionClient` - 一次网络往返，类型化的失败
//! - `ResultPresenter` - 成功时持久化并生成摘要
//! - `ResultStore` - 注入的键值存储（内存 / 文件）
//! - `ResultView` - 读取并渲染最近一次结果
//!
//! ### ③ 流程层（Workflow）
//! - `SubmissionFlow` - 文件检查 → 校验 → 提交 → 展示
//!
//! ### ④ 编排层（Orchestration）
//! - `Router` - 路径到页面的静态映射
//! - `App` - 路由 + 并发提交

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod router;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{Endpoint, SubmissionClient};
pub use config::Config;
pub use error::{AppError, AppResult, StoreError, SubmitError, ValidationError};
pub use models::{CsvFile, ResultPayload, RowId, UploadPayload, WorkerListForm, WorkerRecord};
pub use orchestrator::{App, RunStats};
pub use router::{Router, View};
pub use services::{FileStore, MemoryStore, ResultPresenter, ResultStore, ResultView};
pub use workflow::SubmissionFlow;

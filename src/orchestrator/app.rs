//! 应用编排 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：创建存储、客户端和提交流程
//! 2. **路由**：按配置的路径决定展示哪个页面
//! 3. **并发提交**：多个 CSV 文件各自独立提交，使用 Semaphore 限制并发数
//! 4. **全局统计**：汇总所有提交的结果
//!
//! 并发提交之间没有去重，也没有顺序保证；最后到达的成功响应占据结果存储。

use anyhow::{Context, Result};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::clients::SubmissionClient;
use crate::config::Config;
use crate::error::{AppError, ConfigError};
use crate::models::loaders::load_workers_toml;
use crate::models::payload::CsvFile;
use crate::models::worker::WorkerListForm;
use crate::router::{Router, View};
use crate::services::{failure_notice, FileStore, ResultStore, ResultView, Summary};
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::SubmissionFlow;

/// 提交统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    router: Router,
    store: Arc<dyn ResultStore>,
    flow: SubmissionFlow,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let store: Arc<dyn ResultStore> = Arc::new(FileStore::new(&config.storage_dir));
        Ok(Self::with_store(config, store))
    }

    /// 使用自定义存储创建应用
    pub fn with_store(config: Config, store: Arc<dyn ResultStore>) -> Self {
        let client = SubmissionClient::new(&config);
        let flow = SubmissionFlow::new(client, store.clone());
        Self {
            config,
            router: Router::new(),
            store,
            flow,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunStats> {
        let view = self
            .router
            .resolve(&self.config.route)
            .ok_or_else(|| ConfigError::UnknownRoute {
                path: self.config.route.clone(),
            })?;
        info!("🧭 打开页面: {}", view.name());

        if view == View::Result {
            let page = ResultView::new(self.store.clone())
                .render()
                .context("无法读取结果")?;
            println!("{}", page);
            return Ok(RunStats::default());
        }

        let form = self.load_form(view).await?;
        print!("{}", form);

        let stats = self.submit_all(view, &form).await;
        print_final_stats(stats.success, stats.failed, stats.total);
        Ok(stats)
    }

    /// 主页面读取工人名单，次页面不需要
    async fn load_form(&self, view: View) -> Result<WorkerListForm> {
        match view {
            View::Operations => load_workers_toml(Path::new(&self.config.workers_file)).await,
            _ => Ok(WorkerListForm::new()),
        }
    }

    /// 并发提交所有 CSV 文件
    async fn submit_all(&self, view: View, form: &WorkerListForm) -> RunStats {
        if self.config.csv_files.is_empty() {
            // 没有选择文件：走一次流程，由流程给出缺少文件的提示
            let outcome = self.flow.run(view, None, form).await;
            return report(&[("-".to_string(), outcome)]);
        }

        // 0 个许可会让所有提交永远等待
        let semaphore = Semaphore::new(self.config.max_concurrent_submissions.max(1));
        let semaphore = &semaphore;

        let tasks = self.config.csv_files.iter().map(|path| async move {
            // 信号量不会被关闭
            let _permit = semaphore.acquire().await.ok();
            let outcome = self.submit_one(view, PathBuf::from(path), form).await;
            (path.clone(), outcome)
        });

        let outcomes = join_all(tasks).await;
        report(&outcomes)
    }

    async fn submit_one(
        &self,
        view: View,
        path: PathBuf,
        form: &WorkerListForm,
    ) -> Result<Summary, AppError> {
        let file = CsvFile::load(&path).await?;
        self.flow.run(view, Some(file), form).await
    }
}

/// 打印每次提交的提示并统计
fn report(outcomes: &[(String, Result<Summary, AppError>)]) -> RunStats {
    let mut stats = RunStats {
        total: outcomes.len(),
        ..Default::default()
    };

    for (path, outcome) in outcomes {
        match outcome {
            Ok(summary) => {
                stats.success += 1;
                println!("[{}]\n{}", path, summary);
            }
            Err(e) => {
                stats.failed += 1;
                error!("[{}] 提交失败: {}", path, e);
                println!("[{}]\n{}", path, failure_notice(e));
            }
        }
    }

    stats
}

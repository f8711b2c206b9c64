//! 提交流程 - 流程层
//!
//! 定义"一次提交"的完整流程：
//! 1. 检查文件（缺失时不发请求）
//! 2. 校验工人名单（仅 process 接口）
//! 3. 发送请求并解析 JSON
//! 4. 交给 ResultPresenter 展示和持久化
//!
//! 任何一步失败都会中止本次提交，表单本身不被修改，可直接修正后重新提交。

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::{Endpoint, SubmissionClient};
use crate::error::{AppError, ConfigError, SubmitError};
use crate::models::payload::{CsvFile, ResultPayload, UploadPayload};
use crate::models::worker::WorkerListForm;
use crate::router::View;
use crate::services::{ResultPresenter, ResultStore, Summary};

pub struct SubmissionFlow {
    client: SubmissionClient,
    presenter: ResultPresenter,
}

impl SubmissionFlow {
    pub fn new(client: SubmissionClient, store: Arc<dyn ResultStore>) -> Self {
        Self {
            client,
            presenter: ResultPresenter::new(store),
        }
    }

    /// 在指定页面上提交一次
    ///
    /// # 参数
    /// - `view`: 当前页面，决定使用哪个接口
    /// - `file`: CSV 文件
    /// - `form`: 工人名单（process-fixed 接口忽略）
    pub async fn run(
        &self,
        view: View,
        file: Option<CsvFile>,
        form: &WorkerListForm,
    ) -> Result<Summary, AppError> {
        let endpoint = view.endpoint().ok_or_else(|| ConfigError::UnknownRoute {
            path: view.name().to_string(),
        })?;

        let file = file.ok_or(SubmitError::MissingFile)?;
        let file_name = file.file_name.clone();

        let upload = match endpoint {
            Endpoint::Process => {
                form.validate()?;
                info!("[{}] 提交 {} 名工人", file_name, form.len());
                UploadPayload::with_workers(file, form)
                    .map_err(|source| SubmitError::EncodeWorkers { source })?
            }
            Endpoint::ProcessFixed => UploadPayload::file_only(file),
        };
        let value = self.client.submit(endpoint, upload).await?;

        let payload = parse_payload(value)?;
        let summary = self.presenter.present(&payload)?;

        info!("[{}] ✓ 提交完成", file_name);
        Ok(summary)
    }
}

/// JSON 合法但字段类型不符时同样视为无效响应
fn parse_payload(value: Value) -> Result<ResultPayload, SubmitError> {
    let raw = value.to_string();
    ResultPayload::from_value(value).map_err(|source| {
        warn!("❌ 响应结构无法识别: {}", raw);
        SubmitError::InvalidJson { raw, source }
    })
}

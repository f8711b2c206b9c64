//! 提交客户端
//!
//! 封装与计算后端的全部 HTTP 交互。两个接口共用同一套协议：
//! 先完整读取响应体，再检查状态码，最后解析 JSON。

use reqwest::Response;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::SubmitError;
use crate::models::payload::{CsvFile, UploadPayload};
use crate::models::worker::WorkerListForm;
use crate::utils::logging::truncate_text;

/// 后端接口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `/api/process`：文件 + 工人名单
    Process,
    /// `/api/process-fixed`：只有文件，工人由后端自行确定
    ProcessFixed,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Process => "/api/process",
            Endpoint::ProcessFixed => "/api/process-fixed",
        }
    }
}

/// 提交客户端
///
/// 不配置超时，也不重试；每次调用恰好一次网络往返。
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    http: reqwest::Client,
    base_url: String,
}

impl SubmissionClient {
    /// 创建新的提交客户端
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.api_base_url)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 提交文件和工人名单到 `/api/process`
    ///
    /// # 参数
    /// - `file`: CSV 文件，缺失时在发请求前直接失败
    /// - `form`: 工人名单，按当前顺序序列化
    pub async fn process(
        &self,
        file: Option<CsvFile>,
        form: &WorkerListForm,
    ) -> Result<Value, SubmitError> {
        let file = file.ok_or(SubmitError::MissingFile)?;
        let payload = UploadPayload::with_workers(file, form)
            .map_err(|source| SubmitError::EncodeWorkers { source })?;
        self.submit(Endpoint::Process, payload).await
    }

    /// 只提交文件到 `/api/process-fixed`
    pub async fn process_fixed(&self, file: Option<CsvFile>) -> Result<Value, SubmitError> {
        let file = file.ok_or(SubmitError::MissingFile)?;
        self.submit(Endpoint::ProcessFixed, UploadPayload::file_only(file))
            .await
    }

    /// 发送一次 multipart POST 并解析响应
    pub async fn submit(
        &self,
        endpoint: Endpoint,
        payload: UploadPayload,
    ) -> Result<Value, SubmitError> {
        let url = format!("{}{}", self.base_url, endpoint.path());

        info!(
            "📤 提交 {} ({} 字节) -> {}",
            payload.file.file_name,
            payload.file.bytes.len(),
            url
        );
        if let Some(workers) = &payload.workers {
            debug!("workers 字段: {}", workers);
        }

        let response = self
            .http
            .post(&url)
            .multipart(payload.into_form())
            .send()
            .await
            .map_err(|source| SubmitError::Transport {
                endpoint: url.clone(),
                source,
            })?;

        read_json(&url, response).await
    }

    /// 健康检查 `GET /health`
    pub async fn health(&self) -> Result<Value, SubmitError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| SubmitError::Transport {
                endpoint: url.clone(),
                source,
            })?;

        read_json(&url, response).await
    }
}

/// 读取响应体文本，检查状态码，再解析 JSON
async fn read_json(url: &str, response: Response) -> Result<Value, SubmitError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| SubmitError::Transport {
            endpoint: url.to_string(),
            source,
        })?;

    debug!("响应 {} ({}): {}", status, url, truncate_text(&body, 500));

    if !status.is_success() {
        warn!("❌ HTTP {} ({})", status.as_u16(), url);
        return Err(SubmitError::Http {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|source| {
        warn!("❌ 响应不是合法的 JSON ({})", url);
        SubmitError::InvalidJson { raw: body, source }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Process.path(), "/api/process");
        assert_eq!(Endpoint::ProcessFixed.path(), "/api/process-fixed");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = SubmissionClient::with_base_url("http://127.0.0.1:8000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }

    #[tokio::test]
    async fn test_missing_file_fails_before_network() {
        // 指向一个不可达地址，若发出请求会得到 Transport 错误
        let client = SubmissionClient::with_base_url("http://127.0.0.1:9");
        let form = WorkerListForm::new();

        let err = client.process(None, &form).await.unwrap_err();
        assert!(matches!(err, SubmitError::MissingFile));

        let err = client.process_fixed(None).await.unwrap_err();
        assert!(matches!(err, SubmitError::MissingFile));
    }
}

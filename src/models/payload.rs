use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

use crate::error::{AppError, AppResult};
use crate::models::worker::WorkerListForm;

/// 待上传的 CSV 文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl CsvFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// 从磁盘读取 CSV 文件
    pub async fn load(path: &Path) -> AppResult<Self> {
        let bytes = fs::read(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.csv".to_string());
        Ok(Self { file_name, bytes })
    }
}

/// 一次上传的请求体
///
/// `workers` 为 `None` 时不发送该字段（process-fixed 接口）。
#[derive(Debug, Clone)]
pub struct UploadPayload {
    pub file: CsvFile,
    pub workers: Option<String>,
}

impl UploadPayload {
    /// `/api/process`：文件 + 工人名单
    pub fn with_workers(file: CsvFile, form: &WorkerListForm) -> serde_json::Result<Self> {
        Ok(Self {
            file,
            workers: Some(form.to_json()?),
        })
    }

    /// `/api/process-fixed`：只有文件
    pub fn file_only(file: CsvFile) -> Self {
        Self {
            file,
            workers: None,
        }
    }

    /// 构建 multipart 表单
    pub fn into_form(self) -> Form {
        let part = Part::bytes(self.file.bytes).file_name(self.file.file_name);
        let form = Form::new().part("file", part);
        match self.workers {
            Some(workers) => form.text("workers", workers),
            None => form,
        }
    }
}

/// 后端返回的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// 总时间（分钟）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sum: Option<f64>,
    /// 最小并行时间（分钟）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 结果 CSV 文本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv: Option<String>,
    // process-fixed 的统计字段
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_before: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_after: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtered_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_sec: Option<f64>,
    /// 其余未识别字段
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultPayload {
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

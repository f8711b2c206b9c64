//! 结果展示 - 业务能力层
//!
//! 成功时持久化 `data` 并生成摘要，失败时只给出提示，不写存储。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{AppError, StoreError, SubmitError};
use crate::models::payload::ResultPayload;
use crate::router::RESULT_PATH;
use crate::services::result_store::{ResultStore, RESULT_STORAGE_KEY};

/// 持久化的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedResult {
    /// 写入时间（RFC 3339）
    pub saved_at: String,
    pub data: Value,
}

/// 成功摘要
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// 总时间（分钟）
    pub total_sum: Option<f64>,
    /// 最小并行时间（分钟）
    pub max_parallel_time: Option<f64>,
    pub total_before: Option<u64>,
    pub total_after: Option<u64>,
    pub filtered_count: Option<u64>,
    /// 详细结果页
    pub result_link: &'static str,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "✅ 处理完成！")?;
        if let Some(total) = self.total_sum {
            writeln!(f, "总时间: {} 分钟", total)?;
        }
        if let Some(parallel) = self.max_parallel_time {
            writeln!(f, "最小并行时间: {} 分钟", parallel)?;
        }
        if let (Some(before), Some(after)) = (self.total_before, self.total_after) {
            writeln!(
                f,
                "行数: {} -> {}（过滤 {}）",
                before,
                after,
                self.filtered_count.unwrap_or(before.saturating_sub(after))
            )?;
        }
        write!(f, "查看结果: {}", self.result_link)
    }
}

/// 失败提示文本
pub fn failure_notice(err: &AppError) -> String {
    match err {
        AppError::Submit(SubmitError::Application { message }) => format!("❌ 错误: {}", message),
        other => format!("❌ {}", other),
    }
}

/// 结果展示
pub struct ResultPresenter {
    store: Arc<dyn ResultStore>,
}

impl ResultPresenter {
    pub fn new(store: Arc<dyn ResultStore>) -> Self {
        Self { store }
    }

    /// 处理后端返回的结果
    ///
    /// # 返回
    /// - `success: true`：覆盖写入 `data` 并返回摘要
    /// - `success: false`：返回 `SubmitError::Application`，不写存储
    pub fn present(&self, payload: &ResultPayload) -> Result<Summary, AppError> {
        if !payload.success {
            let message = payload
                .error
                .clone()
                .unwrap_or_else(|| "后端未返回错误信息".to_string());
            warn!("❌ 后端处理失败: {}", message);
            return Err(SubmitError::Application { message }.into());
        }

        match &payload.data {
            Some(data) => {
                let persisted = PersistedResult {
                    saved_at: chrono::Local::now().to_rfc3339(),
                    data: data.clone(),
                };
                let value = serde_json::to_value(&persisted).map_err(|source| {
                    StoreError::Corrupt {
                        key: RESULT_STORAGE_KEY.to_string(),
                        source,
                    }
                })?;
                self.store.set(RESULT_STORAGE_KEY, &value)?;
                info!("💾 结果已保存 ({})", RESULT_STORAGE_KEY);
            }
            None => warn!("⚠️ 成功响应中没有 data 字段，未保存结果"),
        }

        Ok(Summary {
            total_sum: payload.total_sum,
            max_parallel_time: payload.max_parallel_time,
            total_before: payload.total_before,
            total_after: payload.total_after,
            filtered_count: payload.filtered_count,
            result_link: RESULT_PATH,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::result_store::MemoryStore;
    use serde_json::json;

    fn presenter() -> (ResultPresenter, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (ResultPresenter::new(store.clone()), store)
    }

    #[test]
    fn test_failure_surfaces_message_without_persisting() {
        let (presenter, store) = presenter();
        let payload =
            ResultPayload::from_value(json!({"success": false, "error": "bad grade"})).unwrap();

        let err = presenter.present(&payload).unwrap_err();
        assert!(matches!(
            &err,
            AppError::Submit(SubmitError::Application { message }) if message == "bad grade"
        ));
        assert_eq!(failure_notice(&err), "❌ 错误: bad grade");
        assert_eq!(store.get(RESULT_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_success_persists_data_and_renders_summary() {
        let (presenter, store) = presenter();
        let payload = ResultPayload::from_value(json!({
            "success": true,
            "data": {"x": 1},
            "total_sum": 120,
            "max_parallel_time": 45
        }))
        .unwrap();

        let summary = presenter.present(&payload).unwrap();
        let text = summary.to_string();
        assert!(text.contains("总时间: 120 分钟"));
        assert!(text.contains("最小并行时间: 45 分钟"));
        assert!(text.ends_with("查看结果: /result"));

        let stored: PersistedResult =
            serde_json::from_value(store.get(RESULT_STORAGE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored.data, json!({"x": 1}));
    }

    #[test]
    fn test_second_success_overwrites_first() {
        let (presenter, store) = presenter();
        for x in [1, 2] {
            let payload =
                ResultPayload::from_value(json!({"success": true, "data": {"x": x}})).unwrap();
            presenter.present(&payload).unwrap();
        }

        let stored = store.get(RESULT_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(stored["data"], json!({"x": 2}));
    }

    #[test]
    fn test_fixed_summary_shows_row_counts() {
        let (presenter, _store) = presenter();
        let payload = ResultPayload::from_value(json!({
            "success": true,
            "data": [],
            "total_before": 10,
            "total_after": 9,
            "filtered_count": 1
        }))
        .unwrap();

        let text = presenter.present(&payload).unwrap().to_string();
        assert!(text.contains("行数: 10 -> 9（过滤 1）"));
        assert!(!text.contains("总时间"));
    }
}

//! 详细结果页
//!
//! 读取最近一次持久化的结果并渲染为文本表格。

use serde_json::Value;
use std::sync::Arc;

use crate::error::{AppError, StoreError};
use crate::services::result_presenter::PersistedResult;
use crate::services::result_store::{ResultStore, RESULT_STORAGE_KEY};

pub struct ResultView {
    store: Arc<dyn ResultStore>,
}

impl ResultView {
    pub fn new(store: Arc<dyn ResultStore>) -> Self {
        Self { store }
    }

    /// 读取持久化结果，不存在时返回 `None`
    pub fn load(&self) -> Result<Option<PersistedResult>, AppError> {
        let Some(value) = self.store.get(RESULT_STORAGE_KEY)? else {
            return Ok(None);
        };
        let persisted = serde_json::from_value(value).map_err(|source| StoreError::Corrupt {
            key: RESULT_STORAGE_KEY.to_string(),
            source,
        })?;
        Ok(Some(persisted))
    }

    /// 渲染整个页面
    pub fn render(&self) -> Result<String, AppError> {
        Ok(match self.load()? {
            Some(result) => format!(
                "📋 处理结果（保存于 {}）\n{}",
                result.saved_at,
                render_table(&result.data)
            ),
            None => "暂无结果，请先提交 CSV 文件".to_string(),
        })
    }
}

/// 将对象数组渲染为对齐的文本表格
///
/// 列按首次出现的顺序排列；非数组数据按 JSON 原样输出。
pub fn render_table(data: &Value) -> String {
    let Some(rows) = data.as_array() else {
        return serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
    };
    if rows.is_empty() {
        return "（无数据）".to_string();
    }

    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        if let Some(obj) = row.as_object() {
            for key in obj.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| row.get(c).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format_line(&columns, &widths));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &cells {
        out.push('\n');
        out.push_str(&format_line(row, &widths));
    }
    out
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| {
            let pad = w.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

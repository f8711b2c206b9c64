use crate::models::worker::WorkerListForm;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// TOML 中的级别可以写成整数或字符串
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GradeValue {
    Number(i64),
    Text(String),
}

impl GradeValue {
    fn into_string(self) -> String {
        match self {
            GradeValue::Number(n) => n.to_string(),
            GradeValue::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WorkerEntry {
    grade: GradeValue,
    equipment: String,
}

#[derive(Debug, Deserialize)]
struct WorkerRoster {
    #[serde(default)]
    workers: Vec<WorkerEntry>,
}

/// 从 TOML 文本解析工人名单，按文件顺序追加到新表单
pub fn load_workers_from_str(content: &str) -> Result<WorkerListForm> {
    let roster: WorkerRoster = toml::from_str(content).context("无法解析工人名单")?;

    let mut form = WorkerListForm::new();
    for entry in roster.workers {
        form.add_worker(entry.grade.into_string(), entry.equipment);
    }
    Ok(form)
}

/// 从 TOML 文件加载工人名单
pub async fn load_workers_toml(path: &Path) -> Result<WorkerListForm> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取工人名单文件: {}", path.display()))?;

    let form = load_workers_from_str(&content)
        .with_context(|| format!("无法解析工人名单文件: {}", path.display()))?;

    tracing::info!("成功加载 {} 名工人: {}", form.len(), path.display());
    Ok(form)
}

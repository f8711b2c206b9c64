//! 工人名单表单
//!
//! 纯数据结构：有序的工人行列表，支持追加、按引用删除、按需序列化。
//! 行号（显示编号和序列化 `id`）始终由当前位置推导，删除后自动重排。

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// 行引用
///
/// 只用于删除和编辑，不是序列化时的 `id`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(u64);

/// 表单中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerRow {
    handle: RowId,
    pub grade: String,
    pub equipment: String,
}

impl WorkerRow {
    pub fn handle(&self) -> RowId {
        self.handle
    }
}

/// 提交给后端的工人记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRecord {
    /// 当前位置（从 1 开始）
    pub id: usize,
    pub grade: String,
    pub equipment: String,
}

/// 工人名单表单
#[derive(Debug, Clone, Default)]
pub struct WorkerListForm {
    rows: Vec<WorkerRow>,
    next_handle: u64,
}

impl WorkerListForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个空行
    pub fn add_row(&mut self) -> RowId {
        self.add_worker(String::new(), String::new())
    }

    /// 追加一个已填好的行
    pub fn add_worker(&mut self, grade: impl Into<String>, equipment: impl Into<String>) -> RowId {
        let handle = RowId(self.next_handle);
        self.next_handle += 1;
        self.rows.push(WorkerRow {
            handle,
            grade: grade.into(),
            equipment: equipment.into(),
        });
        handle
    }

    /// 删除指定行
    ///
    /// # 返回
    /// 行不存在（例如已被删除）时返回 `false`，列表保持不变
    pub fn remove_row(&mut self, row: RowId) -> bool {
        match self.position_of(row) {
            Some(index) => {
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn set_grade(&mut self, row: RowId, grade: impl Into<String>) -> bool {
        match self.row_mut(row) {
            Some(r) => {
                r.grade = grade.into();
                true
            }
            None => false,
        }
    }

    pub fn set_equipment(&mut self, row: RowId, equipment: impl Into<String>) -> bool {
        match self.row_mut(row) {
            Some(r) => {
                r.equipment = equipment.into();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 行的显示编号（当前位置，从 1 开始）
    pub fn label_of(&self, row: RowId) -> Option<usize> {
        self.position_of(row).map(|i| i + 1)
    }

    /// 按当前顺序遍历 `(显示编号, 行)`
    pub fn rows(&self) -> impl Iterator<Item = (usize, &WorkerRow)> {
        self.rows.iter().enumerate().map(|(i, r)| (i + 1, r))
    }

    /// 序列化为工人记录列表，`id` 按当前位置重新编号
    ///
    /// 不做任何校验；空表单返回空列表。
    pub fn serialize(&self) -> Vec<WorkerRecord> {
        self.rows()
            .map(|(id, row)| WorkerRecord {
                id,
                grade: row.grade.clone(),
                equipment: row.equipment.clone(),
            })
            .collect()
    }

    /// 序列化为 JSON 数组文本（multipart 的 `workers` 字段）
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.serialize())
    }

    /// 检查每行的级别和设备是否已填写
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (row, worker) in self.rows() {
            if worker.grade.trim().is_empty() {
                return Err(ValidationError::EmptyGrade { row });
            }
            if worker.equipment.trim().is_empty() {
                return Err(ValidationError::EmptyEquipment { row });
            }
        }
        Ok(())
    }

    fn position_of(&self, row: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.handle == row)
    }

    fn row_mut(&mut self, row: RowId) -> Option<&mut WorkerRow> {
        self.rows.iter_mut().find(|r| r.handle == row)
    }
}

impl fmt::Display for WorkerListForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "（暂无工人）");
        }
        for (label, row) in self.rows() {
            writeln!(f, "{:>3}. 级别: {} | 设备: {}", label, row.grade, row.equipment)?;
        }
        Ok(())
    }
}

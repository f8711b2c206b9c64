use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 提交相关错误
    #[error("提交错误: {0}")]
    Submit(#[from] SubmitError),
    /// 结果存储错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
    /// 表单校验错误
    #[error("表单错误: {0}")]
    Validation(#[from] ValidationError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误 ({path}): {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 提交错误
///
/// 一次提交要么得到完整解析的 JSON，要么以下列之一失败。
#[derive(Debug, Error)]
pub enum SubmitError {
    /// 未选择 CSV 文件，在发出任何网络请求之前拦截
    #[error("请选择 CSV 文件")]
    MissingFile,
    /// 非 2xx 响应，附带原始响应体
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// 响应体不是合法 JSON
    #[error("响应不是合法的 JSON: {raw}")]
    InvalidJson {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
    /// JSON 合法但 `success` 为 false
    #[error("{message}")]
    Application { message: String },
    /// 工人名单无法编码为 JSON
    #[error("工人名单编码失败: {source}")]
    EncodeWorkers {
        #[source]
        source: serde_json::Error,
    },
    /// 网络层失败（连接、读取响应体等）
    #[error("网络请求失败 ({endpoint}): {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 结果存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("读写存储失败 ({key}): {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("存储内容无法解析 ({key}): {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("存储锁已损坏")]
    Poisoned,
}

/// 表单校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// 第 N 行（从 1 开始）缺少级别
    #[error("第 {row} 行缺少级别")]
    EmptyGrade { row: usize },
    /// 第 N 行（从 1 开始）缺少设备
    #[error("第 {row} 行缺少设备")]
    EmptyEquipment { row: usize },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 路由路径无法解析
    #[error("未知路由: {path}")]
    UnknownRoute { path: String },
}

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File {
            path: path.into(),
            source,
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

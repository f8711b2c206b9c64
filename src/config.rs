/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端服务地址
    pub api_base_url: String,
    /// 要打开的页面路由
    pub route: String,
    /// 待提交的 CSV 文件列表
    pub csv_files: Vec<String>,
    /// 工人名单 TOML 文件
    pub workers_file: String,
    /// 结果存储目录
    pub storage_dir: String,
    /// 同时进行的提交数量
    pub max_concurrent_submissions: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            route: "/".to_string(),
            csv_files: Vec::new(),
            workers_file: "workers.toml".to_string(),
            storage_dir: ".chronologic".to_string(),
            max_concurrent_submissions: 4,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            route: std::env::var("ROUTE").unwrap_or(default.route),
            csv_files: std::env::var("CSV_FILES")
                .map(|v| parse_list(&v))
                .unwrap_or(default.csv_files),
            workers_file: std::env::var("WORKERS_FILE").unwrap_or(default.workers_file),
            storage_dir: std::env::var("STORAGE_DIR").unwrap_or(default.storage_dir),
            max_concurrent_submissions: std::env::var("MAX_CONCURRENT_SUBMISSIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(default.max_concurrent_submissions),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
        }
    }
}

/// 解析逗号分隔的列表，忽略空项
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

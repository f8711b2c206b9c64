//! 路由表
//!
//! 纯声明式的路径到页面映射，没有守卫，也没有重定向。

use crate::clients::Endpoint;

/// 详细结果页路径
pub const RESULT_PATH: &str = "/result";

/// 页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// 主页面：文件 + 工人名单，提交到 `/api/process`
    Operations,
    /// 次页面：只有文件，提交到 `/api/process-fixed`
    ProfileOperations,
    /// 最近一次结果
    Result,
}

impl View {
    /// 页面对应的提交接口，结果页没有
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            View::Operations => Some(Endpoint::Process),
            View::ProfileOperations => Some(Endpoint::ProcessFixed),
            View::Result => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::Operations => "operations",
            View::ProfileOperations => "profileOper",
            View::Result => "result",
        }
    }
}

const ROUTES: &[(&str, View)] = &[
    ("/", View::Operations),
    ("/operations", View::Operations),
    ("/profileOper", View::ProfileOperations),
    (RESULT_PATH, View::Result),
];

/// 路由
#[derive(Debug, Clone, Copy, Default)]
pub struct Router;

impl Router {
    pub fn new() -> Self {
        Self
    }

    /// 解析路径
    ///
    /// 忽略查询串和非根路径末尾的一个 `/`；未知路径返回 `None`。
    pub fn resolve(&self, path: &str) -> Option<View> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };
        ROUTES
            .iter()
            .find(|(route, _)| *route == path)
            .map(|(_, view)| *view)
    }

    /// 所有已注册的路径
    pub fn paths(&self) -> impl Iterator<Item = &'static str> {
        ROUTES.iter().map(|(route, _)| *route)
    }
}

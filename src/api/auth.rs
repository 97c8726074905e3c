// ==========================================
// 现场服务呼叫台 - 授权上下文
// ==========================================
// 职责: 应用外壳注入一次的权限判定协作者,
//       各业务 API 只调用 has_permission,不自行拉取权限
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 模块名常量
pub mod modules {
    pub const CALLS: &str = "calls";
}

/// 通配权限
pub const WILDCARD_PERMISSION: &str = "*";

pub trait AuthorizationContext: Send + Sync {
    /// 当前用户
    fn user_id(&self) -> &str;

    /// 是否拥有模块权限
    fn has_permission(&self, module: &str) -> bool;
}

/// 基于模块名集合的权限实现
///
/// 模块名比较不区分大小写；`*` 授予全部权限
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    user_id: String,
    modules: BTreeSet<String>,
}

impl PermissionSet {
    pub fn new<I, S>(user_id: &str, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            user_id: user_id.to_string(),
            modules: modules
                .into_iter()
                .map(|m| m.as_ref().trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }
}

impl AuthorizationContext for PermissionSet {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn has_permission(&self, module: &str) -> bool {
        self.modules.contains(WILDCARD_PERMISSION)
            || self.modules.contains(&module.trim().to_lowercase())
    }
}

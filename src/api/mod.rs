// ==========================================
// 现场服务呼叫台 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供应用外壳调用
// ==========================================

pub mod auth;
pub mod call_entry_api;
pub mod error;

// 重导出核心类型
pub use auth::{modules, AuthorizationContext, PermissionSet};
pub use call_entry_api::CallEntryApi;
pub use error::{ApiError, ApiResult};

// ==========================================
// 现场服务呼叫台 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod call_reason_repo;
pub mod error;
pub mod service_call_repo;
pub mod site_system_repo;

// 重导出核心仓储
pub use call_reason_repo::CallReasonRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use service_call_repo::ServiceCallRepository;
pub use site_system_repo::SiteSystemRepository;

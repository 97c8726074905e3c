// ==========================================
// 现场服务呼叫台 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod call;
pub mod contract;
pub mod types;

// 重导出核心类型
pub use call::{CallEntryForm, CallReason, ServiceCall, SiteSystem};
pub use contract::{parse_contract_date, ContractEvaluation, SystemContract};
pub use types::{CallReasonKind, CoverageKind, CoverageStatus};

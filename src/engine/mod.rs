// ==========================================
// 现场服务呼叫台 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎,不拼 SQL
// 红线: Engine 不访问数据库,只计算和返回结果
// ==========================================

pub mod advisory;
pub mod contract_status;
pub mod reason_classifier;

// 重导出核心引擎
pub use advisory::{advisory_key, Advisory, AdvisoryLevel};
pub use contract_status::{evaluate, ContractStatusEngine};
pub use reason_classifier::{ReasonClassifier, DEFAULT_AMC_KEYWORD, DEFAULT_CALL_OUT_KEYWORD};

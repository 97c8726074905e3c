// ==========================================
// 现场服务呼叫台 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 呼叫录入时的合同覆盖与计费判定
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/建表）
pub mod db;

// 数据仓储层 - 数据访问
pub mod repository;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配
pub mod app;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    CallEntryForm, CallReason, CallReasonKind, ContractEvaluation, CoverageKind, CoverageStatus,
    ServiceCall, SiteSystem, SystemContract,
};

pub use engine::{evaluate, Advisory, AdvisoryLevel, ContractStatusEngine, ReasonClassifier};

pub use api::{ApiError, ApiResult, AuthorizationContext, CallEntryApi, PermissionSet};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "现场服务呼叫台";

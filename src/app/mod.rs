// ==========================================
// 现场服务呼叫台 - 应用层
// ==========================================
// 职责: 装配仓储、配置与 API,供应用外壳使用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};

// ==========================================
// 现场服务呼叫台 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::CallEntryApi;
use crate::config::{CallDeskConfigReader, ConfigManager};
use crate::db::{ensure_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use crate::repository::{CallReasonRepository, ServiceCallRepository, SiteSystemRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 呼叫录入API
    pub call_entry_api: Arc<CallEntryApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 站点系统仓储（用于参考数据维护）
    pub site_system_repo: Arc<SiteSystemRepository>,

    /// 呼叫原因仓储（用于参考数据维护）
    pub call_reason_repo: Arc<CallReasonRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享连接并建表
    /// 2. 初始化所有Repository
    /// 3. 按配置设置界面语言
    /// 4. 创建API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        ensure_schema(&conn).map_err(|e| format!("数据库建表失败: {}", e))?;
        match read_schema_version(&conn) {
            Ok(Some(v)) if v > CURRENT_SCHEMA_VERSION => {
                tracing::warn!(
                    "数据库 schema_version={} 高于当前程序期望的 {}，部分字段可能无法识别",
                    v,
                    CURRENT_SCHEMA_VERSION
                );
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("读取 schema_version 失败(将继续启动): {}", e),
        }
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let site_system_repo = Arc::new(SiteSystemRepository::new(conn.clone()));
        let call_reason_repo = Arc::new(CallReasonRepository::new(conn.clone()));
        let service_call_repo = Arc::new(ServiceCallRepository::new(conn.clone()));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        match config_manager.get_locale() {
            Ok(locale) => crate::i18n::set_locale(&locale),
            Err(e) => tracing::warn!("读取语言配置失败，使用默认语言: {}", e),
        }

        // ==========================================
        // 初始化API层
        // ==========================================
        let call_entry_api = Arc::new(CallEntryApi::new(
            site_system_repo.clone(),
            call_reason_repo.clone(),
            service_call_repo,
            config_manager.clone(),
        ));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            call_entry_api,
            config_manager,
            site_system_repo,
            call_reason_repo,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级:
/// 1. 环境变量 SERVICE_CALL_DESK_DB_PATH
/// 2. 用户数据目录 (service-call-desk[-dev]/service_call_desk.db)
/// 3. 当前目录 ./service_call_desk.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("SERVICE_CALL_DESK_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./service_call_desk.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        let dir = data_dir.join("service-call-desk-dev");

        #[cfg(not(debug_assertions))]
        let dir = data_dir.join("service-call-desk");

        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("service_call_desk.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
    }
}

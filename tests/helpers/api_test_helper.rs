// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::Arc;
use tempfile::NamedTempFile;

use service_call_desk::app::AppState;
use service_call_desk::api::CallEntryApi;
use service_call_desk::config::ConfigManager;
use service_call_desk::domain::{CallReason, SiteSystem};
use service_call_desk::repository::{CallReasonRepository, SiteSystemRepository};

use super::test_data_builder::{at, SiteSystemBuilder};

/// 参考数据中的站点与原因 ID
pub const SITE: &str = "SITE-001";
pub const SYS_AMC: &str = "SYS-AMC";
pub const SYS_WARRANTY: &str = "SYS-WTY";
pub const SYS_BARE: &str = "SYS-BARE";
pub const REASON_AMC: &str = "R-AMC";
pub const REASON_CALL_OUT: &str = "R-CALLOUT";
pub const REASON_BREAKDOWN: &str = "R-BREAKDOWN";

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含所有API实例和必要的依赖
pub struct ApiTestEnv {
    pub db_path: String,
    pub call_entry_api: Arc<CallEntryApi>,
    pub config_manager: Arc<ConfigManager>,

    // Repository层（用于测试数据准备）
    pub site_system_repo: Arc<SiteSystemRepository>,
    pub call_reason_repo: Arc<CallReasonRepository>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建新的API测试环境（空库）
    pub fn new() -> Result<Self, String> {
        service_call_desk::logging::init_test();

        let (temp_file, db_path) = test_helpers::create_test_db()
            .map_err(|e| format!("创建测试数据库失败: {}", e))?;

        let state = AppState::new(db_path.clone())?;

        Ok(Self {
            db_path,
            call_entry_api: state.call_entry_api,
            config_manager: state.config_manager,
            site_system_repo: state.site_system_repo,
            call_reason_repo: state.call_reason_repo,
            _temp_file: temp_file,
        })
    }

    /// 创建带标准参考数据的测试环境
    ///
    /// - SYS_AMC: AMC 2024-01-01 ~ 2024-12-31
    /// - SYS_WARRANTY: 保修至 2024-06-30
    /// - SYS_BARE: 无合同数据
    pub fn with_reference_data() -> Result<Self, String> {
        let env = Self::new()?;

        env.site_system_repo
            .upsert_site(SITE, "Harbour Tower")
            .map_err(|e| e.to_string())?;

        let systems: Vec<SiteSystem> = vec![
            SiteSystemBuilder::new(SITE, SYS_AMC)
                .name("Fire alarm panel")
                .amc(at(2024, 1, 1), at(2024, 12, 31))
                .build(),
            SiteSystemBuilder::new(SITE, SYS_WARRANTY)
                .name("CCTV")
                .warranty(at(2024, 6, 30))
                .build(),
            SiteSystemBuilder::new(SITE, SYS_BARE).name("Intercom").build(),
        ];
        for system in &systems {
            env.site_system_repo.upsert(system).map_err(|e| e.to_string())?;
        }

        for (id, name) in [
            (REASON_AMC, "AMC Call"),
            (REASON_CALL_OUT, "Call Out"),
            (REASON_BREAKDOWN, "Breakdown"),
        ] {
            env.call_reason_repo
                .insert(&CallReason {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .map_err(|e| e.to_string())?;
        }

        Ok(env)
    }
}

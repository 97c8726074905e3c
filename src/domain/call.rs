// ==========================================
// 现场服务呼叫台 - 呼叫领域模型
// ==========================================
// 职责: 站点系统、呼叫原因、呼叫录入表单、已登记呼叫
// 红线: 不含数据访问逻辑,不含评估逻辑
// ==========================================

use crate::domain::contract::{ContractEvaluation, SystemContract};
use crate::domain::types::{CoverageKind, CoverageStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// SiteSystem - 站点已安装系统
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSystem {
    pub site_id: String,
    pub system_id: String,
    pub system_name: String,
    pub contract: SystemContract,
}

// ==========================================
// CallReason - 呼叫原因（参考数据）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallReason {
    pub id: String,
    pub name: String,
}

// ==========================================
// CallEntryForm - 呼叫录入表单状态
// ==========================================
/// 呼叫录入工作流持有的可变表单状态
///
/// 站点/系统/原因任一变化都会触发重新评估，
/// 评估结果写回 `evaluation` 并按规则覆写 `chargeable`。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEntryForm {
    pub site_id: Option<String>,
    pub system_id: Option<String>,
    pub reason_id: Option<String>,
    pub chargeable: bool,
    pub evaluation: Option<ContractEvaluation>,
}

impl CallEntryForm {
    pub fn new(default_chargeable: bool) -> Self {
        Self {
            chargeable: default_chargeable,
            ..Default::default()
        }
    }

    /// 站点/系统/原因是否均已选择
    pub fn is_complete(&self) -> bool {
        [&self.site_id, &self.system_id, &self.reason_id]
            .iter()
            .all(|v| v.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false))
    }

    /// 应用评估结果到表单
    ///
    /// chargeable_default 为 None 时保持原计费标记
    pub fn apply_evaluation(&mut self, evaluation: ContractEvaluation) {
        self.chargeable = evaluation.resolve_chargeable(self.chargeable);
        self.evaluation = Some(evaluation);
    }
}

// ==========================================
// ServiceCall - 已登记的服务呼叫
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    pub call_id: String,
    pub site_id: String,
    pub system_id: String,
    pub reason_id: String,
    pub chargeable: bool,
    pub coverage_kind: CoverageKind,
    pub coverage_status: CoverageStatus,
    pub logged_by: String,
    pub logged_at: DateTime<Utc>,
    pub notes: Option<String>,
}

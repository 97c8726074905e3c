// ==========================================
// 现场服务呼叫台 - 覆盖提示信息
// ==========================================
// 职责: 按 (覆盖类型, 覆盖状态) 生成呼叫录入页的提示文本
// 文案: locales/*.yml 中 advisory.* 键
// ==========================================

use crate::domain::contract::{ContractEvaluation, SystemContract};
use crate::domain::types::{CoverageKind, CoverageStatus};
use crate::i18n::t_with_args;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisoryLevel {
    Info,
    Warning,
}

/// 提示信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub level: AdvisoryLevel,
    /// i18n 键
    pub key: String,
    pub message: String,
}

impl Advisory {
    /// 生成提示信息
    ///
    /// # 返回
    /// - None: 覆盖类型为 None（不适用）
    pub fn render(evaluation: &ContractEvaluation, contract: &SystemContract) -> Option<Self> {
        let key = advisory_key(evaluation.coverage_kind, evaluation.status)?;
        let date = reference_date(evaluation, contract)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        let level = if evaluation.status == CoverageStatus::Active {
            AdvisoryLevel::Info
        } else {
            AdvisoryLevel::Warning
        };

        Some(Self {
            level,
            key: key.to_string(),
            message: t_with_args(key, &[("date", date.as_str())]),
        })
    }
}

/// (覆盖类型, 覆盖状态) → i18n 键
pub fn advisory_key(kind: CoverageKind, status: CoverageStatus) -> Option<&'static str> {
    match (kind, status) {
        (CoverageKind::None, _) => None,
        (CoverageKind::Amc, CoverageStatus::Active) => Some("advisory.amc.active"),
        (CoverageKind::Amc, CoverageStatus::Expired) => Some("advisory.amc.expired"),
        (CoverageKind::Amc, CoverageStatus::Future) => Some("advisory.amc.future"),
        (CoverageKind::Amc, CoverageStatus::NotFound) => Some("advisory.amc.not_found"),
        (CoverageKind::Warranty, CoverageStatus::Active) => Some("advisory.warranty.active"),
        (CoverageKind::Warranty, CoverageStatus::Expired) => Some("advisory.warranty.expired"),
        // 保修无起始日期,Future 不会出现,按未找到处理
        (CoverageKind::Warranty, CoverageStatus::Future | CoverageStatus::NotFound) => {
            Some("advisory.warranty.not_found")
        }
    }
}

/// 提示文案中引用的日期
///
/// - AMC Active/Expired: 结束日期
/// - AMC Future: 起始日期
/// - 保修: 保修截止日期
fn reference_date(
    evaluation: &ContractEvaluation,
    contract: &SystemContract,
) -> Option<DateTime<Utc>> {
    match (evaluation.coverage_kind, evaluation.status) {
        (CoverageKind::Amc, CoverageStatus::Future) => contract.amc_start_date,
        (CoverageKind::Amc, _) => contract.amc_end_date,
        (CoverageKind::Warranty, _) => contract.warranty_date,
        (CoverageKind::None, _) => None,
    }
}

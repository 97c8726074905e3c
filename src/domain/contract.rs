// ==========================================
// 现场服务呼叫台 - 合同领域模型
// ==========================================
// 职责: 已安装系统的合同覆盖数据 + 评估结果
// 红线: 日期解析失败按"缺失"处理,绝不报错
// ==========================================

use crate::domain::types::{CoverageKind, CoverageStatus};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// SystemContract - 系统合同覆盖
// ==========================================
/// 一个站点下已安装系统的合同覆盖（只读输入）
///
/// 约定: amc_end_date 存在时 amc_start_date 也应存在；
/// 评估器不强制该约束，任一缺失即视为"无 AMC"。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemContract {
    pub amc_start_date: Option<DateTime<Utc>>,
    pub amc_end_date: Option<DateTime<Utc>>,
    pub warranty_date: Option<DateTime<Utc>>,
}

impl SystemContract {
    /// 从 ISO-8601 字符串构建合同
    ///
    /// # 参数
    /// - amc_start / amc_end / warranty: 日期字符串（可为空）
    ///
    /// # 说明
    /// 空串或无法解析的值一律视为缺失
    pub fn from_raw(
        amc_start: Option<&str>,
        amc_end: Option<&str>,
        warranty: Option<&str>,
    ) -> Self {
        Self {
            amc_start_date: amc_start.and_then(|s| parse_contract_date("amc_start_date", s)),
            amc_end_date: amc_end.and_then(|s| parse_contract_date("amc_end_date", s)),
            warranty_date: warranty.and_then(|s| parse_contract_date("warranty_date", s)),
        }
    }

    /// AMC 起止日期是否齐全
    pub fn amc_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.amc_start_date, self.amc_end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// 解析合同日期
///
/// 支持格式:
/// - RFC 3339 (`2024-06-30T00:00:00Z`, `2024-06-30T08:00:00+08:00`)
/// - `YYYY-MM-DD HH:MM:SS[.fff]` / `YYYY-MM-DDTHH:MM:SS[.fff]` (按 UTC)
/// - `YYYY-MM-DD` (当日 00:00:00 UTC)
pub fn parse_contract_date(field: &str, raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    tracing::warn!(field = field, value = trimmed, "合同日期无法解析，按缺失处理");
    None
}

// ==========================================
// ContractEvaluation - 合同评估结果
// ==========================================
/// 合同覆盖评估结果（瞬态，不落库）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEvaluation {
    pub coverage_kind: CoverageKind,
    pub status: CoverageStatus,
    /// 计费默认值
    /// - Some(v): 调用方应将计费标记覆写为 v
    /// - None: 不适用，调用方保持原值
    pub chargeable_default: Option<bool>,
}

impl ContractEvaluation {
    /// 不适用（未选原因 / 原因未分类）
    pub fn not_applicable() -> Self {
        Self {
            coverage_kind: CoverageKind::None,
            status: CoverageStatus::NotFound,
            chargeable_default: None,
        }
    }

    /// 结合调用方当前计费标记，得出最终计费标记
    pub fn resolve_chargeable(&self, current: bool) -> bool {
        self.chargeable_default.unwrap_or(current)
    }

    /// 是否处于覆盖中
    pub fn is_covered(&self) -> bool {
        self.status == CoverageStatus::Active
    }
}

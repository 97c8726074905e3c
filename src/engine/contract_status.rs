// ==========================================
// 现场服务呼叫台 - 合同状态评估引擎
// ==========================================
// 职责: 根据系统合同日期 + 呼叫原因 + 当前时间,
//       判定 AMC/保修覆盖状态与默认计费标记
// 红线: 无状态、无副作用、无 I/O 操作; 任何输入都有定义的输出
// 边界: AMC 窗口两端闭区间; 保修截止日当刻仍算覆盖
// ==========================================

use crate::domain::contract::{ContractEvaluation, SystemContract};
use crate::domain::types::{CallReasonKind, CoverageKind, CoverageStatus};
use crate::engine::reason_classifier::ReasonClassifier;
use chrono::{DateTime, Utc};
use tracing::debug;

// ==========================================
// ContractStatusEngine
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ContractStatusEngine {
    classifier: ReasonClassifier,
}

impl ContractStatusEngine {
    pub fn new(classifier: ReasonClassifier) -> Self {
        Self { classifier }
    }

    /// 评估合同覆盖状态
    ///
    /// # 参数
    /// - contract: 系统合同日期
    /// - reason_name: 当前选择的呼叫原因名称（未选择为 None）
    /// - now: 当前时间（由调用方注入）
    ///
    /// # 返回
    /// - 未选原因 / 原因未分类: `{None, NotFound, chargeable_default: None}`
    /// - AMC 原因: 走 AMC 窗口判定
    /// - Call Out 原因: 走保修判定
    pub fn evaluate(
        &self,
        contract: &SystemContract,
        reason_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> ContractEvaluation {
        let reason_name = match reason_name.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => return ContractEvaluation::not_applicable(),
        };

        let kind = self.classifier.classify(reason_name);
        let evaluation = match kind {
            CallReasonKind::AmcCall => Self::evaluate_amc(contract, now),
            CallReasonKind::CallOut => Self::evaluate_warranty(contract, now),
            CallReasonKind::Other => ContractEvaluation::not_applicable(),
        };

        debug!(
            reason = reason_name,
            reason_kind = %kind,
            coverage_kind = %evaluation.coverage_kind,
            status = %evaluation.status,
            chargeable_default = ?evaluation.chargeable_default,
            "合同覆盖评估完成"
        );

        evaluation
    }

    /// AMC 窗口判定
    ///
    /// # 规则
    /// - 起止齐全且 start <= now <= end → Active, 不计费
    /// - now > end → Expired, 计费
    /// - now < start → Future, 计费
    /// - 起止任一缺失 → NotFound, 计费
    pub fn evaluate_amc(contract: &SystemContract, now: DateTime<Utc>) -> ContractEvaluation {
        let status = match contract.amc_window() {
            Some((start, end)) if now >= start && now <= end => CoverageStatus::Active,
            Some((_, end)) if now > end => CoverageStatus::Expired,
            Some(_) => CoverageStatus::Future,
            None => CoverageStatus::NotFound,
        };

        ContractEvaluation {
            coverage_kind: CoverageKind::Amc,
            status,
            chargeable_default: Some(status != CoverageStatus::Active),
        }
    }

    /// 保修判定
    ///
    /// # 规则
    /// - now <= warranty_date → Active, 不计费
    /// - now > warranty_date → Expired, 计费
    /// - 无保修日期 → NotFound, 计费
    pub fn evaluate_warranty(contract: &SystemContract, now: DateTime<Utc>) -> ContractEvaluation {
        let status = match contract.warranty_date {
            Some(warranty) if now <= warranty => CoverageStatus::Active,
            Some(_) => CoverageStatus::Expired,
            None => CoverageStatus::NotFound,
        };

        ContractEvaluation {
            coverage_kind: CoverageKind::Warranty,
            status,
            chargeable_default: Some(status != CoverageStatus::Active),
        }
    }
}

/// 使用默认关键字评估
pub fn evaluate(
    contract: &SystemContract,
    reason_name: Option<&str>,
    now: DateTime<Utc>,
) -> ContractEvaluation {
    ContractStatusEngine::default().evaluate(contract, reason_name, now)
}

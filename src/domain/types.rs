// ==========================================
// 现场服务呼叫台 - 领域类型定义
// ==========================================
// 职责: 呼叫原因分类、合同覆盖类型、覆盖状态
// 红线: 枚举序列化格式与数据库存储一致 (SCREAMING_SNAKE_CASE)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 呼叫原因分类 (Call Reason Kind)
// ==========================================
// 派生值,不落库: 由原因名称关键字匹配得出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallReasonKind {
    AmcCall, // 年度维保呼叫
    CallOut, // 上门呼叫(保修)
    Other,   // 其他
}

impl fmt::Display for CallReasonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallReasonKind::AmcCall => write!(f, "AMC_CALL"),
            CallReasonKind::CallOut => write!(f, "CALL_OUT"),
            CallReasonKind::Other => write!(f, "OTHER"),
        }
    }
}

// ==========================================
// 覆盖类型 (Coverage Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageKind {
    None,     // 不适用
    Amc,      // 年度维保合同
    Warranty, // 保修
}

impl CoverageKind {
    /// 转换为数据库存储字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            CoverageKind::None => "NONE",
            CoverageKind::Amc => "AMC",
            CoverageKind::Warranty => "WARRANTY",
        }
    }

    /// 从数据库字符串解析（未知值按 NONE 处理）
    pub fn from_db_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "AMC" => CoverageKind::Amc,
            "WARRANTY" => CoverageKind::Warranty,
            _ => CoverageKind::None,
        }
    }
}

impl fmt::Display for CoverageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

// ==========================================
// 覆盖状态 (Coverage Status)
// ==========================================
// 含义随 CoverageKind 略有不同:
// - Amc: Active/Expired/Future/NotFound
// - Warranty: Active/Expired/NotFound (无起始日期,不存在 Future)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageStatus {
    Active,   // 覆盖中
    Expired,  // 已过期
    Future,   // 尚未生效
    NotFound, // 无合同数据/不适用
}

impl CoverageStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            CoverageStatus::Active => "ACTIVE",
            CoverageStatus::Expired => "EXPIRED",
            CoverageStatus::Future => "FUTURE",
            CoverageStatus::NotFound => "NOT_FOUND",
        }
    }

    pub fn from_db_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => CoverageStatus::Active,
            "EXPIRED" => CoverageStatus::Expired,
            "FUTURE" => CoverageStatus::Future,
            _ => CoverageStatus::NotFound,
        }
    }
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

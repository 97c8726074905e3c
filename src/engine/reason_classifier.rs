// ==========================================
// 现场服务呼叫台 - 呼叫原因分类器
// ==========================================
// 职责: 按原因名称关键字(不区分大小写)分类
// 规则: 先匹配 AMC 关键字,再匹配 Call Out 关键字
// ==========================================

use crate::config::CallDeskConfigReader;
use crate::domain::types::CallReasonKind;
use std::error::Error;

/// 默认 AMC 关键字
pub const DEFAULT_AMC_KEYWORD: &str = "amc";

/// 默认 Call Out 关键字
pub const DEFAULT_CALL_OUT_KEYWORD: &str = "call out";

// ==========================================
// ReasonClassifier
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonClassifier {
    amc_keyword: String,
    call_out_keyword: String,
}

impl Default for ReasonClassifier {
    fn default() -> Self {
        Self {
            amc_keyword: DEFAULT_AMC_KEYWORD.to_string(),
            call_out_keyword: DEFAULT_CALL_OUT_KEYWORD.to_string(),
        }
    }
}

impl ReasonClassifier {
    /// 使用自定义关键字创建分类器
    ///
    /// 关键字统一转小写并去除首尾空白；空关键字回退为默认值
    pub fn new(amc_keyword: &str, call_out_keyword: &str) -> Self {
        Self {
            amc_keyword: normalize_keyword(amc_keyword, DEFAULT_AMC_KEYWORD),
            call_out_keyword: normalize_keyword(call_out_keyword, DEFAULT_CALL_OUT_KEYWORD),
        }
    }

    /// 从配置读取关键字
    pub fn from_config<C>(config: &C) -> Result<Self, Box<dyn Error>>
    where
        C: CallDeskConfigReader + ?Sized,
    {
        let amc = config.get_amc_reason_keyword()?;
        let call_out = config.get_call_out_reason_keyword()?;
        Ok(Self::new(&amc, &call_out))
    }

    pub fn amc_keyword(&self) -> &str {
        &self.amc_keyword
    }

    pub fn call_out_keyword(&self) -> &str {
        &self.call_out_keyword
    }

    /// 分类原因名称
    ///
    /// # 说明
    /// 名称同时包含两个关键字时（如 "AMC Call Out"）按 AMC 处理
    pub fn classify(&self, reason_name: &str) -> CallReasonKind {
        let lowered = reason_name.to_lowercase();
        if lowered.contains(&self.amc_keyword) {
            CallReasonKind::AmcCall
        } else if lowered.contains(&self.call_out_keyword) {
            CallReasonKind::CallOut
        } else {
            CallReasonKind::Other
        }
    }
}

fn normalize_keyword(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_lowercase()
    }
}

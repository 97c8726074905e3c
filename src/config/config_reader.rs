// ==========================================
// 现场服务呼叫台 - 配置读取 Trait
// ==========================================
// 职责: 定义呼叫录入工作流所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use std::error::Error;

// 用途: 引擎/工作流所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait CallDeskConfigReader: Send + Sync {
    /// 获取 AMC 原因关键字
    ///
    /// # 默认值
    /// - "amc"
    fn get_amc_reason_keyword(&self) -> Result<String, Box<dyn Error>>;

    /// 获取 Call Out 原因关键字
    ///
    /// # 默认值
    /// - "call out"
    fn get_call_out_reason_keyword(&self) -> Result<String, Box<dyn Error>>;

    /// 新建呼叫表单时的计费标记初值
    ///
    /// # 默认值
    /// - false
    fn get_default_chargeable(&self) -> Result<bool, Box<dyn Error>>;

    /// 界面语言
    ///
    /// # 默认值
    /// - "zh-CN"
    fn get_locale(&self) -> Result<String, Box<dyn Error>>;
}

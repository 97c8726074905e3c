// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{DateTime, TimeZone, Utc};
use service_call_desk::domain::{SiteSystem, SystemContract};

/// 构造 UTC 零点时间
pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

// ==========================================
// SiteSystem 构建器
// ==========================================

pub struct SiteSystemBuilder {
    site_id: String,
    system_id: String,
    system_name: String,
    contract: SystemContract,
}

impl SiteSystemBuilder {
    pub fn new(site_id: &str, system_id: &str) -> Self {
        Self {
            site_id: site_id.to_string(),
            system_id: system_id.to_string(),
            system_name: format!("System {}", system_id),
            contract: SystemContract::default(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.system_name = name.to_string();
        self
    }

    pub fn amc(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.contract.amc_start_date = Some(start);
        self.contract.amc_end_date = Some(end);
        self
    }

    pub fn warranty(mut self, until: DateTime<Utc>) -> Self {
        self.contract.warranty_date = Some(until);
        self
    }

    pub fn build(self) -> SiteSystem {
        SiteSystem {
            site_id: self.site_id,
            system_id: self.system_id,
            system_name: self.system_name,
            contract: self.contract,
        }
    }
}

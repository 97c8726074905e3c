// ==========================================
// 现场服务呼叫台 - 站点系统数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: 合同日期以 TEXT 存储,读取时经 SystemContract::from_raw 解析,
//       无法解析的历史数据按缺失处理
// ==========================================

use crate::domain::call::SiteSystem;
use crate::domain::contract::SystemContract;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// SiteSystemRepository - 站点系统仓储
// ==========================================
/// 职责: 管理 site / site_system 表的读写
pub struct SiteSystemRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SiteSystemRepository {
    /// 从已有连接创建仓储实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新增或更新站点
    pub fn upsert_site(&self, site_id: &str, site_name: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO site (site_id, site_name) VALUES (?1, ?2)
            ON CONFLICT(site_id) DO UPDATE SET site_name = excluded.site_name
            "#,
            params![site_id, site_name],
        )?;
        Ok(())
    }

    /// 新增或更新站点系统（站点必须已存在）
    pub fn upsert(&self, system: &SiteSystem) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO site_system (
                site_id, system_id, system_name,
                amc_start_date, amc_end_date, warranty_date, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))
            ON CONFLICT(site_id, system_id) DO UPDATE SET
                system_name = excluded.system_name,
                amc_start_date = excluded.amc_start_date,
                amc_end_date = excluded.amc_end_date,
                warranty_date = excluded.warranty_date,
                updated_at = excluded.updated_at
            "#,
            params![
                system.site_id,
                system.system_id,
                system.system_name,
                system.contract.amc_start_date.map(format_date),
                system.contract.amc_end_date.map(format_date),
                system.contract.warranty_date.map(format_date),
            ],
        )?;
        Ok(())
    }

    /// 写入原始日期字符串（导入/测试场景，不做校验）
    pub fn upsert_raw(
        &self,
        site_id: &str,
        system_id: &str,
        system_name: &str,
        amc_start_date: Option<&str>,
        amc_end_date: Option<&str>,
        warranty_date: Option<&str>,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO site_system (
                site_id, system_id, system_name,
                amc_start_date, amc_end_date, warranty_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(site_id, system_id) DO UPDATE SET
                system_name = excluded.system_name,
                amc_start_date = excluded.amc_start_date,
                amc_end_date = excluded.amc_end_date,
                warranty_date = excluded.warranty_date,
                updated_at = datetime('now')
            "#,
            params![site_id, system_id, system_name, amc_start_date, amc_end_date, warranty_date],
        )?;
        Ok(())
    }

    /// 按主键查询
    ///
    /// # 返回
    /// - Ok(Some(SiteSystem)): 找到
    /// - Ok(None): 未找到
    pub fn find_by_key(&self, site_id: &str, system_id: &str) -> RepositoryResult<Option<SiteSystem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT site_id, system_id, system_name,
                   amc_start_date, amc_end_date, warranty_date
            FROM site_system
            WHERE site_id = ?1 AND system_id = ?2
            "#,
        )?;

        let system = stmt
            .query_row(params![site_id, system_id], map_site_system)
            .optional()?;
        Ok(system)
    }

    /// 查询站点下全部系统（按 system_id 排序）
    pub fn list_by_site(&self, site_id: &str) -> RepositoryResult<Vec<SiteSystem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT site_id, system_id, system_name,
                   amc_start_date, amc_end_date, warranty_date
            FROM site_system
            WHERE site_id = ?1
            ORDER BY system_id ASC
            "#,
        )?;

        let systems = stmt
            .query_map(params![site_id], map_site_system)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(systems)
    }
}

// 保留小数秒,否则截止时刻前的亚秒区间读回后会变为过期
fn format_date(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn map_site_system(row: &Row<'_>) -> SqliteResult<SiteSystem> {
    let amc_start: Option<String> = row.get(3)?;
    let amc_end: Option<String> = row.get(4)?;
    let warranty: Option<String> = row.get(5)?;

    Ok(SiteSystem {
        site_id: row.get(0)?,
        system_id: row.get(1)?,
        system_name: row.get(2)?,
        contract: SystemContract::from_raw(
            amc_start.as_deref(),
            amc_end.as_deref(),
            warranty.as_deref(),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, ensure_schema};
    use crate::domain::types::CoverageStatus;
    use crate::engine::contract_status::evaluate;
    use chrono::{Duration, TimeZone};

    fn repo() -> SiteSystemRepository {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        SiteSystemRepository::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_upsert_and_find() {
        let repo = repo();
        repo.upsert_site("S1", "Harbour Tower").unwrap();

        let system = SiteSystem {
            site_id: "S1".to_string(),
            system_id: "FIRE-01".to_string(),
            system_name: "Fire panel".to_string(),
            contract: SystemContract {
                amc_start_date: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
                amc_end_date: Some(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()),
                warranty_date: None,
            },
        };
        repo.upsert(&system).unwrap();

        let found = repo.find_by_key("S1", "FIRE-01").unwrap().unwrap();
        assert_eq!(found, system);
        assert!(repo.find_by_key("S1", "NOPE").unwrap().is_none());
    }

    #[test]
    fn test_subsecond_date_survives_round_trip() {
        let repo = repo();
        repo.upsert_site("S1", "Site").unwrap();

        let warranty = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap()
            + Duration::milliseconds(900);
        let system = SiteSystem {
            site_id: "S1".to_string(),
            system_id: "LIFT".to_string(),
            system_name: "Lift".to_string(),
            contract: SystemContract {
                warranty_date: Some(warranty),
                ..Default::default()
            },
        };
        repo.upsert(&system).unwrap();

        let found = repo.find_by_key("S1", "LIFT").unwrap().unwrap();
        assert_eq!(found.contract, system.contract);

        // 截止前 400ms 落库前后评估结果一致
        let now = warranty - Duration::milliseconds(400);
        let before = evaluate(&system.contract, Some("Call Out"), now);
        let after = evaluate(&found.contract, Some("Call Out"), now);
        assert_eq!(before.status, CoverageStatus::Active);
        assert_eq!(after, before);
    }

    #[test]
    fn test_unknown_site_rejected() {
        let repo = repo();
        let system = SiteSystem {
            site_id: "GHOST".to_string(),
            system_id: "X".to_string(),
            system_name: "X".to_string(),
            contract: SystemContract::default(),
        };
        let err = repo.upsert(&system).unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)), "{:?}", err);
    }

    #[test]
    fn test_garbage_dates_read_as_absent() {
        let repo = repo();
        repo.upsert_site("S1", "Site").unwrap();
        repo.upsert_raw("S1", "CCTV", "Cameras", Some("2024-01-01"), Some("31/12/2024"), Some(""))
            .unwrap();

        let found = repo.find_by_key("S1", "CCTV").unwrap().unwrap();
        assert!(found.contract.amc_start_date.is_some());
        assert!(found.contract.amc_end_date.is_none());
        assert!(found.contract.warranty_date.is_none());
    }

    #[test]
    fn test_list_by_site_ordered() {
        let repo = repo();
        repo.upsert_site("S1", "Site").unwrap();
        repo.upsert_raw("S1", "B", "B", None, None, None).unwrap();
        repo.upsert_raw("S1", "A", "A", None, None, None).unwrap();

        let ids: Vec<_> = repo
            .list_by_site("S1")
            .unwrap()
            .into_iter()
            .map(|s| s.system_id)
            .collect();
        assert_eq!(ids, vec!["A", "B"]);
    }
}

// ==========================================
// 现场服务呼叫台 - 服务呼叫数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::call::ServiceCall;
use crate::domain::types::{CoverageKind, CoverageStatus};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

pub struct ServiceCallRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ServiceCallRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 登记服务呼叫
    pub fn insert(&self, call: &ServiceCall) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO service_call (
                call_id, site_id, system_id, reason_id,
                chargeable, coverage_kind, coverage_status,
                logged_by, logged_at, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                call.call_id,
                call.site_id,
                call.system_id,
                call.reason_id,
                call.chargeable,
                call.coverage_kind.to_db_str(),
                call.coverage_status.to_db_str(),
                call.logged_by,
                call.logged_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                call.notes,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, call_id: &str) -> RepositoryResult<Option<ServiceCall>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT call_id, site_id, system_id, reason_id,
                   chargeable, coverage_kind, coverage_status,
                   logged_by, logged_at, notes
            FROM service_call
            WHERE call_id = ?1
            "#,
        )?;
        let call = stmt.query_row(params![call_id], map_service_call).optional()?;
        Ok(call)
    }

    /// 查询站点下的呼叫（按登记时间倒序）
    pub fn list_by_site(&self, site_id: &str) -> RepositoryResult<Vec<ServiceCall>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT call_id, site_id, system_id, reason_id,
                   chargeable, coverage_kind, coverage_status,
                   logged_by, logged_at, notes
            FROM service_call
            WHERE site_id = ?1
            ORDER BY logged_at DESC
            "#,
        )?;
        let calls = stmt
            .query_map(params![site_id], map_service_call)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(calls)
    }
}

fn map_service_call(row: &Row<'_>) -> SqliteResult<ServiceCall> {
    let logged_at_raw: String = row.get(8)?;
    let logged_at = DateTime::parse_from_rfc3339(&logged_at_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(ServiceCall {
        call_id: row.get(0)?,
        site_id: row.get(1)?,
        system_id: row.get(2)?,
        reason_id: row.get(3)?,
        chargeable: row.get(4)?,
        coverage_kind: CoverageKind::from_db_str(&row.get::<_, String>(5)?),
        coverage_status: CoverageStatus::from_db_str(&row.get::<_, String>(6)?),
        logged_by: row.get(7)?,
        logged_at,
        notes: row.get(9)?,
    })
}

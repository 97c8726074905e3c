// ==========================================
// 现场服务呼叫台 - 呼叫原因数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑（分类由引擎负责）
// ==========================================

use crate::domain::call::CallReason;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};

pub struct CallReasonRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CallReasonRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新增呼叫原因（id 重复时返回 UniqueConstraintViolation）
    pub fn insert(&self, reason: &CallReason) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO call_reason (reason_id, name) VALUES (?1, ?2)",
            params![reason.id, reason.name],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, reason_id: &str) -> RepositoryResult<Option<CallReason>> {
        let conn = self.get_conn()?;
        let reason = conn
            .query_row(
                "SELECT reason_id, name FROM call_reason WHERE reason_id = ?1",
                params![reason_id],
                |row| {
                    Ok(CallReason {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(reason)
    }

    /// 查询全部呼叫原因（按名称排序）
    pub fn list_all(&self) -> RepositoryResult<Vec<CallReason>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT reason_id, name FROM call_reason ORDER BY name ASC")?;
        let reasons = stmt
            .query_map([], |row| {
                Ok(CallReason {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(reasons)
    }
}

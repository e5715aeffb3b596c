// ==========================================
// 考场座位编排系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::seating_config_trait::SeatingConfigReader;
use crate::db::open_sqlite_connection;
use crate::domain::types::{RosterOrderBy, UnmatchedPolicy};
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 写入 global scope 配置（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 获取所有 global 配置
    pub fn list_global_configs(&self) -> RepositoryResult<HashMap<String, String>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map = HashMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }
        Ok(config_map)
    }
}

// ==========================================
// SeatingConfigReader Trait 实现
// ==========================================
#[async_trait]
impl SeatingConfigReader for ConfigManager {
    async fn get_roster_order_by(&self) -> RepositoryResult<RosterOrderBy> {
        let value = match self.get_global_config_value(config_keys::ROSTER_ORDER_BY)? {
            Some(v) => v,
            None => return Ok(RosterOrderBy::default()),
        };

        Ok(RosterOrderBy::from_db_str(&value).unwrap_or_else(|| {
            tracing::warn!(
                config_key = config_keys::ROSTER_ORDER_BY,
                raw_value = %value,
                "名单排序键配置无效，使用默认值 roll_number"
            );
            RosterOrderBy::default()
        }))
    }

    async fn get_unmatched_policy(&self) -> RepositoryResult<UnmatchedPolicy> {
        let value = match self.get_global_config_value(config_keys::UNMATCHED_POLICY)? {
            Some(v) => v,
            None => return Ok(UnmatchedPolicy::default()),
        };

        Ok(UnmatchedPolicy::from_db_str(&value).unwrap_or_else(|| {
            tracing::warn!(
                config_key = config_keys::UNMATCHED_POLICY,
                raw_value = %value,
                "未匹配策略配置无效，使用默认值 REPORT"
            );
            UnmatchedPolicy::default()
        }))
    }
}

// ==========================================
// 默认数据库路径
// ==========================================

/// 获取默认数据库路径
///
/// 优先级: 环境变量 EXAM_SEATING_DB_PATH > 用户数据目录 > ./exam_seating.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./exam_seating.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("exam-seating");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("exam_seating.db");
        }
    }

    path.to_string_lossy().to_string()
}

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "EXAM_SEATING_DB_PATH";

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 名单排序
    pub const ROSTER_ORDER_BY: &str = "roster_order_by";

    // 未匹配考生处理
    pub const UNMATCHED_POLICY: &str = "unmatched_policy";
}

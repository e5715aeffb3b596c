// ==========================================
// 考场座位编排系统 - 考场数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::room::{Block, Room};
use crate::repository::error::{invalid_column, RepositoryError, RepositoryResult};
use rusqlite::{Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// RoomRepository - 考场仓储
// ==========================================
/// 考场仓储
/// 职责: 查询 room / block 表
pub struct RoomRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RoomRepository {
    /// 创建新的 RoomRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询全部可用考场（含所属教学楼）
    ///
    /// # 返回
    /// - Ok(Vec<Room>): 按考场ID升序
    /// - Err: 数据库错误；行列数为负时返回字段值错误
    pub fn find_available(&self) -> RepositoryResult<Vec<Room>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                r.id, r.floor, r.rows, r.cols, r.is_available,
                b.id, b.name
            FROM room r
            JOIN block b ON b.id = r.block_id
            WHERE r.is_available = 1
            ORDER BY r.id ASC
            "#,
        )?;

        let rooms = stmt
            .query_map([], map_room_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(rooms)
    }
}

fn map_room_row(row: &rusqlite::Row<'_>) -> SqliteResult<Room> {
    Ok(Room {
        id: row.get(0)?,
        floor: row.get(1)?,
        rows: read_dimension(row, 2, "room.rows")?,
        cols: read_dimension(row, 3, "room.cols")?,
        is_available: row.get(4)?,
        block: Block {
            id: row.get(5)?,
            name: row.get(6)?,
        },
    })
}

fn read_dimension(row: &rusqlite::Row<'_>, index: usize, field: &str) -> SqliteResult<u32> {
    let raw: i64 = row.get(index)?;
    u32::try_from(raw).map_err(|_| invalid_column(index, field, format!("非法行列数: {}", raw)))
}

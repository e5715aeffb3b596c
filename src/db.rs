// ==========================================
// 考场座位编排系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发读写时的偶发 busy 错误
// - 提供幂等的建表入口（命令行与测试共用）
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// 初始化数据库 schema（幂等）
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS program (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS course (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            semester INTEGER NOT NULL,
            type TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS course_program (
            course_id INTEGER NOT NULL REFERENCES course(id) ON DELETE CASCADE,
            program_id INTEGER NOT NULL REFERENCES program(id) ON DELETE CASCADE,
            PRIMARY KEY (course_id, program_id)
        );

        CREATE TABLE IF NOT EXISTS date_time (
            id INTEGER PRIMARY KEY,
            date TEXT NOT NULL,
            time_code TEXT NOT NULL,
            UNIQUE(date, time_code)
        );

        CREATE TABLE IF NOT EXISTS exam (
            id INTEGER PRIMARY KEY,
            course_id INTEGER NOT NULL REFERENCES course(id) ON DELETE CASCADE,
            date_time_id INTEGER NOT NULL REFERENCES date_time(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS student (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            roll_number TEXT NOT NULL UNIQUE,
            semester INTEGER NOT NULL,
            program_id INTEGER NOT NULL REFERENCES program(id),
            open_course_id INTEGER REFERENCES course(id)
        );

        CREATE TABLE IF NOT EXISTS supplementary (
            id INTEGER PRIMARY KEY,
            student_id INTEGER NOT NULL REFERENCES student(id) ON DELETE CASCADE,
            exam_id INTEGER NOT NULL REFERENCES exam(id) ON DELETE CASCADE,
            UNIQUE(student_id, exam_id)
        );

        CREATE TABLE IF NOT EXISTS block (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS room (
            id INTEGER PRIMARY KEY,
            block_id INTEGER NOT NULL REFERENCES block(id),
            floor INTEGER NOT NULL,
            rows INTEGER NOT NULL,
            cols INTEGER NOT NULL,
            is_available INTEGER NOT NULL DEFAULT 1
        );

        CREATE INDEX IF NOT EXISTS idx_student_program_semester ON student(program_id, semester);
        CREATE INDEX IF NOT EXISTS idx_student_open_course ON student(open_course_id, semester);
        CREATE INDEX IF NOT EXISTS idx_exam_date_time ON exam(date_time_id);
        CREATE INDEX IF NOT EXISTS idx_supplementary_exam ON supplementary(exam_id);
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

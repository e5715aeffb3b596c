// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据写入等功能
// ==========================================

#![allow(dead_code)]

use exam_seating::db;
use rusqlite::{params, Connection};
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = db::open_sqlite_connection(&db_path)?;
    db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}

// ==========================================
// SeedBuilder - 测试数据写入
// ==========================================
pub struct SeedBuilder {
    pub conn: Connection,
}

impl SeedBuilder {
    pub fn open(db_path: &str) -> Self {
        let conn = db::open_sqlite_connection(db_path).expect("打开测试数据库失败");
        Self { conn }
    }

    pub fn program(&self, id: i64, name: &str) -> &Self {
        self.conn
            .execute("INSERT INTO program (id, name) VALUES (?1, ?2)", params![id, name])
            .expect("写入 program 失败");
        self
    }

    pub fn course(&self, id: i64, name: &str, semester: i32, course_type: &str, programs: &[i64]) -> &Self {
        self.conn
            .execute(
                "INSERT INTO course (id, name, semester, type) VALUES (?1, ?2, ?3, ?4)",
                params![id, name, semester, course_type],
            )
            .expect("写入 course 失败");
        for program_id in programs {
            self.conn
                .execute(
                    "INSERT INTO course_program (course_id, program_id) VALUES (?1, ?2)",
                    params![id, program_id],
                )
                .expect("写入 course_program 失败");
        }
        self
    }

    pub fn slot(&self, id: i64, date: &str, time_code: &str) -> &Self {
        self.conn
            .execute(
                "INSERT INTO date_time (id, date, time_code) VALUES (?1, ?2, ?3)",
                params![id, date, time_code],
            )
            .expect("写入 date_time 失败");
        self
    }

    pub fn exam(&self, id: i64, course_id: i64, date_time_id: i64) -> &Self {
        self.conn
            .execute(
                "INSERT INTO exam (id, course_id, date_time_id) VALUES (?1, ?2, ?3)",
                params![id, course_id, date_time_id],
            )
            .expect("写入 exam 失败");
        self
    }

    pub fn student(
        &self,
        id: i64,
        roll_number: &str,
        semester: i32,
        program_id: i64,
        open_course_id: Option<i64>,
    ) -> &Self {
        self.conn
            .execute(
                "INSERT INTO student (id, name, roll_number, semester, program_id, open_course_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, format!("Student {}", id), roll_number, semester, program_id, open_course_id],
            )
            .expect("写入 student 失败");
        self
    }

    pub fn named_student(&self, id: i64, name: &str, roll_number: &str, semester: i32, program_id: i64) -> &Self {
        self.conn
            .execute(
                "INSERT INTO student (id, name, roll_number, semester, program_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, name, roll_number, semester, program_id],
            )
            .expect("写入 student 失败");
        self
    }

    pub fn supplementary(&self, student_id: i64, exam_id: i64) -> &Self {
        self.conn
            .execute(
                "INSERT INTO supplementary (student_id, exam_id) VALUES (?1, ?2)",
                params![student_id, exam_id],
            )
            .expect("写入 supplementary 失败");
        self
    }

    pub fn block(&self, id: i64, name: &str) -> &Self {
        self.conn
            .execute("INSERT INTO block (id, name) VALUES (?1, ?2)", params![id, name])
            .expect("写入 block 失败");
        self
    }

    pub fn room(&self, id: i64, block_id: i64, floor: i32, rows: i64, cols: i64, available: bool) -> &Self {
        self.conn
            .execute(
                "INSERT INTO room (id, block_id, floor, rows, cols, is_available)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, block_id, floor, rows, cols, available],
            )
            .expect("写入 room 失败");
        self
    }

    pub fn config(&self, key: &str, value: &str) -> &Self {
        self.conn
            .execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
                params![key, value],
            )
            .expect("写入 config_kv 失败");
        self
    }

    pub fn drop_table(&self, table: &str) {
        self.conn
            .execute_batch(&format!("PRAGMA foreign_keys = OFF; DROP TABLE {};", table))
            .expect("删除表失败");
    }
}

// ==========================================
// 标准场景数据
// ==========================================

pub const EXAM_DATE: &str = "2023-10-25";

/// 两门课程同场考试:
/// - 课程 10 (open, 学期5) 关联专业 1
/// - 课程 20 (common, 学期3) 关联专业 1、2
/// - 专业1学期5选修课程10的考生 5 人，专业1学期3考生 3 人，专业2学期3考生 2 人
pub fn seed_two_course_scenario(seed: &SeedBuilder) {
    seed.program(1, "Computer Science")
        .program(2, "Electronics")
        .course(10, "Open Elective", 5, "open", &[1])
        .course(20, "Mathematics", 3, "common", &[1, 2])
        .slot(1, EXAM_DATE, "FN")
        .exam(100, 10, 1)
        .exam(200, 20, 1);

    for i in 0..5 {
        seed.student(1 + i, &format!("CS5-{:02}", i), 5, 1, Some(10));
    }
    for i in 0..3 {
        seed.student(11 + i, &format!("CS3-{:02}", i), 3, 1, None);
    }
    for i in 0..2 {
        seed.student(21 + i, &format!("EC3-{:02}", i), 3, 2, None);
    }
}

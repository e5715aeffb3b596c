// ==========================================
// 考场座位编排系统 - 考生数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 动态 WHERE 只拼占位符，取值走参数绑定
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::student::{RosterEntry, StudentFilter, SupplementaryCourse};
use crate::domain::types::{CourseType, RosterOrderBy};
use crate::repository::error::{invalid_column, RepositoryError, RepositoryResult};
use crate::repository::sql_builder::{build_in_placeholders, build_student_filter_clause};
use rusqlite::{params_from_iter, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// StudentRepository - 考生仓储
// ==========================================
/// 考生仓储
/// 职责: 查询 student / supplementary 表（关联 program / exam / course）
pub struct StudentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StudentRepository {
    /// 创建新的 StudentRepository 实例
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

    /// 按过滤条件（逻辑 OR）查询考生
    ///
    /// # 参数
    /// - `filters`: (专业, 学期) 或 (开放课程, 学期) 条件列表
    /// - `order_by`: 排序键（升序）
    ///
    /// # 返回
    /// - Ok(Vec<RosterEntry>): 课程归属为空的名单行；条件为空时返回空列表
    /// - Err: 数据库错误
    pub fn find_by_filters(
        &self,
        filters: &[StudentFilter],
        order_by: RosterOrderBy,
    ) -> RepositoryResult<Vec<RosterEntry>> {
        if filters.is_empty() {
            return Ok(Vec::new());
        }

        let (clause, values) = build_student_filter_clause(filters);
        let sql = format!(
            r#"
            SELECT
                s.id, s.name, s.roll_number, s.semester, s.program_id,
                p.name
            FROM student s
            JOIN program p ON p.id = s.program_id
            WHERE {}
            ORDER BY {} ASC, s.id ASC
            "#,
            clause,
            order_by.column()
        );

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let students = stmt
            .query_map(params_from_iter(values.iter()), |row| {
                Ok(RosterEntry {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    roll_number: row.get(2)?,
                    semester: row.get(3)?,
                    program_id: row.get(4)?,
                    program_name: row.get(5)?,
                    assignment: None,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(students)
    }

    /// 查询持有指定考试补考登记的考生
    ///
    /// # 参数
    /// - `exam_ids`: 考试ID集合
    /// - `order_by`: 排序键（升序）
    ///
    /// # 返回
    /// - Ok(Vec<RosterEntry>): 课程归属已由补考登记填充；每条补考登记一行
    /// - Err: 数据库错误
    pub fn find_supplementary(
        &self,
        exam_ids: &[i64],
        order_by: RosterOrderBy,
    ) -> RepositoryResult<Vec<RosterEntry>> {
        if exam_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            r#"
            SELECT
                s.id, s.name, s.roll_number, s.semester, s.program_id,
                p.name,
                sp.exam_id, c.id, c.type, c.name
            FROM student s
            JOIN supplementary sp ON sp.student_id = s.id
            JOIN exam e ON e.id = sp.exam_id
            JOIN course c ON c.id = e.course_id
            JOIN program p ON p.id = s.program_id
            WHERE sp.exam_id IN ({})
            ORDER BY {} ASC, s.id ASC, sp.exam_id ASC
            "#,
            build_in_placeholders(exam_ids.len()),
            order_by.column()
        );

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let students = stmt
            .query_map(params_from_iter(exam_ids.iter()), |row| {
                let raw_type: String = row.get(8)?;
                let course_type = CourseType::from_db_str(&raw_type).ok_or_else(|| {
                    invalid_column(8, "course.type", format!("未知课程类型: {}", raw_type))
                })?;

                let course = SupplementaryCourse {
                    exam_id: row.get(6)?,
                    course_id: row.get(7)?,
                    course_type,
                    course_name: row.get(9)?,
                };

                Ok(RosterEntry {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    roll_number: row.get(2)?,
                    semester: row.get(3)?,
                    program_id: row.get(4)?,
                    program_name: row.get(5)?,
                    assignment: Some(course.into()),
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(students)
    }
}

// ==========================================
// 考场座位编排系统 - 课程数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::course::{ExamSlot, Program, ScheduledCourse};
use crate::domain::types::CourseType;
use crate::repository::error::{invalid_column, RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// 按课程展开的单行查询结果
struct CourseProgramRow {
    course_id: i64,
    course_name: String,
    semester: i32,
    course_type: CourseType,
    exam_id: i64,
    program: Program,
}

// ==========================================
// CourseRepository - 课程仓储
// ==========================================
/// 课程仓储
/// 职责: 查询 course / exam / date_time / course_program / program 表
pub struct CourseRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CourseRepository {
    /// 创建新的 CourseRepository 实例
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

    /// 查询某场次下有考试安排的全部课程
    ///
    /// # 参数
    /// - `slot`: 考试日期 + 场次代码
    ///
    /// # 返回
    /// - Ok(Vec<ScheduledCourse>): 按课程ID升序，每门课程附带其全部关联专业
    /// - Err: 数据库错误
    ///
    /// # 说明
    /// - 未关联任何专业的课程不返回
    /// - 同一场次存在多场考试时取ID最小的一场
    pub fn find_scheduled_courses(&self, slot: ExamSlot) -> RepositoryResult<Vec<ScheduledCourse>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                c.id, c.name, c.semester, c.type,
                e.id,
                p.id, p.name
            FROM course c
            JOIN exam e ON e.course_id = c.id
            JOIN date_time d ON d.id = e.date_time_id
            JOIN course_program cp ON cp.course_id = c.id
            JOIN program p ON p.id = cp.program_id
            WHERE d.date = ?1 AND d.time_code = ?2
            ORDER BY c.id ASC, e.id ASC, p.id ASC
            "#,
        )?;

        let rows = stmt
            .query_map(
                params![slot.date.format("%Y-%m-%d").to_string(), slot.time_code.to_db_str()],
                map_course_program_row,
            )?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(fold_course_rows(rows))
    }
}

fn map_course_program_row(row: &rusqlite::Row<'_>) -> SqliteResult<CourseProgramRow> {
    let raw_type: String = row.get(3)?;
    let course_type = CourseType::from_db_str(&raw_type)
        .ok_or_else(|| invalid_column(3, "course.type", format!("未知课程类型: {}", raw_type)))?;

    Ok(CourseProgramRow {
        course_id: row.get(0)?,
        course_name: row.get(1)?,
        semester: row.get(2)?,
        course_type,
        exam_id: row.get(4)?,
        program: Program {
            id: row.get(5)?,
            name: row.get(6)?,
        },
    })
}

/// 将 (课程, 考试, 专业) 行折叠为课程列表
///
/// 输入按 course_id, exam_id 有序；每门课程只保留第一场考试的行
fn fold_course_rows(rows: Vec<CourseProgramRow>) -> Vec<ScheduledCourse> {
    let mut courses: Vec<ScheduledCourse> = Vec::new();

    for row in rows {
        match courses.last_mut() {
            Some(course) if course.id == row.course_id => {
                if course.exam_id == row.exam_id
                    && !course.programs.iter().any(|p| p.id == row.program.id)
                {
                    course.programs.push(row.program);
                }
            }
            _ => courses.push(ScheduledCourse {
                id: row.course_id,
                name: row.course_name,
                semester: row.semester,
                course_type: row.course_type,
                exam_id: row.exam_id,
                programs: vec![row.program],
            }),
        }
    }

    courses
}

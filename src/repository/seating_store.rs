// ==========================================
// 考场座位编排系统 - 排座数据访问 Trait
// ==========================================
// 职责: 定义排座流水线所需的只读数据访问接口（不包含业务逻辑）
// 红线: Repository 不含业务规则
// ==========================================

use crate::domain::course::{ExamSlot, ScheduledCourse};
use crate::domain::room::Room;
use crate::domain::student::{RosterEntry, StudentFilter};
use crate::domain::types::RosterOrderBy;
use crate::repository::course_repo::CourseRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::room_repo::RoomRepository;
use crate::repository::student_repo::StudentRepository;
use async_trait::async_trait;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

// ==========================================
// SeatingStore Trait
// ==========================================
// 用途: 引擎层通过该接口读取课程/考场/考生数据
// 实现者: SqliteSeatingStore（使用 rusqlite）
#[async_trait]
pub trait SeatingStore: Send + Sync {
    /// 查询某场次下有考试安排的课程（含关联专业）
    async fn find_courses(&self, slot: ExamSlot) -> RepositoryResult<Vec<ScheduledCourse>>;

    /// 查询全部可用考场
    async fn find_rooms(&self) -> RepositoryResult<Vec<Room>>;

    /// 按过滤条件（逻辑 OR）查询考生
    async fn find_students(
        &self,
        filters: &[StudentFilter],
        order_by: RosterOrderBy,
    ) -> RepositoryResult<Vec<RosterEntry>>;

    /// 查询持有指定考试补考登记的考生
    async fn find_supplementary_students(
        &self,
        exam_ids: &[i64],
        order_by: RosterOrderBy,
    ) -> RepositoryResult<Vec<RosterEntry>>;
}

// ==========================================
// SqliteSeatingStore - SQLite 实现
// ==========================================
/// 聚合课程/考场/考生三个仓储，共享同一连接
#[derive(Clone)]
pub struct SqliteSeatingStore {
    pub course_repo: Arc<CourseRepository>,
    pub room_repo: Arc<RoomRepository>,
    pub student_repo: Arc<StudentRepository>,
}

impl SqliteSeatingStore {
    /// 打开数据库并创建仓储集合
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self::from_connection(Arc::new(Mutex::new(conn))))
    }

    /// 从已有连接创建仓储集合
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            course_repo: Arc::new(CourseRepository::from_connection(conn.clone())),
            room_repo: Arc::new(RoomRepository::from_connection(conn.clone())),
            student_repo: Arc::new(StudentRepository::from_connection(conn)),
        }
    }
}

#[async_trait]
impl SeatingStore for SqliteSeatingStore {
    async fn find_courses(&self, slot: ExamSlot) -> RepositoryResult<Vec<ScheduledCourse>> {
        self.course_repo.find_scheduled_courses(slot)
    }

    async fn find_rooms(&self) -> RepositoryResult<Vec<Room>> {
        self.room_repo.find_available()
    }

    async fn find_students(
        &self,
        filters: &[StudentFilter],
        order_by: RosterOrderBy,
    ) -> RepositoryResult<Vec<RosterEntry>> {
        self.student_repo.find_by_filters(filters, order_by)
    }

    async fn find_supplementary_students(
        &self,
        exam_ids: &[i64],
        order_by: RosterOrderBy,
    ) -> RepositoryResult<Vec<RosterEntry>> {
        self.student_repo.find_supplementary(exam_ids, order_by)
    }
}

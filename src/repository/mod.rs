// ==========================================
// 考场座位编排系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod course_repo;
pub mod error;
pub mod room_repo;
pub mod seating_store;
pub mod sql_builder;
pub mod student_repo;

// 重导出核心仓储
pub use course_repo::CourseRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use room_repo::RoomRepository;
pub use seating_store::{SeatingStore, SqliteSeatingStore};
pub use student_repo::StudentRepository;

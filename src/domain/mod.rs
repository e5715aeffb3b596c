// ==========================================
// 考场座位编排系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod cohort;
pub mod course;
pub mod room;
pub mod student;
pub mod types;

// 重导出核心类型
pub use cohort::{Cohort, CohortKey, SeatingPlan, SeatingSession};
pub use course::{CatalogEntry, ExamCatalog, ExamSlot, Program, ScheduledCourse};
pub use room::{Block, Room, SeatCell, SeatTally, SeatingClass, SeatingMatrix};
pub use student::{
    AssignmentSource, CourseAssignment, RosterEntry, StudentFilter, SupplementaryCourse,
};
pub use types::{CourseType, RosterOrderBy, TimeCode, UnmatchedPolicy};

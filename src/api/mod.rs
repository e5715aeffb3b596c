// ==========================================
// 考场座位编排系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供路由/展示层调用
// ==========================================

pub mod error;
pub mod seating_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use seating_api::{SeatingApi, SqliteSeatingApi};

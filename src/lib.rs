// ==========================================
// 考场座位编排系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 按场次构建考生分组与考场座位矩阵
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 排座流水线
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CourseType, RosterOrderBy, TimeCode, UnmatchedPolicy};

// 领域实体
pub use domain::{
    CatalogEntry, Cohort, CohortKey, ExamCatalog, ExamSlot, RosterEntry, SeatCell, SeatTally,
    SeatingClass, SeatingMatrix, SeatingPlan, SeatingSession,
};

// 引擎
pub use engine::{
    CohortGrouper, CohortMatcher, ExamCatalogResolver, RoomTopologyLoader, SeatAccounting,
    SeatingOrchestrator, StudentRosterResolver,
};

// API
pub use api::{SeatingApi, SqliteSeatingApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "考场座位编排系统";

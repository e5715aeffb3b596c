// ==========================================
// 考场座位编排系统 - 引擎层
// ==========================================
// 职责: 实现排座业务规则,不拼 SQL
// 红线: Engine 不拼 SQL, 数据访问一律经 SeatingStore
// ==========================================

pub mod catalog;
pub mod error;
pub mod grouping;
pub mod matcher;
pub mod orchestrator;
pub mod room_topology;
pub mod roster;
pub mod seat_tally;

// 重导出核心引擎
pub use catalog::ExamCatalogResolver;
pub use error::{EngineError, EngineResult};
pub use grouping::CohortGrouper;
pub use matcher::{CohortMatcher, MatchSummary};
pub use orchestrator::SeatingOrchestrator;
pub use room_topology::RoomTopologyLoader;
pub use roster::StudentRosterResolver;
pub use seat_tally::SeatAccounting;

// 测试用内存存储
#[cfg(test)]
pub(crate) mod test_support;

// ==========================================
// 考场座位编排系统 - 排座配置读取 Trait
// ==========================================
// 职责: 定义排座流水线所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::types::{RosterOrderBy, UnmatchedPolicy};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// SeatingConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）、StaticSeatingConfig（固定值）
#[async_trait]
pub trait SeatingConfigReader: Send + Sync {
    /// 获取默认名单排序键
    ///
    /// # 默认值
    /// - roll_number
    async fn get_roster_order_by(&self) -> RepositoryResult<RosterOrderBy>;

    /// 获取未匹配考生处理策略
    ///
    /// # 默认值
    /// - REPORT
    async fn get_unmatched_policy(&self) -> RepositoryResult<UnmatchedPolicy>;
}

// ==========================================
// StaticSeatingConfig - 固定配置
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSeatingConfig {
    pub order_by: RosterOrderBy,
    pub unmatched_policy: UnmatchedPolicy,
}

#[async_trait]
impl SeatingConfigReader for StaticSeatingConfig {
    async fn get_roster_order_by(&self) -> RepositoryResult<RosterOrderBy> {
        Ok(self.order_by)
    }

    async fn get_unmatched_policy(&self) -> RepositoryResult<UnmatchedPolicy> {
        Ok(self.unmatched_policy)
    }
}

// ==========================================
// 考场座位编排系统 - 引擎层错误类型
// ==========================================
// 职责: 为仓储层失败附加所在流水线阶段的描述
// 红线: 引擎层不吞错误，一律向上传递
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("获取考试目录失败: {0}")]
    Catalog(#[source] RepositoryError),

    #[error("获取考生名单失败: {0}")]
    Roster(#[source] RepositoryError),

    #[error("加载考场失败: {0}")]
    RoomTopology(#[source] RepositoryError),

    #[error("读取排座配置失败: {0}")]
    Config(#[source] RepositoryError),
}

impl EngineError {
    /// 底层仓储错误
    pub fn repository_error(&self) -> &RepositoryError {
        match self {
            EngineError::Catalog(e)
            | EngineError::Roster(e)
            | EngineError::RoomTopology(e)
            | EngineError::Config(e) => e,
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;

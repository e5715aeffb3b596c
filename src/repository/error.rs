// ==========================================
// 考场座位编排系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据库错误 =====
    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    // ===== 数据质量错误 =====
    #[error("字段值错误 (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => RepositoryError::DatabaseQueryError(msg),
            // 行映射中由 invalid_column 装箱的字段值错误，原样取回
            rusqlite::Error::FromSqlConversionFailure(index, _, source) => {
                match source.downcast::<RepositoryError>() {
                    Ok(inner) => *inner,
                    Err(source) => RepositoryError::DatabaseQueryError(format!(
                        "第{}列类型转换失败: {}",
                        index, source
                    )),
                }
            }
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// 在行映射闭包内报告字段值错误
///
/// rusqlite 的行映射只能返回 rusqlite::Error，这里借用 FromSqlConversionFailure 携带原因
pub(crate) fn invalid_column(
    index: usize,
    field: &str,
    message: impl Into<String>,
) -> rusqlite::Error {
    let err = RepositoryError::FieldValueError {
        field: field.to_string(),
        message: message.into(),
    };
    rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(err))
}

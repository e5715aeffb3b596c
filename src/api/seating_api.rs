// ==========================================
// 考场座位编排系统 - 排座 API
// ==========================================
// 职责: 向路由/展示层暴露排座能力
// 1. 考试目录查询
// 2. 排座方案构建（失败返回 None，由调用方展示空状态）
// 3. 考场座位矩阵加载
// 4. 座位统计
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::error;

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, SeatingConfigReader};
use crate::domain::cohort::{SeatingPlan, SeatingSession};
use crate::domain::course::{ExamCatalog, ExamSlot};
use crate::domain::room::{SeatTally, SeatingClass, SeatingMatrix};
use crate::domain::types::{RosterOrderBy, TimeCode};
use crate::engine::SeatingOrchestrator;
use crate::repository::{SeatingStore, SqliteSeatingStore};

// ==========================================
// SeatingApi - 排座 API
// ==========================================
pub struct SeatingApi<S, C>
where
    S: SeatingStore,
    C: SeatingConfigReader,
{
    orchestrator: Arc<SeatingOrchestrator<S, C>>,
}

/// SQLite 存储 + config_kv 配置的默认组合
pub type SqliteSeatingApi = SeatingApi<SqliteSeatingStore, ConfigManager>;

impl SqliteSeatingApi {
    /// 打开数据库并创建 API 实例（仓储与配置共享同一连接）
    pub fn open(db_path: &str) -> ApiResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(e.to_string()))?;
        let conn = Arc::new(std::sync::Mutex::new(conn));

        let store = Arc::new(SqliteSeatingStore::from_connection(conn.clone()));
        let config = Arc::new(ConfigManager::from_connection(conn)?);
        Ok(Self::new(store, config))
    }
}

impl<S, C> SeatingApi<S, C>
where
    S: SeatingStore,
    C: SeatingConfigReader,
{
    /// 创建新的 SeatingApi 实例
    pub fn new(store: Arc<S>, config: Arc<C>) -> Self {
        Self {
            orchestrator: Arc::new(SeatingOrchestrator::new(store, config)),
        }
    }

    /// 查询某场次的考试目录
    ///
    /// # 参数
    /// - date: 考试日期 (YYYY-MM-DD)
    /// - time_code: 场次代码 (FN / AN)
    pub async fn resolve_exam_catalog(&self, date: &str, time_code: &str) -> ApiResult<ExamCatalog> {
        let slot = parse_exam_slot(date, time_code)?;
        Ok(self.orchestrator.resolve_exam_catalog(slot).await?)
    }

    /// 构建某场次的排座方案
    ///
    /// # 返回
    /// - Some(SeatingPlan): 构建成功
    /// - None: 输入非法或任一步骤失败（错误已记录日志）
    pub async fn build_seating_plan(
        &self,
        date: &str,
        time_code: &str,
        order_by: Option<&str>,
    ) -> Option<SeatingPlan> {
        match self.try_build_seating_plan(date, time_code, order_by).await {
            Ok(plan) => Some(plan),
            Err(e) => {
                error!(date, time_code, error = %e, "排座方案构建失败");
                None
            }
        }
    }

    async fn try_build_seating_plan(
        &self,
        date: &str,
        time_code: &str,
        order_by: Option<&str>,
    ) -> ApiResult<SeatingPlan> {
        let slot = parse_exam_slot(date, time_code)?;
        let order_by = order_by.map(parse_order_by).transpose()?;
        Ok(self.orchestrator.build_seating_plan(slot, order_by).await?)
    }

    /// 构建某日全部场次的排座方案
    ///
    /// # 返回
    /// 按场次先后排列；没有课程安排的场次不出现在结果中
    pub async fn build_daily_plans(&self, date: &str) -> ApiResult<Vec<(TimeCode, SeatingPlan)>> {
        let date = parse_date(date)?;

        let mut plans = Vec::new();
        for time_code in TimeCode::ALL {
            let slot = ExamSlot::new(date, time_code);
            let catalog = self.orchestrator.resolve_exam_catalog(slot).await?;
            if catalog.is_empty() {
                continue;
            }
            let plan = self
                .orchestrator
                .build_plan_from_catalog(slot, &catalog, None)
                .await?;
            plans.push((time_code, plan));
        }

        Ok(plans)
    }

    /// 加载可用考场的座位矩阵
    pub async fn load_seating_matrix(&self) -> ApiResult<SeatingMatrix> {
        Ok(self.orchestrator.load_seating_matrix().await?)
    }

    /// 并发准备一个场次（排座方案 + 座位矩阵）
    pub async fn prepare_session(
        &self,
        date: &str,
        time_code: &str,
        order_by: Option<&str>,
    ) -> ApiResult<SeatingSession> {
        let slot = parse_exam_slot(date, time_code)?;
        let order_by = order_by.map(parse_order_by).transpose()?;
        Ok(self.orchestrator.prepare_session(slot, order_by).await?)
    }

    /// 汇总座位占用情况
    pub fn tally_seats(&self, classes: &[SeatingClass]) -> SeatTally {
        self.orchestrator.tally_seats(classes)
    }
}

// ==========================================
// 输入解析
// ==========================================

fn parse_date(date: &str) -> ApiResult<NaiveDate> {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput("考试日期不能为空".to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|e| ApiError::InvalidInput(format!("考试日期格式错误({}): {}", trimmed, e)))
}

fn parse_exam_slot(date: &str, time_code: &str) -> ApiResult<ExamSlot> {
    let date = parse_date(date)?;
    if time_code.trim().is_empty() {
        return Err(ApiError::InvalidInput("场次代码不能为空".to_string()));
    }
    let time_code = TimeCode::from_db_str(time_code)
        .ok_or_else(|| ApiError::InvalidInput(format!("未知场次代码: {}", time_code)))?;
    Ok(ExamSlot::new(date, time_code))
}

fn parse_order_by(order_by: &str) -> ApiResult<RosterOrderBy> {
    RosterOrderBy::from_db_str(order_by)
        .ok_or_else(|| ApiError::InvalidInput(format!("不支持的排序字段: {}", order_by)))
}

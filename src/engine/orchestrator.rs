// ==========================================
// 考场座位编排系统 - 排座流水线编排器
// ==========================================
// 用途: 协调目录解析 → 名单解析 → 课程匹配 → 分组排序，
//       以及考场座位矩阵加载
// 依赖: 名单解析必须在目录解析完成后开始；
//       考场加载与目录/名单链路互不依赖，可并发
// ==========================================

use crate::config::SeatingConfigReader;
use crate::domain::cohort::{SeatingPlan, SeatingSession};
use crate::domain::course::{ExamCatalog, ExamSlot};
use crate::domain::room::{SeatTally, SeatingClass, SeatingMatrix};
use crate::domain::types::RosterOrderBy;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::{
    CohortGrouper, CohortMatcher, ExamCatalogResolver, RoomTopologyLoader, SeatAccounting,
    StudentRosterResolver,
};
use crate::repository::SeatingStore;
use std::sync::Arc;
use tracing::{debug, info};

// ==========================================
// SeatingOrchestrator - 排座流水线编排器
// ==========================================
pub struct SeatingOrchestrator<S, C>
where
    S: SeatingStore,
    C: SeatingConfigReader,
{
    config: Arc<C>,
    catalog: ExamCatalogResolver<S>,
    roster: StudentRosterResolver<S>,
    matcher: CohortMatcher,
    grouper: CohortGrouper,
    rooms: RoomTopologyLoader<S>,
}

impl<S, C> SeatingOrchestrator<S, C>
where
    S: SeatingStore,
    C: SeatingConfigReader,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - store: 数据访问
    /// - config: 配置读取器
    pub fn new(store: Arc<S>, config: Arc<C>) -> Self {
        Self {
            catalog: ExamCatalogResolver::new(store.clone()),
            roster: StudentRosterResolver::new(store.clone()),
            matcher: CohortMatcher::new(),
            grouper: CohortGrouper::new(),
            rooms: RoomTopologyLoader::new(store),
            config,
        }
    }

    /// 解析某场次的考试目录
    pub async fn resolve_exam_catalog(&self, slot: ExamSlot) -> EngineResult<ExamCatalog> {
        self.catalog.resolve(slot).await
    }

    /// 构建某场次的排座方案（分组结果）
    ///
    /// # 参数
    /// - slot: 考试场次
    /// - order_by: 名单排序键；None 时读取配置
    ///
    /// # 返回
    /// - Ok(SeatingPlan): 人数降序的分组 + 名单总数 + 未匹配考生
    /// - Err(EngineError): 任一步骤失败，不返回部分结果
    pub async fn build_seating_plan(
        &self,
        slot: ExamSlot,
        order_by: Option<RosterOrderBy>,
    ) -> EngineResult<SeatingPlan> {
        info!(slot = %slot, "开始构建排座方案");

        // ==========================================
        // 步骤1: 考试目录解析
        // ==========================================
        debug!("步骤1: 解析考试目录");
        let catalog = self.catalog.resolve(slot).await?;

        self.build_plan_from_catalog(slot, &catalog, order_by).await
    }

    /// 基于已解析的考试目录构建排座方案（步骤2~4）
    ///
    /// 调用方已持有目录时使用，避免重复查询课程
    pub async fn build_plan_from_catalog(
        &self,
        slot: ExamSlot,
        catalog: &ExamCatalog,
        order_by: Option<RosterOrderBy>,
    ) -> EngineResult<SeatingPlan> {
        let order_by = match order_by {
            Some(order_by) => order_by,
            None => self
                .config
                .get_roster_order_by()
                .await
                .map_err(EngineError::Config)?,
        };
        let policy = self
            .config
            .get_unmatched_policy()
            .await
            .map_err(EngineError::Config)?;

        // ==========================================
        // 步骤2: 考生名单解析（依赖步骤1）
        // ==========================================
        debug!("步骤2: 解析考生名单");
        let mut students = self.roster.resolve(catalog, order_by).await?;

        // ==========================================
        // 步骤3: 课程匹配（开放课程在前）
        // ==========================================
        debug!("步骤3: 匹配考生课程");
        let summary = self
            .matcher
            .match_students(&mut students, &catalog.combined());

        // ==========================================
        // 步骤4: 分组排序
        // ==========================================
        debug!("步骤4: 分组排序");
        let plan = self.grouper.group(students, policy);

        info!(
            slot = %slot,
            total_students = plan.total_students,
            cohorts_count = plan.cohorts.len(),
            matched = summary.matched,
            preassigned = summary.preassigned,
            unmatched = summary.unmatched,
            "排座方案构建完成"
        );

        Ok(plan)
    }

    /// 加载可用考场的座位矩阵
    pub async fn load_seating_matrix(&self) -> EngineResult<SeatingMatrix> {
        self.rooms.load().await
    }

    /// 并发准备一个场次：排座方案 + 座位矩阵
    pub async fn prepare_session(
        &self,
        slot: ExamSlot,
        order_by: Option<RosterOrderBy>,
    ) -> EngineResult<SeatingSession> {
        let (plan, matrix) = futures::try_join!(
            self.build_seating_plan(slot, order_by),
            self.load_seating_matrix(),
        )?;

        let session = SeatingSession::new(plan, matrix);

        info!(
            slot = %slot,
            total_seats = session.matrix.total_seats,
            remaining_capacity = session.remaining_capacity,
            "场次准备完成"
        );

        Ok(session)
    }

    /// 汇总座位占用情况
    pub fn tally_seats(&self, classes: &[SeatingClass]) -> SeatTally {
        SeatAccounting::tally(classes)
    }
}

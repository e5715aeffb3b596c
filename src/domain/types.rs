// ==========================================
// 考场座位编排系统 - 领域类型定义
// ==========================================
// 职责: 课程类型、场次代码、名单排序键、未匹配策略
// 红线: 所有枚举值与数据库存储字符串一一对应
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 课程类型 (Course Type)
// ==========================================
// open: 单专业独占课程，分组键 = 课程ID
// common: 多专业共享课程，分组键 = 专业ID + 课程ID
// supplementary: 可补考课程，分组键 = 课程ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseType {
    Open,
    Common,
    Supplementary,
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl CourseType {
    /// 从数据库字符串解析课程类型
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" => Some(CourseType::Open),
            "common" => Some(CourseType::Common),
            "supplementary" => Some(CourseType::Supplementary),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            CourseType::Open => "open",
            CourseType::Common => "common",
            CourseType::Supplementary => "supplementary",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, CourseType::Open)
    }
}

// ==========================================
// 场次代码 (Time Code)
// ==========================================
// 与日期共同确定一场考试
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeCode {
    #[serde(rename = "FN")]
    Forenoon, // 上午场
    #[serde(rename = "AN")]
    Afternoon, // 下午场
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl TimeCode {
    /// 一天内的全部场次（按时间先后）
    pub const ALL: [TimeCode; 2] = [TimeCode::Forenoon, TimeCode::Afternoon];

    /// 从字符串解析场次代码
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "FN" => Some(TimeCode::Forenoon),
            "AN" => Some(TimeCode::Afternoon),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TimeCode::Forenoon => "FN",
            TimeCode::Afternoon => "AN",
        }
    }
}

// ==========================================
// 名单排序键 (Roster Order By)
// ==========================================
// 只允许映射到固定列名，不拼接外部输入
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterOrderBy {
    #[default]
    RollNumber,
    Name,
    Id,
}

impl RosterOrderBy {
    /// 从配置/请求字符串解析
    ///
    /// 兼容 `rollNumber` 与 `roll_number` 两种写法
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "").as_str() {
            "rollnumber" => Some(RosterOrderBy::RollNumber),
            "name" => Some(RosterOrderBy::Name),
            "id" => Some(RosterOrderBy::Id),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            RosterOrderBy::RollNumber => "roll_number",
            RosterOrderBy::Name => "name",
            RosterOrderBy::Id => "id",
        }
    }

    /// student 表上对应的排序列
    pub fn column(&self) -> &'static str {
        match self {
            RosterOrderBy::RollNumber => "s.roll_number",
            RosterOrderBy::Name => "s.name",
            RosterOrderBy::Id => "s.id",
        }
    }
}

impl fmt::Display for RosterOrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 未匹配考生处理策略 (Unmatched Policy)
// ==========================================
// Report: 不进入任何分组，单独列出并告警
// UnassignedCohort: 归入可见的"未分配"分组，参与大小排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnmatchedPolicy {
    #[default]
    Report,
    UnassignedCohort,
}

impl UnmatchedPolicy {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "REPORT" => Some(UnmatchedPolicy::Report),
            "UNASSIGNED_COHORT" => Some(UnmatchedPolicy::UnassignedCohort),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            UnmatchedPolicy::Report => "REPORT",
            UnmatchedPolicy::UnassignedCohort => "UNASSIGNED_COHORT",
        }
    }
}

impl fmt::Display for UnmatchedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

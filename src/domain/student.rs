// ==========================================
// 考场座位编排系统 - 考生领域模型
// ==========================================
// 职责: 考生名单行、课程归属、名单查询过滤条件
// 红线: 不含数据访问逻辑
// ==========================================

use crate::domain::types::CourseType;
use serde::{Deserialize, Serialize};

// ==========================================
// StudentFilter - 名单查询过滤条件
// ==========================================
// 多个条件之间按逻辑 OR 求值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudentFilter {
    /// 非开放课程：按 (专业, 学期) 命中
    ProgramSemester { program_id: i64, semester: i32 },
    /// 开放课程：按 (选修的开放课程, 学期) 命中
    OpenCourseSemester { open_course_id: i64, semester: i32 },
}

// ==========================================
// AssignmentSource - 课程归属来源
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentSource {
    Matched,       // 名单匹配 (专业+学期)
    Supplementary, // 补考登记
}

// ==========================================
// CourseAssignment - 考生的课程/考试归属
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseAssignment {
    pub course_id: i64,
    pub course_name: String,
    pub course_type: CourseType,
    pub exam_id: i64,
    /// 补考行不携带课程学期（补考可跨学期）
    pub course_semester: Option<i32>,
    pub source: AssignmentSource,
}

// ==========================================
// RosterEntry - 名单行
// ==========================================
// 同一考生可能以不同课程身份出现多次（正常报名 + 补考）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: i64,
    pub name: String,
    pub roll_number: String,
    pub semester: i32,
    pub program_id: i64,
    pub program_name: String,
    #[serde(flatten)]
    pub assignment: Option<CourseAssignment>,
}

impl RosterEntry {
    pub fn is_assigned(&self) -> bool {
        self.assignment.is_some()
    }

    pub fn course_id(&self) -> Option<i64> {
        self.assignment.as_ref().map(|a| a.course_id)
    }

    pub fn course_type(&self) -> Option<CourseType> {
        self.assignment.as_ref().map(|a| a.course_type)
    }
}

// ==========================================
// SupplementaryCourse - 补考登记关联的课程信息
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementaryCourse {
    pub exam_id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub course_type: CourseType,
}

impl From<SupplementaryCourse> for CourseAssignment {
    fn from(course: SupplementaryCourse) -> Self {
        Self {
            course_id: course.course_id,
            course_name: course.course_name,
            course_type: course.course_type,
            exam_id: course.exam_id,
            course_semester: None,
            source: AssignmentSource::Supplementary,
        }
    }
}

// ==========================================
// 引擎层测试辅助 - 内存版 SeatingStore
// ==========================================
// 用途: 不依赖 SQLite 驱动流水线；记录课程查询次数
// ==========================================

use crate::domain::course::{ExamSlot, Program, ScheduledCourse};
use crate::domain::room::Room;
use crate::domain::student::{RosterEntry, StudentFilter, SupplementaryCourse};
use crate::domain::types::{CourseType, RosterOrderBy};
use crate::repository::error::RepositoryResult;
use crate::repository::SeatingStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 内存考生行：名单字段 + 选修的开放课程
pub(crate) struct MemoryStudent {
    pub entry: RosterEntry,
    pub open_course_id: Option<i64>,
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    pub courses: Vec<(ExamSlot, ScheduledCourse)>,
    pub rooms: Vec<Room>,
    pub students: Vec<MemoryStudent>,
    /// (考生ID, 补考课程)
    pub supplementary: Vec<(i64, SupplementaryCourse)>,
    pub course_queries: AtomicUsize,
}

impl MemoryStore {
    pub fn course(
        mut self,
        slot: ExamSlot,
        id: i64,
        semester: i32,
        course_type: CourseType,
        exam_id: i64,
        program_ids: &[i64],
    ) -> Self {
        let course = ScheduledCourse {
            id,
            name: format!("C{}", id),
            semester,
            course_type,
            exam_id,
            programs: program_ids
                .iter()
                .map(|&pid| Program {
                    id: pid,
                    name: format!("P{}", pid),
                })
                .collect(),
        };
        self.courses.push((slot, course));
        self
    }

    pub fn student(mut self, id: i64, program_id: i64, semester: i32, open_course_id: Option<i64>) -> Self {
        self.students.push(MemoryStudent {
            entry: RosterEntry {
                id,
                name: format!("S{}", id),
                roll_number: format!("R{:03}", id),
                semester,
                program_id,
                program_name: format!("P{}", program_id),
                assignment: None,
            },
            open_course_id,
        });
        self
    }

    pub fn course_queries(&self) -> usize {
        self.course_queries.load(Ordering::SeqCst)
    }

    fn entry_for(&self, student_id: i64) -> Option<RosterEntry> {
        self.students
            .iter()
            .find(|s| s.entry.id == student_id)
            .map(|s| s.entry.clone())
    }
}

fn sort_roster(rows: &mut [RosterEntry], order_by: RosterOrderBy) {
    match order_by {
        RosterOrderBy::RollNumber => rows.sort_by(|a, b| a.roll_number.cmp(&b.roll_number)),
        RosterOrderBy::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        RosterOrderBy::Id => rows.sort_by_key(|r| r.id),
    }
}

#[async_trait]
impl SeatingStore for MemoryStore {
    async fn find_courses(&self, slot: ExamSlot) -> RepositoryResult<Vec<ScheduledCourse>> {
        self.course_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .courses
            .iter()
            .filter(|(s, _)| *s == slot)
            .map(|(_, c)| c.clone())
            .collect())
    }

    async fn find_rooms(&self) -> RepositoryResult<Vec<Room>> {
        Ok(self.rooms.iter().filter(|r| r.is_available).cloned().collect())
    }

    async fn find_students(
        &self,
        filters: &[StudentFilter],
        order_by: RosterOrderBy,
    ) -> RepositoryResult<Vec<RosterEntry>> {
        let mut rows: Vec<RosterEntry> = self
            .students
            .iter()
            .filter(|s| {
                filters.iter().any(|f| match *f {
                    StudentFilter::ProgramSemester {
                        program_id,
                        semester,
                    } => s.entry.program_id == program_id && s.entry.semester == semester,
                    StudentFilter::OpenCourseSemester {
                        open_course_id,
                        semester,
                    } => s.open_course_id == Some(open_course_id) && s.entry.semester == semester,
                })
            })
            .map(|s| s.entry.clone())
            .collect();
        sort_roster(&mut rows, order_by);
        Ok(rows)
    }

    async fn find_supplementary_students(
        &self,
        exam_ids: &[i64],
        order_by: RosterOrderBy,
    ) -> RepositoryResult<Vec<RosterEntry>> {
        let mut rows: Vec<RosterEntry> = self
            .supplementary
            .iter()
            .filter(|(_, course)| exam_ids.contains(&course.exam_id))
            .filter_map(|(student_id, course)| {
                let mut entry = self.entry_for(*student_id)?;
                entry.assignment = Some(course.clone().into());
                Some(entry)
            })
            .collect();
        sort_roster(&mut rows, order_by);
        Ok(rows)
    }
}

//! Per-role summary screens. Each one fetches its lists concurrently.

use anyhow::{anyhow, Result};
use chrono::Utc;
use futures::try_join;
use schoolhub_core::models::{
    Assignment, AssignmentStatus, Course, CourseMaterial, Role, Semester, Student, Teacher,
    UserAccount,
};
use serde::Serialize;

use super::Context;
use crate::output;

#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub users: usize,
    pub active_users: usize,
    pub inactive_users: usize,
    pub students: usize,
    pub teachers: usize,
    pub courses: usize,
    pub current_semester: Option<String>,
}

impl AdminSummary {
    fn build(
        users: &[UserAccount],
        students: &[Student],
        teachers: &[Teacher],
        courses: &[Course],
        semesters: &[Semester],
    ) -> Self {
        let active_users = users.iter().filter(|u| u.active).count();
        Self {
            users: users.len(),
            active_users,
            inactive_users: users.len() - active_users,
            students: students.len(),
            teachers: teachers.len(),
            courses: courses.len(),
            current_semester: current_semester(semesters),
        }
    }
}

#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub assignments: usize,
    pub pending: usize,
    pub overdue: usize,
    pub submitted: usize,
    pub graded: usize,
    pub materials: usize,
    pub current_semester: Option<String>,
}

impl StudentSummary {
    fn build(assignments: &[Assignment], materials: &[CourseMaterial], semesters: &[Semester]) -> Self {
        let now = Utc::now();
        let count = |status: AssignmentStatus| assignments.iter().filter(|a| a.status == status).count();
        Self {
            assignments: assignments.len(),
            pending: count(AssignmentStatus::Pending),
            overdue: assignments.iter().filter(|a| a.is_overdue(now)).count(),
            submitted: count(AssignmentStatus::Submitted) + count(AssignmentStatus::Late),
            graded: count(AssignmentStatus::Graded),
            materials: materials.len(),
            current_semester: current_semester(semesters),
        }
    }
}

#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub courses: usize,
    pub semesters: usize,
    pub current_semester: Option<String>,
}

/// The semester flagged active, else the one covering today
fn current_semester(semesters: &[Semester]) -> Option<String> {
    let today = Utc::now().date_naive();
    semesters
        .iter()
        .find(|s| s.active)
        .or_else(|| semesters.iter().find(|s| s.contains(today)))
        .map(|s| s.name.clone())
}

pub async fn show(ctx: &Context) -> Result<()> {
    ctx.require_role(&[])?;
    let role = ctx
        .session
        .role()
        .ok_or_else(|| anyhow!("Session has no user profile. Run `schoolhub login` again."))?;

    match role {
        Role::Admin => {
            let api = &ctx.api;
            let (users, students, teachers, courses, semesters) = try_join!(
                api.list_users(),
                api.list_students(),
                api.list_teachers(),
                api.list_courses(),
                api.list_semesters()
            )?;
            let summary = AdminSummary::build(&users, &students, &teachers, &courses, &semesters);
            if ctx.json {
                return output::json_pretty(&summary);
            }
            println!("Admin dashboard\n");
            output::field("Users", &format!(
                "{} ({} active, {} inactive)",
                summary.users, summary.active_users, summary.inactive_users
            ));
            output::field("Students", &summary.students.to_string());
            output::field("Teachers", &summary.teachers.to_string());
            output::field("Courses", &summary.courses.to_string());
            output::field("Semester", output::or_dash(summary.current_semester.as_deref()));
        }
        Role::Student => {
            let api = &ctx.api;
            let (assignments, materials, semesters) = try_join!(
                api.my_assignments(),
                api.my_course_materials(),
                api.list_semesters()
            )?;
            let summary = StudentSummary::build(&assignments, &materials, &semesters);
            if ctx.json {
                return output::json_pretty(&summary);
            }
            println!("Student dashboard\n");
            output::field("Assignments", &format!(
                "{} ({} pending, {} overdue, {} submitted, {} graded)",
                summary.assignments, summary.pending, summary.overdue, summary.submitted, summary.graded
            ));
            output::field("Materials", &summary.materials.to_string());
            output::field("Semester", output::or_dash(summary.current_semester.as_deref()));
        }
        Role::Teacher | Role::Accountant => {
            let api = &ctx.api;
            let (courses, semesters) = try_join!(api.list_courses(), api.list_semesters())?;
            let summary = CatalogSummary {
                courses: courses.len(),
                semesters: semesters.len(),
                current_semester: current_semester(&semesters),
            };
            if ctx.json {
                return output::json_pretty(&summary);
            }
            println!("{} dashboard\n", role);
            output::field("Courses", &summary.courses.to_string());
            output::field("Semesters", &summary.semesters.to_string());
            output::field("Semester", output::or_dash(summary.current_semester.as_deref()));
        }
    }
    Ok(())
}

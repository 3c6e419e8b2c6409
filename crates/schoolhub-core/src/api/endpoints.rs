//! Backend endpoints consumed by the client, grouped by screen.

use reqwest::Method;
use tracing::debug;

use crate::models::{
    Assignment, Course, CourseMaterial, Semester, Student, StudentForm, Submission,
    SubmissionForm, Teacher, TeacherForm, UserAccount, Validate,
};

use super::{ApiClient, Result};

impl ApiClient {
    // ===== User administration =====

    pub async fn list_users(&self) -> Result<Vec<UserAccount>> {
        self.get("/api/admin/users").await
    }

    pub async fn activate_user(&self, user_id: i64) -> Result<()> {
        debug!(user_id, "Activating user");
        self.send_no_content(Method::PUT, &format!("/api/admin/users/{}/activate", user_id))
            .await
    }

    pub async fn deactivate_user(&self, user_id: i64) -> Result<()> {
        debug!(user_id, "Deactivating user");
        self.send_no_content(Method::PUT, &format!("/api/admin/users/{}/deactivate", user_id))
            .await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<()> {
        debug!(user_id, "Deleting user");
        self.send_no_content(Method::DELETE, &format!("/api/admin/users/{}", user_id))
            .await
    }

    // ===== Student records =====

    pub async fn list_students(&self) -> Result<Vec<Student>> {
        self.get("/api/admin/students").await
    }

    pub async fn create_student(&self, form: &StudentForm) -> Result<Student> {
        form.validate()?;
        self.post("/api/admin/students", form).await
    }

    pub async fn update_student(&self, student_id: i64, form: &StudentForm) -> Result<Student> {
        form.validate()?;
        self.put(&format!("/api/admin/students/{}", student_id), form).await
    }

    pub async fn delete_student(&self, student_id: i64) -> Result<()> {
        self.send_no_content(Method::DELETE, &format!("/api/admin/students/{}", student_id))
            .await
    }

    // ===== Teacher records =====

    pub async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.get("/api/admin/teachers").await
    }

    pub async fn create_teacher(&self, form: &TeacherForm) -> Result<Teacher> {
        form.validate()?;
        self.post("/api/admin/teachers", form).await
    }

    pub async fn update_teacher(&self, teacher_id: i64, form: &TeacherForm) -> Result<Teacher> {
        form.validate()?;
        self.put(&format!("/api/admin/teachers/{}", teacher_id), form).await
    }

    pub async fn delete_teacher(&self, teacher_id: i64) -> Result<()> {
        self.send_no_content(Method::DELETE, &format!("/api/admin/teachers/{}", teacher_id))
            .await
    }

    // ===== Academic catalog =====

    pub async fn list_courses(&self) -> Result<Vec<Course>> {
        self.get("/api/courses").await
    }

    pub async fn list_semesters(&self) -> Result<Vec<Semester>> {
        self.get("/api/semesters").await
    }

    // ===== Student coursework =====

    /// Assignments for the logged-in student
    pub async fn my_assignments(&self) -> Result<Vec<Assignment>> {
        self.get("/api/student/assignments").await
    }

    pub async fn submit_assignment(&self, assignment_id: i64, form: &SubmissionForm) -> Result<Submission> {
        form.validate()?;
        debug!(assignment_id, "Submitting assignment");
        self.post(&format!("/api/student/assignments/{}/submit", assignment_id), form)
            .await
    }

    /// Documents published for the logged-in student's courses
    pub async fn my_course_materials(&self) -> Result<Vec<CourseMaterial>> {
        self.get("/api/student/materials").await
    }
}

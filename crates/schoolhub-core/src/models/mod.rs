//! Data models for SchoolHub entities.
//!
//! - `Profile`, `Role`, `UserAccount`: identities and login
//! - `Student`, `Teacher` and their forms: records managed by admins
//! - `Course`, `Semester`: academic catalog
//! - `Assignment`, `Submission`, `CourseMaterial`: student coursework
//! - `Validate`, `ValidationError`: client-side form checks

pub mod academic;
pub mod coursework;
pub mod person;
pub mod user;
pub mod validation;

pub use academic::{Course, Semester};
pub use coursework::{Assignment, AssignmentStatus, CourseMaterial, Submission, SubmissionForm};
pub use person::{Student, StudentForm, Teacher, TeacherForm};
pub use user::{LoginForm, Profile, Role, UserAccount};
pub use validation::{Validate, ValidationError};

//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Command-line client for the SchoolHub school-management platform.
#[derive(Parser, Debug)]
#[command(name = "schoolhub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Backend base URL (overrides SCHOOLHUB_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        /// Account email (defaults to the last one used)
        #[arg(short, long)]
        email: Option<String>,

        /// Remember the password in the OS keychain
        #[arg(long)]
        remember: bool,
    },

    /// Sign out and clear the stored session
    Logout {
        /// Also remove the remembered password
        #[arg(long)]
        forget: bool,
    },

    /// Show the signed-in user
    Whoami,

    /// Summary for the signed-in user's role
    Dashboard,

    /// Manage platform accounts (admin)
    #[command(subcommand)]
    Users(UsersCommand),

    /// Manage student records (admin)
    #[command(subcommand)]
    Students(StudentsCommand),

    /// Manage teacher records (admin)
    #[command(subcommand)]
    Teachers(TeachersCommand),

    /// List courses
    Courses,

    /// List semesters
    Semesters,

    /// Your assignments (student)
    #[command(subcommand)]
    Assignments(AssignmentsCommand),

    /// Documents for your courses (student)
    Materials,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List all accounts
    List,
    /// Re-enable an account
    Activate { id: i64 },
    /// Disable an account without deleting it
    Deactivate { id: i64 },
    /// Delete an account
    Delete { id: i64 },
}

#[derive(Args, Debug, Clone)]
pub struct PersonArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub email: String,

    /// Login password for a new record (prompted when omitted on add)
    #[arg(long)]
    pub password: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct StudentArgs {
    #[command(flatten)]
    pub person: PersonArgs,

    #[arg(long)]
    pub student_number: Option<String>,

    #[arg(long)]
    pub grade_level: Option<String>,

    /// Enrollment date (YYYY-MM-DD)
    #[arg(long)]
    pub enrollment_date: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone)]
pub struct TeacherArgs {
    #[command(flatten)]
    pub person: PersonArgs,

    #[arg(long)]
    pub department: Option<String>,

    #[arg(long)]
    pub specialization: Option<String>,

    /// Hire date (YYYY-MM-DD)
    #[arg(long)]
    pub hire_date: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum StudentsCommand {
    List,
    Add(StudentArgs),
    Update {
        id: i64,
        #[command(flatten)]
        args: StudentArgs,
    },
    Remove { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum TeachersCommand {
    List,
    Add(TeacherArgs),
    Update {
        id: i64,
        #[command(flatten)]
        args: TeacherArgs,
    },
    Remove { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum AssignmentsCommand {
    /// List assignments and their status
    List,
    /// Submit work for an assignment
    Submit {
        id: i64,

        /// Submission text
        #[arg(long)]
        text: Option<String>,

        /// Link to an uploaded file
        #[arg(long)]
        url: Option<String>,
    },
}

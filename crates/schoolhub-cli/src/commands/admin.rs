use anyhow::{Context as _, Result};
use schoolhub_core::models::{Role, StudentForm, TeacherForm};

use super::Context;
use crate::cli::{PersonArgs, StudentArgs, StudentsCommand, TeacherArgs, TeachersCommand, UsersCommand};
use crate::output::{self, or_dash, truncate};

pub async fn users(ctx: &Context, cmd: UsersCommand) -> Result<()> {
    ctx.require_role(&[Role::Admin])?;

    match cmd {
        UsersCommand::List => {
            let users = ctx.api.list_users().await?;
            if ctx.json {
                return output::json_pretty(&users);
            }
            println!("{:<6} {:<32} {:<11} {:<24} STATUS", "ID", "EMAIL", "ROLE", "NAME");
            for user in &users {
                println!(
                    "{:<6} {:<32} {:<11} {:<24} {}",
                    user.id,
                    truncate(&user.email, 32),
                    user.role.to_string(),
                    truncate(or_dash(user.name.as_deref()), 24),
                    user.status_display()
                );
            }
            println!("\n{} accounts", users.len());
        }
        UsersCommand::Activate { id } => {
            ctx.api.activate_user(id).await?;
            output::success(&format!("Activated user {}", id));
        }
        UsersCommand::Deactivate { id } => {
            ctx.api.deactivate_user(id).await?;
            output::success(&format!("Deactivated user {}", id));
        }
        UsersCommand::Delete { id } => {
            ctx.api.delete_user(id).await?;
            output::success(&format!("Deleted user {}", id));
        }
    }
    Ok(())
}

pub async fn students(ctx: &Context, cmd: StudentsCommand) -> Result<()> {
    ctx.require_role(&[Role::Admin])?;

    match cmd {
        StudentsCommand::List => {
            let students = ctx.api.list_students().await?;
            if ctx.json {
                return output::json_pretty(&students);
            }
            println!("{:<6} {:<28} {:<32} {:<10} GRADE", "ID", "NAME", "EMAIL", "NUMBER");
            for s in &students {
                println!(
                    "{:<6} {:<28} {:<32} {:<10} {}",
                    s.id,
                    truncate(&s.full_name(), 28),
                    truncate(&s.email, 32),
                    or_dash(s.student_number.as_deref()),
                    or_dash(s.grade_level.as_deref())
                );
            }
            println!("\n{} students", students.len());
        }
        StudentsCommand::Add(args) => {
            let form = student_form(args, true)?;
            let student = ctx.api.create_student(&form).await?;
            if ctx.json {
                return output::json_pretty(&student);
            }
            output::success(&format!("Created student {} ({})", student.full_name(), student.id));
        }
        StudentsCommand::Update { id, args } => {
            let form = student_form(args, false)?;
            let student = ctx.api.update_student(id, &form).await?;
            if ctx.json {
                return output::json_pretty(&student);
            }
            output::success(&format!("Updated student {} ({})", student.full_name(), student.id));
        }
        StudentsCommand::Remove { id } => {
            ctx.api.delete_student(id).await?;
            output::success(&format!("Removed student {}", id));
        }
    }
    Ok(())
}

pub async fn teachers(ctx: &Context, cmd: TeachersCommand) -> Result<()> {
    ctx.require_role(&[Role::Admin])?;

    match cmd {
        TeachersCommand::List => {
            let teachers = ctx.api.list_teachers().await?;
            if ctx.json {
                return output::json_pretty(&teachers);
            }
            println!("{:<6} {:<28} {:<32} DEPARTMENT", "ID", "NAME", "EMAIL");
            for t in &teachers {
                println!(
                    "{:<6} {:<28} {:<32} {}",
                    t.id,
                    truncate(&t.full_name(), 28),
                    truncate(&t.email, 32),
                    or_dash(t.department.as_deref())
                );
            }
            println!("\n{} teachers", teachers.len());
        }
        TeachersCommand::Add(args) => {
            let form = teacher_form(args, true)?;
            let teacher = ctx.api.create_teacher(&form).await?;
            if ctx.json {
                return output::json_pretty(&teacher);
            }
            output::success(&format!("Created teacher {} ({})", teacher.full_name(), teacher.id));
        }
        TeachersCommand::Update { id, args } => {
            let form = teacher_form(args, false)?;
            let teacher = ctx.api.update_teacher(id, &form).await?;
            if ctx.json {
                return output::json_pretty(&teacher);
            }
            output::success(&format!("Updated teacher {} ({})", teacher.full_name(), teacher.id));
        }
        TeachersCommand::Remove { id } => {
            ctx.api.delete_teacher(id).await?;
            output::success(&format!("Removed teacher {}", id));
        }
    }
    Ok(())
}

/// Password for the new login account; prompted when not given on creation
fn account_password(person: &PersonArgs, creating: bool) -> Result<Option<String>> {
    match (&person.password, creating) {
        (Some(password), _) => Ok(Some(password.clone())),
        (None, true) => {
            let password = rpassword::prompt_password("Initial password: ")
                .context("Failed to read password")?;
            Ok(Some(password))
        }
        (None, false) => Ok(None),
    }
}

fn student_form(args: StudentArgs, creating: bool) -> Result<StudentForm> {
    let password = account_password(&args.person, creating)?;
    Ok(StudentForm {
        first_name: args.person.first_name,
        last_name: args.person.last_name,
        email: args.person.email,
        password,
        student_number: args.student_number,
        grade_level: args.grade_level,
        enrollment_date: args.enrollment_date,
        phone: args.person.phone,
    })
}

fn teacher_form(args: TeacherArgs, creating: bool) -> Result<TeacherForm> {
    let password = account_password(&args.person, creating)?;
    Ok(TeacherForm {
        first_name: args.person.first_name,
        last_name: args.person.last_name,
        email: args.person.email,
        password,
        department: args.department,
        specialization: args.specialization,
        phone: args.person.phone,
        hire_date: args.hire_date,
    })
}

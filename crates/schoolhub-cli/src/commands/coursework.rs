use anyhow::Result;
use chrono::Utc;
use schoolhub_core::models::{Role, SubmissionForm};

use super::Context;
use crate::cli::AssignmentsCommand;
use crate::output::{self, or_dash, truncate};

pub async fn courses(ctx: &Context) -> Result<()> {
    ctx.require_role(&[])?;

    let courses = ctx.api.list_courses().await?;
    if ctx.json {
        return output::json_pretty(&courses);
    }
    println!("{:<6} {:<10} {:<36} {:<8} TEACHER", "ID", "CODE", "NAME", "CREDITS");
    for c in &courses {
        println!(
            "{:<6} {:<10} {:<36} {:<8} {}",
            c.id,
            or_dash(c.code.as_deref()),
            truncate(&c.name, 36),
            c.credits.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string()),
            or_dash(c.teacher_name.as_deref())
        );
    }
    Ok(())
}

pub async fn semesters(ctx: &Context) -> Result<()> {
    ctx.require_role(&[])?;

    let semesters = ctx.api.list_semesters().await?;
    if ctx.json {
        return output::json_pretty(&semesters);
    }
    println!("{:<6} {:<24} {:<12} {:<12}", "ID", "NAME", "START", "END");
    for s in &semesters {
        let marker = if s.active { " (current)" } else { "" };
        println!(
            "{:<6} {:<24} {:<12} {:<12}{}",
            s.id,
            truncate(&s.name, 24),
            s.start_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
            s.end_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
            marker
        );
    }
    Ok(())
}

pub async fn assignments(ctx: &Context, cmd: AssignmentsCommand) -> Result<()> {
    ctx.require_role(&[Role::Student])?;

    match cmd {
        AssignmentsCommand::List => {
            let assignments = ctx.api.my_assignments().await?;
            if ctx.json {
                return output::json_pretty(&assignments);
            }
            let now = Utc::now();
            println!("{:<6} {:<32} {:<20} {:<17} STATUS", "ID", "TITLE", "COURSE", "DUE");
            for a in &assignments {
                let due = a
                    .due_date
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                let status = if a.is_overdue(now) {
                    "Overdue".to_string()
                } else {
                    a.status.to_string()
                };
                println!(
                    "{:<6} {:<32} {:<20} {:<17} {}",
                    a.id,
                    truncate(&a.title, 32),
                    truncate(or_dash(a.course_name.as_deref()), 20),
                    due,
                    status
                );
            }
        }
        AssignmentsCommand::Submit { id, text, url } => {
            let form = SubmissionForm {
                content: text,
                attachment_url: url,
            };
            let submission = ctx.api.submit_assignment(id, &form).await?;
            if ctx.json {
                return output::json_pretty(&submission);
            }
            output::success(&format!("Submitted assignment {} ({})", id, submission.status));
        }
    }
    Ok(())
}

pub async fn materials(ctx: &Context) -> Result<()> {
    ctx.require_role(&[Role::Student])?;

    let materials = ctx.api.my_course_materials().await?;
    if ctx.json {
        return output::json_pretty(&materials);
    }
    println!("{:<6} {:<32} {:<20} {:<6} LINK", "ID", "TITLE", "COURSE", "TYPE");
    for m in &materials {
        println!(
            "{:<6} {:<32} {:<20} {:<6} {}",
            m.id,
            truncate(&m.title, 32),
            truncate(or_dash(m.course_name.as_deref()), 20),
            or_dash(m.file_type.as_deref()),
            or_dash(m.download_url.as_deref())
        );
    }
    Ok(())
}

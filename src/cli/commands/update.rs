//! Project update commands

use spida_webhook::http::{OnResponse, Transport};
use spida_webhook::models::{DataForm, LogMessage, ProjectCode};
use spida_webhook::output::OperationResult;

use super::Context;
use crate::cli::app::ProjectArg;

/// Set the project's status
pub async fn status<T: Transport>(
    ctx: &Context<'_, T>,
    project: ProjectArg,
    new_status: &str,
) -> anyhow::Result<()> {
    let project_id = ctx.project_id(project)?;
    ctx.client()?
        .set_project_status(project_id, new_status, OnResponse::UseDefault)
        .await?;

    finish(ctx, project_id, format!("Status of project {project_id} set to '{new_status}'"));
    Ok(())
}

/// Append a log message to the project
pub async fn log_message<T: Transport>(
    ctx: &Context<'_, T>,
    project: ProjectArg,
    trigger: &str,
    message: &str,
    success: bool,
) -> anyhow::Result<()> {
    let project_id = ctx.project_id(project)?;
    let log_message = LogMessage::new(trigger, message, success);
    ctx.client()?
        .add_project_log_message(project_id, &log_message, OnResponse::UseDefault)
        .await?;

    finish(ctx, project_id, format!("Log message added to project {project_id}"));
    Ok(())
}

/// Attach project codes
pub async fn codes<T: Transport>(
    ctx: &Context<'_, T>,
    project: ProjectArg,
    values: Vec<String>,
) -> anyhow::Result<()> {
    let project_id = ctx.project_id(project)?;
    let count = values.len();
    let codes = values.into_iter().map(ProjectCode::new).collect();
    ctx.client()?
        .set_project_codes(project_id, codes, OnResponse::UseDefault)
        .await?;

    finish(ctx, project_id, format!("{count} project code(s) sent to project {project_id}"));
    Ok(())
}

/// Replace a data form
pub async fn form<T: Transport>(
    ctx: &Context<'_, T>,
    project: ProjectArg,
    title: &str,
    fields: Vec<(String, String)>,
) -> anyhow::Result<()> {
    let project_id = ctx.project_id(project)?;
    let form = fields
        .into_iter()
        .fold(DataForm::new(title), |form, (name, value)| form.with_field(name, value));
    ctx.client()?
        .set_project_form(project_id, form, OnResponse::UseDefault)
        .await?;

    finish(ctx, project_id, format!("Form '{title}' sent to project {project_id}"));
    Ok(())
}

fn finish<T>(ctx: &Context<'_, T>, project_id: u64, message: String) {
    OperationResult {
        success: true,
        project_id,
        message,
    }
    .render(ctx.output_mode);
}

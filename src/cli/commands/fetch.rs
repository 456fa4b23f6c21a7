//! Project read commands

use anyhow::anyhow;

use spida_webhook::http::Transport;
use spida_webhook::output::{FieldValueResult, ProjectResult};
use spida_webhook::project::find_form_field_value;

use super::Context;
use crate::cli::app::ProjectArg;

/// Fetch the project and print it
pub async fn fetch<T: Transport>(
    ctx: &Context<'_, T>,
    project: ProjectArg,
    details: bool,
) -> anyhow::Result<()> {
    let project_id = ctx.project_id(project)?;
    let project = ctx.client()?.fetch_project(project_id, details).await?;

    ProjectResult {
        project_id,
        project,
    }
    .render(ctx.output_mode);
    Ok(())
}

/// Print a form field value from payload.part or a freshly fetched project
pub async fn form_value<T: Transport>(
    ctx: &Context<'_, T>,
    project: ProjectArg,
    form: &str,
    field: &str,
    fetch: bool,
) -> anyhow::Result<()> {
    let fetched;
    let document = if fetch {
        let project_id = ctx.project_id(project)?;
        fetched = ctx.client()?.fetch_project(project_id, true).await?;
        &fetched
    } else {
        ctx.payload
            .project()
            .ok_or_else(|| anyhow!("No project in payload (payload.part); use --fetch"))?
    };

    let value = find_form_field_value(document, form, field, ctx.logger);
    FieldValueResult {
        form: form.to_string(),
        field: field.to_string(),
        value,
    }
    .render(ctx.output_mode);
    Ok(())
}

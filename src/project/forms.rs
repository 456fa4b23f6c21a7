//! Data form lookup on a project document
//!
//! A missing form or field is not an error: the lookup returns `None` and
//! says why on the info channel.

use serde_json::Value;

use crate::logging::Logger;
use crate::models::DataForm;

/// Find the first form on `project` whose title equals `title` exactly
#[must_use]
pub fn find_form(project: &Value, title: &str, logger: &Logger) -> Option<DataForm> {
    let Some(forms) = project.get("dataForms").and_then(Value::as_array) else {
        logger.info("No forms on project.");
        return None;
    };

    let Some(form) = forms
        .iter()
        .find(|form| form.get("title").and_then(Value::as_str) == Some(title))
    else {
        logger.info(format!("Missing form named '{title}'."));
        return None;
    };

    match serde_json::from_value(form.clone()) {
        Ok(form) => Some(form),
        Err(e) => {
            logger.info(format!("Form named '{title}' could not be read: {e}"));
            None
        },
    }
}

/// Find the value of `field_name` on the form titled `title`
///
/// An empty string is a value, distinct from an absent field.
#[must_use]
pub fn find_form_field_value(
    project: &Value,
    title: &str,
    field_name: &str,
    logger: &Logger,
) -> Option<String> {
    let mut form = find_form(project, title, logger)?;
    let value = form.fields.remove(field_name);
    if value.is_none() {
        logger.info(format!("Missing field named '{field_name}' on form named '{title}'."));
    }
    value
}

//! Responses shared by the create and edit submissions.

use axum::http::StatusCode;
use encore_db::repo::StoreError;

use crate::forms::FormErrors;
use crate::views::{Empty, Flash, FormContext, FormView, Page};

pub const HOME: &str = "pages/home.html";

const VALIDATION_NOTICE: &str =
    "An error occurred due to form validation. Please check the fields and try again.";

/// Re-render a form that failed validation, one flash per field error.
pub fn rejected(
    template: &'static str,
    form: FormView,
    id: Option<i32>,
    errors: FormErrors,
) -> Page<FormContext> {
    let mut page = Page::new(
        template,
        FormContext {
            form: form.with_errors(errors.0.clone()),
            id,
        },
    )
    .with_status(StatusCode::UNPROCESSABLE_ENTITY)
    .flash(Flash::error(VALIDATION_NOTICE));

    for error in errors.iter() {
        page = page.flash(Flash::error(error.to_string()));
    }
    page
}

/// Re-render a valid form whose write was rolled back.
pub fn failed(
    template: &'static str,
    form: FormView,
    id: Option<i32>,
    notice: String,
    err: &StoreError,
) -> Page<FormContext> {
    tracing::error!(error = %err, "{notice}");
    Page::new(template, FormContext { form, id })
        .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        .flash(Flash::error(notice))
}

/// Home page carrying a single notice.
pub fn listed(notice: String) -> Page<Empty> {
    Page::new(HOME, Empty::default()).flash(Flash::message(notice))
}

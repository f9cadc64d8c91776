//! View models handed to the template renderer.
//!
//! Every page is serialized as `{ "template": ..., "flashes": [...], ...context }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDateTime;
use serde::Serialize;

use encore_db::entities::{Genre, UsState};

use crate::forms::{FieldError, FormData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Message,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Message,
            message: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Error,
            message: text.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub template: &'static str,
    pub flashes: Vec<Flash>,
    #[serde(flatten)]
    pub context: T,
    #[serde(skip)]
    pub status: StatusCode,
}

impl<T: Serialize> Page<T> {
    pub fn new(template: &'static str, context: T) -> Self {
        Self {
            template,
            flashes: Vec::new(),
            context,
            status: StatusCode::OK,
        }
    }

    pub fn flash(mut self, flash: Flash) -> Self {
        self.flashes.push(flash);
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

/// Context for pages that carry no data of their own.
#[derive(Debug, Default, Serialize)]
pub struct Empty {}

/// Option lists for the select inputs of the venue and artist forms.
#[derive(Debug, Serialize)]
pub struct Choices {
    pub states: Vec<String>,
    pub genres: Vec<&'static str>,
}

impl Choices {
    pub fn all() -> Self {
        Self {
            states: UsState::all().iter().map(UsState::code).collect(),
            genres: Genre::ALL.iter().map(Genre::as_str).collect(),
        }
    }
}

/// A form as rendered: current values, field errors and select options.
#[derive(Debug, Serialize)]
pub struct FormView {
    pub values: FormData,
    pub errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Choices>,
}

impl FormView {
    pub fn new(values: FormData) -> Self {
        Self {
            values,
            errors: Vec::new(),
            choices: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_choices(mut self) -> Self {
        self.choices = Some(Choices::all());
        self
    }
}

/// Page context for create and edit forms. `id` is set when editing.
#[derive(Debug, Serialize)]
pub struct FormContext {
    pub form: FormView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    Medium,
    Full,
}

/// Human-readable show time: `Wed 05, 01, 2024 8:00PM` (medium) or
/// `Wednesday May, 1, 2024 at 8:00PM` (full).
pub fn format_datetime(value: NaiveDateTime, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
        DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
    };
    value.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn show_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime(show_time(), DateFormat::Medium),
            "Wed 05, 01, 2024 8:00PM"
        );
        assert_eq!(
            format_datetime(show_time(), DateFormat::Full),
            "Wednesday May, 1, 2024 at 8:00PM"
        );
    }

    #[test]
    fn test_page_flattens_context() {
        #[derive(Serialize)]
        struct Ctx {
            count: usize,
        }

        let page = Page::new("pages/home.html", Ctx { count: 2 })
            .flash(Flash::message("Venue X was successfully listed!"))
            .flash(Flash::error("oops"));
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["template"], "pages/home.html");
        assert_eq!(json["count"], 2);
        assert_eq!(json["flashes"][0]["category"], "message");
        assert_eq!(json["flashes"][1]["category"], "error");
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_choices_cover_every_option() {
        let choices = Choices::all();
        assert_eq!(choices.states.len(), 51);
        assert_eq!(choices.genres.len(), 19);
        assert_eq!(choices.genres[7], "Hip-Hop");
    }
}

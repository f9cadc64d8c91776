//! HTML form handling: raw submitted values, per-entity field tables, and
//! conversion into validated persistence inputs.
//!
//! Each entity form is a static table of [`FieldSpec`]s. Validation walks
//! the table, runs each field's validators against the submitted values and
//! records at most one [`FieldError`] per field. Only a form with no errors
//! is converted into its typed input.

pub mod artist;
pub mod show;
pub mod validators;
pub mod venue;

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use encore_db::entities::{Genre, UsState};
pub use validators::ValidationError;

/// Submitted form values keyed by field name. A field may repeat
/// (multi-selects), so every name maps to a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormData {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormData {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in pairs {
            fields.entry(name).or_default().push(value);
        }
        Self { fields }
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_string(), vec![value.into()]);
    }

    pub fn set_many<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .insert(name.to_string(), values.into_iter().map(Into::into).collect());
    }

    pub fn values(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First value of a field, trimmed; `None` when absent or blank.
    pub fn text(&self, name: &str) -> Option<String> {
        self.values(name)
            .first()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Checkbox semantics: present and not one of the "off" spellings.
    pub fn flag(&self, name: &str) -> bool {
        self.values(name).first().is_some_and(|v| {
            !matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "" | "false" | "n" | "no" | "off" | "0"
            )
        })
    }

    pub fn choice<T: FromStr>(&self, name: &str) -> Option<T> {
        self.text(name).and_then(|v| v.parse().ok())
    }

    /// Every parseable value of a multi-select, first occurrence kept.
    pub fn choices<T: FromStr + PartialEq>(&self, name: &str) -> Vec<T> {
        let mut picked: Vec<T> = Vec::new();
        for value in self.values(name) {
            if let Ok(choice) = value.trim().parse() {
                if !picked.contains(&choice) {
                    picked.push(choice);
                }
            }
        }
        picked
    }
}

pub type Validator = fn(&[String]) -> Result<(), ValidationError>;

/// One form field: its submitted name, the label shown next to errors, and
/// the validators run in order until the first failure.
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub validators: &'static [Validator],
}

impl FieldSpec {
    pub const fn new(
        name: &'static str,
        label: &'static str,
        validators: &'static [Validator],
    ) -> Self {
        Self {
            name,
            label,
            validators,
        }
    }

    fn check(&self, form: &FormData) -> Option<FieldError> {
        let values = form.values(self.name);
        self.validators
            .iter()
            .find_map(|validate| validate(values).err())
            .map(|err| self.error(err))
    }

    pub fn error(&self, err: ValidationError) -> FieldError {
        FieldError {
            field: self.name,
            label: self.label,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub label: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error in: {} -> {}", self.label, self.message)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} invalid field(s)", .0.len())]
pub struct FormErrors(pub Vec<FieldError>);

impl FormErrors {
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

/// Run every field's validators; `Err` carries one entry per failing field.
pub fn validate(specs: &[FieldSpec], form: &FormData) -> Result<(), FormErrors> {
    let errors: Vec<FieldError> = specs.iter().filter_map(|spec| spec.check(form)).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(FormErrors(errors))
    }
}

/// A value that validation already guaranteed; reports `Required` against
/// the field if it is somehow missing.
pub(crate) fn require<T>(value: Option<T>, spec: &FieldSpec) -> Result<T, FormErrors> {
    value.ok_or_else(|| FormErrors(vec![spec.error(ValidationError::Required)]))
}

// ─── Validators ─────────────────────────────────────────────────────

fn first(values: &[String]) -> &str {
    values.first().map(String::as_str).unwrap_or("")
}

pub fn required(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| !v.trim().is_empty()) {
        Ok(())
    } else {
        Err(ValidationError::Required)
    }
}

pub fn phone(values: &[String]) -> Result<(), ValidationError> {
    validators::validate_phone(first(values))
}

pub fn url(values: &[String]) -> Result<(), ValidationError> {
    validators::validate_url(first(values))
}

pub fn state_choice(values: &[String]) -> Result<(), ValidationError> {
    let value = first(values).trim();
    if value.is_empty() {
        return Ok(());
    }
    value
        .parse::<UsState>()
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidChoice(value.to_string()))
}

pub fn genre_choices(values: &[String]) -> Result<(), ValidationError> {
    for value in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
        if value.parse::<Genre>().is_err() {
            return Err(ValidationError::InvalidChoice(value.to_string()));
        }
    }
    Ok(())
}

pub fn integer(values: &[String]) -> Result<(), ValidationError> {
    let value = first(values).trim();
    if value.is_empty() {
        return Ok(());
    }
    value
        .parse::<i32>()
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidInteger)
}

/// Unlike the bare parser, a non-blank value that cannot be read is an error
/// here rather than a silently dropped field.
pub fn datetime(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().all(|v| v.trim().is_empty()) {
        return Ok(());
    }
    validators::parse_flexible_datetime(values)
        .map(|_| ())
        .ok_or(ValidationError::InvalidDateTime)
}

// ─── Fields shared by the venue and artist forms ────────────────────

pub(crate) const NAME: FieldSpec = FieldSpec::new("name", "Name", &[required]);
pub(crate) const CITY: FieldSpec = FieldSpec::new("city", "City", &[required]);
pub(crate) const STATE: FieldSpec = FieldSpec::new("state", "State", &[required, state_choice]);
pub(crate) const PHONE: FieldSpec = FieldSpec::new("phone", "Phone", &[phone]);
pub(crate) const IMAGE_LINK: FieldSpec = FieldSpec::new("image_link", "Image Link", &[url]);
pub(crate) const GENRES: FieldSpec =
    FieldSpec::new("genres", "Genres", &[required, genre_choices]);
pub(crate) const FACEBOOK_LINK: FieldSpec =
    FieldSpec::new("facebook_link", "Facebook Link", &[url]);
pub(crate) const WEBSITE_LINK: FieldSpec = FieldSpec::new("website_link", "Website Link", &[url]);
pub(crate) const SEEKING_DESCRIPTION: FieldSpec =
    FieldSpec::new("seeking_description", "Seeking Description", &[]);

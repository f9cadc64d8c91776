use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Form,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use encore_db::repo::shows;
use encore_db::repo::ShowListing;
use encore_db::AppState;

use super::error::AppError;
use super::submit::{failed, listed, rejected};
use crate::forms::{self, FormData};
use crate::views::{format_datetime, DateFormat, FormContext, FormView, Page};

const NEW_FORM: &str = "forms/new_show.html";

#[derive(Debug, Serialize)]
pub struct ShowRow {
    #[serde(flatten)]
    pub show: ShowListing,
    pub start_time_short: String,
    pub start_time_label: String,
}

impl From<ShowListing> for ShowRow {
    fn from(show: ShowListing) -> Self {
        Self {
            start_time_short: format_datetime(show.start_time, DateFormat::Medium),
            start_time_label: format_datetime(show.start_time, DateFormat::Full),
            show,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShowsContext {
    pub shows: Vec<ShowRow>,
}

/// GET /shows
pub async fn list_shows(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let shows = shows::list(&state.db)
        .await?
        .into_iter()
        .map(ShowRow::from)
        .collect();
    Ok(Page::new("pages/shows.html", ShowsContext { shows }).into_response())
}

/// GET /shows/create
pub async fn create_show_form() -> Response {
    let now = Utc::now().naive_utc();
    Page::new(
        NEW_FORM,
        FormContext {
            form: FormView::new(forms::show::initial(now)),
            id: None,
        },
    )
    .into_response()
}

/// POST /shows/create
pub async fn create_show(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let values = FormData::from_pairs(pairs);
    let input = match forms::show::parse(&values) {
        Ok(input) => input,
        Err(errors) => {
            return rejected(NEW_FORM, FormView::new(values), None, errors).into_response();
        }
    };

    let artist_id = input.artist_id;
    match shows::create(&state.db, input).await {
        Ok(_) => listed("Show was successfully listed!".to_string()).into_response(),
        Err(e) => failed(
            NEW_FORM,
            FormView::new(values),
            None,
            format!("An error occurred. Show for artist: {artist_id} could not be listed."),
            &e,
        )
        .into_response(),
    }
}

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use encore_db::entities::venue;
use encore_db::repo::venues::{self, Area, VenueDetail};
use encore_db::repo::SearchResults;
use encore_db::AppState;

use super::error::AppError;
use super::extract::RecordId;
use super::submit::{failed, listed, rejected};
use super::{DetailQuery, SearchForm};
use crate::forms::{self, FormData};
use crate::views::{Flash, FormContext, FormView, Page};

const NEW_FORM: &str = "forms/new_venue.html";
const EDIT_FORM: &str = "forms/edit_venue.html";

#[derive(Debug, Serialize)]
pub struct AreasContext {
    pub areas: Vec<Area>,
}

#[derive(Debug, Serialize)]
pub struct SearchContext {
    pub results: SearchResults<venue::Model>,
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct VenueContext {
    pub venue: VenueDetail,
}

/// GET /venues
pub async fn list_venues(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let now = Utc::now().naive_utc();
    let areas = venues::list_by_area(&state.db, now).await?;
    Ok(Page::new("pages/venues.html", AreasContext { areas }).into_response())
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    Form(query): Form<SearchForm>,
) -> Result<Response, AppError> {
    let results = venues::search(&state.db, &query.search_term).await?;
    Ok(Page::new(
        "pages/search_venues.html",
        SearchContext {
            results,
            search_term: query.search_term,
        },
    )
    .into_response())
}

/// GET /venues/{id}
pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    Query(query): Query<DetailQuery>,
) -> Result<Response, AppError> {
    let now = Utc::now().naive_utc();
    let venue = venues::detail(&state.db, id, now).await?;
    let notice = query
        .updated
        .is_some()
        .then(|| format!("Venue {} was successfully updated!", venue.venue.name));

    let mut page = Page::new("pages/show_venue.html", VenueContext { venue });
    if let Some(notice) = notice {
        page = page.flash(Flash::message(notice));
    }
    Ok(page.into_response())
}

/// GET /venues/create
pub async fn create_venue_form() -> Response {
    Page::new(
        NEW_FORM,
        FormContext {
            form: FormView::new(FormData::default()).with_choices(),
            id: None,
        },
    )
    .into_response()
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let values = FormData::from_pairs(pairs);
    let input = match forms::venue::parse(&values) {
        Ok(input) => input,
        Err(errors) => {
            let form = FormView::new(values).with_choices();
            return rejected(NEW_FORM, form, None, errors).into_response();
        }
    };

    let name = input.name.clone();
    match venues::create(&state.db, input).await {
        Ok(_) => listed(format!("Venue {name} was successfully listed!")).into_response(),
        Err(e) => failed(
            NEW_FORM,
            FormView::new(values).with_choices(),
            None,
            format!("An error occurred. Venue {name} could not be listed."),
            &e,
        )
        .into_response(),
    }
}

/// GET /venues/{id}/edit
pub async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Response, AppError> {
    let venue = venues::find(&state.db, id).await?;
    let form = FormView::new(forms::venue::values_of(&venue)).with_choices();
    Ok(Page::new(EDIT_FORM, FormContext { form, id: Some(id) }).into_response())
}

/// POST /venues/{id}/edit
pub async fn edit_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    venues::find(&state.db, id).await?;

    let values = FormData::from_pairs(pairs);
    let input = match forms::venue::parse(&values) {
        Ok(input) => input,
        Err(errors) => {
            let form = FormView::new(values).with_choices();
            return Ok(rejected(EDIT_FORM, form, Some(id), errors).into_response());
        }
    };

    let name = input.name.clone();
    match venues::update(&state.db, id, input).await {
        Ok(_) => Ok(Redirect::to(&format!("/venues/{id}?updated=1")).into_response()),
        Err(e) if e.is_not_found() => Err(e.into()),
        Err(e) => Ok(failed(
            EDIT_FORM,
            FormView::new(values).with_choices(),
            Some(id),
            format!("An error occurred. Venue {name} could not be updated."),
            &e,
        )
        .into_response()),
    }
}

/// DELETE /venues/{id}
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Response, AppError> {
    let venue = venues::find(&state.db, id).await?;
    venues::delete(&state.db, id).await?;
    Ok(listed(format!("Venue {} was successfully deleted.", venue.name)).into_response())
}

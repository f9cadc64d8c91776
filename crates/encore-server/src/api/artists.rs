use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use encore_db::entities::artist;
use encore_db::repo::artists::{self, ArtistDetail};
use encore_db::repo::SearchResults;
use encore_db::AppState;

use super::error::AppError;
use super::extract::RecordId;
use super::submit::{failed, listed, rejected};
use super::{DetailQuery, SearchForm};
use crate::forms::{self, FormData};
use crate::views::{Flash, FormContext, FormView, Page};

const NEW_FORM: &str = "forms/new_artist.html";
const EDIT_FORM: &str = "forms/edit_artist.html";

#[derive(Debug, Serialize)]
pub struct ArtistsContext {
    pub artists: Vec<artist::Model>,
}

#[derive(Debug, Serialize)]
pub struct SearchContext {
    pub results: SearchResults<artist::Model>,
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistContext {
    pub artist: ArtistDetail,
}

/// GET /artists
pub async fn list_artists(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let artists = artists::list(&state.db).await?;
    Ok(Page::new("pages/artists.html", ArtistsContext { artists }).into_response())
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    Form(query): Form<SearchForm>,
) -> Result<Response, AppError> {
    let results = artists::search(&state.db, &query.search_term).await?;
    Ok(Page::new(
        "pages/search_artists.html",
        SearchContext {
            results,
            search_term: query.search_term,
        },
    )
    .into_response())
}

/// GET /artists/{id}
pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    Query(query): Query<DetailQuery>,
) -> Result<Response, AppError> {
    let now = Utc::now().naive_utc();
    let artist = artists::detail(&state.db, id, now).await?;
    let notice = query
        .updated
        .is_some()
        .then(|| format!("Artist {} was successfully updated!", artist.artist.name));

    let mut page = Page::new("pages/show_artist.html", ArtistContext { artist });
    if let Some(notice) = notice {
        page = page.flash(Flash::message(notice));
    }
    Ok(page.into_response())
}

/// GET /artists/create
pub async fn create_artist_form() -> Response {
    Page::new(
        NEW_FORM,
        FormContext {
            form: FormView::new(FormData::default()).with_choices(),
            id: None,
        },
    )
    .into_response()
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let values = FormData::from_pairs(pairs);
    let input = match forms::artist::parse(&values) {
        Ok(input) => input,
        Err(errors) => {
            let form = FormView::new(values).with_choices();
            return rejected(NEW_FORM, form, None, errors).into_response();
        }
    };

    let name = input.name.clone();
    match artists::create(&state.db, input).await {
        Ok(_) => listed(format!("Artist {name} was successfully listed!")).into_response(),
        Err(e) => failed(
            NEW_FORM,
            FormView::new(values).with_choices(),
            None,
            format!("An error occurred. Artist {name} could not be listed."),
            &e,
        )
        .into_response(),
    }
}

/// GET /artists/{id}/edit
pub async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Response, AppError> {
    let artist = artists::find(&state.db, id).await?;
    let form = FormView::new(forms::artist::values_of(&artist)).with_choices();
    Ok(Page::new(EDIT_FORM, FormContext { form, id: Some(id) }).into_response())
}

/// POST /artists/{id}/edit
pub async fn edit_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    artists::find(&state.db, id).await?;

    let values = FormData::from_pairs(pairs);
    let input = match forms::artist::parse(&values) {
        Ok(input) => input,
        Err(errors) => {
            let form = FormView::new(values).with_choices();
            return Ok(rejected(EDIT_FORM, form, Some(id), errors).into_response());
        }
    };

    let name = input.name.clone();
    match artists::update(&state.db, id, input).await {
        Ok(_) => Ok(Redirect::to(&format!("/artists/{id}?updated=1")).into_response()),
        Err(e) if e.is_not_found() => Err(e.into()),
        Err(e) => Ok(failed(
            EDIT_FORM,
            FormView::new(values).with_choices(),
            Some(id),
            format!("An error occurred. Artist {name} could not be updated."),
            &e,
        )
        .into_response()),
    }
}

/// DELETE /artists/{id}
pub async fn delete_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Response, AppError> {
    let artist = artists::find(&state.db, id).await?;
    artists::delete(&state.db, id).await?;
    Ok(listed(format!("Artist {} was successfully deleted.", artist.name)).into_response())
}

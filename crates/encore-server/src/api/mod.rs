pub mod artists;
pub mod error;
pub mod extract;
pub mod pages;
pub mod shows;
pub mod submit;
pub mod venues;

use axum::{
    routing::{get, post},
    Router,
};
use encore_db::AppState;
use serde::Deserialize;
use std::sync::Arc;

/// Body of the venue and artist search forms.
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Query string of a detail page; `updated` is set by the redirect that
/// follows a successful edit.
#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    pub updated: Option<String>,
}

/// Every page route, without the outer middleware stack.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/create",
            get(venues::create_venue_form).post(venues::create_venue),
        )
        .route(
            "/venues/{id}",
            get(venues::get_venue).delete(venues::delete_venue),
        )
        .route(
            "/venues/{id}/edit",
            get(venues::edit_venue_form).post(venues::edit_venue),
        )
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/create",
            get(artists::create_artist_form).post(artists::create_artist),
        )
        .route(
            "/artists/{id}",
            get(artists::get_artist).delete(artists::delete_artist),
        )
        .route(
            "/artists/{id}/edit",
            get(artists::edit_artist_form).post(artists::edit_artist),
        )
        .route("/shows", get(shows::list_shows))
        .route(
            "/shows/create",
            get(shows::create_show_form).post(shows::create_show),
        )
        .fallback(pages::not_found)
        .with_state(state)
}

//! Persistence operations over venues, artists and shows.
//!
//! Every write runs in its own `DatabaseTransaction`. A transaction that is
//! dropped before `commit` rolls back, so an early `?` return releases it.

pub mod artists;
pub mod shows;
pub mod venues;

use chrono::NaiveDateTime;
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};
use sea_orm::{DbErr, EntityTrait, FromQueryResult, JoinType, QuerySelect, RelationTrait, Select};
use serde::Serialize;
use thiserror::Error;

use crate::entities::{artist, show, venue};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("database error: {0}")]
    Persistence(#[from] DbErr),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Matching rows plus their count, as shown on a search results page.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for SearchResults<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// A show flattened with the display fields of its venue and artist.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct ShowListing {
    pub id: i32,
    pub start_time: NaiveDateTime,
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}

/// Shows split around a single "now" snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShowPartition {
    pub past_shows: Vec<ShowListing>,
    pub upcoming_shows: Vec<ShowListing>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ShowPartition {
    /// A show is past when it starts strictly before `now`.
    pub fn split(shows: Vec<ShowListing>, now: NaiveDateTime) -> Self {
        let (past_shows, upcoming_shows): (Vec<_>, Vec<_>) =
            shows.into_iter().partition(|s| s.start_time < now);

        Self {
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

/// Shows joined with venue and artist in one query, ready for
/// `into_model::<ShowListing>()`.
pub(crate) fn show_listings() -> Select<show::Entity> {
    show::Entity::find()
        .select_only()
        .column(show::Column::Id)
        .column(show::Column::StartTime)
        .column(show::Column::VenueId)
        .column(show::Column::ArtistId)
        .column_as(venue::Column::Name, "venue_name")
        .column_as(venue::Column::ImageLink, "venue_image_link")
        .column_as(artist::Column::Name, "artist_name")
        .column_as(artist::Column::ImageLink, "artist_image_link")
        .join(JoinType::InnerJoin, show::Relation::Venue.def())
        .join(JoinType::InnerJoin, show::Relation::Artist.def())
}

/// Case-insensitive literal substring match; an empty term matches every
/// row. `%` and `_` in the term match only themselves.
pub(crate) fn name_contains<T: IntoColumnRef>(column: T, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&term.trim().to_lowercase()));
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn listing(id: i32, start_time: NaiveDateTime) -> ShowListing {
        ShowListing {
            id,
            start_time,
            venue_id: 1,
            venue_name: "The Musical Hop".into(),
            venue_image_link: None,
            artist_id: 1,
            artist_name: "Guns N Petals".into(),
            artist_image_link: None,
        }
    }

    #[test]
    fn test_split_past_and_upcoming() {
        let now = at(10, 12);
        let partition = ShowPartition::split(vec![listing(1, at(1, 20)), listing(2, at(20, 20))], now);
        assert_eq!(partition.past_shows_count, 1);
        assert_eq!(partition.upcoming_shows_count, 1);
        assert_eq!(partition.past_shows[0].id, 1);
        assert_eq!(partition.upcoming_shows[0].id, 2);
    }

    #[test]
    fn test_show_starting_now_is_upcoming() {
        let now = at(10, 12);
        let partition = ShowPartition::split(vec![listing(1, now)], now);
        assert_eq!(partition.past_shows_count, 0);
        assert_eq!(partition.upcoming_shows_count, 1);
    }

    #[test]
    fn test_escape_like_marks_wildcards_literal() {
        assert_eq!(escape_like("m_sical"), "m\\_sical");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("hop"), "hop");
    }

    #[test]
    fn test_search_results_count() {
        let results = SearchResults::from(vec!["a", "b"]);
        assert_eq!(results.count, 2);
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["count"], 2);
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::NotFound {
            entity: "venue",
            id: 7,
        };
        assert_eq!(err.to_string(), "venue 7 not found");
        assert!(err.is_not_found());
        assert!(!StoreError::Persistence(DbErr::RecordNotInserted).is_not_found());
    }
}

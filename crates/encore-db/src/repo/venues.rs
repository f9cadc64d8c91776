use chrono::NaiveDateTime;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Unchanged, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use std::collections::HashMap;

use super::{name_contains, show_listings, SearchResults, ShowListing, ShowPartition, StoreError};
use crate::entities::{show, venue, Genres, UsState};

/// Validated venue fields, as submitted by the create and edit forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: UsState,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Genres,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueInput {
    fn into_active_model(self) -> venue::ActiveModel {
        venue::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            city: Set(self.city),
            state: Set(self.state),
            address: Set(self.address),
            phone: Set(self.phone),
            image_link: Set(self.image_link),
            genres: Set(self.genres),
            facebook_link: Set(self.facebook_link),
            website: Set(self.website),
            seeking_talent: Set(self.seeking_talent),
            seeking_description: Set(self.seeking_description),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AreaVenue {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, Serialize)]
pub struct Area {
    pub city: String,
    pub state: UsState,
    pub venues: Vec<AreaVenue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: venue::Model,
    #[serde(flatten)]
    pub shows: ShowPartition,
}

fn not_found(id: i32) -> StoreError {
    StoreError::NotFound { entity: "venue", id }
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<venue::Model, StoreError> {
    venue::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(id))
}

pub async fn create(db: &DatabaseConnection, input: VenueInput) -> Result<venue::Model, StoreError> {
    let txn = db.begin().await?;
    let created = input.into_active_model().insert(&txn).await?;
    txn.commit().await?;

    tracing::info!(venue_id = created.id, name = %created.name, "venue created");
    Ok(created)
}

/// Replace every field of an existing venue.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    input: VenueInput,
) -> Result<venue::Model, StoreError> {
    let txn = db.begin().await?;
    let existing = find(&txn, id).await?;

    let mut am = input.into_active_model();
    am.id = Unchanged(existing.id);
    let updated = am.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(venue_id = id, "venue updated");
    Ok(updated)
}

/// Remove a venue together with every show booked there.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), StoreError> {
    let txn = db.begin().await?;
    find(&txn, id).await?;

    let shows = show::Entity::delete_many()
        .filter(show::Column::VenueId.eq(id))
        .exec(&txn)
        .await?;
    venue::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(venue_id = id, shows_removed = shows.rows_affected, "venue deleted");
    Ok(())
}

/// Venues grouped by (city, state), each with its count of shows at or
/// after `now`.
pub async fn list_by_area<C: ConnectionTrait>(
    db: &C,
    now: NaiveDateTime,
) -> Result<Vec<Area>, StoreError> {
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::State)
        .order_by_asc(venue::Column::City)
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await?;

    let upcoming: HashMap<i32, i64> = show::Entity::find()
        .select_only()
        .column(show::Column::VenueId)
        .column_as(Expr::col(show::Column::Id).count(), "upcoming")
        .filter(show::Column::StartTime.gte(now))
        .group_by(show::Column::VenueId)
        .into_tuple::<(i32, i64)>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    let mut areas: Vec<Area> = Vec::new();
    for v in venues {
        let entry = AreaVenue {
            id: v.id,
            num_upcoming_shows: upcoming.get(&v.id).copied().unwrap_or(0),
            name: v.name,
        };
        match areas.last_mut() {
            Some(area) if area.city == v.city && area.state == v.state => area.venues.push(entry),
            _ => areas.push(Area {
                city: v.city,
                state: v.state,
                venues: vec![entry],
            }),
        }
    }

    Ok(areas)
}

pub async fn search<C: ConnectionTrait>(
    db: &C,
    term: &str,
) -> Result<SearchResults<venue::Model>, StoreError> {
    let venues = venue::Entity::find()
        .filter(name_contains(venue::Column::Name, term))
        .order_by_asc(venue::Column::Name)
        .all(db)
        .await?;

    Ok(SearchResults::from(venues))
}

/// A venue with its shows (and each show's artist) split into past and
/// upcoming relative to `now`.
pub async fn detail(
    db: &DatabaseConnection,
    id: i32,
    now: NaiveDateTime,
) -> Result<VenueDetail, StoreError> {
    let txn = db.begin().await?;
    let venue = find(&txn, id).await?;

    let shows = show_listings()
        .filter(show::Column::VenueId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .into_model::<ShowListing>()
        .all(&txn)
        .await?;
    txn.commit().await?;

    Ok(VenueDetail {
        venue,
        shows: ShowPartition::split(shows, now),
    })
}

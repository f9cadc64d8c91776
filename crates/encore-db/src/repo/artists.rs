use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Unchanged, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;

use super::{name_contains, show_listings, SearchResults, ShowListing, ShowPartition, StoreError};
use crate::entities::{artist, show, Genres, UsState};

/// Validated artist fields, as submitted by the create and edit forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: UsState,
    pub phone: Option<String>,
    pub genres: Genres,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistInput {
    fn into_active_model(self) -> artist::ActiveModel {
        artist::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            city: Set(self.city),
            state: Set(self.state),
            phone: Set(self.phone),
            genres: Set(self.genres),
            image_link: Set(self.image_link),
            facebook_link: Set(self.facebook_link),
            website_link: Set(self.website_link),
            seeking_venue: Set(self.seeking_venue),
            seeking_description: Set(self.seeking_description),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: artist::Model,
    #[serde(flatten)]
    pub shows: ShowPartition,
}

fn not_found(id: i32) -> StoreError {
    StoreError::NotFound {
        entity: "artist",
        id,
    }
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<artist::Model, StoreError> {
    artist::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(id))
}

pub async fn create(
    db: &DatabaseConnection,
    input: ArtistInput,
) -> Result<artist::Model, StoreError> {
    let txn = db.begin().await?;
    let created = input.into_active_model().insert(&txn).await?;
    txn.commit().await?;

    tracing::info!(artist_id = created.id, name = %created.name, "artist created");
    Ok(created)
}

/// Replace every field of an existing artist.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    input: ArtistInput,
) -> Result<artist::Model, StoreError> {
    let txn = db.begin().await?;
    let existing = find(&txn, id).await?;

    let mut am = input.into_active_model();
    am.id = Unchanged(existing.id);
    let updated = am.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(artist_id = id, "artist updated");
    Ok(updated)
}

/// Remove an artist together with every show they were booked for.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), StoreError> {
    let txn = db.begin().await?;
    find(&txn, id).await?;

    let shows = show::Entity::delete_many()
        .filter(show::Column::ArtistId.eq(id))
        .exec(&txn)
        .await?;
    artist::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(artist_id = id, shows_removed = shows.rows_affected, "artist deleted");
    Ok(())
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<artist::Model>, StoreError> {
    Ok(artist::Entity::find()
        .order_by_asc(artist::Column::Name)
        .all(db)
        .await?)
}

pub async fn search<C: ConnectionTrait>(
    db: &C,
    term: &str,
) -> Result<SearchResults<artist::Model>, StoreError> {
    let artists = artist::Entity::find()
        .filter(name_contains(artist::Column::Name, term))
        .order_by_asc(artist::Column::Name)
        .all(db)
        .await?;

    Ok(SearchResults::from(artists))
}

pub async fn detail(
    db: &DatabaseConnection,
    id: i32,
    now: NaiveDateTime,
) -> Result<ArtistDetail, StoreError> {
    let txn = db.begin().await?;
    let artist = find(&txn, id).await?;

    let shows = show_listings()
        .filter(show::Column::ArtistId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .into_model::<ShowListing>()
        .all(&txn)
        .await?;
    txn.commit().await?;

    Ok(ArtistDetail {
        artist,
        shows: ShowPartition::split(shows, now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::{shows as show_repo, venues};
    use crate::test_support::{artist_input, migrated_db, venue_input};
    use chrono::{Duration, NaiveDate};
    use sea_orm::PaginatorTrait;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_orders_by_name() {
        let db = migrated_db().await;
        create(&db, artist_input("The Wild Sax Band")).await.unwrap();
        create(&db, artist_input("Guns N Petals")).await.unwrap();
        create(&db, artist_input("Matt Quevedo")).await.unwrap();

        let names: Vec<String> = list(&db).await.unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]);
    }

    #[tokio::test]
    async fn test_search_matches_substring_any_case() {
        let db = migrated_db().await;
        create(&db, artist_input("Guns N Petals")).await.unwrap();
        create(&db, artist_input("Matt Quevedo")).await.unwrap();
        create(&db, artist_input("The Wild Sax Band")).await.unwrap();

        assert_eq!(search(&db, "A").await.unwrap().count, 3);
        let band = search(&db, "band").await.unwrap();
        assert_eq!(band.count, 1);
        assert_eq!(band.data[0].name, "The Wild Sax Band");
        assert_eq!(search(&db, "zzz").await.unwrap().count, 0);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let db = migrated_db().await;
        let created = create(&db, artist_input("Guns N Petals")).await.unwrap();

        let mut changed = artist_input("Guns N Roses");
        changed.seeking_venue = true;
        changed.seeking_description = Some("Looking for shows in the Bay Area".into());
        let updated = update(&db, created.id, changed).await.unwrap();

        assert_eq!(updated.name, "Guns N Roses");
        assert!(updated.seeking_venue);
        assert_eq!(
            find(&db, created.id).await.unwrap().seeking_description.as_deref(),
            Some("Looking for shows in the Bay Area")
        );
    }

    #[tokio::test]
    async fn test_detail_partitions_shows_with_venue_names() {
        let db = migrated_db().await;
        let artist = create(&db, artist_input("Guns N Petals")).await.unwrap();
        let venue = venues::create(&db, venue_input("The Musical Hop")).await.unwrap();
        let now = fixed_now();
        for start in [now - Duration::hours(1), now + Duration::hours(1), now + Duration::days(2)] {
            show_repo::create(
                &db,
                show_repo::ShowInput {
                    artist_id: artist.id,
                    venue_id: venue.id,
                    start_time: start,
                },
            )
            .await
            .unwrap();
        }

        let detail = detail(&db, artist.id, now).await.unwrap();
        assert_eq!(detail.shows.past_shows_count, 1);
        assert_eq!(detail.shows.upcoming_shows_count, 2);
        assert!(detail
            .shows
            .upcoming_shows
            .iter()
            .all(|s| s.venue_name == "The Musical Hop"));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_shows() {
        let db = migrated_db().await;
        let artist = create(&db, artist_input("Guns N Petals")).await.unwrap();
        let venue = venues::create(&db, venue_input("The Musical Hop")).await.unwrap();
        show_repo::create(
            &db,
            show_repo::ShowInput {
                artist_id: artist.id,
                venue_id: venue.id,
                start_time: fixed_now(),
            },
        )
        .await
        .unwrap();

        delete(&db, artist.id).await.unwrap();

        assert!(show::Entity::find().all(&db).await.unwrap().is_empty());
        assert!(venues::find(&db, venue.id).await.is_ok());
        assert!(delete(&db, artist.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_foreign_key_cascades_on_raw_artist_delete() {
        let db = migrated_db().await;
        let artist = create(&db, artist_input("Guns N Petals")).await.unwrap();
        let venue = venues::create(&db, venue_input("The Musical Hop")).await.unwrap();
        show_repo::create(
            &db,
            show_repo::ShowInput {
                artist_id: artist.id,
                venue_id: venue.id,
                start_time: fixed_now(),
            },
        )
        .await
        .unwrap();

        artist::Entity::delete_by_id(artist.id)
            .exec(&db)
            .await
            .unwrap();

        assert_eq!(show::Entity::find().count(&db).await.unwrap(), 0);
        assert!(venues::find(&db, venue.id).await.is_ok());
    }
}

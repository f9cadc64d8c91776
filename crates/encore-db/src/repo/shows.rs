use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, QueryOrder, Set,
    TransactionTrait,
};

use super::{show_listings, ShowListing, StoreError};
use crate::entities::show;

/// Validated show fields. Both ids must reference existing rows; the
/// foreign keys reject the insert otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowInput {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: NaiveDateTime,
}

pub async fn create(db: &DatabaseConnection, input: ShowInput) -> Result<show::Model, StoreError> {
    let txn = db.begin().await?;
    let created = show::ActiveModel {
        id: NotSet,
        start_time: Set(input.start_time),
        venue_id: Set(input.venue_id),
        artist_id: Set(input.artist_id),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(
        show_id = created.id,
        venue_id = created.venue_id,
        artist_id = created.artist_id,
        "show created"
    );
    Ok(created)
}

/// Every show, latest first.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<ShowListing>, StoreError> {
    Ok(show_listings()
        .order_by_desc(show::Column::StartTime)
        .into_model::<ShowListing>()
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::{artists, venues};
    use crate::test_support::{artist_input, migrated_db, venue_input};
    use chrono::NaiveDate;
    use sea_orm::{EntityTrait, PaginatorTrait};

    fn on(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(22, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_is_latest_first_with_names() {
        let db = migrated_db().await;
        let venue = venues::create(&db, venue_input("The Musical Hop")).await.unwrap();
        let artist = artists::create(&db, artist_input("Guns N Petals")).await.unwrap();
        for day in [3, 1, 2] {
            create(
                &db,
                ShowInput {
                    artist_id: artist.id,
                    venue_id: venue.id,
                    start_time: on(day),
                },
            )
            .await
            .unwrap();
        }

        let listed = list(&db).await.unwrap();
        let starts: Vec<NaiveDateTime> = listed.iter().map(|s| s.start_time).collect();
        assert_eq!(starts, vec![on(3), on(2), on(1)]);
        assert_eq!(listed[0].venue_name, "The Musical Hop");
        assert_eq!(listed[0].artist_name, "Guns N Petals");
        assert_eq!(
            listed[0].artist_image_link.as_deref(),
            Some("https://images.example.com/artist.jpg")
        );
    }

    #[tokio::test]
    async fn test_create_with_unknown_venue_fails_and_persists_nothing() {
        let db = migrated_db().await;
        let artist = artists::create(&db, artist_input("Guns N Petals")).await.unwrap();

        let err = create(
            &db,
            ShowInput {
                artist_id: artist.id,
                venue_id: 999,
                start_time: on(1),
            },
        )
        .await
        .unwrap_err();

        assert!(!err.is_not_found());
        assert_eq!(show::Entity::find().count(&db).await.unwrap(), 0);
    }
}

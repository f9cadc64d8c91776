use chrono::NaiveDateTime;
use encore_db::repo::shows::ShowInput;

use super::validators::parse_flexible_datetime;
use super::{datetime, integer, require, required, validate, FieldSpec, FormData, FormErrors};

pub const ARTIST_ID: FieldSpec = FieldSpec::new("artist_id", "Artist ID", &[required, integer]);
pub const VENUE_ID: FieldSpec = FieldSpec::new("venue_id", "Venue ID", &[required, integer]);
pub const START_TIME: FieldSpec =
    FieldSpec::new("start_time", "Start Time", &[required, datetime]);

pub const SHOW_FIELDS: &[FieldSpec] = &[ARTIST_ID, VENUE_ID, START_TIME];

pub fn parse(form: &FormData) -> Result<ShowInput, FormErrors> {
    validate(SHOW_FIELDS, form)?;

    Ok(ShowInput {
        artist_id: require(form.choice::<i32>(ARTIST_ID.name), &ARTIST_ID)?,
        venue_id: require(form.choice::<i32>(VENUE_ID.name), &VENUE_ID)?,
        start_time: require(
            parse_flexible_datetime(form.values(START_TIME.name)),
            &START_TIME,
        )?,
    })
}

/// Blank create form with the start time filled in.
pub fn initial(now: NaiveDateTime) -> FormData {
    let mut form = FormData::default();
    form.set(START_TIME.name, now.format("%Y-%m-%d %H:%M:%S").to_string());
    form
}

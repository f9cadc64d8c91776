use encore_db::entities::{venue, Genre, Genres, UsState};
use encore_db::repo::venues::VenueInput;

use super::{
    require, required, validate, FieldSpec, FormData, FormErrors, CITY, FACEBOOK_LINK, GENRES,
    IMAGE_LINK, NAME, PHONE, SEEKING_DESCRIPTION, STATE, WEBSITE_LINK,
};

pub const ADDRESS: FieldSpec = FieldSpec::new("address", "Address", &[required]);
pub const SEEKING_TALENT: FieldSpec = FieldSpec::new("seeking_talent", "Seeking Talent", &[]);

pub const VENUE_FIELDS: &[FieldSpec] = &[
    NAME,
    CITY,
    STATE,
    ADDRESS,
    PHONE,
    IMAGE_LINK,
    GENRES,
    FACEBOOK_LINK,
    WEBSITE_LINK,
    SEEKING_TALENT,
    SEEKING_DESCRIPTION,
];

/// Validate a submitted venue form and convert it into a persistence input.
pub fn parse(form: &FormData) -> Result<VenueInput, FormErrors> {
    validate(VENUE_FIELDS, form)?;

    Ok(VenueInput {
        name: require(form.text(NAME.name), &NAME)?,
        city: require(form.text(CITY.name), &CITY)?,
        state: require(form.choice::<UsState>(STATE.name), &STATE)?,
        address: require(form.text(ADDRESS.name), &ADDRESS)?,
        phone: form.text(PHONE.name),
        image_link: form.text(IMAGE_LINK.name),
        genres: Genres(form.choices::<Genre>(GENRES.name)),
        facebook_link: form.text(FACEBOOK_LINK.name),
        website: form.text(WEBSITE_LINK.name),
        seeking_talent: form.flag(SEEKING_TALENT.name),
        seeking_description: form.text(SEEKING_DESCRIPTION.name),
    })
}

/// Form values for editing a stored venue.
pub fn values_of(venue: &venue::Model) -> FormData {
    let mut form = FormData::default();
    form.set(NAME.name, venue.name.as_str());
    form.set(CITY.name, venue.city.as_str());
    form.set(STATE.name, venue.state.code());
    form.set(ADDRESS.name, venue.address.as_str());
    form.set(PHONE.name, venue.phone.clone().unwrap_or_default());
    form.set(IMAGE_LINK.name, venue.image_link.clone().unwrap_or_default());
    form.set_many(GENRES.name, venue.genres.names());
    form.set(FACEBOOK_LINK.name, venue.facebook_link.clone().unwrap_or_default());
    form.set(WEBSITE_LINK.name, venue.website.clone().unwrap_or_default());
    if venue.seeking_talent {
        form.set(SEEKING_TALENT.name, "y");
    }
    form.set(
        SEEKING_DESCRIPTION.name,
        venue.seeking_description.clone().unwrap_or_default(),
    );
    form
}

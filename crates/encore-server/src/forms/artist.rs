use encore_db::entities::{artist, Genre, Genres, UsState};
use encore_db::repo::artists::ArtistInput;

use super::{
    require, validate, FieldSpec, FormData, FormErrors, CITY, FACEBOOK_LINK, GENRES, IMAGE_LINK,
    NAME, PHONE, SEEKING_DESCRIPTION, STATE, WEBSITE_LINK,
};

pub const SEEKING_VENUE: FieldSpec = FieldSpec::new("seeking_venue", "Seeking Venue", &[]);

pub const ARTIST_FIELDS: &[FieldSpec] = &[
    NAME,
    CITY,
    STATE,
    PHONE,
    IMAGE_LINK,
    GENRES,
    FACEBOOK_LINK,
    WEBSITE_LINK,
    SEEKING_VENUE,
    SEEKING_DESCRIPTION,
];

pub fn parse(form: &FormData) -> Result<ArtistInput, FormErrors> {
    validate(ARTIST_FIELDS, form)?;

    Ok(ArtistInput {
        name: require(form.text(NAME.name), &NAME)?,
        city: require(form.text(CITY.name), &CITY)?,
        state: require(form.choice::<UsState>(STATE.name), &STATE)?,
        phone: form.text(PHONE.name),
        genres: Genres(form.choices::<Genre>(GENRES.name)),
        image_link: form.text(IMAGE_LINK.name),
        facebook_link: form.text(FACEBOOK_LINK.name),
        website_link: form.text(WEBSITE_LINK.name),
        seeking_venue: form.flag(SEEKING_VENUE.name),
        seeking_description: form.text(SEEKING_DESCRIPTION.name),
    })
}

pub fn values_of(artist: &artist::Model) -> FormData {
    let mut form = FormData::default();
    form.set(NAME.name, artist.name.as_str());
    form.set(CITY.name, artist.city.as_str());
    form.set(STATE.name, artist.state.code());
    form.set(PHONE.name, artist.phone.clone().unwrap_or_default());
    form.set(IMAGE_LINK.name, artist.image_link.clone().unwrap_or_default());
    form.set_many(GENRES.name, artist.genres.names());
    form.set(FACEBOOK_LINK.name, artist.facebook_link.clone().unwrap_or_default());
    form.set(WEBSITE_LINK.name, artist.website_link.clone().unwrap_or_default());
    if artist.seeking_venue {
        form.set(SEEKING_VENUE.name, "y");
    }
    form.set(
        SEEKING_DESCRIPTION.name,
        artist.seeking_description.clone().unwrap_or_default(),
    );
    form
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        FormData::from_pairs(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    #[test]
    fn test_valid_form_converts() {
        let input = parse(&form(&[
            ("name", "Guns N Petals"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("phone", "326-123-5000"),
            ("genres", "Rock n Roll"),
            ("website_link", "https://www.gunsnpetalsband.com"),
            ("seeking_venue", "y"),
        ]))
        .unwrap();

        assert_eq!(input.genres, Genres(vec![Genre::RockNRoll]));
        assert_eq!(input.phone.as_deref(), Some("326-123-5000"));
        assert!(input.seeking_venue);
        assert_eq!(input.seeking_description, None);
    }

    #[test]
    fn test_missing_required_fields_each_reported() {
        let errors = parse(&form(&[("phone", "326-123-5000")])).unwrap_err();
        let labels: Vec<&str> = errors.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Name", "City", "State", "Genres"]);
    }

    #[test]
    fn test_state_must_be_a_known_code() {
        let errors = parse(&form(&[
            ("name", "Matt Quevedo"),
            ("city", "New York"),
            ("state", "New York"),
            ("genres", "Jazz"),
        ]))
        .unwrap_err();
        assert_eq!(errors.0.len(), 1);
        assert_eq!(
            errors.0[0].message,
            "'New York' is not a valid choice for this field."
        );
    }
}

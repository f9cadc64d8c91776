//! Closed value sets checked at the form boundary.

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveEnum, FromJsonQueryResult, Iterable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// US state and territory codes accepted for venue and artist locations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")]
#[allow(clippy::upper_case_acronyms)]
pub enum UsState {
    #[sea_orm(string_value = "AL")]
    AL,
    #[sea_orm(string_value = "AK")]
    AK,
    #[sea_orm(string_value = "AZ")]
    AZ,
    #[sea_orm(string_value = "AR")]
    AR,
    #[sea_orm(string_value = "CA")]
    CA,
    #[sea_orm(string_value = "CO")]
    CO,
    #[sea_orm(string_value = "CT")]
    CT,
    #[sea_orm(string_value = "DE")]
    DE,
    #[sea_orm(string_value = "DC")]
    DC,
    #[sea_orm(string_value = "FL")]
    FL,
    #[sea_orm(string_value = "GA")]
    GA,
    #[sea_orm(string_value = "HI")]
    HI,
    #[sea_orm(string_value = "ID")]
    ID,
    #[sea_orm(string_value = "IL")]
    IL,
    #[sea_orm(string_value = "IN")]
    IN,
    #[sea_orm(string_value = "IA")]
    IA,
    #[sea_orm(string_value = "KS")]
    KS,
    #[sea_orm(string_value = "KY")]
    KY,
    #[sea_orm(string_value = "LA")]
    LA,
    #[sea_orm(string_value = "ME")]
    ME,
    #[sea_orm(string_value = "MT")]
    MT,
    #[sea_orm(string_value = "NE")]
    NE,
    #[sea_orm(string_value = "NV")]
    NV,
    #[sea_orm(string_value = "NH")]
    NH,
    #[sea_orm(string_value = "NJ")]
    NJ,
    #[sea_orm(string_value = "NM")]
    NM,
    #[sea_orm(string_value = "NY")]
    NY,
    #[sea_orm(string_value = "NC")]
    NC,
    #[sea_orm(string_value = "ND")]
    ND,
    #[sea_orm(string_value = "OH")]
    OH,
    #[sea_orm(string_value = "OK")]
    OK,
    #[sea_orm(string_value = "OR")]
    OR,
    #[sea_orm(string_value = "MD")]
    MD,
    #[sea_orm(string_value = "MA")]
    MA,
    #[sea_orm(string_value = "MI")]
    MI,
    #[sea_orm(string_value = "MN")]
    MN,
    #[sea_orm(string_value = "MS")]
    MS,
    #[sea_orm(string_value = "MO")]
    MO,
    #[sea_orm(string_value = "PA")]
    PA,
    #[sea_orm(string_value = "RI")]
    RI,
    #[sea_orm(string_value = "SC")]
    SC,
    #[sea_orm(string_value = "SD")]
    SD,
    #[sea_orm(string_value = "TN")]
    TN,
    #[sea_orm(string_value = "TX")]
    TX,
    #[sea_orm(string_value = "UT")]
    UT,
    #[sea_orm(string_value = "VT")]
    VT,
    #[sea_orm(string_value = "VA")]
    VA,
    #[sea_orm(string_value = "WA")]
    WA,
    #[sea_orm(string_value = "WV")]
    WV,
    #[sea_orm(string_value = "WI")]
    WI,
    #[sea_orm(string_value = "WY")]
    WY,
}

impl UsState {
    /// Every code, in form display order.
    pub fn all() -> Vec<UsState> {
        UsState::iter().collect()
    }

    pub fn code(&self) -> String {
        self.to_value()
    }
}

impl fmt::Display for UsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_value())
    }
}

impl FromStr for UsState {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UsState::iter()
            .find(|state| state.to_value() == s)
            .ok_or_else(|| UnknownValue(s.to_string()))
    }
}

/// Music genres a venue hosts or an artist plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Alternative,
    Blues,
    Classical,
    Country,
    Electronic,
    Folk,
    Funk,
    #[serde(rename = "Hip-Hop")]
    HipHop,
    #[serde(rename = "Heavy Metal")]
    HeavyMetal,
    Instrumental,
    Jazz,
    #[serde(rename = "Musical Theatre")]
    MusicalTheatre,
    Pop,
    Punk,
    #[serde(rename = "R&B")]
    RnB,
    Reggae,
    #[serde(rename = "Rock n Roll")]
    RockNRoll,
    Soul,
    Other,
}

impl Genre {
    pub const ALL: [Genre; 19] = [
        Genre::Alternative,
        Genre::Blues,
        Genre::Classical,
        Genre::Country,
        Genre::Electronic,
        Genre::Folk,
        Genre::Funk,
        Genre::HipHop,
        Genre::HeavyMetal,
        Genre::Instrumental,
        Genre::Jazz,
        Genre::MusicalTheatre,
        Genre::Pop,
        Genre::Punk,
        Genre::RnB,
        Genre::Reggae,
        Genre::RockNRoll,
        Genre::Soul,
        Genre::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Alternative => "Alternative",
            Genre::Blues => "Blues",
            Genre::Classical => "Classical",
            Genre::Country => "Country",
            Genre::Electronic => "Electronic",
            Genre::Folk => "Folk",
            Genre::Funk => "Funk",
            Genre::HipHop => "Hip-Hop",
            Genre::HeavyMetal => "Heavy Metal",
            Genre::Instrumental => "Instrumental",
            Genre::Jazz => "Jazz",
            Genre::MusicalTheatre => "Musical Theatre",
            Genre::Pop => "Pop",
            Genre::Punk => "Punk",
            Genre::RnB => "R&B",
            Genre::Reggae => "Reggae",
            Genre::RockNRoll => "Rock n Roll",
            Genre::Soul => "Soul",
            Genre::Other => "Other",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .iter()
            .copied()
            .find(|genre| genre.as_str() == s)
            .ok_or_else(|| UnknownValue(s.to_string()))
    }
}

/// Genre list stored as a JSON array column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Genres(pub Vec<Genre>);

impl Genres {
    pub fn iter(&self) -> impl Iterator<Item = &Genre> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(Genre::as_str).collect()
    }
}

impl From<Vec<Genre>> for Genres {
    fn from(genres: Vec<Genre>) -> Self {
        Self(genres)
    }
}

/// A string outside a closed value set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownValue(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_set_has_51_codes() {
        assert_eq!(UsState::all().len(), 51);
        assert!(UsState::all().contains(&UsState::DC));
    }

    #[test]
    fn test_state_from_str() {
        assert_eq!("NY".parse::<UsState>().unwrap(), UsState::NY);
        assert_eq!(UsState::CA.to_string(), "CA");
        assert!("ny".parse::<UsState>().is_err());
        assert!("XX".parse::<UsState>().is_err());
    }

    #[test]
    fn test_genre_round_trips_display_names() {
        for genre in Genre::ALL {
            assert_eq!(genre.as_str().parse::<Genre>().unwrap(), genre);
        }
        assert!("Polka".parse::<Genre>().is_err());
    }

    #[test]
    fn test_genres_serialize_with_display_names() {
        let genres = Genres(vec![Genre::RnB, Genre::RockNRoll, Genre::Jazz]);
        let json = serde_json::to_value(&genres).unwrap();
        assert_eq!(json, serde_json::json!(["R&B", "Rock n Roll", "Jazz"]));
        assert_eq!(genres.names(), vec!["R&B", "Rock n Roll", "Jazz"]);
    }

    #[test]
    fn test_unknown_value_display() {
        let err = "Polka".parse::<Genre>().unwrap_err();
        assert_eq!(err.to_string(), "unknown value: Polka");
    }
}

//! Request payloads and their validation
//!
//! Forms arrive either as JSON or as `application/x-www-form-urlencoded`
//! bodies, so every field is optional at the serde level and presence is
//! checked here. Validation turns a form into a typed insert payload or a
//! change set before any storage access happens.
//!
//! Accepted input spellings:
//! - booleans: JSON `true`/`false`, numbers (0 = false), and the strings
//!   `y/yes/true/t/on/1` and `n/no/false/f/off/0` (case-insensitive, empty = false)
//! - genres: a JSON array of strings, a comma-separated string, or a
//!   repeated urlencoded key (`genres=Jazz&genres=Reggae`)
//! - ids: a JSON number or a numeric string
//! - start time: RFC 3339, or `YYYY-MM-DD HH:MM[:SS]` / `YYYY-MM-DDTHH:MM[:SS]` read as UTC
//!
//! On edit, an absent text field is left untouched while a blank one, an
//! explicit JSON `null` included, clears an optional field and is rejected
//! for a required one.

use crate::db::models::{
    ArtistChanges, NewArtist, NewShow, NewVenue, ShowChanges, VenueChanges,
};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Venue create/edit form
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VenueForm {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub image_link: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub facebook_link: Option<String>,
    #[serde(default, alias = "website", deserialize_with = "deserialize_text")]
    pub website_link: Option<String>,
    #[serde(default, deserialize_with = "deserialize_genres")]
    pub genres: Option<Vec<String>>,
    #[serde(default, alias = "talent_looking", deserialize_with = "deserialize_boolish")]
    pub seeking_talent: Option<bool>,
    #[serde(default, alias = "seeking_desc", deserialize_with = "deserialize_text")]
    pub seeking_description: Option<String>,
}

impl VenueForm {
    /// Validate for creation: all required fields must be present
    pub fn into_new_venue(self) -> Result<NewVenue> {
        let mut missing = MissingFields::default();
        let name = missing.require("name", self.name);
        let city = missing.require("city", self.city);
        let state = missing.require("state", self.state);
        let address = missing.require("address", self.address);
        missing.check()?;

        Ok(NewVenue {
            name: name.unwrap_or_default(),
            city: city.unwrap_or_default(),
            state: state.unwrap_or_default(),
            address: address.unwrap_or_default(),
            phone: optional_text(self.phone),
            image_link: optional_text(self.image_link),
            facebook_link: optional_text(self.facebook_link),
            website_link: optional_text(self.website_link),
            genres: self.genres.unwrap_or_default(),
            seeking_talent: self.seeking_talent.unwrap_or(true),
            seeking_description: optional_text(self.seeking_description),
        })
    }

    /// Validate for update: provided required fields must not be blank
    pub fn into_changes(self) -> Result<VenueChanges> {
        let mut blank = MissingFields::default();
        let changes = VenueChanges {
            name: blank.non_blank("name", self.name),
            city: blank.non_blank("city", self.city),
            state: blank.non_blank("state", self.state),
            address: blank.non_blank("address", self.address),
            phone: self.phone.map(|v| optional_text(Some(v))),
            image_link: self.image_link.map(|v| optional_text(Some(v))),
            facebook_link: self.facebook_link.map(|v| optional_text(Some(v))),
            website_link: self.website_link.map(|v| optional_text(Some(v))),
            genres: self.genres,
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description.map(|v| optional_text(Some(v))),
        };
        blank.check()?;
        Ok(changes)
    }
}

/// Artist create/edit form
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArtistForm {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub image_link: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub facebook_link: Option<String>,
    #[serde(default, alias = "website", deserialize_with = "deserialize_text")]
    pub website_link: Option<String>,
    #[serde(default, deserialize_with = "deserialize_genres")]
    pub genres: Option<Vec<String>>,
    #[serde(default, alias = "venue_looking", deserialize_with = "deserialize_boolish")]
    pub seeking_venue: Option<bool>,
    #[serde(default, alias = "seeking_desc", deserialize_with = "deserialize_text")]
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn into_new_artist(self) -> Result<NewArtist> {
        let mut missing = MissingFields::default();
        let name = missing.require("name", self.name);
        let city = missing.require("city", self.city);
        let state = missing.require("state", self.state);
        missing.check()?;

        Ok(NewArtist {
            name: name.unwrap_or_default(),
            city: city.unwrap_or_default(),
            state: state.unwrap_or_default(),
            phone: optional_text(self.phone),
            image_link: optional_text(self.image_link),
            facebook_link: optional_text(self.facebook_link),
            website_link: optional_text(self.website_link),
            genres: self.genres.unwrap_or_default(),
            seeking_venue: self.seeking_venue.unwrap_or(false),
            seeking_description: optional_text(self.seeking_description),
        })
    }

    pub fn into_changes(self) -> Result<ArtistChanges> {
        let mut blank = MissingFields::default();
        let changes = ArtistChanges {
            name: blank.non_blank("name", self.name),
            city: blank.non_blank("city", self.city),
            state: blank.non_blank("state", self.state),
            phone: self.phone.map(|v| optional_text(Some(v))),
            image_link: self.image_link.map(|v| optional_text(Some(v))),
            facebook_link: self.facebook_link.map(|v| optional_text(Some(v))),
            website_link: self.website_link.map(|v| optional_text(Some(v))),
            genres: self.genres,
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.map(|v| optional_text(Some(v))),
        };
        blank.check()?;
        Ok(changes)
    }
}

/// Show create/edit form
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ShowForm {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub venue_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub artist_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub start_time: Option<String>,
}

impl ShowForm {
    /// Validate for creation; a missing start time means "now"
    pub fn into_new_show(self, now: DateTime<Utc>) -> Result<NewShow> {
        let mut missing = MissingFields::default();
        if self.venue_id.is_none() {
            missing.fields.push("venue_id");
        }
        if self.artist_id.is_none() {
            missing.fields.push("artist_id");
        }
        missing.check()?;

        let start_time = match optional_text(self.start_time) {
            Some(text) => parse_start_time(&text)?,
            None => now,
        };

        Ok(NewShow {
            venue_id: self.venue_id.unwrap_or_default(),
            artist_id: self.artist_id.unwrap_or_default(),
            start_time,
        })
    }

    pub fn into_changes(self) -> Result<ShowChanges> {
        let start_time = match optional_text(self.start_time) {
            Some(text) => Some(parse_start_time(&text)?),
            None => None,
        };

        Ok(ShowChanges {
            venue_id: self.venue_id,
            artist_id: self.artist_id,
            start_time,
        })
    }
}

/// Search form; an absent term searches for everything
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Collects the names of absent or blank required fields
#[derive(Debug, Default)]
struct MissingFields {
    fields: Vec<&'static str>,
}

impl MissingFields {
    fn require(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        let value = optional_text(value);
        if value.is_none() {
            self.fields.push(field);
        }
        value
    }

    fn non_blank(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        let provided = value.is_some();
        let value = optional_text(value);
        if provided && value.is_none() {
            self.fields.push(field);
        }
        value
    }

    fn check(self) -> Result<()> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(format!(
                "missing required field(s): {}",
                self.fields.join(", ")
            )))
        }
    }
}

/// Trim; blank text becomes `None`
fn optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse a show start time (see module docs for accepted formats)
pub fn parse_start_time(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| Error::validation(format!("invalid start_time '{}'", text)))
}

/// Interpret a boolean-ish string; `None` when it is not recognizable
pub fn parse_boolish(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "t" | "on" | "1" => Some(true),
        "" | "n" | "no" | "false" | "f" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn split_genres(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

/// Text field that was sent
///
/// A present field is always `Some`: an explicit `null` (or an empty
/// urlencoded value) becomes `Some("")`, which updates treat as "clear".
/// Only an absent field stays `None` through `#[serde(default)]`.
fn deserialize_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(Some(value.unwrap_or_default()))
}

fn deserialize_boolish<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    struct BoolishVisitor;

    impl<'de> Visitor<'de> for BoolishVisitor {
        type Value = Option<bool>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean, a number or a yes/no string")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v != 0))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v != 0))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
            parse_boolish(v)
                .map(Some)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> std::result::Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(BoolishVisitor)
}

fn deserialize_genres<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct GenresVisitor;

    impl<'de> Visitor<'de> for GenresVisitor {
        type Value = Option<Vec<String>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a list of genres or a comma-separated string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
            Ok(Some(split_genres(v)))
        }

        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut genres = Vec::new();
            while let Some(genre) = seq.next_element::<String>()? {
                let genre = genre.trim();
                if !genre.is_empty() {
                    genres.push(genre.to_string());
                }
            }
            Ok(Some(genres))
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> std::result::Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(GenresVisitor)
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer id")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
            i64::try_from(v)
                .map(Some)
                .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(None);
            }
            v.parse::<i64>()
                .map(Some)
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> std::result::Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

//! Record types held by the store
//!
//! Each entity has three shapes: the stored record (with its id), the
//! validated insert payload (`New*`) and a partial change set (`*Changes`)
//! where `None` means "leave untouched".

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Venue record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Validated venue ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl NewVenue {
    pub fn into_venue(self, id: i64) -> Venue {
        Venue {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website_link: self.website_link,
            genres: self.genres,
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description,
        }
    }
}

/// Partial venue update
///
/// Outer `None` leaves the attribute as stored; `Some(None)` clears an
/// optional attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueChanges {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<Option<String>>,
    pub image_link: Option<Option<String>>,
    pub facebook_link: Option<Option<String>>,
    pub website_link: Option<Option<String>>,
    pub genres: Option<Vec<String>>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<Option<String>>,
}

impl VenueChanges {
    pub fn apply(&self, venue: &mut Venue) {
        overwrite(&mut venue.name, &self.name);
        overwrite(&mut venue.city, &self.city);
        overwrite(&mut venue.state, &self.state);
        overwrite(&mut venue.address, &self.address);
        overwrite(&mut venue.phone, &self.phone);
        overwrite(&mut venue.image_link, &self.image_link);
        overwrite(&mut venue.facebook_link, &self.facebook_link);
        overwrite(&mut venue.website_link, &self.website_link);
        overwrite(&mut venue.genres, &self.genres);
        overwrite(&mut venue.seeking_talent, &self.seeking_talent);
        overwrite(&mut venue.seeking_description, &self.seeking_description);
    }
}

/// Artist record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Validated artist ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl NewArtist {
    pub fn into_artist(self, id: i64) -> Artist {
        Artist {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website_link: self.website_link,
            genres: self.genres,
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description,
        }
    }
}

/// Partial artist update, same conventions as [`VenueChanges`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistChanges {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<Option<String>>,
    pub image_link: Option<Option<String>>,
    pub facebook_link: Option<Option<String>>,
    pub website_link: Option<Option<String>>,
    pub genres: Option<Vec<String>>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<Option<String>>,
}

impl ArtistChanges {
    pub fn apply(&self, artist: &mut Artist) {
        overwrite(&mut artist.name, &self.name);
        overwrite(&mut artist.city, &self.city);
        overwrite(&mut artist.state, &self.state);
        overwrite(&mut artist.phone, &self.phone);
        overwrite(&mut artist.image_link, &self.image_link);
        overwrite(&mut artist.facebook_link, &self.facebook_link);
        overwrite(&mut artist.website_link, &self.website_link);
        overwrite(&mut artist.genres, &self.genres);
        overwrite(&mut artist.seeking_venue, &self.seeking_venue);
        overwrite(&mut artist.seeking_description, &self.seeking_description);
    }
}

/// Show record (join between one venue and one artist)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Show {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

/// Validated show ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

impl NewShow {
    pub fn into_show(self, id: i64) -> Show {
        Show {
            id,
            venue_id: self.venue_id,
            artist_id: self.artist_id,
            start_time: self.start_time,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowChanges {
    pub venue_id: Option<i64>,
    pub artist_id: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
}

impl ShowChanges {
    pub fn apply(&self, show: &mut Show) {
        overwrite(&mut show.venue_id, &self.venue_id);
        overwrite(&mut show.artist_id, &self.artist_id);
        overwrite(&mut show.start_time, &self.start_time);
    }
}

/// Show joined with the names and images of both sides
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowDetail {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

fn overwrite<T: Clone>(slot: &mut T, change: &Option<T>) {
    if let Some(value) = change {
        *slot = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hop() -> Venue {
        NewVenue {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom St".to_string(),
            phone: Some("123-123-1234".to_string()),
            image_link: None,
            facebook_link: None,
            website_link: None,
            genres: vec!["Jazz".to_string()],
            seeking_talent: true,
            seeking_description: Some("We are on the lookout".to_string()),
        }
        .into_venue(1)
    }

    #[test]
    fn test_changes_leave_unspecified_fields() {
        let mut venue = hop();
        let changes = VenueChanges {
            city: Some("Oakland".to_string()),
            seeking_description: Some(None),
            ..Default::default()
        };
        changes.apply(&mut venue);

        assert_eq!(venue.city, "Oakland");
        assert_eq!(venue.seeking_description, None);
        assert_eq!(venue.name, "The Musical Hop");
        assert_eq!(venue.phone.as_deref(), Some("123-123-1234"));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let changes = VenueChanges {
            genres: Some(vec!["Reggae".to_string()]),
            seeking_talent: Some(false),
            ..Default::default()
        };
        let mut once = hop();
        changes.apply(&mut once);
        let mut twice = once.clone();
        changes.apply(&mut twice);
        assert_eq!(once, twice);
    }
}

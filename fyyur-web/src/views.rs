//! Presentation adapter
//!
//! Maps stored records onto the flat documents returned by the handlers.
//! Venues and artists expose their website as `website`. Pure functions
//! only: no queries, no state.

use chrono::{DateTime, SecondsFormat, Utc};
use fyyur_common::catalog::{AreaGroup, ArtistDetail, DeleteSummary, SearchResults, VenueDetail};
use fyyur_common::db::{Artist, Show, ShowDetail, Venue};
use fyyur_common::forms::{ArtistForm, ShowForm, VenueForm};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueView {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistView {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

/// Row of the show listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowView {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// A show as seen from its venue's page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueShowView {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// A show as seen from its artist's page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistShowView {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetailView {
    #[serde(flatten)]
    pub venue: VenueView,
    pub past_shows: Vec<VenueShowView>,
    pub upcoming_shows: Vec<VenueShowView>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetailView {
    #[serde(flatten)]
    pub artist: ArtistView,
    pub past_shows: Vec<ArtistShowView>,
    pub upcoming_shows: Vec<ArtistShowView>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Newly created or stored show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowRecordView {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueListView {
    pub areas: Vec<AreaGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistListView {
    pub artists: Vec<ArtistView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListView {
    pub shows: Vec<ShowView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchView {
    pub search_term: String,
    pub results: SearchResults,
}

/// Form document: current field values plus the record being edited
#[derive(Debug, Clone, Serialize)]
pub struct FormView<F, R> {
    pub form: F,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<R>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteView {
    pub id: i64,
    pub shows_removed: u64,
    pub redirect: String,
}

/// Timestamps are rendered as RFC 3339 UTC with milliseconds
pub fn format_start_time(start_time: &DateTime<Utc>) -> String {
    start_time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn venue_view(venue: &Venue) -> VenueView {
    VenueView {
        id: venue.id,
        name: venue.name.clone(),
        genres: venue.genres.clone(),
        address: venue.address.clone(),
        city: venue.city.clone(),
        state: venue.state.clone(),
        phone: venue.phone.clone(),
        website: venue.website_link.clone(),
        facebook_link: venue.facebook_link.clone(),
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description.clone(),
        image_link: venue.image_link.clone(),
    }
}

pub fn artist_view(artist: &Artist) -> ArtistView {
    ArtistView {
        id: artist.id,
        name: artist.name.clone(),
        genres: artist.genres.clone(),
        city: artist.city.clone(),
        state: artist.state.clone(),
        phone: artist.phone.clone(),
        website: artist.website_link.clone(),
        facebook_link: artist.facebook_link.clone(),
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description.clone(),
        image_link: artist.image_link.clone(),
    }
}

pub fn show_view(show: &ShowDetail) -> ShowView {
    ShowView {
        id: show.id,
        venue_id: show.venue_id,
        venue_name: show.venue_name.clone(),
        artist_id: show.artist_id,
        artist_name: show.artist_name.clone(),
        artist_image_link: show.artist_image_link.clone(),
        start_time: format_start_time(&show.start_time),
    }
}

pub fn show_record_view(show: &Show) -> ShowRecordView {
    ShowRecordView {
        id: show.id,
        venue_id: show.venue_id,
        artist_id: show.artist_id,
        start_time: format_start_time(&show.start_time),
    }
}

fn venue_show_view(show: &ShowDetail) -> VenueShowView {
    VenueShowView {
        artist_id: show.artist_id,
        artist_name: show.artist_name.clone(),
        artist_image_link: show.artist_image_link.clone(),
        start_time: format_start_time(&show.start_time),
    }
}

fn artist_show_view(show: &ShowDetail) -> ArtistShowView {
    ArtistShowView {
        venue_id: show.venue_id,
        venue_name: show.venue_name.clone(),
        venue_image_link: show.venue_image_link.clone(),
        start_time: format_start_time(&show.start_time),
    }
}

pub fn venue_detail_view(detail: &VenueDetail) -> VenueDetailView {
    VenueDetailView {
        venue: venue_view(&detail.venue),
        past_shows: detail.past_shows.iter().map(venue_show_view).collect(),
        upcoming_shows: detail.upcoming_shows.iter().map(venue_show_view).collect(),
        past_shows_count: detail.past_shows.len(),
        upcoming_shows_count: detail.upcoming_shows.len(),
    }
}

pub fn artist_detail_view(detail: &ArtistDetail) -> ArtistDetailView {
    ArtistDetailView {
        artist: artist_view(&detail.artist),
        past_shows: detail.past_shows.iter().map(artist_show_view).collect(),
        upcoming_shows: detail.upcoming_shows.iter().map(artist_show_view).collect(),
        past_shows_count: detail.past_shows.len(),
        upcoming_shows_count: detail.upcoming_shows.len(),
    }
}

/// Edit form pre-populated from a stored venue
pub fn venue_form(venue: &Venue) -> VenueForm {
    VenueForm {
        name: Some(venue.name.clone()),
        city: Some(venue.city.clone()),
        state: Some(venue.state.clone()),
        address: Some(venue.address.clone()),
        phone: venue.phone.clone(),
        image_link: venue.image_link.clone(),
        facebook_link: venue.facebook_link.clone(),
        website_link: venue.website_link.clone(),
        genres: Some(venue.genres.clone()),
        seeking_talent: Some(venue.seeking_talent),
        seeking_description: venue.seeking_description.clone(),
    }
}

pub fn artist_form(artist: &Artist) -> ArtistForm {
    ArtistForm {
        name: Some(artist.name.clone()),
        city: Some(artist.city.clone()),
        state: Some(artist.state.clone()),
        phone: artist.phone.clone(),
        image_link: artist.image_link.clone(),
        facebook_link: artist.facebook_link.clone(),
        website_link: artist.website_link.clone(),
        genres: Some(artist.genres.clone()),
        seeking_venue: Some(artist.seeking_venue),
        seeking_description: artist.seeking_description.clone(),
    }
}

/// Blank creation forms carry the same defaults creation applies
pub fn blank_venue_form() -> VenueForm {
    VenueForm {
        genres: Some(Vec::new()),
        seeking_talent: Some(true),
        ..Default::default()
    }
}

pub fn blank_artist_form() -> ArtistForm {
    ArtistForm {
        genres: Some(Vec::new()),
        seeking_venue: Some(false),
        ..Default::default()
    }
}

pub fn blank_show_form(now: &DateTime<Utc>) -> ShowForm {
    ShowForm {
        venue_id: None,
        artist_id: None,
        start_time: Some(now.format("%Y-%m-%d %H:%M:%S").to_string()),
    }
}

/// Edit form pre-populated from a stored show
pub fn show_form(show: &Show) -> ShowForm {
    ShowForm {
        venue_id: Some(show.venue_id),
        artist_id: Some(show.artist_id),
        start_time: Some(format_start_time(&show.start_time)),
    }
}

pub fn delete_view(summary: &DeleteSummary, redirect: &str) -> DeleteView {
    DeleteView {
        id: summary.id,
        shows_removed: summary.shows_removed,
        redirect: redirect.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn park_square() -> Venue {
        Venue {
            id: 3,
            name: "Park Square Live Music & Coffee".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "34 Whiskey Moore Ave".to_string(),
            phone: Some("415-000-1234".to_string()),
            image_link: None,
            facebook_link: Some("https://www.facebook.com/ParkSquareLiveMusicAndCoffee".to_string()),
            website_link: Some("https://www.parksquarelivemusicandcoffee.com".to_string()),
            genres: vec!["Rock n Roll".to_string(), "Jazz".to_string()],
            seeking_talent: false,
            seeking_description: None,
        }
    }

    fn sax_show(start_time: DateTime<Utc>) -> ShowDetail {
        ShowDetail {
            id: 9,
            venue_id: 3,
            venue_name: "Park Square Live Music & Coffee".to_string(),
            venue_image_link: None,
            artist_id: 6,
            artist_name: "The Wild Sax Band".to_string(),
            artist_image_link: Some("https://images.example.com/sax.jpg".to_string()),
            start_time,
        }
    }

    #[test]
    fn test_venue_view_renames_display_fields() {
        let view = venue_view(&park_square());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["website"], "https://www.parksquarelivemusicandcoffee.com");
        assert_eq!(json["seeking_talent"], false);
        assert_eq!(json["genres"][1], "Jazz");
        assert!(json.get("website_link").is_none());
    }

    #[test]
    fn test_detail_view_is_flat() {
        let start = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        let detail = VenueDetail {
            venue: park_square(),
            past_shows: Vec::new(),
            upcoming_shows: vec![sax_show(start)],
        };

        let json = serde_json::to_value(venue_detail_view(&detail)).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["upcoming_shows_count"], 1);
        assert_eq!(json["past_shows_count"], 0);
        assert_eq!(json["upcoming_shows"][0]["artist_name"], "The Wild Sax Band");
        assert_eq!(json["upcoming_shows"][0]["start_time"], "2035-04-01T20:00:00.000Z");
    }

    #[test]
    fn test_edit_form_round_trips_through_validation() {
        let venue = park_square();
        let reparsed = venue_form(&venue).into_changes().unwrap();

        let mut edited = venue.clone();
        reparsed.apply(&mut edited);
        assert_eq!(edited, venue);
    }
}

//! Catalog service
//!
//! Read and write operations over venues, artists and shows. The catalog owns
//! no state beyond the pool handle it is given; every mutation runs in its own
//! transaction.

mod listing;
mod mutation;

pub use listing::{group_by_area, AreaGroup, EntitySummary, SearchKind, SearchResults};
pub use mutation::DeleteSummary;

use crate::db::{self, Artist, ShowDetail, Venue};
use crate::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Entry point for all catalog operations
#[derive(Debug, Clone)]
pub struct Catalog {
    pool: SqlitePool,
}

/// A venue together with its shows split around "now"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueDetail {
    pub venue: Venue,
    pub past_shows: Vec<ShowDetail>,
    pub upcoming_shows: Vec<ShowDetail>,
}

/// An artist together with its shows split around "now"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub past_shows: Vec<ShowDetail>,
    pub upcoming_shows: Vec<ShowDetail>,
}

impl Catalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn venue(&self, id: i64) -> Result<Venue> {
        db::venues::get_by_id(&self.pool, id).await
    }

    pub async fn artist(&self, id: i64) -> Result<Artist> {
        db::artists::get_by_id(&self.pool, id).await
    }

    pub async fn show(&self, id: i64) -> Result<db::Show> {
        db::shows::get_by_id(&self.pool, id).await
    }

    pub async fn venue_detail(&self, id: i64) -> Result<VenueDetail> {
        let venue = self.venue(id).await?;
        let shows = db::shows::for_venue(&self.pool, id).await?;
        let (past_shows, upcoming_shows) = split_shows(shows, Utc::now());

        Ok(VenueDetail {
            venue,
            past_shows,
            upcoming_shows,
        })
    }

    pub async fn artist_detail(&self, id: i64) -> Result<ArtistDetail> {
        let artist = self.artist(id).await?;
        let shows = db::shows::for_artist(&self.pool, id).await?;
        let (past_shows, upcoming_shows) = split_shows(shows, Utc::now());

        Ok(ArtistDetail {
            artist,
            past_shows,
            upcoming_shows,
        })
    }
}

/// Split shows into (past, upcoming); a show starting exactly now is past
fn split_shows(shows: Vec<ShowDetail>, now: DateTime<Utc>) -> (Vec<ShowDetail>, Vec<ShowDetail>) {
    shows.into_iter().partition(|show| show.start_time <= now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn show_at(id: i64, start_time: DateTime<Utc>) -> ShowDetail {
        ShowDetail {
            id,
            venue_id: 1,
            venue_name: "The Musical Hop".to_string(),
            venue_image_link: None,
            artist_id: 4,
            artist_name: "Guns N Petals".to_string(),
            artist_image_link: None,
            start_time,
        }
    }

    #[test]
    fn test_split_shows_around_now() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let shows = vec![
            show_at(1, Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap()),
            show_at(2, now),
            show_at(3, Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap()),
        ];

        let (past, upcoming) = split_shows(shows, now);
        assert_eq!(past.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(upcoming.iter().map(|s| s.id).collect::<Vec<_>>(), vec![3]);
    }
}

//! Create, update and delete
//!
//! Forms are validated before a transaction is opened. Inside the
//! transaction any `?` return drops the `Transaction`, which rolls it back
//! and hands the connection back to the pool.

use super::Catalog;
use crate::db::{self, Artist, Show, Venue};
use crate::error::EntityKind;
use crate::forms::{ArtistForm, ShowForm, VenueForm};
use crate::{Error, Result};
use chrono::Utc;
use serde::Serialize;
use sqlx::SqliteConnection;
use tracing::info;

/// Outcome of a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteSummary {
    pub id: i64,
    /// Shows removed along with the record; always 0 when the record is a show
    pub shows_removed: u64,
}

impl Catalog {
    pub async fn create_venue(&self, form: VenueForm) -> Result<Venue> {
        let new_venue = form.into_new_venue()?;

        let mut tx = self.pool().begin().await?;
        let venue = db::venues::insert(&mut tx, new_venue).await?;
        tx.commit().await?;

        info!("Venue {} ({}) was successfully listed", venue.id, venue.name);
        Ok(venue)
    }

    pub async fn update_venue(&self, id: i64, form: VenueForm) -> Result<Venue> {
        let changes = form.into_changes()?;

        let mut tx = self.pool().begin().await?;
        let mut venue = db::venues::get_by_id(&mut *tx, id).await?;
        changes.apply(&mut venue);
        db::venues::update(&mut tx, &venue).await?;
        tx.commit().await?;

        info!("Venue {} updated", id);
        Ok(venue)
    }

    /// Delete a venue and, with it, every show booked there
    pub async fn delete_venue(&self, id: i64) -> Result<DeleteSummary> {
        let mut tx = self.pool().begin().await?;
        if !db::venues::exists(&mut *tx, id).await? {
            return Err(Error::not_found(EntityKind::Venue, id));
        }
        let shows_removed = db::shows::delete_for_venue(&mut tx, id).await?;
        db::venues::delete(&mut tx, id).await?;
        tx.commit().await?;

        info!("Venue {} deleted along with {} show(s)", id, shows_removed);
        Ok(DeleteSummary { id, shows_removed })
    }

    pub async fn create_artist(&self, form: ArtistForm) -> Result<Artist> {
        let new_artist = form.into_new_artist()?;

        let mut tx = self.pool().begin().await?;
        let artist = db::artists::insert(&mut tx, new_artist).await?;
        tx.commit().await?;

        info!("Artist {} ({}) was successfully listed", artist.id, artist.name);
        Ok(artist)
    }

    pub async fn update_artist(&self, id: i64, form: ArtistForm) -> Result<Artist> {
        let changes = form.into_changes()?;

        let mut tx = self.pool().begin().await?;
        let mut artist = db::artists::get_by_id(&mut *tx, id).await?;
        changes.apply(&mut artist);
        db::artists::update(&mut tx, &artist).await?;
        tx.commit().await?;

        info!("Artist {} updated", id);
        Ok(artist)
    }

    /// Delete an artist and, with it, every show the artist was booked for
    pub async fn delete_artist(&self, id: i64) -> Result<DeleteSummary> {
        let mut tx = self.pool().begin().await?;
        if !db::artists::exists(&mut *tx, id).await? {
            return Err(Error::not_found(EntityKind::Artist, id));
        }
        let shows_removed = db::shows::delete_for_artist(&mut tx, id).await?;
        db::artists::delete(&mut tx, id).await?;
        tx.commit().await?;

        info!("Artist {} deleted along with {} show(s)", id, shows_removed);
        Ok(DeleteSummary { id, shows_removed })
    }

    /// Book a show; both the venue and the artist must exist
    pub async fn create_show(&self, form: ShowForm) -> Result<Show> {
        let new_show = form.into_new_show(Utc::now())?;

        let mut tx = self.pool().begin().await?;
        check_references(&mut tx, new_show.venue_id, new_show.artist_id).await?;
        let show = db::shows::insert(&mut tx, new_show).await?;
        tx.commit().await?;

        info!(
            "Show {} listed: artist {} at venue {} on {}",
            show.id, show.artist_id, show.venue_id, show.start_time
        );
        Ok(show)
    }

    pub async fn update_show(&self, id: i64, form: ShowForm) -> Result<Show> {
        let changes = form.into_changes()?;

        let mut tx = self.pool().begin().await?;
        let mut show = db::shows::get_by_id(&mut *tx, id).await?;
        changes.apply(&mut show);
        check_references(&mut tx, show.venue_id, show.artist_id).await?;
        db::shows::update(&mut tx, &show).await?;
        tx.commit().await?;

        info!("Show {} updated", id);
        Ok(show)
    }

    pub async fn delete_show(&self, id: i64) -> Result<DeleteSummary> {
        let mut tx = self.pool().begin().await?;
        db::shows::delete(&mut tx, id).await?;
        tx.commit().await?;

        info!("Show {} deleted", id);
        Ok(DeleteSummary {
            id,
            shows_removed: 0,
        })
    }
}

/// A show must point at an existing venue and an existing artist
async fn check_references(conn: &mut SqliteConnection, venue_id: i64, artist_id: i64) -> Result<()> {
    if !db::venues::exists(&mut *conn, venue_id).await? {
        return Err(Error::validation(format!("venue {} does not exist", venue_id)));
    }
    if !db::artists::exists(&mut *conn, artist_id).await? {
        return Err(Error::validation(format!("artist {} does not exist", artist_id)));
    }
    Ok(())
}

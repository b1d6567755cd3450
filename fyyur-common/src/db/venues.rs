//! Venue persistence
//!
//! Reads accept any executor (pool or open transaction). Writes take a
//! connection so the caller decides the transaction boundary.

use crate::db::models::{NewVenue, Venue};
use crate::error::EntityKind;
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Executor, Row, Sqlite, SqliteConnection};

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, image_link, \
     facebook_link, website_link, genres, seeking_talent, seeking_description";

fn venue_from_row(row: &SqliteRow) -> Result<Venue> {
    let genres: Json<Vec<String>> = row.try_get("genres")?;

    Ok(Venue {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        address: row.try_get("address")?,
        phone: row.try_get("phone")?,
        image_link: row.try_get("image_link")?,
        facebook_link: row.try_get("facebook_link")?,
        website_link: row.try_get("website_link")?,
        genres: genres.0,
        seeking_talent: row.try_get("seeking_talent")?,
        seeking_description: row.try_get("seeking_description")?,
    })
}

/// All venues in id order
pub async fn get_all<'e, E>(executor: E) -> Result<Vec<Venue>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {} FROM venues ORDER BY id", VENUE_COLUMNS);
    let rows = sqlx::query(&sql).fetch_all(executor).await?;

    rows.iter().map(venue_from_row).collect()
}

/// Load venue by id, `Error::NotFound` if absent
pub async fn get_by_id<'e, E>(executor: E, id: i64) -> Result<Venue>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {} FROM venues WHERE id = ?", VENUE_COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(executor).await?;

    match row {
        Some(row) => venue_from_row(&row),
        None => Err(Error::not_found(EntityKind::Venue, id)),
    }
}

pub async fn exists<'e, E>(executor: E, id: i64) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)")
        .bind(id)
        .fetch_one(executor)
        .await?;

    Ok(found != 0)
}

/// Insert venue and return the stored record
pub async fn insert(conn: &mut SqliteConnection, venue: NewVenue) -> Result<Venue> {
    let result = sqlx::query(
        r#"
        INSERT INTO venues (
            name, city, state, address, phone, image_link, facebook_link,
            website_link, genres, seeking_talent, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website_link)
    .bind(Json(&venue.genres))
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .execute(&mut *conn)
    .await?;

    Ok(venue.into_venue(result.last_insert_rowid()))
}

/// Overwrite every attribute of an existing venue
pub async fn update(conn: &mut SqliteConnection, venue: &Venue) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE venues SET
            name = ?, city = ?, state = ?, address = ?, phone = ?,
            image_link = ?, facebook_link = ?, website_link = ?, genres = ?,
            seeking_talent = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website_link)
    .bind(Json(&venue.genres))
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .bind(venue.id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(EntityKind::Venue, venue.id));
    }

    Ok(())
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(EntityKind::Venue, id));
    }

    Ok(())
}

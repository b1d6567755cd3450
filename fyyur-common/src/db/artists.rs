//! Artist persistence

use crate::db::models::{Artist, NewArtist};
use crate::error::EntityKind;
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Executor, Row, Sqlite, SqliteConnection};

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, image_link, facebook_link, \
     website_link, genres, seeking_venue, seeking_description";

fn artist_from_row(row: &SqliteRow) -> Result<Artist> {
    let genres: Json<Vec<String>> = row.try_get("genres")?;

    Ok(Artist {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        phone: row.try_get("phone")?,
        image_link: row.try_get("image_link")?,
        facebook_link: row.try_get("facebook_link")?,
        website_link: row.try_get("website_link")?,
        genres: genres.0,
        seeking_venue: row.try_get("seeking_venue")?,
        seeking_description: row.try_get("seeking_description")?,
    })
}

pub async fn get_all<'e, E>(executor: E) -> Result<Vec<Artist>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {} FROM artists ORDER BY id", ARTIST_COLUMNS);
    let rows = sqlx::query(&sql).fetch_all(executor).await?;

    rows.iter().map(artist_from_row).collect()
}

pub async fn get_by_id<'e, E>(executor: E, id: i64) -> Result<Artist>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {} FROM artists WHERE id = ?", ARTIST_COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(executor).await?;

    match row {
        Some(row) => artist_from_row(&row),
        None => Err(Error::not_found(EntityKind::Artist, id)),
    }
}

pub async fn exists<'e, E>(executor: E, id: i64) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)")
        .bind(id)
        .fetch_one(executor)
        .await?;

    Ok(found != 0)
}

pub async fn insert(conn: &mut SqliteConnection, artist: NewArtist) -> Result<Artist> {
    let result = sqlx::query(
        r#"
        INSERT INTO artists (
            name, city, state, phone, image_link, facebook_link,
            website_link, genres, seeking_venue, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website_link)
    .bind(Json(&artist.genres))
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .execute(&mut *conn)
    .await?;

    Ok(artist.into_artist(result.last_insert_rowid()))
}

pub async fn update(conn: &mut SqliteConnection, artist: &Artist) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, city = ?, state = ?, phone = ?, image_link = ?,
            facebook_link = ?, website_link = ?, genres = ?,
            seeking_venue = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website_link)
    .bind(Json(&artist.genres))
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .bind(artist.id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(EntityKind::Artist, artist.id));
    }

    Ok(())
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(EntityKind::Artist, id));
    }

    Ok(())
}

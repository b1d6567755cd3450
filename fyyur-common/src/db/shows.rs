//! Show persistence
//!
//! Start times are compared with `julianday()` so ordering and the
//! upcoming/past split do not depend on how many fractional digits the
//! stored timestamp text carries.

use crate::db::models::{NewShow, Show, ShowDetail};
use crate::error::EntityKind;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqliteConnection};
use std::collections::HashMap;

const DETAIL_SELECT: &str = r#"
    SELECT s.id, s.venue_id, v.name AS venue_name, v.image_link AS venue_image_link,
           s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
           s.start_time
    FROM shows s
    JOIN venues v ON v.id = s.venue_id
    JOIN artists a ON a.id = s.artist_id
"#;

fn show_from_row(row: &SqliteRow) -> Result<Show> {
    Ok(Show {
        id: row.try_get("id")?,
        venue_id: row.try_get("venue_id")?,
        artist_id: row.try_get("artist_id")?,
        start_time: row.try_get("start_time")?,
    })
}

fn detail_from_row(row: &SqliteRow) -> Result<ShowDetail> {
    Ok(ShowDetail {
        id: row.try_get("id")?,
        venue_id: row.try_get("venue_id")?,
        venue_name: row.try_get("venue_name")?,
        venue_image_link: row.try_get("venue_image_link")?,
        artist_id: row.try_get("artist_id")?,
        artist_name: row.try_get("artist_name")?,
        artist_image_link: row.try_get("artist_image_link")?,
        start_time: row.try_get("start_time")?,
    })
}

pub async fn get_all<'e, E>(executor: E) -> Result<Vec<Show>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("SELECT id, venue_id, artist_id, start_time FROM shows ORDER BY id")
        .fetch_all(executor)
        .await?;

    rows.iter().map(show_from_row).collect()
}

pub async fn get_by_id<'e, E>(executor: E, id: i64) -> Result<Show>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query("SELECT id, venue_id, artist_id, start_time FROM shows WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    match row {
        Some(row) => show_from_row(&row),
        None => Err(Error::not_found(EntityKind::Show, id)),
    }
}

/// Every show with venue and artist names, earliest first
pub async fn get_all_detailed<'e, E>(executor: E) -> Result<Vec<ShowDetail>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{} ORDER BY julianday(s.start_time), s.id", DETAIL_SELECT);
    let rows = sqlx::query(&sql).fetch_all(executor).await?;

    rows.iter().map(detail_from_row).collect()
}

/// Shows booked at one venue, earliest first
pub async fn for_venue<'e, E>(executor: E, venue_id: i64) -> Result<Vec<ShowDetail>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "{} WHERE s.venue_id = ? ORDER BY julianday(s.start_time), s.id",
        DETAIL_SELECT
    );
    let rows = sqlx::query(&sql).bind(venue_id).fetch_all(executor).await?;

    rows.iter().map(detail_from_row).collect()
}

/// Shows played by one artist, earliest first
pub async fn for_artist<'e, E>(executor: E, artist_id: i64) -> Result<Vec<ShowDetail>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "{} WHERE s.artist_id = ? ORDER BY julianday(s.start_time), s.id",
        DETAIL_SELECT
    );
    let rows = sqlx::query(&sql).bind(artist_id).fetch_all(executor).await?;

    rows.iter().map(detail_from_row).collect()
}

/// Number of shows starting after `now`, keyed by venue id
pub async fn upcoming_counts_by_venue<'e, E>(
    executor: E,
    now: DateTime<Utc>,
) -> Result<HashMap<i64, i64>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let counts: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT venue_id, COUNT(*) FROM shows
         WHERE julianday(start_time) > julianday(?)
         GROUP BY venue_id",
    )
    .bind(now)
    .fetch_all(executor)
    .await?;

    Ok(counts.into_iter().collect())
}

/// Number of shows starting after `now`, keyed by artist id
pub async fn upcoming_counts_by_artist<'e, E>(
    executor: E,
    now: DateTime<Utc>,
) -> Result<HashMap<i64, i64>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let counts: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT artist_id, COUNT(*) FROM shows
         WHERE julianday(start_time) > julianday(?)
         GROUP BY artist_id",
    )
    .bind(now)
    .fetch_all(executor)
    .await?;

    Ok(counts.into_iter().collect())
}

pub async fn insert(conn: &mut SqliteConnection, show: NewShow) -> Result<Show> {
    let result = sqlx::query("INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?, ?, ?)")
        .bind(show.venue_id)
        .bind(show.artist_id)
        .bind(show.start_time)
        .execute(&mut *conn)
        .await?;

    Ok(show.into_show(result.last_insert_rowid()))
}

pub async fn update(conn: &mut SqliteConnection, show: &Show) -> Result<()> {
    let result =
        sqlx::query("UPDATE shows SET venue_id = ?, artist_id = ?, start_time = ? WHERE id = ?")
            .bind(show.venue_id)
            .bind(show.artist_id)
            .bind(show.start_time)
            .bind(show.id)
            .execute(&mut *conn)
            .await?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(EntityKind::Show, show.id));
    }

    Ok(())
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM shows WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::not_found(EntityKind::Show, id));
    }

    Ok(())
}

/// Remove every show at a venue, returns how many went
pub async fn delete_for_venue(conn: &mut SqliteConnection, venue_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM shows WHERE venue_id = ?")
        .bind(venue_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

/// Remove every show of an artist, returns how many went
pub async fn delete_for_artist(conn: &mut SqliteConnection, artist_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM shows WHERE artist_id = ?")
        .bind(artist_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

//! Integration tests for the catalog service over an in-memory store
//!
//! Each test gets its own private database through `init_in_memory()`.

use chrono::{Duration, TimeZone, Utc};
use fyyur_common::catalog::SearchKind;
use fyyur_common::db::{self, init_in_memory};
use fyyur_common::forms::{ArtistForm, ShowForm, VenueForm};
use fyyur_common::{Catalog, EntityKind, Error};

async fn setup_catalog() -> Catalog {
    let pool = init_in_memory().await.expect("Should create in-memory database");
    Catalog::new(pool)
}

fn musical_hop() -> VenueForm {
    VenueForm {
        name: Some("The Musical Hop".to_string()),
        city: Some("San Francisco".to_string()),
        state: Some("CA".to_string()),
        address: Some("1015 Folsom St".to_string()),
        phone: Some("123-123-1234".to_string()),
        genres: Some(vec!["Jazz".to_string(), "Reggae".to_string()]),
        seeking_talent: Some(true),
        ..Default::default()
    }
}

fn venue_form(name: &str, city: &str, state: &str) -> VenueForm {
    VenueForm {
        name: Some(name.to_string()),
        city: Some(city.to_string()),
        state: Some(state.to_string()),
        address: Some("34 Whiskey Moore Ave".to_string()),
        ..Default::default()
    }
}

fn artist_form(name: &str) -> ArtistForm {
    ArtistForm {
        name: Some(name.to_string()),
        city: Some("San Francisco".to_string()),
        state: Some("CA".to_string()),
        genres: Some(vec!["Jazz".to_string()]),
        ..Default::default()
    }
}

fn show_form(venue_id: i64, artist_id: i64, days_from_now: i64) -> ShowForm {
    ShowForm {
        venue_id: Some(venue_id),
        artist_id: Some(artist_id),
        start_time: Some((Utc::now() + Duration::days(days_from_now)).to_rfc3339()),
    }
}

async fn show_count(catalog: &Catalog) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(catalog.pool())
        .await
        .unwrap()
}

// =============================================================================
// Create / lookup
// =============================================================================

#[tokio::test]
async fn test_create_venue_then_lookup_returns_same_fields() {
    let catalog = setup_catalog().await;

    let created = catalog.create_venue(musical_hop()).await.unwrap();
    let loaded = catalog.venue(created.id).await.unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "The Musical Hop");
    assert_eq!(loaded.city, "San Francisco");
    assert_eq!(loaded.state, "CA");
    assert_eq!(loaded.address, "1015 Folsom St");
    assert_eq!(loaded.phone.as_deref(), Some("123-123-1234"));
    assert_eq!(loaded.genres, vec!["Jazz", "Reggae"]);
    assert!(loaded.seeking_talent);
}

#[tokio::test]
async fn test_create_artist_defaults() {
    let catalog = setup_catalog().await;

    let created = catalog.create_artist(artist_form("Guns N Petals")).await.unwrap();
    let loaded = catalog.artist(created.id).await.unwrap();

    assert_eq!(loaded, created);
    assert!(!loaded.seeking_venue);
    assert_eq!(loaded.seeking_description, None);
}

#[tokio::test]
async fn test_genres_may_be_empty() {
    let catalog = setup_catalog().await;

    let created = catalog
        .create_venue(venue_form("Empty Genres", "Austin", "TX"))
        .await
        .unwrap();
    assert!(catalog.venue(created.id).await.unwrap().genres.is_empty());
}

#[tokio::test]
async fn test_create_with_missing_field_leaves_nothing_behind() {
    let catalog = setup_catalog().await;

    let mut form = musical_hop();
    form.address = None;
    let err = catalog.create_venue(form).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    assert!(db::venues::get_all(catalog.pool()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let catalog = setup_catalog().await;

    for id in [0, 1, 42, -7] {
        assert!(matches!(
            catalog.venue(id).await,
            Err(Error::NotFound { kind: EntityKind::Venue, .. })
        ));
        assert!(matches!(
            catalog.artist(id).await,
            Err(Error::NotFound { kind: EntityKind::Artist, .. })
        ));
        assert!(matches!(
            catalog.show(id).await,
            Err(Error::NotFound { kind: EntityKind::Show, .. })
        ));
    }
}

#[tokio::test]
async fn test_closed_store_reports_persistence_error() {
    let catalog = setup_catalog().await;
    catalog.pool().close().await;

    let err = catalog.create_venue(musical_hop()).await.unwrap_err();
    assert!(matches!(err, Error::Persistence(_)));
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_is_idempotent() {
    let catalog = setup_catalog().await;
    let venue = catalog.create_venue(musical_hop()).await.unwrap();

    let changes = VenueForm {
        phone: Some("415-000-1111".to_string()),
        genres: Some(vec!["Swing".to_string()]),
        seeking_talent: Some(false),
        ..Default::default()
    };

    let once = catalog.update_venue(venue.id, changes.clone()).await.unwrap();
    let twice = catalog.update_venue(venue.id, changes).await.unwrap();

    assert_eq!(once, twice);
    assert_eq!(catalog.venue(venue.id).await.unwrap(), once);
    assert_eq!(once.name, "The Musical Hop");
    assert_eq!(once.phone.as_deref(), Some("415-000-1111"));
    assert!(!once.seeking_talent);
}

#[tokio::test]
async fn test_update_unknown_venue_is_not_found() {
    let catalog = setup_catalog().await;

    let err = catalog.update_venue(99, musical_hop()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { id: 99, .. }));
}

#[tokio::test]
async fn test_update_artist_clears_optional_field() {
    let catalog = setup_catalog().await;
    let mut form = artist_form("Matt Quevedo");
    form.seeking_description = Some("Looking for shows".to_string());
    let artist = catalog.create_artist(form).await.unwrap();

    let updated = catalog
        .update_artist(
            artist.id,
            ArtistForm {
                seeking_description: Some(String::new()),
                seeking_venue: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.seeking_description, None);
    assert!(updated.seeking_venue);
    assert_eq!(updated.city, "San Francisco");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_then_lookup_is_not_found() {
    let catalog = setup_catalog().await;
    let venue = catalog.create_venue(musical_hop()).await.unwrap();

    let summary = catalog.delete_venue(venue.id).await.unwrap();
    assert_eq!(summary.id, venue.id);
    assert_eq!(summary.shows_removed, 0);

    assert!(matches!(catalog.venue(venue.id).await, Err(Error::NotFound { .. })));
    assert!(matches!(
        catalog.delete_venue(venue.id).await,
        Err(Error::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_deleted_ids_are_never_reissued() {
    let catalog = setup_catalog().await;
    let first = catalog.create_venue(musical_hop()).await.unwrap();
    catalog.delete_venue(first.id).await.unwrap();

    let second = catalog.create_venue(musical_hop()).await.unwrap();
    assert_ne!(first.id, second.id);
    assert!(matches!(catalog.venue(first.id).await, Err(Error::NotFound { .. })));
}

#[tokio::test]
async fn test_delete_venue_cascades_to_shows() {
    let catalog = setup_catalog().await;
    let hop = catalog.create_venue(musical_hop()).await.unwrap();
    let other = catalog
        .create_venue(venue_form("The Dueling Pianos Bar", "New York", "NY"))
        .await
        .unwrap();
    let artist = catalog.create_artist(artist_form("Guns N Petals")).await.unwrap();

    catalog.create_show(show_form(hop.id, artist.id, 10)).await.unwrap();
    catalog.create_show(show_form(hop.id, artist.id, -10)).await.unwrap();
    let kept = catalog.create_show(show_form(other.id, artist.id, 5)).await.unwrap();

    let summary = catalog.delete_venue(hop.id).await.unwrap();
    assert_eq!(summary.shows_removed, 2);

    let remaining = db::shows::get_all(catalog.pool()).await.unwrap();
    assert_eq!(remaining, vec![kept]);
}

#[tokio::test]
async fn test_delete_artist_cascades_to_shows() {
    let catalog = setup_catalog().await;
    let hop = catalog.create_venue(musical_hop()).await.unwrap();
    let artist = catalog.create_artist(artist_form("Guns N Petals")).await.unwrap();
    catalog.create_show(show_form(hop.id, artist.id, 3)).await.unwrap();

    let summary = catalog.delete_artist(artist.id).await.unwrap();
    assert_eq!(summary.shows_removed, 1);
    assert_eq!(show_count(&catalog).await, 0);
    assert!(catalog.venue(hop.id).await.is_ok());
}

// =============================================================================
// Shows
// =============================================================================

#[tokio::test]
async fn test_show_requires_existing_venue_and_artist() {
    let catalog = setup_catalog().await;
    let hop = catalog.create_venue(musical_hop()).await.unwrap();
    let artist = catalog.create_artist(artist_form("Guns N Petals")).await.unwrap();

    let missing_venue = catalog.create_show(show_form(hop.id + 100, artist.id, 1)).await;
    assert!(matches!(missing_venue, Err(Error::Validation(_))));

    let missing_artist = catalog.create_show(show_form(hop.id, artist.id + 100, 1)).await;
    assert!(matches!(missing_artist, Err(Error::Validation(_))));

    let no_artist = catalog
        .create_show(ShowForm {
            venue_id: Some(hop.id),
            ..Default::default()
        })
        .await;
    assert!(matches!(no_artist, Err(Error::Validation(_))));

    assert_eq!(show_count(&catalog).await, 0);
}

#[tokio::test]
async fn test_show_start_time_defaults_to_now() {
    let catalog = setup_catalog().await;
    let hop = catalog.create_venue(musical_hop()).await.unwrap();
    let artist = catalog.create_artist(artist_form("Guns N Petals")).await.unwrap();

    let before = Utc::now();
    let show = catalog
        .create_show(ShowForm {
            venue_id: Some(hop.id),
            artist_id: Some(artist.id),
            start_time: None,
        })
        .await
        .unwrap();
    let after = Utc::now();

    assert!(show.start_time >= before && show.start_time <= after);
    assert_eq!(catalog.show(show.id).await.unwrap(), show);
}

#[tokio::test]
async fn test_list_shows_joins_names_in_start_order() {
    let catalog = setup_catalog().await;
    let hop = catalog.create_venue(musical_hop()).await.unwrap();
    let artist = catalog.create_artist(artist_form("The Wild Sax Band")).await.unwrap();

    let later = catalog.create_show(show_form(hop.id, artist.id, 30)).await.unwrap();
    let sooner = catalog.create_show(show_form(hop.id, artist.id, 2)).await.unwrap();

    let shows = catalog.list_shows().await.unwrap();
    assert_eq!(shows.iter().map(|s| s.id).collect::<Vec<_>>(), vec![sooner.id, later.id]);
    assert_eq!(shows[0].venue_name, "The Musical Hop");
    assert_eq!(shows[0].artist_name, "The Wild Sax Band");
}

#[tokio::test]
async fn test_update_show_moves_start_time() {
    let catalog = setup_catalog().await;
    let hop = catalog.create_venue(musical_hop()).await.unwrap();
    let artist = catalog.create_artist(artist_form("Guns N Petals")).await.unwrap();
    let show = catalog.create_show(show_form(hop.id, artist.id, -3)).await.unwrap();

    let updated = catalog
        .update_show(
            show.id,
            ShowForm {
                start_time: Some("2040-06-01 21:00".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.start_time, Utc.with_ymd_and_hms(2040, 6, 1, 21, 0, 0).unwrap());
    assert_eq!(updated.venue_id, hop.id);
    assert_eq!(updated.artist_id, artist.id);
    assert_eq!(catalog.show(show.id).await.unwrap(), updated);

    let detail = catalog.venue_detail(hop.id).await.unwrap();
    assert!(detail.past_shows.is_empty());
    assert_eq!(detail.upcoming_shows.len(), 1);
}

#[tokio::test]
async fn test_update_show_rejects_unknown_artist() {
    let catalog = setup_catalog().await;
    let hop = catalog.create_venue(musical_hop()).await.unwrap();
    let artist = catalog.create_artist(artist_form("Guns N Petals")).await.unwrap();
    let show = catalog.create_show(show_form(hop.id, artist.id, 5)).await.unwrap();

    let result = catalog
        .update_show(
            show.id,
            ShowForm {
                artist_id: Some(artist.id + 100),
                start_time: Some("2040-06-01 21:00".to_string()),
                ..Default::default()
            },
        )
        .await;

    match result {
        Err(Error::Validation(message)) => assert!(message.contains("artist")),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(catalog.show(show.id).await.unwrap(), show);

    let missing = catalog.update_show(show.id + 100, ShowForm::default()).await;
    assert!(matches!(
        missing,
        Err(Error::NotFound { kind: EntityKind::Show, .. })
    ));
}

#[tokio::test]
async fn test_delete_show_leaves_venue_and_artist() {
    let catalog = setup_catalog().await;
    let hop = catalog.create_venue(musical_hop()).await.unwrap();
    let artist = catalog.create_artist(artist_form("Guns N Petals")).await.unwrap();
    let show = catalog.create_show(show_form(hop.id, artist.id, 5)).await.unwrap();

    let summary = catalog.delete_show(show.id).await.unwrap();
    assert_eq!(summary.id, show.id);
    assert_eq!(summary.shows_removed, 0);
    assert_eq!(show_count(&catalog).await, 0);
    assert!(catalog.venue(hop.id).await.is_ok());
    assert!(catalog.artist(artist.id).await.is_ok());
}

#[tokio::test]
async fn test_venue_detail_splits_past_and_upcoming() {
    let catalog = setup_catalog().await;
    let hop = catalog.create_venue(musical_hop()).await.unwrap();
    let artist = catalog.create_artist(artist_form("Guns N Petals")).await.unwrap();
    catalog.create_show(show_form(hop.id, artist.id, -30)).await.unwrap();
    catalog.create_show(show_form(hop.id, artist.id, 30)).await.unwrap();
    catalog.create_show(show_form(hop.id, artist.id, 60)).await.unwrap();

    let detail = catalog.venue_detail(hop.id).await.unwrap();
    assert_eq!(detail.past_shows.len(), 1);
    assert_eq!(detail.upcoming_shows.len(), 2);

    let artist_detail = catalog.artist_detail(artist.id).await.unwrap();
    assert_eq!(artist_detail.upcoming_shows.len(), 2);
}

// =============================================================================
// Listing and search
// =============================================================================

#[tokio::test]
async fn test_grouped_listing_covers_every_venue_once() {
    let catalog = setup_catalog().await;
    catalog.create_venue(musical_hop()).await.unwrap();
    catalog
        .create_venue(venue_form("The Dueling Pianos Bar", "New York", "NY"))
        .await
        .unwrap();
    catalog
        .create_venue(venue_form("Park Square Live Music & Coffee", "San Francisco", "CA"))
        .await
        .unwrap();

    let groups = catalog.list_venues_grouped().await.unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!((groups[0].city.as_str(), groups[0].state.as_str()), ("San Francisco", "CA"));
    assert_eq!(groups[0].venues.len(), 2);
    assert_eq!(groups[1].venues[0].name, "The Dueling Pianos Bar");

    let total: usize = groups.iter().map(|g| g.venues.len()).sum();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn test_artist_search_band_counts_upcoming_shows() {
    let catalog = setup_catalog().await;
    let park = catalog
        .create_venue(venue_form("Park Square Live Music & Coffee", "San Francisco", "CA"))
        .await
        .unwrap();
    let sax = catalog.create_artist(artist_form("The Wild Sax Band")).await.unwrap();
    let petals = catalog.create_artist(artist_form("Guns N Petals")).await.unwrap();

    for days in [7, 14, 21] {
        catalog.create_show(show_form(park.id, sax.id, days)).await.unwrap();
    }
    catalog.create_show(show_form(park.id, sax.id, -400)).await.unwrap();
    catalog.create_show(show_form(park.id, petals.id, 7)).await.unwrap();

    let results = catalog.search(SearchKind::Artist, "band").await.unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].id, sax.id);
    assert_eq!(results.data[0].name, "The Wild Sax Band");
    assert_eq!(results.data[0].num_upcoming_shows, 3);
}

#[tokio::test]
async fn test_venue_search_matches_substrings() {
    let catalog = setup_catalog().await;
    catalog.create_venue(musical_hop()).await.unwrap();
    catalog
        .create_venue(venue_form("The Dueling Pianos Bar", "New York", "NY"))
        .await
        .unwrap();
    catalog
        .create_venue(venue_form("Park Square Live Music & Coffee", "San Francisco", "CA"))
        .await
        .unwrap();

    let hop = catalog.search(SearchKind::Venue, "Hop").await.unwrap();
    assert_eq!(hop.count, 1);
    assert_eq!(hop.data[0].name, "The Musical Hop");

    let music = catalog.search(SearchKind::Venue, "music").await.unwrap();
    let names: Vec<_> = music.data.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["The Musical Hop", "Park Square Live Music & Coffee"]);

    let none = catalog.search(SearchKind::Venue, "opera").await.unwrap();
    assert_eq!(none.count, 0);
    assert!(none.data.is_empty());
}

//! Listings and search

use super::Catalog;
use crate::db::{self, Artist, ShowDetail, Venue};
use crate::Result;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Which entity a search runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Venue,
    Artist,
}

/// `{id, name, num_upcoming_shows}` as shown in listings and search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Venues sharing one (city, state) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

/// Group venues by (city, state)
///
/// Groups appear in the order their first venue appears in `venues`; they
/// are not sorted. Within a group venues keep their input order.
pub fn group_by_area(venues: &[Venue], upcoming: &HashMap<i64, i64>) -> Vec<AreaGroup> {
    let mut groups: Vec<AreaGroup> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for venue in venues {
        let key = (venue.city.as_str(), venue.state.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(AreaGroup {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: Vec::new(),
            });
            groups.len() - 1
        });

        groups[slot].venues.push(EntitySummary {
            id: venue.id,
            name: venue.name.clone(),
            num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
        });
    }

    groups
}

/// Case-insensitive substring match; an empty term matches everything
fn name_matches(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(needle)
}

fn summarize<'a>(
    entries: impl Iterator<Item = (i64, &'a str)>,
    term: &str,
    upcoming: &HashMap<i64, i64>,
) -> SearchResults {
    let needle = term.to_lowercase();
    let data: Vec<EntitySummary> = entries
        .filter(|(_, name)| name_matches(name, &needle))
        .map(|(id, name)| EntitySummary {
            id,
            name: name.to_string(),
            num_upcoming_shows: upcoming.get(&id).copied().unwrap_or(0),
        })
        .collect();

    SearchResults {
        count: data.len(),
        data,
    }
}

impl Catalog {
    /// All venues grouped by (city, state), first-occurrence order
    pub async fn list_venues_grouped(&self) -> Result<Vec<AreaGroup>> {
        let venues = db::venues::get_all(self.pool()).await?;
        let upcoming = db::shows::upcoming_counts_by_venue(self.pool(), Utc::now()).await?;
        let groups = group_by_area(&venues, &upcoming);
        debug!("Listed {} venues in {} areas", venues.len(), groups.len());
        Ok(groups)
    }

    pub async fn list_artists(&self) -> Result<Vec<Artist>> {
        db::artists::get_all(self.pool()).await
    }

    pub async fn list_shows(&self) -> Result<Vec<ShowDetail>> {
        db::shows::get_all_detailed(self.pool()).await
    }

    /// Case-insensitive substring search on name, with upcoming show counts
    ///
    /// The term is matched as given, surrounding whitespace included; only
    /// the empty term matches everything.
    pub async fn search(&self, kind: SearchKind, term: &str) -> Result<SearchResults> {
        let now = Utc::now();
        let results = match kind {
            SearchKind::Venue => {
                let venues = db::venues::get_all(self.pool()).await?;
                let upcoming = db::shows::upcoming_counts_by_venue(self.pool(), now).await?;
                summarize(
                    venues.iter().map(|v| (v.id, v.name.as_str())),
                    term,
                    &upcoming,
                )
            }
            SearchKind::Artist => {
                let artists = db::artists::get_all(self.pool()).await?;
                let upcoming = db::shows::upcoming_counts_by_artist(self.pool(), now).await?;
                summarize(
                    artists.iter().map(|a| (a.id, a.name.as_str())),
                    term,
                    &upcoming,
                )
            }
        };

        debug!("Search {:?} for '{}' matched {}", kind, term, results.count);
        Ok(results)
    }
}

//! # Music Search
//!
//! Runs a planned query against the music table and resolves image URLs.
//! Search is infallible from the caller's point of view: a rejected plan
//! or a store failure is logged and yields an empty result.

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::images::ImageResolver;
use super::record::{MusicRecord, MusicView};
use crate::planner::{AccessPlan, PlannerErrorCode, QueryPlanner, SearchCriteria};
use crate::store::{RecordStore, StoreResult};

/// Search executor over the music table
#[derive(Debug, Clone)]
pub struct MusicSearch {
    store: Arc<dyn RecordStore>,
    table: String,
    planner: QueryPlanner,
    images: ImageResolver,
}

impl MusicSearch {
    pub fn new(store: Arc<dyn RecordStore>, table: impl Into<String>, images: ImageResolver) -> Self {
        Self {
            store,
            table: table.into(),
            planner: QueryPlanner::new(),
            images,
        }
    }

    /// Records matching every supplied field, each with a signed image URL
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<MusicView> {
        let plan = match self.planner.plan(criteria) {
            Ok(plan) => plan,
            Err(e) => {
                match e.code() {
                    PlannerErrorCode::EmptyCriteria => debug!("search without criteria"),
                    _ => warn!(code = e.code().code(), "{}", e.message()),
                }
                return Vec::new();
            }
        };

        debug!(rule = plan.rule, index = plan.index_label(), "executing search");

        match self.execute(&plan) {
            Ok(records) => self.images.resolve_all(records),
            Err(e) => {
                error!(table = %self.table, error = %e, "music query failed");
                Vec::new()
            }
        }
    }

    /// Run a plan against the store; malformed items are skipped
    pub fn execute(&self, plan: &AccessPlan) -> StoreResult<Vec<MusicRecord>> {
        let items = self.store.query(&self.table, &plan.to_query_input())?;

        Ok(items
            .iter()
            .filter_map(|item| {
                let record = MusicRecord::from_item(item);
                if record.is_none() {
                    warn!(table = %self.table, "skipping item without title or album");
                }
                record
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::provision::music_table;
    use crate::object_store::{LocalObjectStore, ObjectStore};
    use crate::store::{InMemoryRecordStore, Item};

    fn song(title: &str, album: &str, artist: &str, year: i64) -> Item {
        MusicRecord {
            title: title.into(),
            album: album.into(),
            artist: Some(artist.into()),
            year: Some(year),
            image_key: Some(format!("{}.jpg", artist.replace(' ', "_"))),
        }
        .to_item()
    }

    fn fixture() -> MusicSearch {
        let store = InMemoryRecordStore::new();
        store.create_table(music_table("music")).unwrap();
        for it in [
            song("Free Fallin", "Full Moon Fever", "Tom Petty", 1989),
            song("Runnin Down a Dream", "Full Moon Fever", "Tom Petty", 1989),
            song("Learning to Fly", "Into the Great Wide Open", "Tom Petty", 1991),
            song("Learning to Fly", "A Momentary Lapse of Reason", "Pink Floyd", 1987),
        ] {
            store.put_item("music", it, None).unwrap();
        }

        let objects = LocalObjectStore::new("http://img.local", b"secret");
        objects.create_bucket("images").unwrap();
        let images = ImageResolver::new(Arc::new(objects), "images", 3600);
        MusicSearch::new(Arc::new(store), "music", images)
    }

    fn titles(views: &[MusicView]) -> Vec<String> {
        let mut t: Vec<String> = views.iter().map(|v| format!("{}/{}", v.title, v.album)).collect();
        t.sort();
        t
    }

    #[test]
    fn test_primary_key_search() {
        let views = fixture().search(
            &SearchCriteria::new()
                .with_title("Learning to Fly")
                .with_album("Into the Great Wide Open"),
        );
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].artist.as_deref(), Some("Tom Petty"));
        assert!(views[0].img_url.contains("Tom_Petty.jpg"));
    }

    #[test]
    fn test_single_attribute_search() {
        let views = fixture().search(&SearchCriteria::new().with_title("Learning to Fly"));
        assert_eq!(views.len(), 2);
    }

    #[test]
    fn test_residual_filter_applied() {
        let views = fixture().search(&SearchCriteria::new().with_artist("Tom Petty").with_year(1989_i64));
        assert_eq!(
            titles(&views),
            vec![
                "Free Fallin/Full Moon Fever".to_string(),
                "Runnin Down a Dream/Full Moon Fever".to_string(),
            ]
        );
    }

    #[test]
    fn test_year_as_text() {
        let views = fixture().search(&SearchCriteria::new().with_year("1987"));
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].year, Some(1987));
    }

    #[test]
    fn test_invalid_year_returns_empty() {
        let views = fixture().search(&SearchCriteria::new().with_artist("Tom Petty").with_year("abc"));
        assert!(views.is_empty());
    }

    #[test]
    fn test_empty_criteria_returns_empty() {
        assert!(fixture().search(&SearchCriteria::new()).is_empty());
    }

    #[test]
    fn test_missing_table_returns_empty() {
        let search = fixture();
        let broken = MusicSearch::new(Arc::new(InMemoryRecordStore::new()), "music", search.images.clone());
        assert!(broken.search(&SearchCriteria::new().with_artist("Tom Petty")).is_empty());
    }

    #[test]
    fn test_execute_returns_records() {
        let search = fixture();
        let plan = QueryPlanner::new()
            .plan(&SearchCriteria::new().with_artist("Tom Petty"))
            .unwrap();
        let records = search.execute(&plan).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.image_key.as_deref() == Some("Tom_Petty.jpg")));
    }
}

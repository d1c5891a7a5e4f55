#![forbid(unsafe_code)]

//! The project catalog: a fixed set of records with a visible-count cursor.
//!
//! The catalog is synthesized once per profile and cached as a JSON blob in
//! the profile store; later launches read the cache. Records are immutable
//! and ids are unique. The cursor starts at [`INITIAL_VISIBLE`], grows by
//! [`LOAD_STEP`] per `load_more()`, and is clamped to the catalog length;
//! the load-more affordance disappears exactly when the cursor reaches the
//! length. The home screen always sees the first [`PREVIEW_LEN`] records,
//! cursor regardless.

use serde::{Deserialize, Serialize};

use crate::store::{self, ProfileStore, keys};

/// Rows visible before any `load_more()`.
pub const INITIAL_VISIBLE: usize = 6;

/// Rows added per `load_more()`.
pub const LOAD_STEP: usize = 6;

/// Records shown in the home-screen preview.
pub const PREVIEW_LEN: usize = 4;

/// One showcase project. Immutable after synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub tech: Vec<String>,
    #[serde(rename = "liveUrl")]
    pub live_url: String,
    #[serde(rename = "githubUrl")]
    pub github_url: String,
    pub category: String,
}

macro_rules! record {
    ($id:literal, $title:literal, $desc:literal, $image:literal,
     [$($tech:literal),+], $category:literal) => {
        ProjectRecord {
            id: $id.to_string(),
            title: $title.to_string(),
            description: $desc.to_string(),
            image: concat!("https://images.unsplash.com/", $image, "?w=600&h=400&fit=crop")
                .to_string(),
            tech: vec![$($tech.to_string()),+],
            live_url: "https://github.com/akasaam".to_string(),
            github_url: "https://github.com/akasaam".to_string(),
            category: $category.to_string(),
        }
    };
}

/// Synthesize the fixed catalog.
#[must_use]
pub fn builtin_catalog() -> Vec<ProjectRecord> {
    vec![
        record!(
            "1",
            "E-commerce Platform",
            "Modern e-commerce solution with React and Node.js",
            "photo-1556742049-0cfed4f6a45d",
            ["React", "Node.js", "MongoDB", "Stripe"],
            "Web Application"
        ),
        record!(
            "2",
            "SaaS Dashboard",
            "Analytics dashboard with real-time data visualization",
            "photo-1551288049-bebda4e38f71",
            ["Next.js", "Tailwind", "PostgreSQL", "Chart.js"],
            "Dashboard"
        ),
        record!(
            "3",
            "AI Content Generator",
            "AI-powered content creation tool",
            "photo-1677442136019-21780ecad995",
            ["Vue.js", "Express", "OpenAI", "Redis"],
            "AI Application"
        ),
        record!(
            "4",
            "Mobile App Backend",
            "RESTful API for mobile application",
            "photo-1512941937669-90a1b58e7e9c",
            ["Node.js", "Express", "JWT", "AWS"],
            "API"
        ),
        record!(
            "5",
            "Real Estate Portal",
            "Property listing and management system",
            "photo-1560518883-ce09059eeffa",
            ["React", "Laravel", "MySQL", "MapBox"],
            "Web Application"
        ),
        record!(
            "6",
            "Cryptocurrency Tracker",
            "Real-time crypto price tracking application",
            "photo-1639762681485-074b7f938ba0",
            ["React", "WebSocket", "CoinGecko API", "Chart.js"],
            "Financial App"
        ),
        record!(
            "7",
            "Social Media Platform",
            "Full-stack social networking application",
            "photo-1611224923853-80b023f02d71",
            ["MERN Stack", "Socket.io", "Cloudinary", "JWT"],
            "Social Platform"
        ),
        record!(
            "8",
            "Food Delivery App",
            "On-demand food delivery service platform",
            "photo-1565299624946-b28f40a0ca4b",
            ["React Native", "Node.js", "MongoDB", "Stripe"],
            "Mobile App"
        ),
    ]
}

/// The catalog plus its session-scoped visible cursor.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    records: Vec<ProjectRecord>,
    visible: usize,
}

impl CatalogStore {
    /// Load from the profile cache, synthesizing and persisting on a miss.
    ///
    /// An unreadable or unparseable cache blob falls back to synthesis, same
    /// as a miss.
    #[must_use]
    pub fn load(store: &dyn ProfileStore) -> Self {
        let records = match store::get_or_absent(store, keys::PROJECTS) {
            Some(blob) => match serde_json::from_str::<Vec<ProjectRecord>>(&blob) {
                Ok(cached) if !cached.is_empty() => {
                    tracing::debug!(count = cached.len(), "catalog loaded from cache");
                    cached
                }
                Ok(_) | Err(_) => {
                    tracing::warn!("catalog cache unusable, resynthesizing");
                    Self::synthesize(store)
                }
            },
            None => Self::synthesize(store),
        };
        Self::with_records(records)
    }

    /// Build directly from records (tests, previews).
    #[must_use]
    pub fn with_records(records: Vec<ProjectRecord>) -> Self {
        debug_assert!(ids_unique(&records), "catalog ids must be unique");
        let visible = INITIAL_VISIBLE.min(records.len());
        Self { records, visible }
    }

    fn synthesize(store: &dyn ProfileStore) -> Vec<ProjectRecord> {
        let records = builtin_catalog();
        match serde_json::to_string(&records) {
            Ok(blob) => {
                if let Err(e) = store.set(keys::PROJECTS, &blob) {
                    tracing::warn!(error = %e, "could not cache catalog");
                }
            }
            Err(e) => tracing::warn!(error = %e, "could not encode catalog"),
        }
        records
    }

    /// All records.
    #[must_use]
    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    /// Total record count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Current visible-count cursor.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible
    }

    /// The records currently visible on the portfolio screen.
    #[must_use]
    pub fn visible(&self) -> &[ProjectRecord] {
        &self.records[..self.visible]
    }

    /// The home-screen preview: always the first [`PREVIEW_LEN`] records.
    #[must_use]
    pub fn preview(&self) -> &[ProjectRecord] {
        &self.records[..PREVIEW_LEN.min(self.records.len())]
    }

    /// Whether the load-more affordance should be shown.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.visible < self.records.len()
    }

    /// Reveal up to [`LOAD_STEP`] more records; the cursor never exceeds the
    /// catalog length and never decreases.
    pub fn load_more(&mut self) {
        self.visible = (self.visible + LOAD_STEP).min(self.records.len());
    }

    /// Look up a record by id.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&ProjectRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

fn ids_unique(records: &[ProjectRecord]) -> bool {
    let mut seen = std::collections::HashSet::new();
    records.iter().all(|r| seen.insert(r.id.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn builtin_catalog_shape() {
        let records = builtin_catalog();
        assert_eq!(records.len(), 8);
        assert!(ids_unique(&records));
        for r in &records {
            assert!(!r.title.is_empty());
            assert!(!r.tech.is_empty());
            assert!(r.image.starts_with("https://"));
        }
    }

    #[test]
    fn first_load_synthesizes_and_caches() {
        let store = MemoryStore::new();
        let catalog = CatalogStore::load(&store);
        assert_eq!(catalog.len(), 8);

        let blob = store.get(keys::PROJECTS).unwrap().expect("cache written");
        let cached: Vec<ProjectRecord> = serde_json::from_str(&blob).unwrap();
        assert_eq!(cached, builtin_catalog());
    }

    #[test]
    fn second_load_reads_cache() {
        let store = MemoryStore::new();
        let _ = CatalogStore::load(&store);

        // Tamper with one cached title to prove the cache is what's read.
        let blob = store.get(keys::PROJECTS).unwrap().unwrap();
        let mut cached: Vec<ProjectRecord> = serde_json::from_str(&blob).unwrap();
        cached[0].title = "Cached Title".to_string();
        store
            .set(keys::PROJECTS, &serde_json::to_string(&cached).unwrap())
            .unwrap();

        let catalog = CatalogStore::load(&store);
        assert_eq!(catalog.records()[0].title, "Cached Title");
    }

    #[test]
    fn corrupt_cache_resynthesizes() {
        let store = MemoryStore::new();
        store.set(keys::PROJECTS, "[not json").unwrap();
        let catalog = CatalogStore::load(&store);
        assert_eq!(catalog.len(), 8);
    }

    #[test]
    fn initial_cursor_and_preview() {
        let catalog = CatalogStore::with_records(builtin_catalog());
        assert_eq!(catalog.visible_count(), INITIAL_VISIBLE);
        assert_eq!(catalog.visible().len(), 6);
        assert_eq!(catalog.preview().len(), PREVIEW_LEN);
        assert!(catalog.can_load_more());
    }

    #[test]
    fn load_more_clamps_and_hides_affordance() {
        let mut catalog = CatalogStore::with_records(builtin_catalog());
        // 8 records, cursor 6: one step would overshoot to 12, clamps to 8.
        catalog.load_more();
        assert_eq!(catalog.visible_count(), 8);
        assert!(!catalog.can_load_more());

        // Further calls change nothing.
        catalog.load_more();
        assert_eq!(catalog.visible_count(), 8);
    }

    #[test]
    fn preview_ignores_cursor() {
        let mut catalog = CatalogStore::with_records(builtin_catalog());
        catalog.load_more();
        assert_eq!(catalog.preview().len(), PREVIEW_LEN);
    }

    #[test]
    fn by_id_finds_records() {
        let catalog = CatalogStore::with_records(builtin_catalog());
        assert_eq!(catalog.by_id("3").unwrap().title, "AI Content Generator");
        assert!(catalog.by_id("99").is_none());
    }

    #[test]
    fn record_round_trips_original_field_names() {
        let record = &builtin_catalog()[0];
        let json = serde_json::to_string(record).unwrap();
        assert!(json.contains("\"liveUrl\""));
        assert!(json.contains("\"githubUrl\""));
        let back: ProjectRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, record);
    }

    proptest! {
        #[test]
        fn cursor_never_exceeds_len_and_never_decreases(calls in 0usize..20) {
            let mut catalog = CatalogStore::with_records(builtin_catalog());
            let mut prev = catalog.visible_count();
            for _ in 0..calls {
                catalog.load_more();
                let cur = catalog.visible_count();
                prop_assert!(cur >= prev);
                prop_assert!(cur <= catalog.len());
                prop_assert_eq!(catalog.can_load_more(), cur < catalog.len());
                prev = cur;
            }
        }
    }
}

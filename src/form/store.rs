use once_cell::sync::OnceCell;
use tokio::sync::RwLock;
use std::sync::Arc;
use serde::Serialize;
use log::warn;

use crate::form::record::{FormFields, GameRecord, TagRecord};

/// The two dynamically-sized lists of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagList {
    Genres,
    Platforms,
}

impl TagList {
    /// Resolve the list key used by the UI callbacks.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "genres" => Some(TagList::Genres),
            "platforms" => Some(TagList::Platforms),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            TagList::Genres => "genres",
            TagList::Platforms => "platforms",
        }
    }
}

/// Everything the submit handler logs: current scalar fields plus both lists.
#[derive(Serialize, Debug, Clone)]
pub struct FormSnapshot {
    pub fields: FormFields,
    pub genres: Vec<TagRecord>,
    pub platforms: Vec<TagRecord>,
}

#[derive(Debug, Default)]
pub struct FormStore {
    fields: FormFields,
    genres: Vec<TagRecord>,
    platforms: Vec<TagRecord>,
    loaded: bool,
    load_failed: bool,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the whole form from a fetched record, all at once.
    pub fn seed(&mut self, record: &GameRecord) {
        self.fields = FormFields::from_record(record);
        self.genres = record.genres.clone();
        self.platforms = record.platforms.clone();
        self.loaded = true;
        self.load_failed = false;
    }

    pub fn mark_load_failed(&mut self) {
        self.load_failed = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn has_load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn tags(&self, list: TagList) -> &[TagRecord] {
        match list {
            TagList::Genres => &self.genres,
            TagList::Platforms => &self.platforms,
        }
    }

    /// Overwrite one scalar field by its UI key. Returns false for keys the
    /// form does not know about.
    pub fn set_scalar(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "slug" => &mut self.fields.slug,
            "name" => &mut self.fields.name,
            "released" => &mut self.fields.released,
            "rating" => &mut self.fields.rating,
            "rating_top" => &mut self.fields.rating_top,
            "ratings_count" => &mut self.fields.ratings_count,
            "reviews_count" => &mut self.fields.reviews_count,
            "created_at" => &mut self.fields.created_at,
            "updated_at" => &mut self.fields.updated_at,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    /// Rebuild the list, replacing the name of the entry whose id matches.
    /// Entries with other ids are carried over untouched; an unknown id
    /// leaves the list as it was.
    pub fn rename_tag(&mut self, list: TagList, id: &str, value: &str) {
        let rebuilt = self
            .tags(list)
            .iter()
            .map(|tag| TagRecord {
                id: tag.id.clone(),
                name: if tag.id == id { value.to_string() } else { tag.name.clone() },
            })
            .collect();

        match list {
            TagList::Genres => self.genres = rebuilt,
            TagList::Platforms => self.platforms = rebuilt,
        }
    }

    /// Append a fresh tag (new random id, empty name) and return it.
    pub fn add_tag(&mut self, list: TagList) -> TagRecord {
        let tag = TagRecord::fresh();
        match list {
            TagList::Genres => self.genres.push(tag.clone()),
            TagList::Platforms => self.platforms.push(tag.clone()),
        }
        tag
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            fields: self.fields.clone(),
            genres: self.genres.clone(),
            platforms: self.platforms.clone(),
        }
    }
}

static FORM_STORE: OnceCell<Arc<RwLock<FormStore>>> = OnceCell::new();

pub fn initialize_form_store() {
    let store = Arc::new(RwLock::new(FormStore::new()));
    FORM_STORE.set(store).expect("FormStore already initialized");
}

fn get_form_store() -> Arc<RwLock<FormStore>> {
    FORM_STORE.get().expect("FormStore not initialized").clone()
}

pub fn seed_form(record: &GameRecord) {
    let store = get_form_store();
    let lock = store.try_write();
    match lock {
        Ok(mut guard) => guard.seed(record),
        Err(_) => warn!("form store busy, dropping seed"),
    }
}

pub fn mark_load_failed() {
    let store = get_form_store();
    let lock = store.try_write();
    match lock {
        Ok(mut guard) => guard.mark_load_failed(),
        Err(_) => warn!("form store busy, dropping load failure flag"),
    }
}

pub fn set_scalar_field(field: &str, value: &str) {
    let store = get_form_store();
    let lock = store.try_write();
    match lock {
        Ok(mut guard) => {
            if !guard.set_scalar(field, value) {
                warn!("ignoring edit for unknown field '{}'", field);
            }
        }
        Err(_) => warn!("form store busy, dropping edit for '{}'", field),
    }
}

pub fn rename_tag(list: TagList, id: &str, value: &str) {
    let store = get_form_store();
    let lock = store.try_write();
    if let Ok(mut guard) = lock {
        guard.rename_tag(list, id, value);
    }
}

pub fn add_tag(list: TagList) -> Option<TagRecord> {
    let store = get_form_store();
    let lock = store.try_write();
    match lock {
        Ok(mut guard) => Some(guard.add_tag(list)),
        Err(_) => None,
    }
}

pub fn tags_snapshot(list: TagList) -> Vec<TagRecord> {
    let store = get_form_store();
    let lock = store.try_read();
    match lock {
        Ok(guard) => guard.tags(list).to_vec(),
        Err(_) => Vec::new(),
    }
}

pub fn form_snapshot() -> Option<FormSnapshot> {
    let store = get_form_store();
    store.try_read().ok().map(|guard| guard.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::record::tests::SAMPLE_RESPONSE;

    fn seeded_store() -> FormStore {
        let record: GameRecord = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        let mut store = FormStore::new();
        store.seed(&record);
        store
    }

    #[test]
    fn seed_populates_fields_and_lists() {
        let store = seeded_store();

        assert!(store.is_loaded());
        assert!(!store.has_load_failed());
        assert_eq!(store.fields().slug, "grand-theft-auto-v");
        assert_eq!(store.fields().rating, "4.48");
        assert_eq!(store.tags(TagList::Genres).len(), 2);
        assert_eq!(store.tags(TagList::Platforms).len(), 3);
    }

    #[test]
    fn default_store_stays_empty_on_load_failure() {
        let mut store = FormStore::new();
        store.mark_load_failed();

        assert!(store.has_load_failed());
        assert!(!store.is_loaded());
        assert_eq!(store.fields(), &FormFields::default());
        assert!(store.tags(TagList::Genres).is_empty());
        assert!(store.tags(TagList::Platforms).is_empty());
    }

    #[test]
    fn add_tag_appends_fresh_entry() {
        let mut store = seeded_store();

        let before = store.tags(TagList::Genres).len();
        let added = store.add_tag(TagList::Genres);

        let genres = store.tags(TagList::Genres);
        assert_eq!(genres.len(), before + 1);
        assert_eq!(genres.last().unwrap(), &added);
        assert!(added.name.is_empty());
        assert!(genres.iter().filter(|t| t.id == added.id).count() == 1);
        // the other list is untouched
        assert_eq!(store.tags(TagList::Platforms).len(), 3);
    }

    #[test]
    fn added_tags_never_collide() {
        let mut store = FormStore::new();
        let a = store.add_tag(TagList::Platforms);
        let b = store.add_tag(TagList::Platforms);

        assert_ne!(a.id, b.id);
        assert_eq!(store.tags(TagList::Platforms).len(), 2);
    }

    #[test]
    fn rename_changes_only_the_matching_entry() {
        let mut store = seeded_store();
        let target_id = store.tags(TagList::Genres)[0].id.clone();
        let untouched = store.tags(TagList::Genres)[1].clone();

        store.rename_tag(TagList::Genres, &target_id, "Shooter");

        let genres = store.tags(TagList::Genres);
        assert_eq!(genres[0].id, target_id);
        assert_eq!(genres[0].name, "Shooter");
        assert_eq!(genres[1], untouched);
    }

    #[test]
    fn rename_with_unknown_id_is_a_no_op() {
        let mut store = seeded_store();
        let before = store.tags(TagList::Platforms).to_vec();

        store.rename_tag(TagList::Platforms, "no-such-id", "whatever");

        assert_eq!(store.tags(TagList::Platforms), &before[..]);
    }

    #[test]
    fn set_scalar_rejects_unknown_fields() {
        let mut store = seeded_store();

        assert!(store.set_scalar("rating", "4.9"));
        assert!(!store.set_scalar("metacritic", "97"));

        assert_eq!(store.fields().rating, "4.9");
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let mut store = seeded_store();
        store.set_scalar("name", "GTA V");
        let added = store.add_tag(TagList::Platforms);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.fields.name, "GTA V");
        assert_eq!(snapshot.platforms.len(), 4);
        assert_eq!(snapshot.platforms.last().unwrap(), &added);
        assert_eq!(snapshot.genres.len(), 2);
    }

    #[test]
    fn list_keys_round_trip() {
        assert_eq!(TagList::parse("genres"), Some(TagList::Genres));
        assert_eq!(TagList::parse("platforms"), Some(TagList::Platforms));
        assert_eq!(TagList::parse("tags"), None);
        assert_eq!(TagList::Genres.key(), "genres");
    }
}

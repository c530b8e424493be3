use once_cell::sync::Lazy;
use std::sync::Mutex;
use slint::{ ComponentHandle, Weak, VecModel, ModelRc };
use log::{ debug, info, warn };

use crate::{ FormEditorUI, FormState, TagUI };
use crate::form::record::TagRecord;
use crate::form::store::{ self, TagList };

pub struct InterfaceSystem {
    ui_handle: Weak<FormEditorUI>,
}

// Global instance so fetch-completion handlers can reach the UI
static INTERFACE_SYSTEM: Lazy<Mutex<Option<InterfaceSystem>>> = Lazy::new(|| Mutex::new(None));

impl InterfaceSystem {
    /// Create a new InterfaceSystem and wire the FormState callbacks
    pub fn new(ui_context: &FormEditorUI) -> Self {
        let ui_handle = ui_context.as_weak();

        let system = Self { ui_handle };

        let state = ui_context.global::<FormState>();

        // Scalar field edits go straight into the store
        state.on_scalar_edited(move |field, value| {
            Self::handle_scalar_edited(field.to_string(), value.to_string());
        });

        // Tag rename: rebuild the matching list in the store
        state.on_tag_renamed(move |list, id, value| {
            Self::handle_tag_renamed(list.to_string(), id.to_string(), value.to_string());
        });

        // Tag add: append a fresh entry, then re-push the list model
        state.on_tag_added(move |list| {
            Self::handle_tag_added(list.to_string());
        });

        // Upload is a stub: the picked value is only reported
        state.on_attachment_picked(move |path| {
            info!("attachment picked (not uploaded): {}", path);
        });

        state.on_submitted(move || {
            Self::handle_submitted();
        });

        system
    }

    /// Initialize the global InterfaceSystem instance
    pub fn initialize(ui_context: &FormEditorUI) {
        let system = Self::new(ui_context);
        *INTERFACE_SYSTEM.lock().unwrap() = Some(system);
    }

    /// Handle a scalar field edit coming from the UI
    pub fn handle_scalar_edited(field: String, value: String) {
        debug!("🔄 Field changed: {} = {}", field, value);
        store::set_scalar_field(&field, &value);
    }

    /// Handle a tag rename coming from the UI
    pub fn handle_tag_renamed(list_key: String, tag_id: String, value: String) {
        let Some(list) = TagList::parse(&list_key) else {
            warn!("⚠️ Unknown tag list: {}", list_key);
            return;
        };

        debug!("🔄 Tag renamed in {}: {} = {}", list.key(), tag_id, value);
        store::rename_tag(list, &tag_id, &value);
    }

    /// Handle a tag addition coming from the UI
    pub fn handle_tag_added(list_key: String) {
        let Some(list) = TagList::parse(&list_key) else {
            warn!("⚠️ Unknown tag list: {}", list_key);
            return;
        };

        if let Some(tag) = store::add_tag(list) {
            info!("added tag {} to {}", tag.id, list.key());
            Self::refresh_tag_list_global(list);
        }
    }

    /// Handle submit: assemble the current state and log it
    pub fn handle_submitted() {
        let Some(snapshot) = store::form_snapshot() else {
            return;
        };

        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => info!("📤 Submitted form data:\n{}", json),
            Err(err) => warn!("failed to serialize submitted form: {}", err),
        }
    }

    /// Push the seeded store state into the UI after a successful load
    pub fn show_loaded_form() {
        if let Some(ref system) = INTERFACE_SYSTEM.lock().unwrap().as_ref() {
            system.populate_from_store();
        }
    }

    /// Show the error banner after a failed load, leaving the form empty
    pub fn show_load_error() {
        if let Some(ref system) = INTERFACE_SYSTEM.lock().unwrap().as_ref() {
            system.display_load_error();
        }
    }

    /// Re-push one tag list model using the global instance
    fn refresh_tag_list_global(list: TagList) {
        if let Some(ref system) = INTERFACE_SYSTEM.lock().unwrap().as_ref() {
            system.refresh_tag_list(list);
        }
    }

    fn populate_from_store(&self) {
        let ui = match self.ui_handle.upgrade() {
            Some(ui) => ui,
            None => {
                return;
            }
        };

        let Some(snapshot) = store::form_snapshot() else {
            return;
        };

        let state = ui.global::<FormState>();
        state.set_slug(snapshot.fields.slug.into());
        state.set_name(snapshot.fields.name.into());
        state.set_released(snapshot.fields.released.into());
        state.set_rating(snapshot.fields.rating.into());
        state.set_rating_top(snapshot.fields.rating_top.into());
        state.set_ratings_count(snapshot.fields.ratings_count.into());
        state.set_reviews_count(snapshot.fields.reviews_count.into());
        state.set_created_at(snapshot.fields.created_at.into());
        state.set_updated_at(snapshot.fields.updated_at.into());

        state.set_genres(Self::tag_model(&snapshot.genres));
        state.set_platforms(Self::tag_model(&snapshot.platforms));

        state.set_load_failed(false);
        state.set_loading(false);
    }

    fn display_load_error(&self) {
        let ui = match self.ui_handle.upgrade() {
            Some(ui) => ui,
            None => {
                return;
            }
        };

        let state = ui.global::<FormState>();
        state.set_load_failed(true);
        state.set_loading(false);
    }

    fn refresh_tag_list(&self, list: TagList) {
        let ui = match self.ui_handle.upgrade() {
            Some(ui) => ui,
            None => {
                return;
            }
        };

        let model = Self::tag_model(&store::tags_snapshot(list));
        let state = ui.global::<FormState>();
        match list {
            TagList::Genres => state.set_genres(model),
            TagList::Platforms => state.set_platforms(model),
        }
    }

    fn tag_model(tags: &[TagRecord]) -> ModelRc<TagUI> {
        let rows: Vec<TagUI> = tags
            .iter()
            .map(|tag| TagUI {
                id: tag.id.clone().into(),
                name: tag.name.clone().into(),
            })
            .collect();
        ModelRc::new(VecModel::from(rows))
    }
}

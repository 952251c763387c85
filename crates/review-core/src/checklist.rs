//! Manual checklist persistence

use chrono::{DateTime, Utc};
use shared_types::{decode_checklist, iso_timestamp, Actor, ChecklistToggles, ManualChecklist};

use crate::attribution::reconcile;
use crate::error::StoreError;
use crate::store::{checklist_key, load_record, read_record, write_record, Loaded, PageStore};

/// Reads and writes the five-item checklist of a page
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckStateStore;

impl CheckStateStore {
    pub fn new() -> Self {
        Self
    }

    /// Load the checklist of a page. Absent or unreadable data yields five
    /// unchecked items.
    pub fn load<S: PageStore + ?Sized>(&self, store: &S, page_id: &str) -> Loaded<ManualChecklist> {
        load_record(store, &checklist_key(page_id), decode_checklist)
    }

    /// Merge the panel's checkbox states into the stored checklist and write
    /// the result back in a single blob.
    ///
    /// A failed read aborts the save. A malformed checklist is replaced, since
    /// the incoming toggles cover every item.
    pub fn save<S: PageStore + ?Sized>(
        &self,
        store: &mut S,
        page_id: &str,
        incoming: &ChecklistToggles,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<ManualChecklist, StoreError> {
        let key = checklist_key(page_id);
        let existing = read_record(&*store, &key, decode_checklist)?.into_inner();
        let now = iso_timestamp(now);

        let mut merged = ManualChecklist::default();
        for (key, prior) in existing.iter() {
            let checked = incoming.get(key);
            let item = merged.get_mut(key);
            item.checked = checked;
            item.attribution = reconcile(checked, prior.checked, &prior.attribution, actor, &now);
        }

        write_record(store, &key, &merged)?;
        tracing::debug!(
            "Saved checklist for page {}: {}/5 checked",
            page_id,
            merged.checked_count()
        );
        Ok(merged)
    }
}

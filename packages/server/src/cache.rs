use std::sync::Arc;

use dashmap::DashMap;

use crate::models::property::PropertyView;

/// Tag-invalidated read cache for assembled property documents.
///
/// The only cross-request shared state in the server. Writers never mutate
/// cached entries; every property/block mutation drops the tenant's tag and
/// the next read rebuilds the view from the database.
#[derive(Clone, Default)]
pub struct PropertyCache {
    entries: Arc<DashMap<String, Arc<PropertyView>>>,
}

impl PropertyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache tag for a tenant's property document.
    pub fn tag(project_id: &str) -> String {
        format!("project:{project_id}_property")
    }

    pub fn get(&self, project_id: &str) -> Option<Arc<PropertyView>> {
        self.entries
            .get(&Self::tag(project_id))
            .map(|e| Arc::clone(e.value()))
    }

    pub fn insert(&self, project_id: &str, view: Arc<PropertyView>) {
        self.entries.insert(Self::tag(project_id), view);
    }

    pub fn invalidate(&self, project_id: &str) {
        self.entries.remove(&Self::tag(project_id));
    }
}

//! Shared router state. Built once at startup and cloned into each request.

use crate::services::{annotation_store::AnnotationStore, asset_service::AssetService};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub store: AnnotationStore,
    pub assets: AssetService,
}

impl AppState {
    pub fn new(store: AnnotationStore, assets: AssetService) -> Self {
        Self { store, assets }
    }
}

impl FromRef<AppState> for AnnotationStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for AssetService {
    fn from_ref(state: &AppState) -> Self {
        state.assets.clone()
    }
}

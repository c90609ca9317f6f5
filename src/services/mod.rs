pub mod annotation_store;
pub mod asset_service;

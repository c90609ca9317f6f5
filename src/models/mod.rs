//! Core data models for the annotation service.
//!
//! Images own their annotations as an embedded array; labels live in their
//! own collection. All types serialize with the camelCase field names the
//! annotation client expects.

pub mod image;
pub mod label;

//! Domain layer containing entities and pure dataset transforms.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, timestamps, validation errors)
//! - `action` - Candidate climate actions and field coercion
//! - `profile` - Synthetic personas and their closed enumerations
//! - `combination` - Pair records, preference labels, scored records
//! - `generator` - Sampling of action pairs per persona
//! - `augmentation` - Symmetry augmentation of scored sets

pub mod action;
pub mod augmentation;
pub mod combination;
pub mod foundation;
pub mod generator;
pub mod profile;

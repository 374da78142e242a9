//! Action Prioritizer - Synthetic preference data for climate action ranking
//!
//! This crate builds pairwise training data for a ranking model: it pairs
//! candidate climate actions per synthetic persona, asks a scoring oracle
//! which action matters more for that persona, and augments the scored set
//! with label-flipped mirrors.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

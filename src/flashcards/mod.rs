//! Flashcard and spaced repetition system
//!
//! This module provides:
//! - Card storage (one JSON document with cards and review log)
//! - SM-2 spaced repetition algorithm
//! - Card selection (due queue, related-file random pick, practice pool)
//! - Review statistics and day streaks

pub mod algorithm;
pub mod models;
pub mod selector;
pub mod stats;
pub mod storage;

pub use models::*;
pub use storage::{CardDraft, FlashcardStorage};

//! Roster audit library - catalog normalization and roster reconciliation.

pub mod catalog;
pub mod models;
pub mod normalize;
pub mod progress;
pub mod reconcile;
pub mod report;
pub mod roster;
pub mod sources;

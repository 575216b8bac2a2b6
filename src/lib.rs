//! Compensation explorer: facet filters over a salary table and the
//! aggregates derived from the filtered rows.
//!
//! `data` holds the UI-free pipeline and can be driven on its own; the
//! remaining modules make up the egui application launched by `main.rs`.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;

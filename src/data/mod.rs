//! Data layer: core types, loading, filtering, and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → CompensationDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ catalog   │  distinct values per facet (once per load)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  FilterState + facet predicates → FilteredView
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  summary, top roles, histogram, country means
//!   └───────────┘
//! ```
//!
//! `session` ties the pieces together for one user and memoizes the last
//! snapshot.

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod session;

#[cfg(test)]
mod testing;

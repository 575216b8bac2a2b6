use std::sync::Arc;

use super::aggregate::{AggregateSettings, AggregateSnapshot};
use super::catalog::FacetCatalog;
use super::error::SelectionError;
use super::filter::{apply, FilterState};
use super::model::{CompensationDataset, Facet, FacetValue, Record};

/// What the rendering layer reads after every interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub total_records: usize,
    pub filtered_count: usize,
    pub aggregates: AggregateSnapshot,
}

/// One user's exploration of a loaded table.
///
/// The dataset is read-only and shared; the filter state is the only mutable
/// part, changed through `select*`, `toggle`, and `reset`. The last snapshot
/// is memoized together with the filters and settings it was computed from.
pub struct Session {
    dataset: Arc<CompensationDataset>,
    catalog: FacetCatalog,
    filters: FilterState,
    settings: AggregateSettings,
    cached: Option<(FilterState, AggregateSettings, Arc<Snapshot>)>,
}

impl Session {
    pub fn new(dataset: Arc<CompensationDataset>, settings: AggregateSettings) -> Self {
        let catalog = FacetCatalog::from_dataset(&dataset);
        let filters = FilterState::initialize(&catalog);
        Session {
            dataset,
            catalog,
            filters,
            settings,
            cached: None,
        }
    }

    pub fn catalog(&self) -> &FacetCatalog {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn settings(&self) -> &AggregateSettings {
        &self.settings
    }

    /// Replace a facet's selection; returns the values that were not in its domain.
    pub fn select<I>(&mut self, facet: Facet, values: I) -> Vec<FacetValue>
    where
        I: IntoIterator<Item = FacetValue>,
    {
        self.filters.select(&self.catalog, facet, values)
    }

    pub fn select_named<I>(&mut self, facet: &str, values: I) -> Result<Vec<FacetValue>, SelectionError>
    where
        I: IntoIterator<Item = FacetValue>,
    {
        self.filters.select_named(&self.catalog, facet, values)
    }

    pub fn toggle(&mut self, facet: Facet, value: &FacetValue) {
        self.filters.toggle(&self.catalog, facet, value);
    }

    pub fn select_all(&mut self, facet: Facet) {
        self.filters.select_all(&self.catalog, facet);
    }

    pub fn select_none(&mut self, facet: Facet) {
        self.filters.select_none(facet);
    }

    pub fn reset(&mut self) {
        log::info!("Resetting all facet selections");
        self.filters.reset(&self.catalog);
    }

    /// Records passing the current filters, in table order.
    pub fn filtered_records(&self) -> Vec<&Record> {
        let view = apply(&self.dataset, &self.filters);
        view.iter().collect()
    }

    /// Recompute the snapshot from the raw table and the current filters.
    pub fn snapshot(&self) -> Snapshot {
        let view = apply(&self.dataset, &self.filters);
        log::debug!(
            "Recomputed aggregates: {} of {} records pass",
            view.len(),
            self.dataset.records.len()
        );
        Snapshot {
            total_records: self.dataset.records.len(),
            filtered_count: view.len(),
            aggregates: AggregateSnapshot::compute(&view, &self.settings),
        }
    }

    /// Memoized [`Session::snapshot`], recomputed whenever the filters change.
    pub fn current_snapshot(&mut self) -> Arc<Snapshot> {
        if let Some((filters, settings, snapshot)) = &self.cached {
            if *filters == self.filters && *settings == self.settings {
                return Arc::clone(snapshot);
            }
        }
        let snapshot = Arc::new(self.snapshot());
        self.cached = Some((
            self.filters.clone(),
            self.settings.clone(),
            Arc::clone(&snapshot),
        ));
        snapshot
    }
}

use std::collections::{BTreeMap, BTreeSet};

use super::catalog::FacetCatalog;
use super::error::SelectionError;
use super::model::{CompensationDataset, Facet, FacetValue, Record};

// ---------------------------------------------------------------------------
// Filter state: which domain values are selected per facet
// ---------------------------------------------------------------------------

/// Per-facet selection. Every facet always has an entry, and every entry is a
/// subset of that facet's domain. An empty set selects nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    selected: BTreeMap<Facet, BTreeSet<FacetValue>>,
}

impl FilterState {
    /// All values selected (i.e., show everything).
    pub fn initialize(catalog: &FacetCatalog) -> Self {
        FilterState {
            selected: catalog
                .iter()
                .map(|(facet, vals)| (facet, vals.clone()))
                .collect(),
        }
    }

    /// Restore every facet to its full domain.
    pub fn reset(&mut self, catalog: &FacetCatalog) {
        *self = Self::initialize(catalog);
    }

    pub fn selected(&self, facet: Facet) -> &BTreeSet<FacetValue> {
        // initialize seeds every facet
        &self.selected[&facet]
    }

    /// Replace the selection for `facet`. Values outside the domain are
    /// dropped and returned to the caller.
    pub fn select<I>(&mut self, catalog: &FacetCatalog, facet: Facet, values: I) -> Vec<FacetValue>
    where
        I: IntoIterator<Item = FacetValue>,
    {
        let mut kept = BTreeSet::new();
        let mut dropped = Vec::new();
        for value in values {
            if catalog.contains(facet, &value) {
                kept.insert(value);
            } else {
                dropped.push(value);
            }
        }
        if !dropped.is_empty() {
            log::warn!("Ignoring values outside the {facet} domain: {dropped:?}");
        }
        self.selected.insert(facet, kept);
        dropped
    }

    /// Same as [`FilterState::select`] with the facet given by name.
    /// An unknown name leaves the state untouched.
    pub fn select_named<I>(
        &mut self,
        catalog: &FacetCatalog,
        facet: &str,
        values: I,
    ) -> Result<Vec<FacetValue>, SelectionError>
    where
        I: IntoIterator<Item = FacetValue>,
    {
        let facet = Facet::parse(facet)?;
        Ok(self.select(catalog, facet, values))
    }

    /// Toggle a single value in a facet's selection.
    pub fn toggle(&mut self, catalog: &FacetCatalog, facet: Facet, value: &FacetValue) {
        if !catalog.contains(facet, value) {
            log::warn!("Ignoring toggle of {value} outside the {facet} domain");
            return;
        }
        let selected = self.selected.entry(facet).or_default();
        if selected.contains(value) {
            selected.remove(value);
        } else {
            selected.insert(value.clone());
        }
    }

    /// Select all values of a facet.
    pub fn select_all(&mut self, catalog: &FacetCatalog, facet: Facet) {
        self.selected.insert(facet, catalog.domain(facet).clone());
    }

    /// Deselect all values of a facet.
    pub fn select_none(&mut self, facet: Facet) {
        self.selected.insert(facet, BTreeSet::new());
    }

    /// Number of selected values per facet, in display order.
    pub fn active_counts(&self) -> Vec<(Facet, usize)> {
        Facet::ALL
            .iter()
            .map(|f| (*f, self.selected(*f).len()))
            .collect()
    }

    /// Plain membership on every facet; an empty set matches nothing.
    fn matches(&self, record: &Record) -> bool {
        self.selected
            .iter()
            .all(|(facet, selected)| selected.contains(&facet.value_of(record)))
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Records of a dataset that pass the current filters, in table order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a CompensationDataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let dataset: &'a CompensationDataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.records[i])
    }
}

/// Keep the records whose value lies in the selected set of every facet.
pub fn apply<'a>(dataset: &'a CompensationDataset, filters: &FilterState) -> FilteredView<'a> {
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| filters.matches(record))
        .map(|(i, _)| i)
        .collect();
    FilteredView { dataset, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::{record, scenario};

    fn setup() -> (CompensationDataset, FacetCatalog) {
        let dataset = scenario();
        let catalog = FacetCatalog::from_dataset(&dataset);
        (dataset, catalog)
    }

    #[test]
    fn full_selection_keeps_every_record() {
        let (dataset, catalog) = setup();
        let state = FilterState::initialize(&catalog);
        let view = apply(&dataset, &state);
        assert_eq!(view.indices(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn year_selection_narrows_the_view() {
        let (dataset, catalog) = setup();
        let mut state = FilterState::initialize(&catalog);
        let dropped = state.select(&catalog, Facet::Year, [FacetValue::Integer(2023)]);
        assert!(dropped.is_empty());

        let view = apply(&dataset, &state);
        assert_eq!(view.len(), 3);
        assert!(view.iter().all(|r| r.year == 2023));
    }

    #[test]
    fn facets_combine_with_and() {
        let (dataset, catalog) = setup();
        let mut state = FilterState::initialize(&catalog);
        state.select(&catalog, Facet::Year, [FacetValue::Integer(2022)]);
        state.select(&catalog, Facet::Seniority, [FacetValue::from("MI")]);

        let view = apply(&dataset, &state);
        assert_eq!(view.indices(), &[4]);
    }

    #[test]
    fn facet_order_does_not_matter() {
        let (dataset, catalog) = setup();
        let mut a = FilterState::initialize(&catalog);
        a.select(&catalog, Facet::Year, [FacetValue::Integer(2023)]);
        a.select(&catalog, Facet::Seniority, [FacetValue::from("SE")]);

        let mut b = FilterState::initialize(&catalog);
        b.select(&catalog, Facet::Seniority, [FacetValue::from("SE")]);
        b.select(&catalog, Facet::Year, [FacetValue::Integer(2023)]);

        assert_eq!(a, b);
        assert_eq!(
            apply(&dataset, &a).indices(),
            apply(&dataset, &b).indices()
        );
    }

    #[test]
    fn empty_selection_hides_everything() {
        let (dataset, catalog) = setup();
        let mut state = FilterState::initialize(&catalog);
        state.select_none(Facet::Seniority);
        assert!(apply(&dataset, &state).is_empty());

        state.select(&catalog, Facet::Year, Vec::new());
        assert!(apply(&dataset, &state).is_empty());
    }

    #[test]
    fn state_from_another_catalog_matches_nothing() {
        let dataset = CompensationDataset::new(vec![
            record(2022, "SE", "A", "USA", 1.0),
            record(2023, "SE", "B", "USA", 2.0),
        ]);
        let other = FacetCatalog::from_records(&[
            record(2020, "SE", "A", "USA", 1.0),
            record(2021, "SE", "B", "USA", 2.0),
        ]);
        let state = FilterState::initialize(&other);
        assert!(apply(&dataset, &state).is_empty());
    }

    #[test]
    fn select_clamps_values_outside_the_domain() {
        let (_, catalog) = setup();
        let mut state = FilterState::initialize(&catalog);
        let dropped = state.select(
            &catalog,
            Facet::Year,
            [FacetValue::Integer(2023), FacetValue::Integer(1999)],
        );
        assert_eq!(dropped, vec![FacetValue::Integer(1999)]);
        assert!(state
            .selected(Facet::Year)
            .is_subset(catalog.domain(Facet::Year)));
        assert_eq!(state.selected(Facet::Year).len(), 1);
    }

    #[test]
    fn unknown_facet_name_leaves_state_untouched() {
        let (_, catalog) = setup();
        let mut state = FilterState::initialize(&catalog);
        let before = state.clone();
        let err = state
            .select_named(&catalog, "remote", [FacetValue::from("x")])
            .unwrap_err();
        assert_eq!(err, SelectionError::UnknownFacet("remote".to_string()));
        assert_eq!(state, before);

        state
            .select_named(&catalog, "contractType", [FacetValue::from("FT")])
            .unwrap();
        assert_eq!(state.selected(Facet::ContractType).len(), 1);
    }

    #[test]
    fn reset_is_idempotent_and_restores_full_domains() {
        let (dataset, catalog) = setup();
        let mut state = FilterState::initialize(&catalog);
        state.select_none(Facet::Year);
        state.toggle(&catalog, Facet::Seniority, &FacetValue::from("SE"));

        state.reset(&catalog);
        let once = state.clone();
        state.reset(&catalog);
        assert_eq!(state, once);
        assert_eq!(state, FilterState::initialize(&catalog));
        assert_eq!(apply(&dataset, &state).len(), dataset.records.len());
    }

    #[test]
    fn shrinking_a_selection_never_grows_the_view() {
        let dataset = CompensationDataset::new(vec![
            record(2020, "EN", "A", "USA", 1.0),
            record(2021, "MI", "B", "USA", 2.0),
            record(2022, "SE", "C", "BRA", 3.0),
            record(2022, "EX", "A", "BRA", 4.0),
        ]);
        let catalog = FacetCatalog::from_dataset(&dataset);
        let mut state = FilterState::initialize(&catalog);
        let mut previous = apply(&dataset, &state).len();

        for value in catalog.domain(Facet::Seniority).clone() {
            state.toggle(&catalog, Facet::Seniority, &value);
            let now = apply(&dataset, &state).len();
            assert!(now <= previous);
            previous = now;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn toggle_ignores_foreign_values() {
        let (_, catalog) = setup();
        let mut state = FilterState::initialize(&catalog);
        state.toggle(&catalog, Facet::CompanySize, &FacetValue::from("XL"));
        assert_eq!(state, FilterState::initialize(&catalog));
    }

    #[test]
    fn active_counts_follow_selection() {
        let (_, catalog) = setup();
        let mut state = FilterState::initialize(&catalog);
        state.select_none(Facet::ContractType);
        assert_eq!(
            state.active_counts(),
            vec![
                (Facet::Year, 2),
                (Facet::Seniority, 2),
                (Facet::ContractType, 0),
                (Facet::CompanySize, 1),
            ]
        );
    }
}

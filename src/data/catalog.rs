use std::collections::{BTreeMap, BTreeSet};

use super::model::{CompensationDataset, Facet, FacetValue, Record};

/// Distinct values observed per facet, computed once per load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetCatalog {
    domains: BTreeMap<Facet, BTreeSet<FacetValue>>,
}

impl FacetCatalog {
    /// Build the facet domains from the loaded records.
    /// Every facet gets an entry, empty when there are no records.
    pub fn from_records(records: &[Record]) -> Self {
        let mut domains: BTreeMap<Facet, BTreeSet<FacetValue>> =
            Facet::ALL.iter().map(|f| (*f, BTreeSet::new())).collect();

        for record in records {
            for facet in Facet::ALL {
                domains
                    .entry(facet)
                    .or_default()
                    .insert(facet.value_of(record));
            }
        }
        FacetCatalog { domains }
    }

    pub fn from_dataset(dataset: &CompensationDataset) -> Self {
        Self::from_records(&dataset.records)
    }

    /// Sorted domain of `facet`.
    pub fn domain(&self, facet: Facet) -> &BTreeSet<FacetValue> {
        // from_records seeds every facet
        &self.domains[&facet]
    }

    pub fn contains(&self, facet: Facet, value: &FacetValue) -> bool {
        self.domain(facet).contains(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Facet, &BTreeSet<FacetValue>)> {
        self.domains.iter().map(|(f, vals)| (*f, vals))
    }
}

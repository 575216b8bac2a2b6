//! Derived views over a filtered subset.
//!
//! Every transform is total: an empty view yields an explicit "no data"
//! value, never a division by zero or a panic.

use std::collections::{BTreeMap, HashMap};

use super::filter::FilteredView;
use super::model::Record;

/// Modal role shown when there is nothing to count.
pub const NO_DATA_ROLE: &str = "—";

// ---------------------------------------------------------------------------
// Summary scalars
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub max: f64,
    pub count: usize,
    pub modal_role: String,
}

impl Summary {
    pub fn no_data() -> Self {
        Summary {
            mean: 0.0,
            max: 0.0,
            count: 0,
            modal_role: NO_DATA_ROLE.to_string(),
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.count == 0
    }
}

/// Mean and max compensation, record count and most frequent role.
pub fn summarize<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut count = 0usize;
    let mut total = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut roles = FirstSeen::default();

    for record in records {
        count += 1;
        total += record.compensation_usd;
        max = max.max(record.compensation_usd);
        roles.group(&record.role).push(record.compensation_usd);
    }

    if count == 0 {
        return Summary::no_data();
    }

    // Strict comparison keeps the first-seen role among equal counts.
    let mut modal: Option<(&str, usize)> = None;
    for (role, values) in roles.iter() {
        if modal.map_or(true, |(_, best)| values.len() > best) {
            modal = Some((role, values.len()));
        }
    }

    Summary {
        mean: total / count as f64,
        max,
        count,
        modal_role: modal.map_or(NO_DATA_ROLE, |(role, _)| role).to_string(),
    }
}

// ---------------------------------------------------------------------------
// Top-N role ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RoleMean {
    pub role: String,
    pub mean: f64,
}

/// The `n` roles with the highest mean compensation, ordered ascending by
/// mean so a horizontal bar chart reads largest-first from the top.
pub fn top_roles<'a, I>(records: I, n: usize) -> Vec<RoleMean>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups = FirstSeen::default();
    for record in records {
        groups.group(&record.role).push(record.compensation_usd);
    }

    let mut ranking: Vec<RoleMean> = groups
        .iter()
        .map(|(role, values)| RoleMean {
            role: role.to_string(),
            mean: mean(values),
        })
        .collect();

    // Stable sorts: ties keep first-encountered order.
    ranking.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    ranking.truncate(n);
    ranking.sort_by(|a, b| a.mean.total_cmp(&b.mean));
    ranking
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// One histogram bucket covering `[lower, upper)`; the last bucket also
/// includes `upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl Bucket {
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Histogram {
    pub buckets: Vec<Bucket>,
}

impl Histogram {
    pub fn is_no_data(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

/// Partition the observed compensation range into `bins` equal-width buckets.
pub fn histogram<'a, I>(records: I, bins: usize) -> Histogram
where
    I: IntoIterator<Item = &'a Record>,
{
    let values: Vec<f64> = records.into_iter().map(|r| r.compensation_usd).collect();
    if values.is_empty() || bins == 0 {
        return Histogram::default();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range <= 0.0 {
        return Histogram {
            buckets: vec![Bucket {
                lower: min,
                upper: max,
                count: values.len(),
            }],
        };
    }

    let width = range / bins as f64;
    let mut buckets: Vec<Bucket> = (0..bins)
        .map(|i| Bucket {
            lower: min + i as f64 * width,
            upper: if i + 1 == bins {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();

    for v in values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        buckets[idx].count += 1;
    }
    Histogram { buckets }
}

// ---------------------------------------------------------------------------
// Per-country means for one role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum CountryMeans {
    /// The filtered view is empty.
    NoData,
    /// Records exist, but none has the target role.
    NoMatchingRole { role: String },
    /// Mean compensation keyed by ISO-3166 alpha-3 code.
    Means(BTreeMap<String, f64>),
}

impl CountryMeans {
    pub fn means(&self) -> Option<&BTreeMap<String, f64>> {
        match self {
            CountryMeans::Means(m) => Some(m),
            _ => None,
        }
    }
}

/// Mean compensation per residence country among records with `role`.
pub fn country_means<'a, I>(records: I, role: &str) -> CountryMeans
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut seen_any = false;
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for record in records {
        seen_any = true;
        if record.role != role {
            continue;
        }
        let entry = sums.entry(record.residence_iso3.as_str()).or_insert((0.0, 0));
        entry.0 += record.compensation_usd;
        entry.1 += 1;
    }

    if !seen_any {
        return CountryMeans::NoData;
    }
    if sums.is_empty() {
        return CountryMeans::NoMatchingRole {
            role: role.to_string(),
        };
    }
    CountryMeans::Means(
        sums.into_iter()
            .map(|(country, (sum, n))| (country.to_string(), sum / n as f64))
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Snapshot bundle
// ---------------------------------------------------------------------------

/// Parameters of the derived views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSettings {
    pub top_n: usize,
    pub histogram_bins: usize,
    pub target_role: String,
}

impl Default for AggregateSettings {
    fn default() -> Self {
        AggregateSettings {
            top_n: 10,
            histogram_bins: 30,
            target_role: "Data Scientist".to_string(),
        }
    }
}

/// Every derived view of one filtered subset.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSnapshot {
    pub summary: Summary,
    pub top_roles: Vec<RoleMean>,
    pub histogram: Histogram,
    pub countries: CountryMeans,
}

impl AggregateSnapshot {
    pub fn compute(view: &FilteredView<'_>, settings: &AggregateSettings) -> Self {
        AggregateSnapshot {
            summary: summarize(view.iter()),
            top_roles: top_roles(view.iter(), settings.top_n),
            histogram: histogram(view.iter(), settings.histogram_bins),
            countries: country_means(view.iter(), &settings.target_role),
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.summary.is_no_data()
    }
}

// ---------------------------------------------------------------------------
// helpers
// ---------------------------------------------------------------------------

/// Groups keyed by string, iterated in first-encountered order.
#[derive(Default)]
struct FirstSeen<'a> {
    order: Vec<(&'a str, Vec<f64>)>,
    index: HashMap<&'a str, usize>,
}

impl<'a> FirstSeen<'a> {
    fn group(&mut self, key: &'a str) -> &mut Vec<f64> {
        let idx = match self.index.get(key) {
            Some(&i) => i,
            None => {
                self.order.push((key, Vec::new()));
                self.index.insert(key, self.order.len() - 1);
                self.order.len() - 1
            }
        };
        &mut self.order[idx].1
    }

    fn iter(&self) -> impl Iterator<Item = (&'a str, &[f64])> + '_ {
        self.order.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

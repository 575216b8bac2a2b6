use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::color::{SequentialScale, generate_palette};
use crate::data::aggregate::{CountryMeans, Histogram, RoleMean};
use crate::ui::{format_count, format_usd};

/// Axis formatter showing `labels[i]` at integer position `i`.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String + 'static {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let pos = mark.value;
        if pos.fract() != 0.0 || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Top roles (horizontal bars)
// ---------------------------------------------------------------------------

/// Ranking arrives ascending by mean, so the last (largest) bar is drawn on top.
pub fn top_roles_chart(ui: &mut Ui, ranking: &[RoleMean]) {
    ui.strong(format!("Top {} roles by mean salary", ranking.len()));

    let palette = generate_palette(ranking.len());
    let bars: Vec<Bar> = ranking
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, (entry, color))| {
            Bar::new(i as f64, entry.mean)
                .name(format!("{}: {}", entry.role, format_usd(entry.mean)))
                .fill(color)
        })
        .collect();
    let labels = ranking.iter().map(|r| r.role.clone()).collect();

    Plot::new("top_roles")
        .height(360.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_label("Mean salary (USD)")
        .y_axis_formatter(category_axis(labels))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().width(0.7));
        });
}

// ---------------------------------------------------------------------------
// Salary distribution
// ---------------------------------------------------------------------------

pub fn histogram_chart(ui: &mut Ui, histogram: &Histogram) {
    ui.strong("Salary distribution");

    let bars: Vec<Bar> = histogram
        .buckets
        .iter()
        .map(|b| {
            // A single degenerate bucket still needs a visible width.
            let width = if b.width() > 0.0 { b.width() } else { 1.0 };
            Bar::new(b.midpoint(), b.count as f64)
                .width(width)
                .name(format!(
                    "{} – {}: {}",
                    format_usd(b.lower),
                    format_usd(b.upper),
                    format_count(b.count)
                ))
        })
        .collect();

    Plot::new("salary_histogram")
        .height(360.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_label("Annual salary (USD)")
        .y_axis_label("Records")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}

// ---------------------------------------------------------------------------
// Per-country means for the target role
// ---------------------------------------------------------------------------

pub fn country_chart(ui: &mut Ui, countries: &CountryMeans, role: &str) {
    ui.strong(format!("Mean {role} salary by country"));

    let means = match countries {
        CountryMeans::NoData => {
            ui.label(RichText::new("⚠ No data available for display.").color(Color32::YELLOW));
            return;
        }
        CountryMeans::NoMatchingRole { role } => {
            ui.label(format!("No {role} records match the current filters."));
            return;
        }
        CountryMeans::Means(means) => means,
    };

    let scale = SequentialScale::new(means.values().copied());
    let bars: Vec<Bar> = means
        .iter()
        .enumerate()
        .map(|(i, (country, mean))| {
            Bar::new(i as f64, *mean)
                .name(format!("{country}: {}", format_usd(*mean)))
                .fill(scale.color_for(*mean))
        })
        .collect();
    let labels = means.keys().cloned().collect();

    Plot::new("country_means")
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_label("Mean salary (USD)")
        .y_axis_formatter(category_axis(labels))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().width(0.7));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_axis_labels_integer_marks_only() {
        let fmt = category_axis(vec!["A".to_string(), "B".to_string()]);
        let range = 0.0..=2.0;
        let mark = |value| GridMark {
            value,
            step_size: 0.5,
        };
        assert_eq!(fmt(mark(0.0), &range), "A");
        assert_eq!(fmt(mark(1.0), &range), "B");
        assert_eq!(fmt(mark(0.5), &range), "");
        assert_eq!(fmt(mark(2.0), &range), "");
        assert_eq!(fmt(mark(-1.0), &range), "");
    }
}

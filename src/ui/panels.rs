use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::aggregate::Summary;
use crate::data::model::{Facet, FacetValue};
use crate::state::{AppState, Tab};
use crate::ui::{format_count, format_usd, plot, table};

// ---------------------------------------------------------------------------
// Left side panel – facet filters
// ---------------------------------------------------------------------------

enum FacetAction {
    Toggle(Facet, FacetValue),
    All(Facet),
    None(Facet),
    Reset,
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.label("Narrow the records to explore compensation patterns.");
    ui.separator();

    let Some(session) = state.session.as_mut() else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut actions = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for facet in Facet::ALL {
                let domain = session.catalog().domain(facet);
                let selected = session.filters().selected(facet);
                let header_text = format!("{}  ({}/{})", facet.label(), selected.len(), domain.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(facet.name())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                actions.push(FacetAction::All(facet));
                            }
                            if ui.small_button("None").clicked() {
                                actions.push(FacetAction::None(facet));
                            }
                        });

                        for value in domain {
                            let mut checked = selected.contains(value);
                            if ui.checkbox(&mut checked, value.to_string()).changed() {
                                actions.push(FacetAction::Toggle(facet, value.clone()));
                            }
                        }
                    });
            }

            ui.separator();
            if ui.button("⟲ Reset filters").clicked() {
                actions.push(FacetAction::Reset);
            }
        });

    for action in actions {
        match action {
            FacetAction::Toggle(facet, value) => session.toggle(facet, &value),
            FacetAction::All(facet) => session.select_all(facet),
            FacetAction::None(facet) => session.select_none(facet),
            FacetAction::Reset => session.reset(),
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = state.session.as_mut() {
            let snapshot = session.current_snapshot();
            ui.label(format!(
                "{} records loaded, {} visible",
                format_count(snapshot.total_records),
                format_count(snapshot.filtered_count)
            ));

            ui.separator();

            let active: Vec<String> = session
                .filters()
                .active_counts()
                .into_iter()
                .map(|(facet, n)| format!("{}: {n}", facet.label()))
                .collect();
            ui.label(RichText::new(format!("Active filters → {}", active.join(" | "))).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – metrics and tabs
// ---------------------------------------------------------------------------

/// Render the overview metrics and the selected tab.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(session) = state.session.as_mut() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore salaries  (File → Open…)");
        });
        return;
    };

    let snapshot = session.current_snapshot();
    let aggregates = &snapshot.aggregates;

    ui.heading("Overview");
    metrics_row(ui, &aggregates.summary);
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.label());
        }
    });
    ui.separator();

    match state.tab {
        Tab::Analyses => {
            ui.columns(2, |cols| {
                if aggregates.top_roles.is_empty() {
                    cols[0].label("Adjust the filters to see roles.");
                } else {
                    plot::top_roles_chart(&mut cols[0], &aggregates.top_roles);
                }
                if aggregates.histogram.is_no_data() {
                    cols[1].label("Adjust the filters to see the distribution.");
                } else {
                    plot::histogram_chart(&mut cols[1], &aggregates.histogram);
                }
            });
        }
        Tab::Geography => {
            plot::country_chart(ui, &aggregates.countries, &session.settings().target_role);
        }
        Tab::Data => {
            let rows = session.filtered_records();
            table::data_table(ui, &rows);
        }
    }
}

fn metrics_row(ui: &mut Ui, summary: &Summary) {
    let metrics = [
        ("💰 Mean salary", format_usd(summary.mean)),
        ("🚀 Max salary", format_usd(summary.max)),
        ("📊 Records", format_count(summary.count)),
        ("🏆 Most common role", summary.modal_role.clone()),
    ];
    ui.columns(metrics.len(), |cols| {
        for (col, (label, value)) in cols.iter_mut().zip(metrics) {
            col.group(|ui: &mut Ui| {
                ui.label(RichText::new(label).weak());
                ui.heading(value);
            });
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open compensation data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

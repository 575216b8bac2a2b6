use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Record;
use crate::ui::{format_count, format_usd};

const HEADERS: [&str; 7] = [
    "Year",
    "Seniority",
    "Contract",
    "Company size",
    "Role",
    "Residence",
    "Salary (USD)",
];

/// Filtered records, one row each.
pub fn data_table(ui: &mut Ui, rows: &[&Record]) {
    ui.strong(format!("Filtered records ({})", format_count(rows.len())));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto(), HEADERS.len() - 1)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let record = rows[row.index()];
                let cells = [
                    record.year.to_string(),
                    record.seniority.clone(),
                    record.contract_type.clone(),
                    record.company_size.clone(),
                    record.role.clone(),
                    record.residence_iso3.clone(),
                    format_usd(record.compensation_usd),
                ];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

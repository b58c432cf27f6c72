use eframe::egui::{self, Align, Layout, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::grid::{entries_label, page_count};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Data table: search box, pager and one page of the filtered rows
// ---------------------------------------------------------------------------

pub fn data_table(ui: &mut Ui, state: &mut AppState) {
    let AppState {
        pipeline,
        table_view,
        ..
    } = state;
    let snapshot = pipeline.snapshot();
    let view = &snapshot.view;
    table_view.sync(snapshot.generation);

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Search:");
        let mut search = table_view.search.clone();
        if ui.text_edit_singleline(&mut search).changed() {
            table_view.set_search(search);
        }
    });

    let matches = table_view.matching_rows(view);
    let total = matches.len();

    ui.horizontal(|ui: &mut Ui| {
        let page = table_view.page();
        let last = page_count(total) - 1;
        if ui.add_enabled(page > 0, egui::Button::new("« First")).clicked() {
            table_view.first_page();
        }
        if ui.add_enabled(page > 0, egui::Button::new("‹ Prev")).clicked() {
            table_view.prev_page();
        }
        ui.label(format!("Page {} of {}", page.min(last) + 1, last + 1));
        if ui.add_enabled(page < last, egui::Button::new("Next ›")).clicked() {
            table_view.next_page(total);
        }
        if ui.add_enabled(page < last, egui::Button::new("Last »")).clicked() {
            table_view.last_page(total);
        }
    });

    let rows = table_view.current_page(&matches);
    ui.label(entries_label(table_view.page(), rows.len(), total, view.len()));
    ui.add_space(4.0);

    let columns = &view.source().columns;
    ScrollArea::horizontal()
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .cell_layout(Layout::left_to_right(Align::Center))
                .columns(Column::auto().at_least(60.0), columns.len())
                .header(22.0, |mut header| {
                    for col in columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(col);
                        });
                    }
                })
                .body(|mut body| {
                    for &pos in rows {
                        let Some(rec) = view.get(pos) else {
                            continue;
                        };
                        body.row(20.0, |mut row| {
                            for cell in &rec.cells {
                                row.col(|ui: &mut Ui| {
                                    ui.label(cell);
                                });
                            }
                        });
                    }
                });
        });
}

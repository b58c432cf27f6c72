use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::analytics::charts::{AgeHistogram, GenderOutcomeCounts, ScatterChart};
use crate::color::OutcomeColors;
use crate::data::model::Outcome;

// ---------------------------------------------------------------------------
// Age histogram, stacked by outcome
// ---------------------------------------------------------------------------

pub fn age_histogram(ui: &mut Ui, hist: &AgeHistogram, colors: &OutcomeColors, height: f32) {
    let plotted = hist.total(Outcome::NoStroke) + hist.total(Outcome::Stroke);
    ui.strong(format!("Age distribution by stroke outcome ({plotted} patients)"));

    let series = |outcome: Outcome| {
        let bars = hist
            .bins
            .iter()
            .map(|b| {
                Bar::new(b.center(), b.count(outcome) as f64)
                    .width(hist.bin_width * 0.95)
                    .name(format!("{}–{}", b.start, b.end))
            })
            .collect();
        BarChart::new(bars)
            .name(outcome.label())
            .color(colors.color_for(outcome))
    };
    let no_stroke = series(Outcome::NoStroke);
    let stroke = series(Outcome::Stroke).stack_on(&[&no_stroke]);

    Plot::new("age_histogram")
        .legend(Legend::default())
        .x_axis_label("Age")
        .y_axis_label("Patients")
        .height(height)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(no_stroke);
            plot_ui.bar_chart(stroke);
        });
}

// ---------------------------------------------------------------------------
// Age vs numeric field scatter
// ---------------------------------------------------------------------------

pub fn scatter(ui: &mut Ui, id: &str, chart: &ScatterChart, colors: &OutcomeColors, height: f32) {
    ui.strong(format!("{} ({} patients)", chart.title, chart.point_count()));

    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label("Age")
        .y_axis_label(chart.y_label)
        .height(height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points = Points::new(PlotPoints::from(series.points.clone()))
                    .name(series.outcome.label())
                    .color(colors.color_for(series.outcome))
                    .radius(2.0);
                plot_ui.points(points);
            }
        });
}

// ---------------------------------------------------------------------------
// Gender × outcome grouped bars
// ---------------------------------------------------------------------------

const GROUP_BAR_WIDTH: f64 = 0.38;

pub fn gender_bars(ui: &mut Ui, counts: &GenderOutcomeCounts, colors: &OutcomeColors, height: f32) {
    ui.strong("Stroke outcome by gender");

    let genders: Vec<String> = counts.genders().into_iter().map(String::from).collect();

    let charts: Vec<BarChart> = Outcome::ALL
        .iter()
        .enumerate()
        .map(|(k, &outcome)| {
            let offset = (k as f64 - 0.5) * GROUP_BAR_WIDTH;
            let bars = genders
                .iter()
                .enumerate()
                .filter_map(|(gi, gender)| {
                    let n = counts.count(gender, outcome)?;
                    Some(
                        Bar::new(gi as f64 + offset, n as f64)
                            .width(GROUP_BAR_WIDTH)
                            .name(gender),
                    )
                })
                .collect();
            BarChart::new(bars)
                .name(outcome.label())
                .color(colors.color_for(outcome))
        })
        .collect();

    let labels = genders;
    Plot::new("gender_outcome")
        .legend(Legend::default())
        .x_axis_label("Gender")
        .y_axis_label("Patients")
        .height(height)
        .x_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if v < -0.5 || (v - v.round()).abs() > 1e-6 {
                return String::new();
            }
            labels.get(v.round() as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

use crate::models::{Entry, EntryLog};
use chrono::NaiveDate;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const LEFT: f64 = 80.0;
const RIGHT: f64 = 30.0;
const TOP: f64 = 56.0;
const BOTTOM: f64 = 110.0;
const Y_TICKS: usize = 4;
const MAX_DATE_LABELS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// Days since the first logged date.
    pub x: f64,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct Series {
    pub label: &'static str,
    pub color: &'static str,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone)]
pub struct Chart {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub series: Vec<Series>,
}

/// Builds the series from the log sorted by date; `None` for an empty log.
pub fn build_chart(log: &EntryLog) -> Option<Chart> {
    let rows = log.chronological();
    let start = rows.first()?.1.date;
    let end = rows.last()?.1.date;

    let series_for = |label: &'static str, color: &'static str, value: fn(&Entry) -> f64| Series {
        label,
        color,
        points: rows
            .iter()
            .map(|(_, entry)| ChartPoint {
                date: entry.date,
                x: (entry.date - start).num_days() as f64,
                value: value(entry),
            })
            .collect(),
    };

    Some(Chart {
        start,
        end,
        series: vec![
            series_for("Weight (kg)", "#1f77b4", |e| e.weight_kg),
            series_for("Calories", "#ff7f0e", |e| f64::from(e.calories)),
            series_for("Steps", "#2ca02c", |e| f64::from(e.steps)),
        ],
    })
}

struct Frame {
    span_days: f64,
    min: f64,
    max: f64,
}

impl Frame {
    fn new(chart: &Chart) -> Self {
        let values = chart.series.iter().flat_map(|s| s.points.iter().map(|p| p.value));
        let (mut min, mut max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if min == max {
            min -= 1.0;
            max += 1.0;
        }
        Self {
            span_days: (chart.end - chart.start).num_days() as f64,
            min,
            max,
        }
    }

    fn x(&self, days: f64) -> f64 {
        let plot_width = WIDTH - LEFT - RIGHT;
        if self.span_days == 0.0 {
            LEFT + plot_width / 2.0
        } else {
            LEFT + days / self.span_days * plot_width
        }
    }

    fn y(&self, value: f64) -> f64 {
        let plot_height = HEIGHT - TOP - BOTTOM;
        HEIGHT - BOTTOM - (value - self.min) / (self.max - self.min) * plot_height
    }
}

pub fn render_svg(chart: &Chart) -> String {
    let frame = Frame::new(chart);
    let plot_bottom = HEIGHT - BOTTOM;
    let plot_right = WIDTH - RIGHT;
    let mut svg = String::new();

    svg.push_str(&format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" class="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Fitness Progress" font-family="Trebuchet MS, sans-serif">"##
    ));
    svg.push_str(&format!(
        r##"<rect x="0" y="0" width="{WIDTH}" height="{HEIGHT}" fill="white" /><text x="{}" y="30" text-anchor="middle" font-size="18" fill="#2b2a28">Fitness Progress</text>"##,
        WIDTH / 2.0
    ));

    for tick in 0..=Y_TICKS {
        let value = frame.min + (frame.max - frame.min) * tick as f64 / Y_TICKS as f64;
        let y = frame.y(value);
        svg.push_str(&format!(
            r##"<line x1="{LEFT}" y1="{y:.2}" x2="{plot_right}" y2="{y:.2}" stroke="#2f4858" stroke-opacity="0.12" /><text x="{}" y="{:.2}" text-anchor="end" font-size="11" fill="#7a746d">{}</text>"##,
            LEFT - 8.0,
            y + 4.0,
            format_axis_value(value)
        ));
    }

    svg.push_str(&format!(
        r##"<line x1="{LEFT}" y1="{plot_bottom}" x2="{plot_right}" y2="{plot_bottom}" stroke="#2f4858" stroke-opacity="0.4" /><line x1="{LEFT}" y1="{TOP}" x2="{LEFT}" y2="{plot_bottom}" stroke="#2f4858" stroke-opacity="0.4" />"##
    ));

    for date in date_ticks(chart) {
        let x = frame.x((date - chart.start).num_days() as f64);
        let y = plot_bottom + 16.0;
        svg.push_str(&format!(
            r##"<line x1="{x:.2}" y1="{plot_bottom}" x2="{x:.2}" y2="{}" stroke="#2f4858" stroke-opacity="0.4" /><text x="{x:.2}" y="{y}" transform="rotate(-45 {x:.2} {y})" text-anchor="end" font-size="11" fill="#7a746d">{date}</text>"##,
            plot_bottom + 5.0
        ));
    }

    svg.push_str(&format!(
        r##"<text x="{}" y="{}" text-anchor="middle" font-size="13" fill="#2b2a28">Date</text><text x="20" y="{}" transform="rotate(-90 20 {})" text-anchor="middle" font-size="13" fill="#2b2a28">Values</text>"##,
        LEFT + (plot_right - LEFT) / 2.0,
        HEIGHT - 12.0,
        TOP + (plot_bottom - TOP) / 2.0,
        TOP + (plot_bottom - TOP) / 2.0
    ));

    for series in &chart.series {
        let path = series
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let command = if index == 0 { 'M' } else { 'L' };
                format!("{command} {:.2} {:.2}", frame.x(point.x), frame.y(point.value))
            })
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!(
            r##"<path class="series" d="{path}" fill="none" stroke="{}" stroke-width="2" />"##,
            series.color
        ));
        for point in &series.points {
            svg.push_str(&format!(
                r##"<circle cx="{:.2}" cy="{:.2}" r="4" fill="{}"><title>{}: {} on {}</title></circle>"##,
                frame.x(point.x),
                frame.y(point.value),
                series.color,
                series.label,
                point.value,
                point.date
            ));
        }
    }

    svg.push_str(&render_legend(chart));
    svg.push_str("</svg>");
    svg
}

fn render_legend(chart: &Chart) -> String {
    let x = LEFT + 14.0;
    let mut legend = format!(
        r##"<g class="legend"><rect x="{}" y="{}" width="130" height="{}" rx="6" fill="white" stroke="#2f4858" stroke-opacity="0.2" />"##,
        x - 8.0,
        TOP + 6.0,
        chart.series.len() as f64 * 20.0 + 10.0
    );
    for (index, series) in chart.series.iter().enumerate() {
        let y = TOP + 22.0 + index as f64 * 20.0;
        legend.push_str(&format!(
            r##"<line x1="{x}" y1="{y}" x2="{}" y2="{y}" stroke="{color}" stroke-width="2" /><circle cx="{}" cy="{y}" r="3" fill="{color}" /><text x="{}" y="{}" font-size="12" fill="#2b2a28">{}</text>"##,
            x + 24.0,
            x + 12.0,
            x + 32.0,
            y + 4.0,
            series.label,
            color = series.color
        ));
    }
    legend.push_str("</g>");
    legend
}

/// Distinct logged dates, thinned to at most `MAX_DATE_LABELS`.
fn date_ticks(chart: &Chart) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = chart
        .series
        .first()
        .map(|s| s.points.iter().map(|p| p.date).collect())
        .unwrap_or_default();
    dates.dedup();

    let every = dates.len().div_ceil(MAX_DATE_LABELS).max(1);
    dates.into_iter().step_by(every).collect()
}

fn format_axis_value(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

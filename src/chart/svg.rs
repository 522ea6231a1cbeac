// SVG comparison chart drawn with plotters.
//
// Three panels side by side:
// 1. total and average-daily comments per period
// 2. sentiment per period (counts or percentages)
// 3. growth per day in total and negative comments

use std::fmt::Display;

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use super::{ChartImage, ChartRenderer, GrowthMetrics};
use crate::pipeline::report::PeriodSummary;
use crate::sentiment::tally::Aggregation;
use crate::sentiment::traits::SentimentLabel;

const PERIOD_COLORS: [RGBColor; 2] = [RGBColor(59, 76, 192), RGBColor(180, 4, 38)];
const GROWTH_COLORS: [RGBColor; 2] = [RGBColor(255, 165, 0), RGBColor(220, 20, 60)];

/// Sentiment categories in panel order.
const SENTIMENT_ORDER: [SentimentLabel; 3] = [
    SentimentLabel::Positive,
    SentimentLabel::Negative,
    SentimentLabel::Neutral,
];

pub struct SvgChartRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 700,
        }
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, period1: &PeriodSummary, period2: &PeriodSummary) -> Result<ChartImage> {
        let growth = GrowthMetrics::between(period1, period2);
        let labels = [period1.label.as_str(), period2.label.as_str()];

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;
            let root = root
                .titled("Comment Analysis and Trends", ("sans-serif", 28))
                .map_err(draw_err)?;
            let panels = root.split_evenly((1, 3));

            grouped_bars(
                &panels[0],
                "Comment Trends Between Two Periods",
                "Number of Comments",
                &["Total Comments", "Average Daily Comments"],
                [
                    vec![period1.count as f64, growth.average_daily1],
                    vec![period2.count as f64, growth.average_daily2],
                ],
                labels,
            )?;

            let sentiment_axis = match period1.sentiment.aggregation {
                Aggregation::Counts => "Number of Comments",
                Aggregation::Percentages => "Percentage",
            };
            grouped_bars(
                &panels[1],
                "Sentiment Comparison Between Two Periods",
                sentiment_axis,
                &SENTIMENT_ORDER.map(|l| l.as_str()),
                [
                    SENTIMENT_ORDER.iter().map(|&l| period1.sentiment.get(l)).collect(),
                    SENTIMENT_ORDER.iter().map(|&l| period2.sentiment.get(l)).collect(),
                ],
                labels,
            )?;

            growth_bars(&panels[2], &growth)?;

            root.present().map_err(draw_err)?;
        }

        debug!(bytes = svg.len(), "Rendered comparison chart");

        Ok(ChartImage {
            mime_type: "image/svg+xml".to_string(),
            bytes: svg.into_bytes(),
        })
    }
}

fn draw_err<E: Display>(e: E) -> anyhow::Error {
    anyhow::anyhow!("Chart drawing failed: {e}")
}

/// Value axis covering zero and every value, with headroom.
fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if hi - lo <= f64::EPSILON {
        return (0.0, 1.0);
    }
    (lo * 1.15, hi * 1.15)
}

/// Formatter showing a category name at each integer position.
fn category_label(categories: &[&str], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    categories
        .get(idx as usize)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// One bar per period for each category, categories centered on integers.
fn grouped_bars(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    title: &str,
    y_desc: &str,
    categories: &[&str],
    values: [Vec<f64>; 2],
    period_labels: [&str; 2],
) -> Result<()> {
    let n = categories.len() as f64;
    let (y_min, y_max) = value_range(values.iter().flatten().copied());

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 16))
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(-0.5f64..(n - 0.5), y_min..y_max)
        .map_err(draw_err)?;

    let formatter = |x: &f64| category_label(categories, *x);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(categories.len())
        .x_label_formatter(&formatter)
        .y_desc(y_desc)
        .draw()
        .map_err(draw_err)?;

    for (p, period_values) in values.iter().enumerate() {
        let color = PERIOD_COLORS[p];
        let offset = if p == 0 { -0.4 } else { 0.0 };
        chart
            .draw_series(period_values.iter().enumerate().map(|(i, &v)| {
                let x0 = i as f64 + offset;
                Rectangle::new([(x0, 0.0), (x0 + 0.4, v)], color.filled())
            }))
            .map_err(draw_err)?
            .label(period_labels[p])
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(draw_err)?;

    Ok(())
}

fn growth_bars(area: &DrawingArea<SVGBackend<'_>, Shift>, growth: &GrowthMetrics) -> Result<()> {
    let categories = ["Total Growth", "Negative Growth"];
    let values = [growth.total_growth, growth.negative_growth];
    let (y_min, y_max) = value_range(values.iter().copied());

    let mut chart = ChartBuilder::on(area)
        .caption("Growth in Comments and Negative Comments", ("sans-serif", 16))
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(-0.5f64..1.5f64, y_min..y_max)
        .map_err(draw_err)?;

    let formatter = |x: &f64| category_label(&categories, *x);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(categories.len())
        .x_label_formatter(&formatter)
        .y_desc("Growth per Day")
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(values.iter().enumerate().map(|(i, &v)| {
            let x = i as f64;
            Rectangle::new([(x - 0.3, 0.0), (x + 0.3, v)], GROWTH_COLORS[i].filled())
        }))
        .map_err(draw_err)?;

    Ok(())
}

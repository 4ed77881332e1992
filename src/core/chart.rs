//! Renderable chart descriptions built from aggregation results.
//!
//! Builders never touch I/O and never fail: an empty aggregation gives a chart
//! with empty series. The descriptions serialise to JSON for external renderers.

use crate::core::analytics::RIDGE_YEAR;
use crate::core::record::PropertyType;
use serde::Serialize;

pub const TRANSACTIONS_AXIS_TITLE: &str = "# of transactions";
pub const RIDGE_CANVAS: CanvasSize = CanvasSize {
    width: 950,
    height: 650,
};
pub const RIDGE_SPACING: f64 = 0.7;
pub const RIDGE_COLOR_ALPHA: f64 = 0.9;
pub const RIDGE_FONT_SIZE: u32 = 12;
const RIDGE_GRID_POINTS: usize = 200;

pub const SERIES_GRAY: Rgb = Rgb::new(128, 128, 128);
pub const PLOT_BACKGROUND: Rgb = Rgb::new(245, 245, 245);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Point `t` (clamped to 0..=1) on the black-to-white gray scale.
    pub fn gray_scale(t: f64) -> Self {
        let level = (t.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(level, level, level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: Option<String>,
    pub x_axis_title: Option<String>,
    pub y_axis_title: Option<String>,
    pub size: Option<CanvasSize>,
    pub font_size: Option<u32>,
    pub background: Option<Rgb>,
    pub show_legend: bool,
    pub body: ChartBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartBody {
    Line(LineSeries),
    HorizontalBar(BarSeries),
    Ridge(RidgeSeries),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Cross,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Rgb,
    pub marker: Marker,
}

/// Bars listed bottom to top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RidgeSeries {
    pub traces: Vec<RidgeTrace>,
    pub spacing: f64,
    pub color_alpha: f64,
}

/// One area's distribution: raw samples plus the smoothed curve drawn for them.
///
/// `density` is scaled so the tallest curve in the plot peaks at 1.0 and is
/// drawn above `baseline`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RidgeTrace {
    pub label: String,
    pub samples: Vec<f64>,
    pub x: Vec<f64>,
    pub density: Vec<f64>,
    pub baseline: f64,
    pub color: Rgb,
}

/// Line chart of sales per year.
pub fn transactions_chart(per_year: &[(i32, usize)]) -> Chart {
    Chart {
        title: None,
        x_axis_title: None,
        y_axis_title: Some(TRANSACTIONS_AXIS_TITLE.to_string()),
        size: None,
        font_size: None,
        background: None,
        show_legend: false,
        body: ChartBody::Line(LineSeries {
            x: per_year.iter().map(|(year, _)| f64::from(*year)).collect(),
            y: per_year.iter().map(|(_, count)| *count as f64).collect(),
            color: SERIES_GRAY,
            marker: Marker::Cross,
        }),
    }
}

/// Horizontal bars of sales per property type, smallest first.
pub fn property_type_counts_chart(counts: &[(PropertyType, usize)]) -> Chart {
    let bars: Vec<(String, f64)> = counts
        .iter()
        .map(|(property_type, count)| (property_type.to_string(), *count as f64))
        .collect();
    horizontal_bar_chart(bars, TRANSACTIONS_AXIS_TITLE.to_string())
}

/// Horizontal bars of median price per property type, cheapest first.
pub fn median_price_chart(medians: &[(PropertyType, f64)], currency_symbol: &str) -> Chart {
    let bars: Vec<(String, f64)> = medians
        .iter()
        .map(|(property_type, median)| (property_type.to_string(), *median))
        .collect();
    horizontal_bar_chart(bars, format!("Median price ({currency_symbol})"))
}

fn horizontal_bar_chart(mut bars: Vec<(String, f64)>, x_axis_title: String) -> Chart {
    bars.sort_by(|(_, a), (_, b)| a.total_cmp(b));
    let (labels, values) = bars.into_iter().unzip();
    Chart {
        title: None,
        x_axis_title: Some(x_axis_title),
        y_axis_title: None,
        size: None,
        font_size: None,
        background: None,
        show_legend: false,
        body: ChartBody::HorizontalBar(BarSeries {
            labels,
            values,
            color: SERIES_GRAY,
        }),
    }
}

/// Ridge plot of sale prices, one curve per area, first area on top.
pub fn area_ridge_chart(
    distributions: &[(String, Vec<i64>)],
    region: &str,
    currency_symbol: &str,
) -> Chart {
    let samples: Vec<Vec<f64>> = distributions
        .iter()
        .map(|(_, prices)| prices.iter().map(|p| *p as f64).collect())
        .collect();

    let grid = shared_grid(&samples);
    let curves: Vec<Vec<f64>> = samples
        .iter()
        .map(|s| {
            if s.is_empty() {
                Vec::new()
            } else {
                gaussian_kde(s, &grid)
            }
        })
        .collect();
    let peak = curves
        .iter()
        .flatten()
        .copied()
        .fold(0.0_f64, f64::max);

    let means: Vec<Option<f64>> = samples.iter().map(|s| mean(s)).collect();
    let (low, high) = means.iter().flatten().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(low, high), m| (low.min(*m), high.max(*m)),
    );

    let count = distributions.len();
    let traces = distributions
        .iter()
        .zip(samples)
        .zip(curves)
        .zip(means)
        .enumerate()
        .map(|(i, ((((label, _), samples), curve), trace_mean))| {
            let color = match trace_mean {
                Some(m) if high > low => Rgb::gray_scale((m - low) / (high - low)),
                Some(_) => Rgb::gray_scale(0.0),
                None => SERIES_GRAY,
            };
            let x = if curve.is_empty() {
                Vec::new()
            } else {
                grid.clone()
            };
            let density = if peak > 0.0 {
                curve.iter().map(|d| d / peak).collect()
            } else {
                curve
            };
            RidgeTrace {
                label: label.clone(),
                samples,
                x,
                density,
                baseline: (count - 1 - i) as f64 * RIDGE_SPACING,
                color,
            }
        })
        .collect();

    Chart {
        title: Some(format!(
            "Distribution of house sale prices in {region} in {RIDGE_YEAR}, by area"
        )),
        x_axis_title: Some(format!("Sale price ({currency_symbol})")),
        y_axis_title: Some("Area".to_string()),
        size: Some(RIDGE_CANVAS),
        font_size: Some(RIDGE_FONT_SIZE),
        background: Some(PLOT_BACKGROUND),
        show_legend: false,
        body: ChartBody::Ridge(RidgeSeries {
            traces,
            spacing: RIDGE_SPACING,
            color_alpha: RIDGE_COLOR_ALPHA,
        }),
    }
}

/// Evenly spaced points spanning every sample.
fn shared_grid(samples: &[Vec<f64>]) -> Vec<f64> {
    let (min, max) = samples.iter().flatten().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), v| (min.min(*v), max.max(*v)),
    );
    if !min.is_finite() {
        return Vec::new();
    }
    let (min, max) = if max > min {
        (min, max)
    } else {
        (min - 1.0, max + 1.0)
    };
    let step = (max - min) / (RIDGE_GRID_POINTS - 1) as f64;
    (0..RIDGE_GRID_POINTS)
        .map(|i| min + step * i as f64)
        .collect()
}

fn gaussian_kde(samples: &[f64], grid: &[f64]) -> Vec<f64> {
    let h = bandwidth(samples);
    let norm = 1.0 / (samples.len() as f64 * h * (2.0 * std::f64::consts::PI).sqrt());
    grid.iter()
        .map(|x| {
            samples
                .iter()
                .map(|s| {
                    let u = (x - s) / h;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>()
                * norm
        })
        .collect()
}

/// Normal-reference rule: `1.059 * min(std, IQR / 1.349) * n^(-1/5)`.
fn bandwidth(samples: &[f64]) -> f64 {
    let n = samples.len() as f64;
    let std_dev = sample_std_dev(samples);

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let iqr = quantile(&sorted, 0.75) - quantile(&sorted, 0.25);

    let spread = match (std_dev > 0.0, iqr > 0.0) {
        (true, true) => std_dev.min(iqr / 1.349),
        (true, false) => std_dev,
        (false, true) => iqr / 1.349,
        (false, false) => mean(samples).map_or(1.0, |m| (m.abs() * 0.01).max(1.0)),
    };
    1.059 * spread * n.powf(-0.2)
}

fn mean(samples: &[f64]) -> Option<f64> {
    (!samples.is_empty()).then(|| samples.iter().sum::<f64>() / samples.len() as f64)
}

fn sample_std_dev(samples: &[f64]) -> f64 {
    let Some(m) = mean(samples) else {
        return 0.0;
    };
    if samples.len() < 2 {
        return 0.0;
    }
    let variance =
        samples.iter().map(|s| (s - m).powi(2)).sum::<f64>() / (samples.len() - 1) as f64;
    variance.sqrt()
}

/// Linear-interpolated quantile of already sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (pos - lower as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transactions_chart_round_trip() {
        let per_year = vec![(2019, 12), (2020, 0), (2021, 7)];
        let chart = transactions_chart(&per_year);

        assert_eq!(chart.y_axis_title.as_deref(), Some("# of transactions"));
        let ChartBody::Line(series) = &chart.body else {
            panic!("Expected a line chart");
        };
        let derived: Vec<(i32, usize)> = series
            .x
            .iter()
            .zip(&series.y)
            .map(|(x, y)| (*x as i32, *y as usize))
            .collect();
        assert_eq!(derived, per_year);
    }

    #[test]
    fn test_property_type_counts_chart_round_trip() {
        let counts = vec![
            (PropertyType::Flat, 3),
            (PropertyType::Terraced, 10),
            (PropertyType::Detached, 42),
        ];
        let chart = property_type_counts_chart(&counts);

        assert_eq!(chart.x_axis_title.as_deref(), Some("# of transactions"));
        let ChartBody::HorizontalBar(series) = &chart.body else {
            panic!("Expected a bar chart");
        };
        let derived: Vec<(PropertyType, usize)> = series
            .labels
            .iter()
            .zip(&series.values)
            .map(|(label, value)| (label.parse().unwrap(), *value as usize))
            .collect();
        assert_eq!(derived, counts);
    }

    #[test]
    fn test_median_price_chart_sorts_ascending() {
        let medians = vec![
            (PropertyType::Detached, 310_000.0),
            (PropertyType::Flat, 95_500.0),
        ];
        let chart = median_price_chart(&medians, "£");

        assert_eq!(chart.x_axis_title.as_deref(), Some("Median price (£)"));
        let ChartBody::HorizontalBar(series) = &chart.body else {
            panic!("Expected a bar chart");
        };
        assert_eq!(series.labels, vec!["Flat/Maisonette", "Detached"]);
        assert_eq!(series.values, vec![95_500.0, 310_000.0]);
    }

    #[test]
    fn test_empty_aggregations_give_empty_charts() {
        let ChartBody::Line(line) = transactions_chart(&[]).body else {
            panic!("Expected a line chart");
        };
        assert!(line.x.is_empty() && line.y.is_empty());

        let ChartBody::HorizontalBar(bars) = property_type_counts_chart(&[]).body else {
            panic!("Expected a bar chart");
        };
        assert!(bars.labels.is_empty());

        let ridge = area_ridge_chart(&[], "Wales", "£");
        let ChartBody::Ridge(series) = ridge.body else {
            panic!("Expected a ridge chart");
        };
        assert!(series.traces.is_empty());
    }

    #[test]
    fn test_ridge_chart_layout() {
        let distributions = vec![
            ("Cardiff".to_string(), vec![200_000, 250_000, 310_000, 180_000]),
            ("Powys".to_string(), vec![150_000, 175_000, 160_000]),
            ("Empty".to_string(), vec![]),
        ];
        let chart = area_ridge_chart(&distributions, "Wales", "£");

        assert_eq!(
            chart.title.as_deref(),
            Some("Distribution of house sale prices in Wales in 2023, by area")
        );
        assert_eq!(chart.x_axis_title.as_deref(), Some("Sale price (£)"));
        assert_eq!(chart.y_axis_title.as_deref(), Some("Area"));
        assert_eq!(chart.size, Some(CanvasSize { width: 950, height: 650 }));

        let ChartBody::Ridge(series) = &chart.body else {
            panic!("Expected a ridge chart");
        };
        assert_eq!(series.traces.len(), 3);
        assert_eq!(series.traces[0].label, "Cardiff");
        assert!(series.traces[0].baseline > series.traces[1].baseline);
        assert_eq!(series.traces[2].baseline, 0.0);

        // Cardiff has the higher mean, so it sits at the light end of the scale.
        assert_eq!(series.traces[0].color, Rgb::gray_scale(1.0));
        assert_eq!(series.traces[1].color, Rgb::gray_scale(0.0));

        let peak = series
            .traces
            .iter()
            .flat_map(|t| t.density.iter().copied())
            .fold(0.0_f64, f64::max);
        assert!((peak - 1.0).abs() < 1e-12);
        assert_eq!(series.traces[0].x.len(), series.traces[0].density.len());
        assert!(series.traces[2].density.is_empty());
    }

    #[test]
    fn test_ridge_chart_round_trip() {
        let distributions = vec![
            ("A".to_string(), vec![100_000, 120_000]),
            ("B".to_string(), vec![499_999]),
        ];
        let chart = area_ridge_chart(&distributions, "Wales", "£");
        let ChartBody::Ridge(series) = &chart.body else {
            panic!("Expected a ridge chart");
        };
        let derived: Vec<(String, Vec<i64>)> = series
            .traces
            .iter()
            .map(|t| (t.label.clone(), t.samples.iter().map(|s| *s as i64).collect()))
            .collect();
        assert_eq!(derived, distributions);
    }

    #[test]
    fn test_single_sample_has_finite_density() {
        let chart = area_ridge_chart(&[("A".to_string(), vec![250_000])], "Wales", "£");
        let ChartBody::Ridge(series) = &chart.body else {
            panic!("Expected a ridge chart");
        };
        assert!(series.traces[0].density.iter().all(|d| d.is_finite()));
        assert_eq!(series.traces[0].x.len(), RIDGE_GRID_POINTS);
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn test_chart_serialises_with_body_type() {
        let chart = transactions_chart(&[(2023, 5)]);
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["body"]["type"], "line");
        assert_eq!(json["body"]["y"][0], 5.0);
        assert_eq!(json["y_axis_title"], "# of transactions");
    }
}

//! Chart Bindings Module
//! Maps aggregate views to renderer-independent chart and table specifications.

use crate::config::ColumnSchema;
use crate::data::{NumericField, Record};
use crate::session::Session;
use crate::views::{RatioPoint, SexSplitRow, Totals};

/// Sort field, direction and row count chosen in the control panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortSelection {
    pub field: NumericField,
    pub ascending: bool,
    pub n: usize,
}

impl Default for SortSelection {
    fn default() -> Self {
        Self {
            field: NumericField::TotalPopulation,
            ascending: false,
            n: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BubblePoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
    /// Relative bubble size in `0.0..=1.0`, proportional to sqrt of the sized value.
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BubbleChartSpec {
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<BubblePoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Bar(BarChartSpec),
    Bubble(BubbleChartSpec),
}

impl ChartSpec {
    pub fn id(&self) -> &str {
        match self {
            ChartSpec::Bar(spec) => &spec.id,
            ChartSpec::Bubble(spec) => &spec.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Bar(spec) => &spec.title,
            ChartSpec::Bubble(spec) => &spec.title,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ChartSpec::Bar(spec) => spec.bars.is_empty(),
            ChartSpec::Bubble(spec) => spec.points.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Bar chart comparing male and female population of one region.
pub fn sex_split_chart(region: &str, split: &[SexSplitRow]) -> ChartSpec {
    ChartSpec::Bar(BarChartSpec {
        id: "sex_split".to_string(),
        title: format!("{} Male / Female Population", region),
        x_label: "Sex".to_string(),
        y_label: "Population".to_string(),
        bars: split
            .iter()
            .map(|row| Bar {
                label: row.category.as_str().to_string(),
                value: row.value,
            })
            .collect(),
    })
}

/// Bar chart of a sorted, truncated view.
pub fn top_n_chart(rows: &[&Record], selection: &SortSelection) -> ChartSpec {
    let direction = if selection.ascending { "Bottom" } else { "Top" };
    ChartSpec::Bar(BarChartSpec {
        id: "top_n".to_string(),
        title: format!("{} {} by {}", direction, selection.n, selection.field.label()),
        x_label: "Region".to_string(),
        y_label: selection.field.label().to_string(),
        bars: rows
            .iter()
            .map(|r| Bar {
                label: r.region.clone(),
                value: r.get(selection.field),
            })
            .collect(),
    })
}

/// Bubble chart of sex ratio per region, bubble area tracking total population.
pub fn ratio_chart(points: &[RatioPoint]) -> ChartSpec {
    let max_total = points
        .iter()
        .map(|p| p.total_population)
        .fold(0.0f64, f64::max);

    ChartSpec::Bubble(BubbleChartSpec {
        id: "sex_ratio".to_string(),
        title: "Sex Ratio by Region (bubble size: total population)".to_string(),
        x_label: "Region".to_string(),
        y_label: NumericField::SexRatio.label().to_string(),
        points: points
            .iter()
            .enumerate()
            .map(|(i, p)| BubblePoint {
                label: p.region.clone(),
                x: i as f64,
                y: p.sex_ratio,
                size: if max_total > 0.0 {
                    (p.total_population / max_total).sqrt()
                } else {
                    0.0
                },
            })
            .collect(),
    })
}

/// Table of `rows` with the source header and display-formatted values.
pub fn table(rows: &[&Record], schema: &ColumnSchema) -> TableSpec {
    TableSpec {
        header: schema.header().into_iter().map(str::to_string).collect(),
        rows: rows
            .iter()
            .map(|r| {
                std::iter::once(r.region.clone())
                    .chain(NumericField::ALL.iter().map(|&f| format_value(f, r.get(f))))
                    .collect()
            })
            .collect(),
    }
}

/// Every chart and table of the dashboard for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardCharts {
    pub totals: Totals,
    pub sex_split: ChartSpec,
    pub top_n: ChartSpec,
    pub ratio: ChartSpec,
    /// All rows in the selected sort order (the exportable table).
    pub sorted_table: TableSpec,
}

impl DashboardCharts {
    /// Recompute all views from the session for `region` and `sort`.
    pub fn build(session: &Session, region: &str, sort: &SortSelection) -> Self {
        let top = session.top_n(sort.field, sort.n, sort.ascending);
        let sorted = session.sorted_by(sort.field, sort.ascending);
        Self {
            totals: session.totals(),
            sex_split: sex_split_chart(region, &session.sex_split(region)),
            top_n: top_n_chart(&top, sort),
            ratio: ratio_chart(&session.ratio_distribution()),
            sorted_table: table(&sorted, session.schema()),
        }
    }

    /// Charts in display order.
    pub fn charts(&self) -> [&ChartSpec; 3] {
        [&self.sex_split, &self.top_n, &self.ratio]
    }
}

/// Counts with thousands grouping; per-household and ratio with two decimals.
pub fn format_value(field: NumericField, value: f64) -> String {
    match field {
        NumericField::PopulationPerHousehold | NumericField::SexRatio => format!("{:.2}", value),
        _ => group_thousands(value),
    }
}

/// Round to an integer and insert `,` every three digits.
pub fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 && digits != "0" {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::Sex;

    #[test]
    fn grouping_matches_source_format() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(51_217_221.0), "51,217,221");
        assert_eq!(format_value(NumericField::SexRatio, 104.1), "104.10");
    }

    #[test]
    fn sex_split_chart_keeps_order() {
        let split = [
            SexSplitRow { category: Sex::Male, value: 510.0 },
            SexSplitRow { category: Sex::Female, value: 490.0 },
        ];
        let ChartSpec::Bar(spec) = sex_split_chart("A", &split) else {
            panic!("expected bar chart");
        };
        let labels: Vec<&str> = spec.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["male", "female"]);
        assert!(spec.title.starts_with("A "));
    }

    #[test]
    fn bubble_size_is_relative_to_largest_region() {
        let points = [
            RatioPoint { region: "A".into(), sex_ratio: 104.1, total_population: 250.0 },
            RatioPoint { region: "B".into(), sex_ratio: 90.5, total_population: 1000.0 },
        ];
        let ChartSpec::Bubble(spec) = ratio_chart(&points) else {
            panic!("expected bubble chart");
        };
        assert_eq!(spec.points[0].size, 0.5);
        assert_eq!(spec.points[1].size, 1.0);
        assert_eq!(spec.points[1].x, 1.0);
    }

    #[test]
    fn table_rows_follow_view_order() {
        let schema = ColumnSchema::new("region", "");
        let b = Record::new("B", 2000.0, 900.0, 2.22, 950.0, 1050.0, 90.5);
        let a = Record::new("A", 1000.0, 400.0, 2.5, 510.0, 490.0, 104.1);
        let spec = table(&[&b, &a], &schema);
        assert_eq!(spec.header.len(), 7);
        assert_eq!(spec.rows[0][0], "B");
        assert_eq!(spec.rows[0][1], "2,000");
        assert_eq!(spec.rows[1][3], "2.50");
    }
}

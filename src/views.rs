//! Aggregate Views
//! Pure functions over a [`Dataset`]: region filter, top-N, totals and long-form reshaping.

use crate::data::{Dataset, NumericField, Record};
use serde::Serialize;

/// Whole-dataset sums shown as headline figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub total_population: f64,
    pub total_households: f64,
}

/// Category of a male/female long-form row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    pub fn field(self) -> NumericField {
        match self {
            Sex::Male => NumericField::MalePopulation,
            Sex::Female => NumericField::FemalePopulation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SexSplitRow {
    pub category: Sex,
    pub value: f64,
}

/// One long-form row produced by [`melt`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeltedRow {
    pub region: String,
    pub field: NumericField,
    pub value: f64,
}

/// Bubble chart point: sex ratio sized by total population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioPoint {
    pub region: String,
    pub sex_ratio: f64,
    pub total_population: f64,
}

/// Rows whose region key equals `region` exactly. Empty when absent.
pub fn select_region<'a>(dataset: &'a Dataset, region: &str) -> Vec<&'a Record> {
    dataset
        .records()
        .iter()
        .filter(|r| r.region == region)
        .collect()
}

/// All rows sorted by `field` (stable), truncated to `n`.
///
/// Descending unless `ascending` is set; ties keep dataset order either way.
pub fn top_n(dataset: &Dataset, field: NumericField, n: usize, ascending: bool) -> Vec<&Record> {
    let mut rows = sorted_by(dataset, field, ascending);
    rows.truncate(n);
    rows
}

/// All rows in stable sorted order by `field`.
pub fn sorted_by(dataset: &Dataset, field: NumericField, ascending: bool) -> Vec<&Record> {
    let mut rows: Vec<&Record> = dataset.records().iter().collect();
    rows.sort_by(|a, b| {
        let ord = a.get(field).total_cmp(&b.get(field));
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
    rows
}

/// Sum of one field over every row of the dataset.
pub fn sum_field(dataset: &Dataset, field: NumericField) -> f64 {
    dataset.records().iter().map(|r| r.get(field)).sum()
}

/// Total population and households over the unfiltered dataset.
pub fn totals(dataset: &Dataset) -> Totals {
    Totals {
        total_population: sum_field(dataset, NumericField::TotalPopulation),
        total_households: sum_field(dataset, NumericField::Households),
    }
}

/// Reshape `fields` of each row into `{region, field, value}` rows, row-major.
pub fn melt(view: &[&Record], fields: &[NumericField]) -> Vec<MeltedRow> {
    view.iter()
        .flat_map(|record| {
            fields.iter().map(move |&field| MeltedRow {
                region: record.region.clone(),
                field,
                value: record.get(field),
            })
        })
        .collect()
}

/// Male then female counts of the first row in `view`. Empty view gives no rows.
pub fn sex_split(view: &[&Record]) -> Vec<SexSplitRow> {
    let Some(record) = view.first() else {
        return Vec::new();
    };
    melt(&[*record], &[Sex::Male.field(), Sex::Female.field()])
        .into_iter()
        .zip([Sex::Male, Sex::Female])
        .map(|(row, category)| SexSplitRow {
            category,
            value: row.value,
        })
        .collect()
}

/// Every region's sex ratio with its total population, in dataset order.
pub fn ratio_distribution(dataset: &Dataset) -> Vec<RatioPoint> {
    dataset
        .records()
        .iter()
        .map(|r| RatioPoint {
            region: r.region.clone(),
            sex_ratio: r.sex_ratio(),
            total_population: r.total_population(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            Record::new("A", 1000.0, 400.0, 2.5, 510.0, 490.0, 104.1),
            Record::new("B", 2000.0, 900.0, 2.22, 950.0, 1050.0, 90.5),
            Record::new("C", 2000.0, 800.0, 2.5, 1000.0, 1000.0, 100.0),
        ])
    }

    fn regions(rows: &[&Record]) -> Vec<String> {
        rows.iter().map(|r| r.region.clone()).collect()
    }

    #[test]
    fn select_region_is_exact() {
        let ds = dataset();
        assert_eq!(regions(&select_region(&ds, "B")), vec!["B"]);
        assert!(select_region(&ds, "b").is_empty());
        assert!(select_region(&ds, "Z").is_empty());
    }

    #[test]
    fn top_n_is_stable_descending() {
        let ds = dataset();
        assert_eq!(
            regions(&top_n(&ds, NumericField::TotalPopulation, 2, false)),
            vec!["B", "C"]
        );
        assert_eq!(
            regions(&top_n(&ds, NumericField::TotalPopulation, 10, false)),
            vec!["B", "C", "A"]
        );
        assert_eq!(
            regions(&top_n(&ds, NumericField::TotalPopulation, 3, true)),
            vec!["A", "B", "C"]
        );
        assert!(top_n(&ds, NumericField::SexRatio, 0, false).is_empty());
    }

    #[test]
    fn totals_cover_every_row() {
        let t = totals(&dataset());
        assert_eq!(t.total_population, 5000.0);
        assert_eq!(t.total_households, 2100.0);
    }

    #[test]
    fn sex_split_has_fixed_order() {
        let ds = dataset();
        let split = sex_split(&select_region(&ds, "A"));
        assert_eq!(
            split,
            vec![
                SexSplitRow { category: Sex::Male, value: 510.0 },
                SexSplitRow { category: Sex::Female, value: 490.0 },
            ]
        );
        assert!(sex_split(&select_region(&ds, "missing")).is_empty());
    }

    #[test]
    fn melt_is_row_major() {
        let ds = dataset();
        let rows: Vec<&Record> = ds.records().iter().take(2).collect();
        let melted = melt(&rows, &[NumericField::Households, NumericField::SexRatio]);
        let got: Vec<(&str, NumericField, f64)> = melted
            .iter()
            .map(|m| (m.region.as_str(), m.field, m.value))
            .collect();
        assert_eq!(
            got,
            vec![
                ("A", NumericField::Households, 400.0),
                ("A", NumericField::SexRatio, 104.1),
                ("B", NumericField::Households, 900.0),
                ("B", NumericField::SexRatio, 90.5),
            ]
        );
    }

    #[test]
    fn ratio_distribution_keeps_dataset_order() {
        let points = ratio_distribution(&dataset());
        assert_eq!(points.len(), 3);
        assert_eq!(points[1].region, "B");
        assert_eq!(points[1].sex_ratio, 90.5);
        assert_eq!(points[1].total_population, 2000.0);
    }
}

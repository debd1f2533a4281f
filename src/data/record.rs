//! Record and Dataset Module
//! Typed rows of the population registry table.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown numeric field: {0}")]
pub struct UnknownFieldError(pub String);

/// The six numeric columns of the registry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NumericField {
    TotalPopulation,
    Households,
    PopulationPerHousehold,
    MalePopulation,
    FemalePopulation,
    SexRatio,
}

impl NumericField {
    /// Column order as it appears in the source file.
    pub const ALL: [NumericField; 6] = [
        NumericField::TotalPopulation,
        NumericField::Households,
        NumericField::PopulationPerHousehold,
        NumericField::MalePopulation,
        NumericField::FemalePopulation,
        NumericField::SexRatio,
    ];

    /// Short machine name.
    pub fn key(self) -> &'static str {
        match self {
            NumericField::TotalPopulation => "total",
            NumericField::Households => "households",
            NumericField::PopulationPerHousehold => "per_household",
            NumericField::MalePopulation => "male",
            NumericField::FemalePopulation => "female",
            NumericField::SexRatio => "ratio",
        }
    }

    /// Header suffix used by the registry extract, after the period prefix.
    pub fn column_suffix(self) -> &'static str {
        match self {
            NumericField::TotalPopulation => "총인구수",
            NumericField::Households => "세대수",
            NumericField::PopulationPerHousehold => "세대당 인구",
            NumericField::MalePopulation => "남자 인구수",
            NumericField::FemalePopulation => "여자 인구수",
            NumericField::SexRatio => "남여 비율",
        }
    }

    /// Human readable label for chart axes.
    pub fn label(self) -> &'static str {
        match self {
            NumericField::TotalPopulation => "Total Population",
            NumericField::Households => "Households",
            NumericField::PopulationPerHousehold => "Population per Household",
            NumericField::MalePopulation => "Male Population",
            NumericField::FemalePopulation => "Female Population",
            NumericField::SexRatio => "Sex Ratio",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            NumericField::TotalPopulation => 0,
            NumericField::Households => 1,
            NumericField::PopulationPerHousehold => 2,
            NumericField::MalePopulation => 3,
            NumericField::FemalePopulation => 4,
            NumericField::SexRatio => 5,
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for NumericField {
    type Err = UnknownFieldError;

    /// Accepts the short key, or a full header ending in the column suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NumericField::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .or_else(|| {
                NumericField::ALL
                    .into_iter()
                    .find(|f| s == f.column_suffix() || s.ends_with(&format!("_{}", f.column_suffix())))
            })
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

/// One administrative region row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub region: String,
    values: [f64; 6],
}

impl Record {
    pub fn new(
        region: impl Into<String>,
        total_population: f64,
        households: f64,
        population_per_household: f64,
        male_population: f64,
        female_population: f64,
        sex_ratio: f64,
    ) -> Self {
        Self {
            region: region.into(),
            values: [
                total_population,
                households,
                population_per_household,
                male_population,
                female_population,
                sex_ratio,
            ],
        }
    }

    pub(crate) fn from_values(region: String, values: [f64; 6]) -> Self {
        Self { region, values }
    }

    /// Value of a numeric field.
    pub fn get(&self, field: NumericField) -> f64 {
        self.values[field.index()]
    }

    pub fn total_population(&self) -> f64 {
        self.get(NumericField::TotalPopulation)
    }

    pub fn households(&self) -> f64 {
        self.get(NumericField::Households)
    }

    pub fn male_population(&self) -> f64 {
        self.get(NumericField::MalePopulation)
    }

    pub fn female_population(&self) -> f64 {
        self.get(NumericField::FemalePopulation)
    }

    pub fn sex_ratio(&self) -> f64 {
        self.get(NumericField::SexRatio)
    }
}

/// Normalized, immutable registry table. Region keys are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Callers guarantee unique region keys; the normalizer enforces it for loaded data.
    pub(crate) fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Region keys in dataset order.
    pub fn regions(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.region.as_str()).collect()
    }
}

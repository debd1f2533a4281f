//! CSV Export Module
//! Writes a view of records back to the delimited format, UTF-8 encoded.

use crate::config::ColumnSchema;
use crate::data::record::{NumericField, Record};
use polars::prelude::*;
use std::io::Write;

/// Build a typed frame (region + six Float64 columns) from records in the given order.
pub fn records_to_frame<'a, I>(records: I, schema: &ColumnSchema) -> PolarsResult<DataFrame>
where
    I: IntoIterator<Item = &'a Record>,
{
    let records: Vec<&Record> = records.into_iter().collect();

    let regions: Vec<String> = records.iter().map(|r| r.region.clone()).collect();
    let mut columns = vec![Column::new(schema.region.as_str().into(), regions)];
    for field in NumericField::ALL {
        let values: Vec<f64> = records.iter().map(|r| r.get(field)).collect();
        columns.push(Column::new(schema.column(field).into(), values));
    }

    DataFrame::new(columns)
}

/// Serialize records as CSV with the schema header.
pub fn write_csv<'a, I, W>(records: I, schema: &ColumnSchema, writer: W) -> PolarsResult<()>
where
    I: IntoIterator<Item = &'a Record>,
    W: Write,
{
    let mut df = records_to_frame(records, schema)?;
    CsvWriter::new(writer).include_header(true).finish(&mut df)
}

//! CSV ingestion
//!
//! Reads cost records from delimited input with the header row
//! `service,region,instance_type,daily_cost,usage_cpu_avg,usage_mem_avg,date,status`.
//! Rows that fail to deserialize or carry a negative daily cost are skipped
//! with a warning rather than aborting the whole upload; an input that
//! yields no surviving rows is an error.

use std::io::Read;

use tracing::warn;

use crate::error::IngestError;
use crate::models::CostRecord;

/// Read and validate cost records from CSV input
pub fn read_records<R: Read>(reader: R) -> Result<Vec<CostRecord>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (row, result) in csv_reader.deserialize::<CostRecord>().enumerate() {
        match result {
            Ok(record) if record.daily_cost < 0.0 => {
                warn!(
                    row = row + 1,
                    service = %record.service,
                    daily_cost = record.daily_cost,
                    "Skipping row with negative daily cost"
                );
                skipped += 1;
            }
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(row = row + 1, error = %e, "Skipping malformed CSV row");
                skipped += 1;
            }
        }
    }

    if records.is_empty() {
        warn!(skipped, "CSV input produced no valid cost records");
        return Err(IngestError::NoValidRecords);
    }

    Ok(records)
}

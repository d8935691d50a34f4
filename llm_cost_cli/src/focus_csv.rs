//! Trivial FOCUS CSV framing: the core produces `FocusRow` values, this
//! module writes the header and records via the `csv` crate.

use std::io::{Read, Write};

use llm_cost_core::cost::PicoUsd;
use llm_cost_core::focus::{FocusRow, COLUMNS};

#[derive(Debug, thiserror::Error)]
pub enum FocusCsvError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed FOCUS row: {0}")]
    Malformed(String),
}

/// Rows are expected to already be in resource-id lexicographic order;
/// this function does not re-sort.
pub fn write_rows<W: Write>(writer: W, rows: &[FocusRow]) -> Result<(), FocusCsvError> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(COLUMNS)?;
    for row in rows {
        csv_writer.write_record(row.to_record())?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Read back a FOCUS CSV export written by [`write_rows`]. Used by the
/// `diff` command to load two prior runs; the three fixed-value columns
/// (`UsageUnit`, `ServiceName`, `ServiceCategory`, `ChargeCategory`) are
/// not round-tripped from the file, since [`FocusRow`] only ever holds
/// the one value each can take.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<FocusRow>, FocusCsvError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.len() != COLUMNS.len() {
            return Err(FocusCsvError::Malformed(format!(
                "expected {} columns, found {}",
                COLUMNS.len(),
                record.len()
            )));
        }
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        let parse_pico = |i: usize| -> Result<PicoUsd, FocusCsvError> {
            field(i)
                .parse()
                .map_err(|_| FocusCsvError::Malformed(format!("bad cost value in column {i}")))
        };
        rows.push(FocusRow {
            billed_cost: parse_pico(0)?,
            effective_cost: parse_pico(1)?,
            list_cost: parse_pico(2)?,
            usage_quantity: field(3)
                .parse()
                .map_err(|_| FocusCsvError::Malformed("bad UsageQuantity".to_string()))?,
            usage_unit: "Tokens",
            resource_id: field(5),
            resource_name: field(6),
            service_name: "LLM Inference",
            service_category: "AI and Machine Learning",
            provider: field(9),
            charge_category: "Usage",
            tags_json: field(11),
            x_input_tokens: field(12)
                .parse()
                .map_err(|_| FocusCsvError::Malformed("bad x-input-tokens".to_string()))?,
            x_output_tokens: field(13)
                .parse()
                .map_err(|_| FocusCsvError::Malformed("bad x-output-tokens".to_string()))?,
            x_cache_hit_ratio: {
                let raw = field(14);
                if raw.is_empty() {
                    None
                } else {
                    Some(raw.parse().map_err(|_| {
                        FocusCsvError::Malformed("bad x-cache-hit-ratio".to_string())
                    })?)
                }
            },
            x_content_hash: field(15),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_cost_core::cost::PicoUsd;

    fn sample_row() -> FocusRow {
        FocusRow {
            billed_cost: PicoUsd::zero(),
            effective_cost: PicoUsd::from_usd(0.0075),
            list_cost: PicoUsd::from_usd(0.0075),
            usage_quantity: 1500,
            usage_unit: "Tokens",
            resource_id: "r1".to_string(),
            resource_name: "prompts/r1.txt".to_string(),
            service_name: "LLM Inference",
            service_category: "AI and Machine Learning",
            provider: "OpenAI".to_string(),
            charge_category: "Usage",
            tags_json: "{}".to_string(),
            x_input_tokens: 1000,
            x_output_tokens: 500,
            x_cache_hit_ratio: None,
            x_content_hash: "deadbeef".to_string(),
        }
    }

    #[test]
    fn header_then_one_row_per_record() {
        let rows = vec![sample_row()];
        let mut out = Vec::new();
        write_rows(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("BilledCost,EffectiveCost"));
        assert!(lines.next().unwrap().contains("r1"));
    }

    #[test]
    fn round_trips_through_write_and_read() {
        let rows = vec![sample_row()];
        let mut out = Vec::new();
        write_rows(&mut out, &rows).unwrap();
        let parsed = read_rows(out.as_slice()).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].resource_id, "r1");
        assert_eq!(parsed[0].effective_cost, rows[0].effective_cost);
        assert_eq!(parsed[0].x_content_hash, "deadbeef");
    }
}

//! Shared test helper: render `FocusRow`s to a CSV string via the same
//! writer the `estimate` command uses, so integration tests assert on
//! exactly what a user would see on stdout.

use llm_cost_core::focus::FocusRow;
use llm_cost_cli::focus_csv;

#[allow(dead_code)]
pub fn write_rows_to_string(rows: Vec<FocusRow>) -> String {
    let mut buf = Vec::new();
    focus_csv::write_rows(&mut buf, &rows).expect("writing FOCUS rows never fails in tests");
    String::from_utf8(buf).expect("FOCUS CSV output is always valid UTF-8")
}

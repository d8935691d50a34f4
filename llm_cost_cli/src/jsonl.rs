//! Streaming JSONL reader for the `pipe` command. Spec.md §1 names this
//! reader an external collaborator: "delivers text slices to the core".
//! Blank lines are skipped; every non-blank line is independently
//! decoded so one malformed line doesn't blow up the whole stream.

use std::collections::BTreeMap;
use std::io::BufRead;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum JsonlError {
    #[error("reading line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipeLine {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    pub model: String,
    pub text: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

pub struct JsonlReader<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> JsonlReader<R> {
    pub fn new(reader: R) -> Self {
        JsonlReader {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for JsonlReader<R> {
    type Item = Result<PipeLine, JsonlError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.lines.next()?;
            self.line_no += 1;
            let line = match raw {
                Ok(line) => line,
                Err(source) => {
                    return Some(Err(JsonlError::Io {
                        line: self.line_no,
                        source,
                    }))
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            return Some(serde_json::from_str(&line).map_err(|source| JsonlError::Parse {
                line: self.line_no,
                source,
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_non_blank_lines_in_order() {
        let input = "{\"model\":\"gpt-4o\",\"text\":\"hi\"}\n\n{\"model\":\"gpt-4o\",\"text\":\"there\"}\n";
        let reader = JsonlReader::new(Cursor::new(input));
        let lines: Vec<PipeLine> = reader.map(Result::unwrap).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "hi");
        assert_eq!(lines[1].text, "there");
    }

    #[test]
    fn reports_line_number_on_malformed_json() {
        let input = "{\"model\":\"gpt-4o\",\"text\":\"ok\"}\nnot json\n";
        let reader = JsonlReader::new(Cursor::new(input));
        let results: Vec<_> = reader.collect();
        assert!(results[0].is_ok());
        match &results[1] {
            Err(JsonlError::Parse { line, .. }) => assert_eq!(*line, 2),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }
}

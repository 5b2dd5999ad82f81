//! RIS parser.
//!
//! Each line is `XX  - value`. A record opens with `TY` and closes with
//! `ER`. Lines that do not look like tags continue the previous value.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RisRecord {
    /// Value of the `TY` tag, e.g. `JOUR`.
    pub ris_type: String,
    pub tags: Vec<(String, String)>,
}

impl RisRecord {
    /// First non-empty value among `tags`, in the order given.
    pub fn first(&self, tags: &[&str]) -> Option<&str> {
        tags.iter().find_map(|wanted| {
            self.tags
                .iter()
                .find(|(tag, value)| tag == wanted && !value.is_empty())
                .map(|(_, value)| value.as_str())
        })
    }

    /// Every value for any of `tags`, in file order.
    pub fn all(&self, tags: &[&str]) -> Vec<&str> {
        self.tags
            .iter()
            .filter(|(tag, value)| tags.contains(&tag.as_str()) && !value.is_empty())
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RisParseResult {
    pub records: Vec<RisRecord>,
    /// A trailing record that was never closed by `ER`.
    pub unterminated: bool,
}

/// Splits `XX  - value` into its tag and trimmed value.
fn parse_tag_line(line: &str) -> Option<(&str, &str)> {
    let bytes = line.as_bytes();
    if bytes.len() < 5 {
        return None;
    }
    let tag_ok = bytes[0].is_ascii_uppercase()
        && (bytes[1].is_ascii_uppercase() || bytes[1].is_ascii_digit());
    if !tag_ok || &bytes[2..5] != b"  -" {
        return None;
    }
    Some((&line[..2], line[5..].trim()))
}

pub fn parse_ris(input: &str) -> RisParseResult {
    let mut result = RisParseResult::default();
    let mut current: Option<RisRecord> = None;

    for raw in input.lines() {
        let line = raw.trim_end_matches('\r').trim_start_matches('\u{feff}');
        if line.trim().is_empty() {
            continue;
        }

        match parse_tag_line(line) {
            Some(("TY", value)) => {
                if let Some(open) = current.take() {
                    result.records.push(open);
                    result.unterminated = true;
                }
                current = Some(RisRecord {
                    ris_type: value.to_uppercase(),
                    tags: Vec::new(),
                });
            }
            Some(("ER", _)) => {
                if let Some(done) = current.take() {
                    result.records.push(done);
                }
            }
            Some((tag, value)) => {
                if let Some(record) = current.as_mut() {
                    record.tags.push((tag.to_string(), value.to_string()));
                }
            }
            None => {
                if let Some((_, value)) = current.as_mut().and_then(|r| r.tags.last_mut()) {
                    if !value.is_empty() {
                        value.push(' ');
                    }
                    value.push_str(line.trim());
                }
            }
        }
    }

    if let Some(open) = current {
        result.records.push(open);
        result.unterminated = true;
    }

    result
}

//! BibTeX parser built on nom.
//!
//! Handles `@string` macros, `#` concatenation, braced values with nested
//! braces, quoted values and bare numbers. `@comment` and `@preamble`
//! blocks are skipped. A malformed entry is recorded as an error and the
//! parser resumes at the next `@`.

use std::collections::HashMap;

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::map,
    error::{Error as NomError, ErrorKind},
    IResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibtexEntry {
    /// Lower-cased entry type, e.g. `article`.
    pub entry_type: String,
    pub cite_key: String,
    /// Field names are lower-cased; values keep their TeX markup.
    pub fields: Vec<(String, String)>,
}

impl BibtexEntry {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibtexParseError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BibtexParseResult {
    pub entries: Vec<BibtexEntry>,
    pub errors: Vec<BibtexParseError>,
}

enum AtBlock {
    Entry(BibtexEntry),
    Macro(String, String),
    Skipped,
}

pub fn parse_bibtex(input: &str) -> BibtexParseResult {
    let mut result = BibtexParseResult::default();
    let mut macros: HashMap<String, String> = HashMap::new();
    let mut remaining = input;

    loop {
        // Anything outside an @-block is commentary.
        let Some(at) = remaining.find('@') else {
            break;
        };
        remaining = &remaining[at..];

        match parse_at_block(remaining, &macros) {
            Ok((rest, block)) => {
                match block {
                    AtBlock::Entry(entry) => result.entries.push(entry),
                    AtBlock::Macro(key, value) => {
                        macros.insert(key.to_lowercase(), value);
                    }
                    AtBlock::Skipped => {}
                }
                remaining = rest;
            }
            Err(_) => {
                result.errors.push(BibtexParseError {
                    line: line_of(input, remaining),
                    message: "Failed to parse entry".to_string(),
                });
                remaining = &remaining[1..];
            }
        }
    }

    result
}

fn line_of(input: &str, at: &str) -> usize {
    let offset = input.len() - at.len();
    input[..offset].matches('\n').count() + 1
}

fn parse_at_block<'a>(
    input: &'a str,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, AtBlock> {
    let (rest, _) = char('@')(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, kind) = take_while1(|c: char| c.is_ascii_alphanumeric())(rest)?;

    match kind.to_lowercase().as_str() {
        "string" => {
            let (rest, (key, value)) = parse_macro_definition(rest, macros)?;
            Ok((rest, AtBlock::Macro(key, value)))
        }
        "comment" | "preamble" => {
            let (rest, _) = multispace0(rest)?;
            let (rest, _) = braced_content(rest)?;
            Ok((rest, AtBlock::Skipped))
        }
        entry_type => {
            let (rest, entry) = parse_entry_body(rest, entry_type, macros)?;
            Ok((rest, AtBlock::Entry(entry)))
        }
    }
}

fn parse_macro_definition<'a>(
    input: &'a str,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, (String, String)> {
    let (rest, _) = multispace0(input)?;
    let (rest, _) = char('{')(rest)?;
    let (rest, (key, value)) = parse_field(rest, macros)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('}')(rest)?;
    Ok((rest, (key, value)))
}

fn parse_entry_body<'a>(
    input: &'a str,
    entry_type: &str,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, BibtexEntry> {
    let (rest, _) = multispace0(input)?;
    let (rest, _) = char('{')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, cite_key) =
        take_while1(|c: char| c.is_ascii_alphanumeric() || "_-:./+".contains(c))(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char(',')(rest)?;

    let mut fields = Vec::new();
    let mut remaining = rest;
    loop {
        let (rest, _) = multispace0(remaining)?;
        if let Some(rest) = rest.strip_prefix('}') {
            return Ok((
                rest,
                BibtexEntry {
                    entry_type: entry_type.to_string(),
                    cite_key: cite_key.to_string(),
                    fields,
                },
            ));
        }
        let (rest, field) = parse_field(rest, macros)?;
        fields.push(field);
        let (rest, _) = multispace0(rest)?;
        remaining = rest.strip_prefix(',').unwrap_or(rest);
    }
}

/// `name = value`, name lower-cased.
fn parse_field<'a>(
    input: &'a str,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, (String, String)> {
    let (rest, _) = multispace0(input)?;
    let (rest, name) =
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, value) = parse_value(rest, macros)?;
    Ok((rest, (name.to_lowercase(), value)))
}

/// One or more value parts joined by `#`.
fn parse_value<'a>(input: &'a str, macros: &HashMap<String, String>) -> IResult<&'a str, String> {
    let mut value = String::new();
    let mut remaining = input;

    loop {
        let (rest, _) = multispace0(remaining)?;
        let (rest, part) = alt((
            map(braced_content, |s: &str| s[1..s.len() - 1].to_string()),
            quoted_value,
            map(take_while1(|c: char| c.is_ascii_digit()), str::to_string),
            map(
                take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
                |name: &str| {
                    macros
                        .get(&name.to_lowercase())
                        .cloned()
                        .unwrap_or_else(|| name.to_string())
                },
            ),
        ))(rest)?;
        value.push_str(&part);

        let (rest, _) = multispace0(rest)?;
        match rest.strip_prefix('#') {
            Some(next) => remaining = next,
            None => return Ok((rest, value)),
        }
    }
}

/// Matches `{...}` with nested braces and returns it including the outer pair.
fn braced_content(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('{') {
        return Err(nom::Err::Error(NomError::new(input, ErrorKind::Char)));
    }

    let mut depth = 0usize;
    let mut escaped = false;
    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[i + 1..], &input[..=i]));
                }
            }
            _ => {}
        }
    }

    Err(nom::Err::Error(NomError::new(input, ErrorKind::Char)))
}

/// Matches `"..."`; quotes inside braces do not terminate the value.
fn quoted_value(input: &str) -> IResult<&str, String> {
    if !input.starts_with('"') {
        return Err(nom::Err::Error(NomError::new(input, ErrorKind::Char)));
    }

    let mut depth = 0usize;
    let mut escaped = false;
    for (i, c) in input.char_indices().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '"' if depth == 0 => return Ok((&input[i + 1..], input[1..i].to_string())),
            _ => {}
        }
    }

    Err(nom::Err::Error(NomError::new(input, ErrorKind::Char)))
}

/// Removes TeX grouping braces and common escapes, collapsing whitespace.
pub fn clean_tex(value: &str) -> String {
    let unescaped = value
        .replace("\\&", "&")
        .replace("\\%", "%")
        .replace("\\_", "_")
        .replace("\\$", "$");
    unescaped
        .chars()
        .filter(|c| *c != '{' && *c != '}')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a BibTeX author list on top-level `and`.
pub fn split_authors(value: &str) -> Vec<String> {
    let mut authors = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut depth = 0i32;

    for token in value.split_whitespace() {
        if depth == 0 && token.eq_ignore_ascii_case("and") {
            authors.push(current.join(" "));
            current.clear();
            continue;
        }
        depth += token.matches('{').count() as i32 - token.matches('}').count() as i32;
        current.push(token);
    }
    authors.push(current.join(" "));

    authors
        .iter()
        .map(|a| clean_tex(a))
        .filter(|a| !a.is_empty())
        .collect()
}

//! Parser for line-oriented `key=value` property text.
//!
//! Follows the classic `.properties` rules:
//!
//! - `#` or `!` as the first non-blank character starts a comment line
//! - the key ends at the first unescaped `=`, `:` or blank
//! - a line ending in an odd number of backslashes continues on the next line
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes; any other `\c` is `c`

use std::collections::HashMap;

use super::PropertiesError;

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Parses property text into a flat map. Later keys override earlier ones.
pub fn parse_properties(text: &str) -> Result<HashMap<String, String>, PropertiesError> {
    let mut map = HashMap::new();

    for (line_no, logical) in logical_lines(text) {
        let (raw_key, raw_value) = split_entry(&logical);
        let key = unescape(raw_key, line_no)?;
        let value = unescape(raw_value, line_no)?;
        map.insert(key, value);
    }

    Ok(map)
}

/// Joins continued lines and drops blanks and comments.
///
/// Each logical line is paired with the 1-based number of the physical line
/// it started on.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, physical) in text.lines().enumerate() {
        let trimmed = physical.trim_start_matches(is_blank);

        let (line_no, mut logical) = match pending.take() {
            Some((start, mut logical)) => {
                logical.push_str(trimmed);
                (start, logical)
            }
            None => {
                if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                    continue;
                }
                (index + 1, trimmed.to_string())
            }
        };

        let trailing = logical.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            logical.pop();
            pending = Some((line_no, logical));
        } else {
            lines.push((line_no, logical));
        }
    }

    if let Some(last) = pending {
        lines.push(last);
    }
    lines
}

/// Splits a logical line into its still-escaped key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                let value = line[i + 1..].trim_start_matches(is_blank);
                return (&line[..i], value);
            }
            c if is_blank(c) => {
                let mut value = line[i..].trim_start_matches(is_blank);
                if let Some(rest) = value.strip_prefix(['=', ':']) {
                    value = rest.trim_start_matches(is_blank);
                }
                return (&line[..i], value);
            }
            _ => {}
        }
    }

    (line, "")
}

fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => out.push(unicode_escape(&mut chars, line)?),
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

/// Decodes the digits after `\u`, pairing UTF-16 surrogates when needed.
fn unicode_escape(chars: &mut std::str::Chars<'_>, line: usize) -> Result<char, PropertiesError> {
    let malformed = || PropertiesError::MalformedEscape { line };

    let high = hex_unit(chars).ok_or_else(malformed)?;
    if !(0xD800..=0xDBFF).contains(&high) {
        return char::from_u32(u32::from(high)).ok_or_else(malformed);
    }

    if chars.next() != Some('\\') || chars.next() != Some('u') {
        return Err(malformed());
    }
    let low = hex_unit(chars).ok_or_else(malformed)?;

    char::decode_utf16([high, low])
        .next()
        .and_then(Result::ok)
        .ok_or_else(malformed)
}

fn hex_unit(chars: &mut std::str::Chars<'_>) -> Option<u16> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(&digits, 16).ok()
}

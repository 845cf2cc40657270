//! Reading display text back into values
//!
//! Spreadsheet exporters receive cell text already formatted for display
//! (`$1,234.50`, `12.5%`, `3/15/2024`). [`parse_value`] undoes that
//! formatting so the cell can be written as a typed value with the pattern
//! from [`crate::NumberFormatSynthesizer`] attached.
//!
//! Month and day names are matched in English only.

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{NaiveDateTime, NaiveTime};
use folio_core::ValueFormat;

use crate::locale::LocaleInfo;

/// Fallback layouts tried after the locale's own patterns
const ISO_PATTERNS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d"];

/// A value recovered from display text
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedValue {
    Number(f64),
    DateTime(NaiveDateTime),
}

impl ParsedValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParsedValue::Number(n) => Some(*n),
            ParsedValue::DateTime(_) => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            ParsedValue::DateTime(dt) => Some(*dt),
            ParsedValue::Number(_) => None,
        }
    }
}

/// Parse `text` as displayed under `format` in `locale`
///
/// Numbers accept group separators, surrounding whitespace and a leading or
/// trailing `-`. Currency additionally drops the format's and the locale's
/// symbol and reads `(...)` as negative. Percentages are divided by 100.
/// Dates without a time component come back at midnight, and dates without a
/// day (year-month formats) on the first of the month.
///
/// Returns `None` when the text does not read as the format's kind of value.
///
/// # Examples
/// ```
/// use folio_core::ValueFormat;
/// use folio_encoding::{parse_value, LocaleInfo, ParsedValue};
///
/// let locale = LocaleInfo::en_us();
/// assert_eq!(
///     parse_value("($1,234.50)", &ValueFormat::currency("$", 2), &locale),
///     Some(ParsedValue::Number(-1234.5))
/// );
/// ```
pub fn parse_value(text: &str, format: &ValueFormat, locale: &LocaleInfo) -> Option<ParsedValue> {
    match format {
        ValueFormat::Number { .. } => parse_number(text, locale, &[], false).map(ParsedValue::Number),
        ValueFormat::Currency { symbol, .. } => {
            let symbols = [symbol.as_str(), locale.currency_symbol.as_str()];
            parse_number(text, locale, &symbols, true).map(ParsedValue::Number)
        }
        ValueFormat::Percent { .. } => {
            let text = text.trim();
            let text = text
                .strip_suffix('%')
                .or_else(|| text.strip_prefix('%'))
                .unwrap_or(text);
            parse_number(text, locale, &[], false).map(|n| ParsedValue::Number(n / 100.0))
        }
        ValueFormat::Date { pattern } => parse_date(text.trim(), pattern, locale).map(ParsedValue::DateTime),
    }
}

fn parse_number(text: &str, locale: &LocaleInfo, symbols: &[&str], parens: bool) -> Option<f64> {
    let mut body = text.trim().to_string();
    for symbol in symbols.iter().filter(|s| !s.is_empty()) {
        body = body.replace(*symbol, "");
    }
    let body = body.trim();

    let (mut negative, mut body) = match body.strip_prefix('(').and_then(|b| b.strip_suffix(')')) {
        Some(inner) if parens => (true, inner.trim()),
        _ => (false, body),
    };
    if let Some(rest) = body.strip_prefix('-').or_else(|| body.strip_suffix('-')) {
        if negative {
            return None;
        }
        negative = true;
        body = rest.trim();
    } else if let Some(rest) = body.strip_prefix('+') {
        body = rest.trim();
    }

    let body = if locale.group_separator.is_empty() {
        body.to_string()
    } else {
        body.replace(locale.group_separator.as_str(), "")
    };
    let body = body.replace(locale.decimal_separator.as_str(), ".");

    let mut digits = String::with_capacity(body.len());
    for c in body.chars() {
        match c {
            '0'..='9' | '.' => digits.push(c),
            c if c.is_whitespace() => {}
            _ => return None,
        }
    }
    if !digits.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let value: f64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

fn parse_date(text: &str, pattern: &str, locale: &LocaleInfo) -> Option<NaiveDateTime> {
    let resolved = match pattern {
        "d" => locale.short_date_pattern.clone(),
        "D" => locale.long_date_pattern.clone(),
        "f" => format!("{} {}", locale.long_date_pattern, locale.short_time_pattern),
        "F" => locale.full_date_time_pattern.clone(),
        "MMMM yyyy" => locale.year_month_pattern.clone(),
        literal => literal.to_string(),
    };
    let locale_patterns = [
        resolved,
        format!("{} {}", locale.short_date_pattern, locale.short_time_pattern),
        locale.short_date_pattern.clone(),
    ];

    locale_patterns
        .iter()
        .map(|p| strftime_pattern(p))
        .chain(ISO_PATTERNS.iter().map(|p| p.to_string()))
        .find_map(|fmt| parse_with(text, &fmt))
}

fn parse_with(text: &str, fmt: &str) -> Option<NaiveDateTime> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, text, StrftimeItems::new(fmt)).ok()?;
    // Only fills the day in when the layout had none.
    if parsed.day().is_none() {
        parsed.set_day(1).ok()?;
    }
    let date = parsed.to_naive_date().ok()?;
    let time = parsed.to_naive_time().unwrap_or(NaiveTime::MIN);
    Some(date.and_time(time))
}

/// Rewrite a display pattern (`M/d/yyyy h:mm tt`) as a strftime layout
fn strftime_pattern(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }
        match c {
            'y' => out.push_str(if run <= 2 { "%y" } else { "%Y" }),
            'M' => out.push_str(match run {
                1 | 2 => "%m",
                3 => "%b",
                _ => "%B",
            }),
            'd' => out.push_str(match run {
                1 | 2 => "%d",
                3 => "%a",
                _ => "%A",
            }),
            'H' => out.push_str("%H"),
            'h' => out.push_str("%I"),
            'm' => out.push_str("%M"),
            's' => out.push_str("%S"),
            't' => out.push_str("%p"),
            '\'' | '"' => {
                let end = chars[i + 1..]
                    .iter()
                    .position(|&q| q == c)
                    .map_or(chars.len(), |p| i + 1 + p);
                push_literal(&mut out, &chars[i + 1..end]);
                i = end + 1;
                continue;
            }
            '\\' => {
                if let Some(next) = chars.get(i + 1) {
                    push_literal(&mut out, &[*next]);
                }
                i += 2;
                continue;
            }
            // Single-letter custom prefix, e.g. `%d`.
            '%' => {
                i += 1;
                continue;
            }
            _ => {
                for _ in 0..run {
                    out.push(c);
                }
            }
        }
        i += run;
    }
    out
}

fn push_literal(out: &mut String, chars: &[char]) {
    for &c in chars {
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
    }
}

//! Text analysis
//!
//! Pure, deterministic functions shared by the index writer and the
//! translator: what lands in the index and what a query searches for must
//! agree token for token.
//!
//! Tokenization lowercases and splits on non-alphanumerics. The default
//! sub-field applies a light suffix-stripping stem on top; the exact
//! sub-field stops at lowercased whole tokens. The stem is intentionally
//! crude: it only has to be identical on both sides of the index, not
//! linguistically complete.

use chrono::NaiveDate;

/// Splits text into lowercased alphanumeric tokens
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Light suffix-stripping stem applied to one token.
///
/// First matching rule wins: `ies` -> `y`, then `ing`, `ed`, `s`
/// stripped, each guarded by a minimum length so short tokens survive.
pub fn stem(token: &str) -> String {
    if token.len() > 4 {
        if let Some(base) = token.strip_suffix("ies") {
            return format!("{}y", base);
        }
    }
    if token.len() > 5 {
        if let Some(base) = token.strip_suffix("ing") {
            return base.to_string();
        }
    }
    if token.len() > 4 {
        if let Some(base) = token.strip_suffix("ed") {
            return base.to_string();
        }
    }
    if token.len() > 3 && !token.ends_with("ss") {
        if let Some(base) = token.strip_suffix('s') {
            return base.to_string();
        }
    }
    token.to_string()
}

/// Tokens for the analyzed (stemmed) default sub-field
pub fn analyzed_tokens(text: &str) -> Vec<String> {
    tokenize(text).iter().map(|t| stem(t)).collect()
}

/// Tokens for the not-stemmed exact sub-field
pub fn exact_tokens(text: &str) -> Vec<String> {
    tokenize(text)
}

/// Whole-value keyword term: trimmed and lowercased, no analysis
pub fn keyword_term(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Order-preserving encoding of a signed integer.
///
/// Flipping the sign bit maps i64 ordering onto unsigned ordering, and
/// fixed-width hex keeps the lexicographic order of the resulting terms
/// identical to the numeric order.
pub fn sortable_number(value: i64) -> String {
    format!("{:016x}", (value as u64) ^ 0x8000_0000_0000_0000)
}

/// Order-preserving date term: ISO `yyyy-MM-dd` is already lexicographic
pub fn sortable_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses the calendar-date surface form used in query text
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// Order-preserving term for a sortable field's text value: dates render
/// in their lexicographic ISO form, everything else falls back to the
/// keyword term
pub fn sortable_term(text: &str) -> String {
    match parse_date(text) {
        Some(date) => sortable_date(date),
        None => keyword_term(text),
    }
}

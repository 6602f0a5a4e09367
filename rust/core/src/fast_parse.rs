// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Float parsing for attribute values and point lists.
//!
//! Both paths go through fast-float so that `ID="1"`, `AbsX="1e-3"` and a
//! point token `1e-3` accept exactly the same literals.

/// Parse a single float literal, ignoring surrounding whitespace.
///
/// A leading `+` is accepted. Returns `None` if anything other than one
/// complete literal is present.
#[inline]
pub fn parse_float(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let unsigned = match trimmed.strip_prefix('+') {
        Some(rest) if rest.starts_with(&['+', '-'][..]) => return None,
        Some(rest) => rest,
        None => trimmed,
    };
    fast_float::parse::<f64, _>(unsigned).ok()
}

/// Parse a whitespace-separated list of float literals.
///
/// On failure the offending token is returned so the caller can report it.
pub fn parse_float_list(text: &str) -> Result<Vec<f64>, String> {
    // ~6 bytes per token is typical for exported point data
    let mut values = Vec::with_capacity(text.len() / 6);
    for token in text.split_whitespace() {
        match parse_float(token) {
            Some(value) => values.push(value),
            None => return Err(token.to_string()),
        }
    }
    Ok(values)
}

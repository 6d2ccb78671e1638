//! Odds normalization
//!
//! Every odds field in the source sheet is free text: a ratio such as `1:4`
//! or `2:1`, a bare number meaning `1:N`, or a spreadsheet error / empty
//! placeholder. All comparisons in the engine go through [`normalize`], which
//! maps a field onto a single "draws per hit" scale.

/// Returns `true` for values the sheet uses to mean "no data"
///
/// Covers empty cells, spreadsheet errors (`#N/A`, `#REF!`, ...) and the
/// literal strings `null` / `undefined` in any case.
pub fn is_sentinel(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("undefined")
}

/// Sentinel-filtered display form of an odds field
///
/// Returns the trimmed string exactly as entered (`"1:4"`, `"2:1"`, `"36"`),
/// or `None` when the cell holds no data.
pub fn format_odds_value(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if is_sentinel(raw) {
        return None;
    }
    Some(raw.trim().to_string())
}

/// Normalize an odds field to "expected draws per hit"
///
/// * `"A:B"` → `B / A` (`"1:4"` → 4.0, `"2:1"` → 0.5)
/// * `"N"` → `N` (read as `1:N`)
/// * sentinels, malformed ratios, `B == 0` → `None`
///
/// Results that are negative or not finite (`"0:4"`, `"inf"`) are rejected so
/// that every `Some` value can be ranked and divided by safely.
pub fn normalize(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    if is_sentinel(raw) {
        return None;
    }
    let trimmed = raw.trim();

    let value = if trimmed.contains(':') {
        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() != 2 {
            return None;
        }
        let left = parse_number(parts[0])?;
        let right = parse_number(parts[1])?;
        if right == 0.0 {
            return None;
        }
        right / left
    } else {
        parse_number(trimmed)?
    };

    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Convenience for already-owned fields
pub fn normalize_str(raw: &str) -> Option<f64> {
    normalize(Some(raw))
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

//! Closed set of named background colors
//!
//! The avatar API takes a bare 6-digit hex code (no `#`). Users type color
//! names; anything outside this set is rejected before the seed stage, so
//! resolution at fetch time never invents a value.

/// Supported color names and their hex codes, in menu/documentation order.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("red", "FF0000"),
    ("green", "00FF00"),
    ("blue", "0000FF"),
    ("black", "000000"),
    ("white", "FFFFFF"),
    ("gray", "808080"),
    ("yellow", "FFFF00"),
    ("purple", "800080"),
    ("orange", "FFA500"),
    ("pink", "FFC0CB"),
    ("brown", "A52A2A"),
    ("cyan", "00FFFF"),
    ("magenta", "FF00FF"),
];

/// Resolve a color name to its hex code. Case-insensitive; `None` on a miss.
pub fn resolve(name: &str) -> Option<&'static str> {
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, hex)| *hex)
}

/// Whether the name belongs to the closed set.
pub fn is_known(name: &str) -> bool {
    resolve(name).is_some()
}

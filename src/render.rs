// SPDX-License-Identifier: PMPL-1.0-or-later

//! Placeholder substitution for resolved strings.
//!
//! The catalog hands `%1`, `%2`, ... through untouched; callers fill them
//! in at render time. `%L1` (locale-aware number form) is treated like `%1`.
//! Substitution is a single pass, so an argument containing `%2` is never
//! expanded again.

use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%L?([1-9][0-9]?)").expect("placeholder pattern is valid"));

/// Replace `%n` with `args[n - 1]`. Placeholders without an argument stay as-is.
///
/// ```
/// use ts_catalog::render::arg;
/// assert_eq!(arg("About %1", &["Speech Note"]), "About Speech Note");
/// assert_eq!(arg("%2 of %1", &["10", "3"]), "3 of 10");
/// assert_eq!(arg("Version %1", &[]), "Version %1");
/// ```
pub fn arg(template: &str, args: &[&str]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let index: usize = caps[1].parse().unwrap_or(0);
            match index.checked_sub(1).and_then(|i| args.get(i)) {
                Some(value) => (*value).to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Distinct placeholder numbers used by `text`.
pub fn placeholders(text: &str) -> BTreeSet<u32> {
    PLACEHOLDER
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse().ok())
        .collect()
}

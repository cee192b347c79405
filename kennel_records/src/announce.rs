// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-reader text derived from result and filter counts.

fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}

/// Live-region message after a filter change.
pub fn results_announcement(count: usize) -> String {
    if count == 0 {
        "No pets found matching your search criteria".to_owned()
    } else {
        results_label(count)
    }
}

/// `"{n} pet found"` / `"{n} pets found"`.
pub fn results_label(count: usize) -> String {
    format!("{count} {} found", plural(count, "pet", "pets"))
}

/// Accessible label of the active filter badge.
pub fn active_filters_label(count: usize) -> String {
    format!("{count} active {}", plural(count, "filter", "filters"))
}

/// Visible text of the active filter badge.
pub fn filters_badge(count: usize) -> String {
    format!("{count} {}", plural(count, "filter", "filters"))
}

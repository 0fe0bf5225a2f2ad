//! Name search for the interactive views.
//!
//! Folding strips accents and case so "creme" finds "Crème fraîche". This is
//! only for finding things; the reconciler joins on raw names.

use slug::slugify;
use strsim::jaro_winkler;

use crate::planner::constants::{FUZZY_MATCH_THRESHOLD, MAX_SUGGESTIONS};

/// Accent-stripped, lowercased form of a name.
pub fn fold_name(name: &str) -> String {
    slugify(name)
}

/// Items whose folded name contains the folded query.
pub fn filter_by_name<'a, T, F>(items: &'a [T], query: &str, name_of: F) -> Vec<&'a T>
where
    F: Fn(&T) -> &str,
{
    let needle = fold_name(query);
    items
        .iter()
        .filter(|item| fold_name(name_of(item)).contains(&needle))
        .collect()
}

/// Closest candidate names to `query`, best first.
///
/// An exact folded match is returned alone.
pub fn suggest<'a>(candidates: &[&'a str], query: &str) -> Vec<&'a str> {
    let needle = fold_name(query);

    if let Some(exact) = candidates.iter().find(|c| fold_name(c) == needle) {
        return vec![*exact];
    }

    let mut scored: Vec<(&str, f64)> = candidates
        .iter()
        .map(|c| (*c, jaro_winkler(&fold_name(c), &needle)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(name, _)| name)
        .collect()
}

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::error::{PlannerError, Result};
use crate::models::{IngredientDemand, PantryEntry, ReconciledNeed};

/// Join pantry stock onto ingredient demand with a sorted merge.
///
/// Both inputs are ordered by raw name (code point order) and walked with
/// two cursors. A demanded name found in the pantry takes its stock as
/// `have`; a demanded name missing from the pantry keeps `have = 0`; a
/// pantry name with no demand is dropped.
///
/// The output has one entry per demand entry, in the demand's input order.
///
/// Names must be unique within each input (see [`ensure_unique_names`]).
/// With duplicates only the first occurrence in sorted order can match.
pub fn reconcile(pantry: &[PantryEntry], demand: &[IngredientDemand]) -> Vec<ReconciledNeed> {
    let mut needs: Vec<ReconciledNeed> = demand.iter().map(ReconciledNeed::from).collect();

    let mut stock: Vec<&PantryEntry> = pantry.iter().collect();
    stock.sort_by(|a, b| a.name.cmp(&b.name));

    let mut order: Vec<usize> = (0..needs.len()).collect();
    order.sort_by(|&a, &b| needs[a].name.cmp(&needs[b].name));

    let (mut i, mut j) = (0, 0);
    while i < stock.len() && j < order.len() {
        let entry = stock[i];
        let need = &mut needs[order[j]];

        match entry.name.as_str().cmp(need.name.as_str()) {
            Ordering::Equal => {
                need.have = entry.amount_on_hand;
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }

    needs
}

/// Reject a snapshot in which two entries share a name.
pub fn ensure_unique_names<'a, I>(collection: &str, names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(PlannerError::DuplicateName {
                collection: collection.to_string(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

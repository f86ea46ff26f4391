use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::{debug, info};

use crate::models::{Contact, MergeKey, MergedContact, Remainder};

/// Result of Stage 2 merging
#[derive(Debug)]
pub struct Stage2Result {
    /// Unique contacts sorted by (first, last)
    pub contacts: Vec<MergedContact>,
    /// Rows folded into an earlier contact with the same key
    pub duplicates_merged: usize,
    /// Remainder fields overwritten or filled in by later rows
    pub fields_updated: usize,
}

/// Execute Stage 2: collapse contacts sharing a (first, last) key.
///
/// Rows are folded in input order. For each remainder field a later row
/// replaces the stored value unless its own value is empty, so the last
/// non-empty value wins. The fold is order dependent on purpose.
pub fn execute_stage2(contacts: Vec<Contact>) -> Stage2Result {
    let input_count = contacts.len();
    let mut merged: BTreeMap<MergeKey, Remainder> = BTreeMap::new();
    let mut duplicates_merged = 0;
    let mut fields_updated = 0;

    for contact in contacts {
        let (key, remainder) = contact.into_parts();
        match merged.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(remainder);
            }
            Entry::Occupied(mut slot) => {
                let changed = slot.get_mut().absorb(remainder);
                debug!(
                    "Merged duplicate {} {} ({} fields updated)",
                    slot.key().first,
                    slot.key().last,
                    changed
                );
                duplicates_merged += 1;
                fields_updated += changed;
            }
        }
    }

    // BTreeMap iteration is already ascending by (first, last)
    let contacts: Vec<MergedContact> = merged
        .into_iter()
        .map(|(key, remainder)| MergedContact { key, remainder })
        .collect();

    info!(
        "Merged {} contacts into {} unique ({} duplicates)",
        input_count,
        contacts.len(),
        duplicates_merged
    );

    Stage2Result {
        contacts,
        duplicates_merged,
        fields_updated,
    }
}

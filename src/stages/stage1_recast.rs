use std::borrow::Cow;

use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::models::{CONTACT_WIDTH, Contact, EXTRA_POSITION, RawRow};
use crate::phone::canonicalize_phone;

/// Result of Stage 1 recasting
#[derive(Debug)]
pub struct Stage1Result {
    /// One contact per raw row, in input order
    pub contacts: Vec<Contact>,
    /// Phones rewritten into canonical form
    pub phones_canonicalized: usize,
    /// Phones left unchanged because they were not recognized
    pub phones_passed_through: usize,
}

/// Execute Stage 1: recast every raw row into a contact.
///
/// The first malformed row aborts the stage.
pub fn execute_stage1(rows: &[RawRow]) -> Result<Stage1Result> {
    let mut contacts = Vec::with_capacity(rows.len());
    let mut phones_canonicalized = 0;
    let mut phones_passed_through = 0;

    for row in rows {
        let (contact, rewritten) = recast(row)?;
        if rewritten {
            phones_canonicalized += 1;
        } else {
            phones_passed_through += 1;
            if !contact.phone.is_empty() {
                debug!("Row {}: phone {:?} left as is", row.index, contact.phone);
            }
        }
        contacts.push(contact);
    }

    info!(
        "Recast {} contacts ({} phones canonicalized, {} passed through)",
        contacts.len(),
        phones_canonicalized,
        phones_passed_through
    );

    Ok(Stage1Result {
        contacts,
        phones_canonicalized,
        phones_passed_through,
    })
}

/// Recast one raw row.
///
/// The first three fields are joined with single spaces and split again,
/// so a first field such as "Anna Maria" spills into the middle slot and
/// pushes the rest along. Position 6 is carried when present; anything
/// after it is dropped.
pub fn recast_row(row: &RawRow) -> Result<Contact> {
    recast(row).map(|(contact, _)| contact)
}

/// Recast a row and report whether its phone was rewritten
fn recast(row: &RawRow) -> Result<(Contact, bool)> {
    if row.field_count() < CONTACT_WIDTH {
        return Err(PipelineError::MalformedRow {
            row_index: row.index,
            field_count: row.field_count(),
            expected: CONTACT_WIDTH,
        });
    }

    let full_name = row.fields[..3].join(" ");
    let mut names = full_name.split(' ').map(str::to_string);
    // Joining three fields leaves at least two spaces, so there are always three tokens
    let first = names.next().unwrap_or_default();
    let middle = names.next().unwrap_or_default();
    let last = names.next().unwrap_or_default();

    let (phone, rewritten) = match canonicalize_phone(&row.fields[5]) {
        Cow::Owned(phone) => (phone, true),
        Cow::Borrowed(raw) => (raw.to_string(), false),
    };

    let contact = Contact {
        first,
        middle,
        last,
        organization: row.fields[3].clone(),
        position: row.fields[4].clone(),
        phone,
        email: row.fields.get(EXTRA_POSITION).cloned().unwrap_or_default(),
    };
    Ok((contact, rewritten))
}

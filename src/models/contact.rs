/// Number of raw fields a row needs before it can be recast
pub const CONTACT_WIDTH: usize = 6;

/// Raw position of the optional trailing pass-through column
pub const EXTRA_POSITION: usize = 6;

/// One parsed input line, fields kept exactly as read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Zero-based position of the record in the input file
    pub index: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new(index: usize, fields: Vec<String>) -> Self {
        Self { index, fields }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// A recast contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub first: String,
    pub middle: String,
    pub last: String,
    /// Opaque pass-through column (raw position 3)
    pub organization: String,
    /// Opaque pass-through column (raw position 4)
    pub position: String,
    /// Canonical phone, or the raw value when it was not recognized
    pub phone: String,
    /// Opaque pass-through column (raw position 6, usually an email), empty when absent
    pub email: String,
}

impl Contact {
    /// Split into the merge key and the mergeable attributes.
    /// The middle name is not part of the key.
    pub fn into_parts(self) -> (MergeKey, Remainder) {
        (
            MergeKey {
                first: self.first,
                last: self.last,
            },
            Remainder {
                middle: self.middle,
                organization: self.organization,
                position: self.position,
                phone: self.phone,
                email: self.email,
            },
        )
    }

    /// Fields in recast order: first, middle, last, organization, position, phone, email
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.first.clone(),
            self.middle.clone(),
            self.last.clone(),
            self.organization.clone(),
            self.position.clone(),
            self.phone.clone(),
            self.email.clone(),
        ]
    }
}

/// (first, last) pair identifying one person
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MergeKey {
    pub first: String,
    pub last: String,
}

/// Contact attributes other than the merge key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Remainder {
    pub middle: String,
    pub organization: String,
    pub position: String,
    pub phone: String,
    pub email: String,
}

impl Remainder {
    /// Fold a later occurrence into this one.
    ///
    /// Each field is replaced by the newer value unless the newer value is
    /// empty, so the last non-empty value seen for a field wins. Returns the
    /// number of fields that changed.
    pub fn absorb(&mut self, newer: Remainder) -> usize {
        let mut changed = 0;
        for (current, incoming) in [
            (&mut self.middle, newer.middle),
            (&mut self.organization, newer.organization),
            (&mut self.position, newer.position),
            (&mut self.phone, newer.phone),
            (&mut self.email, newer.email),
        ] {
            if !incoming.is_empty() && *current != incoming {
                *current = incoming;
                changed += 1;
            }
        }
        changed
    }
}

/// One deduplicated contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedContact {
    pub key: MergeKey,
    pub remainder: Remainder,
}

impl MergedContact {
    /// Fields in output order: first, last, middle, organization, position, phone, email
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.key.first.clone(),
            self.key.last.clone(),
            self.remainder.middle.clone(),
            self.remainder.organization.clone(),
            self.remainder.position.clone(),
            self.remainder.phone.clone(),
            self.remainder.email.clone(),
        ]
    }
}

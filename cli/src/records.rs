//! Raw records as read from league sources, before any normalization.

/// Opaque per-source person identifier. Only ever compared for equality.
pub type PersonId = String;

/// Name pieces as a source provides them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFragments {
    /// Separate first and last name columns (Lahman `nameFirst`/`nameLast`).
    Split {
        first: Option<String>,
        last: Option<String>,
    },
    /// A single display-name column (nflverse `full_name`).
    Full(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIdentityRecord {
    pub person_id: PersonId,
    pub name: NameFragments,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAppearanceRecord {
    pub person_id: PersonId,
    pub team: Option<String>,
    pub year: Option<u32>,
}

/// The two parallel record sets a league source yields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecords {
    pub identities: Vec<RawIdentityRecord>,
    pub appearances: Vec<RawAppearanceRecord>,
}

impl RawRecords {
    pub fn extend(&mut self, other: RawRecords) {
        self.identities.extend(other.identities);
        self.appearances.extend(other.appearances);
    }
}

//! Identity normalization: canonical names, the identity join, and the
//! row filters that decide what becomes an appearance.

use std::collections::HashMap;

use tracing::info;

use crate::records::{NameFragments, PersonId, RawRecords};

/// Default minimum canonical name length. Anything of three characters or
/// fewer is a placeholder, not a name.
pub const DEFAULT_MIN_NAME_LEN: usize = 4;

/// A joined row that survived every filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub person_id: PersonId,
    pub name: String,
    pub team: String,
    pub year: u32,
}

/// Counts of what the normalizer read and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub identities_read: usize,
    pub short_names: usize,
    pub appearances_read: usize,
    pub unmatched: usize,
    pub missing_team_or_year: usize,
    pub kept: usize,
}

impl NormalizeReport {
    pub fn dropped(&self) -> usize {
        self.unmatched + self.missing_team_or_year
    }
}

/// First and last joined by one space, then trimmed; full names are trimmed.
pub fn canonical_name(fragments: &NameFragments) -> String {
    match fragments {
        NameFragments::Split { first, last } => format!(
            "{} {}",
            first.as_deref().unwrap_or(""),
            last.as_deref().unwrap_or("")
        )
        .trim()
        .to_string(),
        NameFragments::Full(full) => full.as_deref().unwrap_or("").trim().to_string(),
    }
}

pub fn is_valid_name(name: &str, min_len: usize) -> bool {
    !name.is_empty() && name.chars().count() >= min_len
}

/// Join appearances to identities on person id and keep the rows that have
/// a valid name, a team and a year.
///
/// This is an inner join in appearance order: appearances whose person has
/// no (valid) identity vanish, and a person with several identity records
/// yields one row per identity.
pub fn normalize(
    records: RawRecords,
    min_name_len: usize,
) -> (Vec<NormalizedRow>, NormalizeReport) {
    let RawRecords {
        identities,
        appearances,
    } = records;
    let mut report = NormalizeReport {
        identities_read: identities.len(),
        appearances_read: appearances.len(),
        ..Default::default()
    };

    let mut names_by_id: HashMap<PersonId, Vec<String>> = HashMap::new();
    for identity in identities {
        let name = canonical_name(&identity.name);
        if !is_valid_name(&name, min_name_len) {
            report.short_names += 1;
            continue;
        }
        names_by_id.entry(identity.person_id).or_default().push(name);
    }

    let mut rows = Vec::with_capacity(appearances.len());
    for appearance in appearances {
        let Some(names) = names_by_id.get(&appearance.person_id) else {
            report.unmatched += 1;
            continue;
        };
        let (Some(team), Some(year)) = (appearance.team, appearance.year) else {
            report.missing_team_or_year += 1;
            continue;
        };
        for name in names {
            rows.push(NormalizedRow {
                person_id: appearance.person_id.clone(),
                name: name.clone(),
                team: team.clone(),
                year,
            });
        }
    }
    report.kept = rows.len();

    info!(
        identities = report.identities_read,
        short_names = report.short_names,
        appearances = report.appearances_read,
        unmatched = report.unmatched,
        missing_team_or_year = report.missing_team_or_year,
        kept = report.kept,
        "normalized roster records"
    );
    (rows, report)
}

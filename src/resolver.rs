//! Result-set and division resolution
//!
//! Locates one participant inside the race classification of a subsession.
//! A participant either raced on their own (their id is on a result row) or as
//! part of a team (their id is on a crew member of a team row). Rows are
//! scanned in the order supplied by the API and the first match wins; the
//! individual search always runs before the team search.

use tracing::trace;

use crate::schema::{CrewMember, ResultRow, SessionResult};
use crate::{CertificateError, Result};

/// Simsession number of the official race classification.
pub const RACE_SIMSESSION: i32 = 0;

/// The race classification (simsession 0) of a subsession.
#[derive(Debug, Clone, Copy)]
pub struct Classification<'a> {
    subsession_id: i64,
    rows: &'a [ResultRow],
}

impl<'a> Classification<'a> {
    /// Select the race classification, failing when the payload has none.
    pub fn of(session: &'a SessionResult) -> Result<Self> {
        let race = session.simsession(RACE_SIMSESSION).ok_or(
            CertificateError::MissingClassification { subsession_id: session.subsession_id },
        )?;
        Ok(Self { subsession_id: session.subsession_id, rows: &race.results })
    }

    /// Subsession the classification belongs to.
    pub fn subsession_id(&self) -> i64 {
        self.subsession_id
    }

    /// Search for a participant: individual rows first, then team crews.
    pub fn find(&self, participant_id: i64) -> EntryMatch<'a> {
        if let Some(row) = self.rows.iter().find(|row| row.cust_id == Some(participant_id)) {
            return EntryMatch::Individual(row);
        }

        self.rows
            .iter()
            .find_map(|team| {
                team.crew_member(participant_id).map(|member| EntryMatch::Team { team, member })
            })
            .unwrap_or(EntryMatch::NotFound)
    }
}

/// Outcome of searching a classification for one participant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryMatch<'a> {
    /// The participant has their own result row
    Individual(&'a ResultRow),
    /// The participant is a crew member of a team row
    Team { team: &'a ResultRow, member: &'a CrewMember },
    /// Neither search matched
    NotFound,
}

impl<'a> EntryMatch<'a> {
    /// Convert a successful match into a [`ResolvedEntry`].
    pub fn resolved(self) -> Option<ResolvedEntry<'a>> {
        match self {
            EntryMatch::Individual(row) => Some(ResolvedEntry::Individual(row)),
            EntryMatch::Team { team, member } => Some(ResolvedEntry::Team { team, member }),
            EntryMatch::NotFound => None,
        }
    }
}

/// A participant's result entry, tagged by how they raced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedEntry<'a> {
    /// Individual result row
    Individual(&'a ResultRow),
    /// Team result row plus the crew member that matched
    Team { team: &'a ResultRow, member: &'a CrewMember },
}

impl<'a> ResolvedEntry<'a> {
    /// The row carrying the scoring fields (position, class, car).
    pub fn scoring_row(&self) -> &'a ResultRow {
        match self {
            ResolvedEntry::Individual(row) => row,
            ResolvedEntry::Team { team, .. } => team,
        }
    }

    /// Division of the matched participant.
    ///
    /// Crew members report their own division; team rows have none.
    pub fn division(&self) -> Option<i32> {
        match self {
            ResolvedEntry::Individual(row) => row.division,
            ResolvedEntry::Team { member, .. } => member.division,
        }
    }

    /// Whether the participant raced as part of a team.
    pub fn is_team(&self) -> bool {
        matches!(self, ResolvedEntry::Team { .. })
    }
}

/// Locate a participant's entry in the race classification.
pub fn resolve(session: &SessionResult, participant_id: i64) -> Result<ResolvedEntry<'_>> {
    let classification = Classification::of(session)?;
    let found = classification.find(participant_id);
    trace!(
        subsession_id = classification.subsession_id(),
        participant_id,
        matched = !matches!(found, EntryMatch::NotFound),
        "searched race classification"
    );

    found.resolved().ok_or_else(|| {
        CertificateError::participant_not_found(participant_id, classification.subsession_id())
    })
}

/// Division of a participant in a subsession, used to pick a standings bucket.
pub fn division_of(session: &SessionResult, participant_id: i64) -> Result<i32> {
    resolve(session, participant_id)?
        .division()
        .ok_or_else(|| CertificateError::malformed("division"))
}

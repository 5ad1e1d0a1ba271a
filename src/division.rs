use rayon::prelude::*;
use std::collections::HashMap;

use crate::cache::CertificateCache;
use crate::elimination::{decide, Certificate};
use crate::error::{EliminationError, Result};
use crate::team::TeamRecord;

/// How a team's `remaining` count must relate to its head-to-head row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RemainingPolicy {
    /// `remaining` equals the games left against division rivals.
    #[default]
    Exact,
    /// `remaining` may also count games against teams outside the division.
    AllowOutsideGames,
}

/// Read-only standings of one division plus its elimination results.
///
/// Certificates are computed on first request per team and cached for the
/// lifetime of the division.
#[derive(Debug)]
pub struct Division {
    records: Vec<TeamRecord>,
    index: HashMap<String, usize>,
    against: Vec<Vec<u32>>,
    cache: CertificateCache,
}

impl Division {
    /// Build a division whose `remaining` counts match the schedule exactly.
    pub fn new(records: Vec<TeamRecord>, against: Vec<Vec<u32>>) -> Result<Self> {
        Self::with_policy(records, against, RemainingPolicy::Exact)
    }

    /// Build a division, checking each team's `remaining` count against its
    /// head-to-head row: equal under `Exact`, at least the row sum under
    /// `AllowOutsideGames`.
    pub fn with_policy(
        records: Vec<TeamRecord>,
        against: Vec<Vec<u32>>,
        policy: RemainingPolicy,
    ) -> Result<Self> {
        let n = records.len();
        if n == 0 {
            return Err(EliminationError::malformed("division has no teams"));
        }
        if against.len() != n {
            return Err(EliminationError::malformed(format!(
                "expected {} head-to-head rows, found {}",
                n,
                against.len()
            )));
        }

        let mut index = HashMap::with_capacity(n);
        for (i, record) in records.iter().enumerate() {
            if record.name.is_empty() {
                return Err(EliminationError::malformed(format!("team {} has an empty name", i + 1)));
            }
            if index.insert(record.name.clone(), i).is_some() {
                return Err(EliminationError::malformed(format!(
                    "duplicate team name: {}",
                    record.name
                )));
            }
        }

        for (i, row) in against.iter().enumerate() {
            let name = &records[i].name;
            if row.len() != n {
                return Err(EliminationError::malformed(format!(
                    "{}: expected {} head-to-head entries, found {}",
                    name,
                    n,
                    row.len()
                )));
            }
            if row[i] != 0 {
                return Err(EliminationError::malformed(format!(
                    "{}: {} games scheduled against itself",
                    name, row[i]
                )));
            }
            for (j, &games) in row.iter().enumerate().take(i) {
                if against[j][i] != games {
                    return Err(EliminationError::malformed(format!(
                        "asymmetric schedule: {} lists {} games against {}, which lists {}",
                        name, games, records[j].name, against[j][i]
                    )));
                }
            }

            let scheduled: u64 = row.iter().map(|&games| u64::from(games)).sum();
            let remaining = u64::from(records[i].remaining);
            let consistent = match policy {
                RemainingPolicy::Exact => remaining == scheduled,
                RemainingPolicy::AllowOutsideGames => remaining >= scheduled,
            };
            if !consistent {
                return Err(EliminationError::malformed(format!(
                    "{}: {} remaining games but {} scheduled in the division",
                    name, remaining, scheduled
                )));
            }
        }

        tracing::debug!(teams = n, ?policy, "division loaded");

        Ok(Division {
            cache: CertificateCache::new(n),
            records,
            index,
            against,
        })
    }

    pub fn number_of_teams(&self) -> usize {
        self.records.len()
    }

    /// Team names in input order.
    pub fn teams(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|record| record.name.as_str())
    }

    pub fn records(&self) -> &[TeamRecord] {
        &self.records
    }

    pub fn record(&self, team: &str) -> Result<&TeamRecord> {
        Ok(&self.records[self.index_of(team)?])
    }

    pub fn wins(&self, team: &str) -> Result<u32> {
        Ok(self.record(team)?.wins)
    }

    pub fn losses(&self, team: &str) -> Result<u32> {
        Ok(self.record(team)?.losses)
    }

    pub fn remaining(&self, team: &str) -> Result<u32> {
        Ok(self.record(team)?.remaining)
    }

    /// Games left between two teams.
    pub fn against(&self, team1: &str, team2: &str) -> Result<u32> {
        let i = self.index_of(team1)?;
        let j = self.index_of(team2)?;
        Ok(self.against[i][j])
    }

    pub fn is_eliminated(&self, team: &str) -> Result<bool> {
        Ok(self.certificate_at(self.index_of(team)?).is_eliminated())
    }

    /// Teams that eliminate `team`, or `None` if it can still finish first.
    ///
    /// Repeated calls return the same cached certificate.
    pub fn certificate_of_elimination(&self, team: &str) -> Result<Option<&Certificate>> {
        Ok(self.certificate_at(self.index_of(team)?).as_elimination())
    }

    /// Decide every team, fanning the work out across threads.
    ///
    /// Returns `(team, certificate)` pairs in input order.
    pub fn eliminations(&self) -> Vec<(&str, Option<&Certificate>)> {
        (0..self.records.len())
            .into_par_iter()
            .map(|team| {
                (
                    self.records[team].name.as_str(),
                    self.certificate_at(team).as_elimination(),
                )
            })
            .collect()
    }

    /// Number of teams whose result is already cached.
    pub fn cached_results(&self) -> usize {
        self.cache.populated()
    }

    pub(crate) fn index_of(&self, team: &str) -> Result<usize> {
        self.index
            .get(team)
            .copied()
            .ok_or_else(|| EliminationError::unknown_team(team))
    }

    pub(crate) fn record_at(&self, team: usize) -> &TeamRecord {
        &self.records[team]
    }

    pub(crate) fn games_between(&self, i: usize, j: usize) -> u32 {
        self.against[i][j]
    }

    fn certificate_at(&self, team: usize) -> &Certificate {
        self.cache.get_or_compute(team, || decide(self, team))
    }
}

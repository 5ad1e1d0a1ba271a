use std::sync::OnceLock;

use crate::elimination::Certificate;

/// Per-division memo of elimination certificates.
///
/// One slot per team index, filled on the first query for that team and
/// never cleared. `OnceLock` serializes concurrent first queries for the
/// same team, so the certificate computed first is the one every caller
/// sees for the lifetime of the division.
#[derive(Debug)]
pub struct CertificateCache {
    slots: Vec<OnceLock<Certificate>>,
}

impl CertificateCache {
    pub fn new(team_count: usize) -> Self {
        Self {
            slots: (0..team_count).map(|_| OnceLock::new()).collect(),
        }
    }

    /// Cached certificate for `team`, computing it with `compute` on a miss.
    pub fn get_or_compute<F>(&self, team: usize, compute: F) -> &Certificate
    where
        F: FnOnce() -> Certificate,
    {
        self.slots[team].get_or_init(compute)
    }

    pub fn get(&self, team: usize) -> Option<&Certificate> {
        self.slots.get(team).and_then(OnceLock::get)
    }

    /// Number of teams with a cached certificate.
    pub fn populated(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }
}

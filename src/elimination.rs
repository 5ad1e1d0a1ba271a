use crate::division::Division;
use crate::network::EliminationNetwork;

/// How an elimination question was settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EliminationMethod {
    /// Some team already has more wins than the candidate can reach.
    Trivial,
    /// Decided by max flow on the candidate's network.
    MaxFlow,
}

/// Teams that together prove a candidate cannot finish first.
///
/// Names are kept in division order. An empty certificate means the
/// candidate is still alive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Certificate {
    teams: Vec<String>,
    method: EliminationMethod,
}

impl Certificate {
    pub fn new(teams: Vec<String>, method: EliminationMethod) -> Self {
        Certificate { teams, method }
    }

    pub fn not_eliminated() -> Self {
        Certificate {
            teams: Vec::new(),
            method: EliminationMethod::MaxFlow,
        }
    }

    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.teams.iter().map(String::as_str)
    }

    pub fn contains(&self, team: &str) -> bool {
        self.teams.iter().any(|name| name == team)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn is_eliminated(&self) -> bool {
        !self.is_empty()
    }

    pub fn method(&self) -> EliminationMethod {
        self.method
    }

    /// `Some(self)` for an elimination, `None` for a team still alive.
    pub fn as_elimination(&self) -> Option<&Self> {
        self.is_eliminated().then_some(self)
    }
}

impl<'a> IntoIterator for &'a Certificate {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.teams.iter()
    }
}

/// Candidate that survived the trivial check.
///
/// Only [`trivial_check`] creates one, and only when no team has more wins
/// than `max_wins`; every sink capacity derived from it is non-negative.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Contender {
    team: usize,
    max_wins: u64,
}

impl Contender {
    pub(crate) fn team(&self) -> usize {
        self.team
    }

    pub(crate) fn max_wins(&self) -> u64 {
        self.max_wins
    }
}

pub(crate) enum TrivialCheck {
    Eliminated(Certificate),
    Open(Contender),
}

/// Compare the candidate's best case against every current win total.
pub(crate) fn trivial_check(division: &Division, team: usize) -> TrivialCheck {
    let max_wins = division.record_at(team).max_possible_wins();
    let leaders: Vec<String> = division
        .records()
        .iter()
        .filter(|other| max_wins < u64::from(other.wins))
        .map(|other| other.name.clone())
        .collect();

    if leaders.is_empty() {
        TrivialCheck::Open(Contender { team, max_wins })
    } else {
        TrivialCheck::Eliminated(Certificate::new(leaders, EliminationMethod::Trivial))
    }
}

/// Settle whether `team` is eliminated and build its certificate.
pub(crate) fn decide(division: &Division, team: usize) -> Certificate {
    let name = &division.record_at(team).name;
    match trivial_check(division, team) {
        TrivialCheck::Eliminated(certificate) => {
            tracing::debug!(team = %name, size = certificate.len(), "trivially eliminated");
            certificate
        }
        TrivialCheck::Open(contender) => {
            let network = EliminationNetwork::build(division, &contender);
            let certificate = network.solve(division);
            tracing::debug!(
                team = %name,
                eliminated = certificate.is_eliminated(),
                size = certificate.len(),
                "decided by max flow"
            );
            certificate
        }
    }
}

use std::fmt;

/// Standings line for one team in a division.
///
/// `remaining` counts every game the team has left, so it is at least the
/// number of head-to-head games it still plays inside the division.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamRecord {
    pub name: String,

    /// Games already won
    pub wins: u32,

    /// Games already lost
    pub losses: u32,

    /// Games left to play
    pub remaining: u32,
}

impl TeamRecord {
    pub fn new(name: impl Into<String>, wins: u32, losses: u32, remaining: u32) -> Self {
        TeamRecord {
            name: name.into(),
            wins,
            losses,
            remaining,
        }
    }

    /// Wins the team finishes with if it takes every remaining game.
    pub fn max_possible_wins(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.remaining)
    }
}

impl fmt::Display for TeamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} | {} | {}",
            self.name, self.wins, self.losses, self.remaining
        )
    }
}

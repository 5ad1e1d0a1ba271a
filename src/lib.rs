//! Elimination Core - decides which teams in a division can no longer finish
//! first.
//!
//! Each question is answered with a trivial win-total comparison when
//! possible and otherwise with a max-flow / min-cut computation whose cut
//! names the teams that eliminate the candidate. Python bindings are built
//! with the `python` feature.

pub mod cache;
pub mod constants;
pub mod division;
pub mod elimination;
pub mod error;
pub mod flow;
pub mod generator;
pub(crate) mod network;
pub mod report;
pub mod season;
pub mod team;

#[cfg(feature = "python")]
mod python;

pub use constants::UNBOUNDED_CAPACITY;
pub use division::{Division, RemainingPolicy};
pub use elimination::{Certificate, EliminationMethod};
pub use error::{EliminationError, Result};
pub use flow::{Capacity, FlowNetwork, MaxFlow};
pub use generator::{random_division, DivisionGenerator};
pub use report::{describe, division_report, team_report};
pub use season::{parse_season, read_season};
pub use team::TeamRecord;

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::division::{Division, RemainingPolicy};
use crate::elimination::{Certificate, EliminationMethod};
use crate::error::EliminationError;
use crate::generator::random_division;
use crate::report::{describe, division_report};
use crate::season::{parse_season, read_season};
use crate::team::TeamRecord;

impl From<EliminationError> for PyErr {
    fn from(err: EliminationError) -> PyErr {
        match err {
            EliminationError::Io(e) => PyIOError::new_err(format!("Failed to read season: {}", e)),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

fn policy(allow_outside_games: bool) -> RemainingPolicy {
    if allow_outside_games {
        RemainingPolicy::AllowOutsideGames
    } else {
        RemainingPolicy::Exact
    }
}

fn team_names(certificate: Option<&Certificate>) -> Option<Vec<String>> {
    certificate.map(|cert| cert.teams().to_vec())
}

/// Division standings with cached elimination results.
#[pyclass(name = "Division")]
pub struct PyDivision {
    inner: Division,
}

#[pymethods]
impl PyDivision {
    /// Load a division from a season file.
    #[new]
    #[pyo3(signature = (path, allow_outside_games = false))]
    fn new(path: &str, allow_outside_games: bool) -> PyResult<Self> {
        Ok(PyDivision {
            inner: read_season(path, policy(allow_outside_games))?,
        })
    }

    /// Parse a division from season text.
    #[staticmethod]
    #[pyo3(signature = (text, allow_outside_games = false))]
    fn from_text(text: &str, allow_outside_games: bool) -> PyResult<Self> {
        Ok(PyDivision {
            inner: parse_season(text, policy(allow_outside_games))?,
        })
    }

    /// Random division, reproducible when a seed is given.
    #[staticmethod]
    #[pyo3(signature = (teams, seed = None))]
    fn random(teams: usize, seed: Option<u64>) -> PyResult<Self> {
        Ok(PyDivision {
            inner: random_division(teams, seed)?,
        })
    }

    fn number_of_teams(&self) -> usize {
        self.inner.number_of_teams()
    }

    fn teams(&self) -> Vec<String> {
        self.inner.teams().map(str::to_string).collect()
    }

    fn record(&self, team: &str) -> PyResult<TeamRecord> {
        Ok(self.inner.record(team)?.clone())
    }

    fn wins(&self, team: &str) -> PyResult<u32> {
        Ok(self.inner.wins(team)?)
    }

    fn losses(&self, team: &str) -> PyResult<u32> {
        Ok(self.inner.losses(team)?)
    }

    fn remaining(&self, team: &str) -> PyResult<u32> {
        Ok(self.inner.remaining(team)?)
    }

    fn against(&self, team1: &str, team2: &str) -> PyResult<u32> {
        Ok(self.inner.against(team1, team2)?)
    }

    fn is_eliminated(&self, team: &str) -> PyResult<bool> {
        Ok(self.inner.is_eliminated(team)?)
    }

    /// Names of the teams that eliminate `team`, or None.
    fn certificate_of_elimination(&self, team: &str) -> PyResult<Option<Vec<String>>> {
        Ok(team_names(self.inner.certificate_of_elimination(team)?))
    }

    /// Decide every team; runs without holding the GIL.
    fn eliminations(&self, py: Python<'_>) -> Vec<(String, Option<Vec<String>>)> {
        py.allow_threads(|| {
            self.inner
                .eliminations()
                .into_iter()
                .map(|(team, cert)| (team.to_string(), team_names(cert)))
                .collect()
        })
    }

    fn report(&self, py: Python<'_>) -> Vec<String> {
        py.allow_threads(|| division_report(&self.inner))
    }

    fn __len__(&self) -> usize {
        self.inner.number_of_teams()
    }

    fn __repr__(&self) -> String {
        format!(
            "Division({} teams, {} decided)",
            self.inner.number_of_teams(),
            self.inner.cached_results()
        )
    }
}

#[pymethods]
impl TeamRecord {
    #[new]
    fn py_new(name: String, wins: u32, losses: u32, remaining: u32) -> Self {
        TeamRecord::new(name, wins, losses, remaining)
    }

    fn __str__(&self) -> String {
        self.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "TeamRecord({:?}, {}, {}, {})",
            self.name, self.wins, self.losses, self.remaining
        )
    }
}

/// Report line for a team given its certificate (None or empty when alive).
#[pyfunction]
#[pyo3(name = "describe", signature = (team, certificate = None))]
fn py_describe(team: &str, certificate: Option<Vec<String>>) -> String {
    let certificate = certificate
        .filter(|teams| !teams.is_empty())
        .map(|teams| Certificate::new(teams, EliminationMethod::MaxFlow));
    describe(team, certificate.as_ref())
}

/// Python module definition
#[pymodule]
fn elimination_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDivision>()?;
    m.add_class::<TeamRecord>()?;
    m.add_function(wrap_pyfunction!(py_describe, m)?)?;
    Ok(())
}

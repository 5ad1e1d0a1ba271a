use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::constants::{DEFAULT_MAX_PAIR_GAMES, DEFAULT_MAX_WINS};
use crate::division::Division;
use crate::error::Result;
use crate::team::TeamRecord;

/// Random division builder for benchmarks and randomized tests.
///
/// Every generated division is valid under the exact remaining policy:
/// each team's `remaining` is the sum of its head-to-head row.
#[derive(Clone, Debug)]
pub struct DivisionGenerator {
    pub teams: usize,
    pub max_pair_games: u32,
    pub max_wins: u32,
}

impl Default for DivisionGenerator {
    fn default() -> Self {
        DivisionGenerator {
            teams: 5,
            max_pair_games: DEFAULT_MAX_PAIR_GAMES,
            max_wins: DEFAULT_MAX_WINS,
        }
    }
}

impl DivisionGenerator {
    pub fn new(teams: usize) -> Self {
        DivisionGenerator {
            teams,
            ..Default::default()
        }
    }

    /// Generate a division. The same seed always yields the same division.
    pub fn generate(&self, seed: Option<u64>) -> Result<Division> {
        let mut rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        self.generate_with(&mut rng)
    }

    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> Result<Division> {
        let n = self.teams;
        let mut against = vec![vec![0u32; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let games = rng.gen_range(0..=self.max_pair_games);
                against[i][j] = games;
                against[j][i] = games;
            }
        }

        let records = against
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let wins = rng.gen_range(0..=self.max_wins);
                let losses = rng.gen_range(0..=self.max_wins);
                TeamRecord::new(format!("Team{}", i), wins, losses, row.iter().sum())
            })
            .collect();

        Division::new(records, against)
    }
}

/// Random division with default parameters.
pub fn random_division(teams: usize, seed: Option<u64>) -> Result<Division> {
    DivisionGenerator::new(teams).generate(seed)
}

use elimination_core::{Division, EliminationMethod, RemainingPolicy, TeamRecord};
use proptest::prelude::*;

fn build_division(wins: Vec<u32>, losses: Vec<u32>, games: Vec<u32>) -> Division {
    let outside = vec![0; wins.len()];
    build_division_with_outside(wins, losses, games, outside)
}

/// `outside[i]` extra games for team i against opponents outside the division.
fn build_division_with_outside(
    wins: Vec<u32>,
    losses: Vec<u32>,
    games: Vec<u32>,
    outside: Vec<u32>,
) -> Division {
    let n = wins.len();
    let mut against = vec![vec![0u32; n]; n];
    let mut pair_games = games.into_iter();
    for i in 0..n {
        for j in (i + 1)..n {
            let g = pair_games.next().unwrap_or(0);
            against[i][j] = g;
            against[j][i] = g;
        }
    }

    let records = (0..n)
        .map(|i| {
            let scheduled: u32 = against[i].iter().sum();
            TeamRecord::new(format!("T{}", i), wins[i], losses[i], scheduled + outside[i])
        })
        .collect();
    let policy = if outside.iter().any(|&extra| extra > 0) {
        RemainingPolicy::AllowOutsideGames
    } else {
        RemainingPolicy::Exact
    };
    Division::with_policy(records, against, policy).unwrap()
}

fn division_strategy() -> impl Strategy<Value = Division> {
    (1usize..=5)
        .prop_flat_map(|n| {
            (
                proptest::collection::vec(0u32..=12, n),
                proptest::collection::vec(0u32..=12, n),
                proptest::collection::vec(0u32..=3, n * (n - 1) / 2),
            )
        })
        .prop_map(|(wins, losses, games)| build_division(wins, losses, games))
}

fn outside_games_strategy() -> impl Strategy<Value = Division> {
    (1usize..=5)
        .prop_flat_map(|n| {
            (
                proptest::collection::vec(0u32..=12, n),
                proptest::collection::vec(0u32..=12, n),
                proptest::collection::vec(0u32..=3, n * (n - 1) / 2),
                proptest::collection::vec(0u32..=3, n),
            )
        })
        .prop_map(|(wins, losses, games, outside)| build_division_with_outside(wins, losses, games, outside))
}

/// Exhaustive check: can `team` win every remaining game and still have
/// every rival finish at or below it, for some outcome of the rivals' games?
fn can_finish_first(division: &Division, team: &str) -> bool {
    let names: Vec<&str> = division.teams().collect();
    let ceiling = u64::from(division.wins(team).unwrap()) + u64::from(division.remaining(team).unwrap());
    let mut totals: Vec<u64> = names
        .iter()
        .map(|name| u64::from(division.wins(name).unwrap()))
        .collect();
    if totals.iter().any(|&wins| wins > ceiling) {
        return false;
    }

    let mut pairs = Vec::new();
    for (i, a) in names.iter().enumerate() {
        for (j, b) in names.iter().enumerate().skip(i + 1) {
            if *a == team || *b == team {
                continue;
            }
            let games = u64::from(division.against(a, b).unwrap());
            if games > 0 {
                pairs.push((i, j, games));
            }
        }
    }

    fn search(pairs: &[(usize, usize, u64)], totals: &mut [u64], ceiling: u64) -> bool {
        let Some(&(i, j, games)) = pairs.first() else {
            return true;
        };
        for won_by_i in 0..=games {
            totals[i] += won_by_i;
            totals[j] += games - won_by_i;
            let ok = totals[i] <= ceiling && totals[j] <= ceiling && search(&pairs[1..], totals, ceiling);
            totals[i] -= won_by_i;
            totals[j] -= games - won_by_i;
            if ok {
                return true;
            }
        }
        false
    }

    search(&pairs, &mut totals, ceiling)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn decision_matches_certificate(division in division_strategy()) {
        let names: Vec<String> = division.teams().map(str::to_string).collect();
        for team in &names {
            let eliminated = division.is_eliminated(team).unwrap();
            let certificate = division.certificate_of_elimination(team).unwrap();
            prop_assert_eq!(eliminated, certificate.is_some());
            if let Some(cert) = certificate {
                prop_assert!(!cert.is_empty());
                prop_assert!(!cert.contains(team));
                for member in cert.iter() {
                    prop_assert!(division.wins(member).is_ok());
                }
            }
        }
    }

    #[test]
    fn decision_matches_exhaustive_search(division in division_strategy()) {
        let names: Vec<String> = division.teams().map(str::to_string).collect();
        for team in &names {
            prop_assert_eq!(
                division.is_eliminated(team).unwrap(),
                !can_finish_first(&division, team),
                "team {}", team
            );
        }
    }

    #[test]
    fn outside_games_match_exhaustive_search(division in outside_games_strategy()) {
        // Rivals can lose their outside games, so only the contender's own
        // remaining count changes the answer.
        let names: Vec<String> = division.teams().map(str::to_string).collect();
        for team in &names {
            let eliminated = division.is_eliminated(team).unwrap();
            prop_assert_eq!(eliminated, !can_finish_first(&division, team), "team {}", team);
            prop_assert_eq!(eliminated, division.certificate_of_elimination(team).unwrap().is_some());
        }
    }

    #[test]
    fn certificates_are_valid(division in division_strategy()) {
        let names: Vec<String> = division.teams().map(str::to_string).collect();
        for team in &names {
            let Some(cert) = division.certificate_of_elimination(team).unwrap() else {
                continue;
            };
            let ceiling = u64::from(division.wins(team).unwrap())
                + u64::from(division.remaining(team).unwrap());

            if cert.method() == EliminationMethod::Trivial {
                for member in cert.iter() {
                    prop_assert!(u64::from(division.wins(member).unwrap()) > ceiling);
                }
            }

            let members: Vec<&str> = cert.iter().collect();
            let mut total: u64 = members
                .iter()
                .map(|m| u64::from(division.wins(m).unwrap()))
                .sum();
            for (i, a) in members.iter().enumerate() {
                for b in members.iter().skip(i + 1) {
                    total += u64::from(division.against(a, b).unwrap());
                }
            }
            prop_assert!(
                total > ceiling * members.len() as u64,
                "certificate {:?} for {} does not beat {}", members, team, ceiling
            );
        }
    }

    #[test]
    fn repeated_queries_are_identical(division in division_strategy()) {
        let names: Vec<String> = division.teams().map(str::to_string).collect();
        for team in &names {
            let first = division.certificate_of_elimination(team).unwrap();
            let again = division.is_eliminated(team).unwrap();
            let second = division.certificate_of_elimination(team).unwrap();
            prop_assert_eq!(first.is_some(), again);
            match (first, second) {
                (Some(a), Some(b)) => prop_assert!(std::ptr::eq(a, b)),
                (None, None) => {}
                _ => prop_assert!(false, "certificate changed between calls"),
            }
        }
        prop_assert_eq!(division.cached_results(), names.len());
    }

    #[test]
    fn trivial_eliminations_skip_the_network(division in division_strategy()) {
        let names: Vec<String> = division.teams().map(str::to_string).collect();
        let leader = names
            .iter()
            .map(|name| division.wins(name).unwrap())
            .max()
            .unwrap_or(0);
        for team in &names {
            let ceiling = division.wins(team).unwrap() + division.remaining(team).unwrap();
            if ceiling < leader {
                let cert = division.certificate_of_elimination(team).unwrap();
                prop_assert!(cert.is_some());
                prop_assert_eq!(cert.unwrap().method(), EliminationMethod::Trivial);
            }
        }
    }

    #[test]
    fn schedule_is_symmetric(division in division_strategy()) {
        let names: Vec<String> = division.teams().map(str::to_string).collect();
        for a in &names {
            for b in &names {
                prop_assert_eq!(division.against(a, b).unwrap(), division.against(b, a).unwrap());
            }
        }
    }
}

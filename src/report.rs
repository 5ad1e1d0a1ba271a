use crate::division::Division;
use crate::elimination::Certificate;
use crate::error::Result;

/// One line of the standings report for `team`.
pub fn describe(team: &str, certificate: Option<&Certificate>) -> String {
    match certificate {
        Some(cert) => {
            let members: Vec<&str> = cert.iter().collect();
            format!(
                "{} is eliminated by the subset R = {{ {} }}",
                team,
                members.join(" ")
            )
        }
        None => format!("{} is not eliminated", team),
    }
}

/// Report lines for every team, in division order.
pub fn division_report(division: &Division) -> Vec<String> {
    division
        .eliminations()
        .into_iter()
        .map(|(team, certificate)| describe(team, certificate))
        .collect()
}

/// Report line for a single team.
pub fn team_report(division: &Division, team: &str) -> Result<String> {
    let certificate = division.certificate_of_elimination(team)?;
    Ok(describe(team, certificate))
}

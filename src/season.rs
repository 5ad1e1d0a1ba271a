use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::division::{Division, RemainingPolicy};
use crate::error::{EliminationError, Result};
use crate::team::TeamRecord;

/// Read a season file.
///
/// Format: the team count on the first line, then one line per team:
/// `name wins losses remaining g_1 ... g_N`, where `g_j` is the number of
/// games left against the j-th team in file order. Blank lines are skipped.
pub fn read_season(path: impl AsRef<Path>, policy: RemainingPolicy) -> Result<Division> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }

    tracing::debug!(path = %path.display(), lines = lines.len(), "read season file");
    parse_lines(lines.iter().map(String::as_str), policy)
}

/// Parse season text in the format accepted by [`read_season`].
pub fn parse_season(text: &str, policy: RemainingPolicy) -> Result<Division> {
    parse_lines(text.lines(), policy)
}

impl FromStr for Division {
    type Err = EliminationError;

    fn from_str(text: &str) -> Result<Self> {
        parse_season(text, RemainingPolicy::Exact)
    }
}

fn parse_lines<'a, I>(lines: I, policy: RemainingPolicy) -> Result<Division>
where
    I: Iterator<Item = &'a str>,
{
    let mut rows = lines
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (count_line, count_text) = rows
        .next()
        .ok_or_else(|| EliminationError::malformed("missing team count"))?;
    let count: usize = count_text.parse().map_err(|_| {
        EliminationError::malformed(format!("invalid team count: {}", count_text)).at_line(count_line)
    })?;
    if count == 0 {
        return Err(EliminationError::malformed("team count must be at least 1").at_line(count_line));
    }

    // The count is untrusted until the team lines are read, so no preallocation.
    let mut records = Vec::new();
    let mut against = Vec::new();
    for (line_no, line) in rows.by_ref().take(count) {
        let (record, row) = parse_team_line(line, count).map_err(|e| e.at_line(line_no))?;
        records.push(record);
        against.push(row);
    }

    if records.len() != count {
        return Err(EliminationError::malformed(format!(
            "expected {} team lines, found {}",
            count,
            records.len()
        )));
    }
    if let Some((line_no, _)) = rows.next() {
        return Err(EliminationError::malformed(format!(
            "more than {} team lines",
            count
        ))
        .at_line(line_no));
    }

    Division::with_policy(records, against, policy)
}

fn parse_team_line(line: &str, count: usize) -> Result<(TeamRecord, Vec<u32>)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len().checked_sub(4) != Some(count) {
        return Err(EliminationError::malformed(format!(
            "expected {} fields, found {}",
            count.saturating_add(4),
            fields.len()
        )));
    }

    let name = fields[0];
    let wins = parse_count(fields[1], "wins")?;
    let losses = parse_count(fields[2], "losses")?;
    let remaining = parse_count(fields[3], "remaining")?;
    let row = fields[4..]
        .iter()
        .map(|field| parse_count(field, "head-to-head games"))
        .collect::<Result<Vec<u32>>>()?;

    Ok((TeamRecord::new(name, wins, losses, remaining), row))
}

fn parse_count(field: &str, what: &str) -> Result<u32> {
    field
        .parse()
        .map_err(|_| EliminationError::malformed(format!("invalid {}: {}", what, field)))
}

use crate::division::Division;
use crate::elimination::{Certificate, Contender, EliminationMethod};
use crate::flow::{Capacity, FlowNetwork};

/// Bijection between division team indices and team vertices of one
/// candidate's network. The candidate itself has no vertex.
#[derive(Debug, Clone)]
pub(crate) struct TeamIndexMap {
    to_vertex: Vec<Option<usize>>,
    to_team: Vec<usize>,
}

impl TeamIndexMap {
    pub(crate) fn excluding(team_count: usize, excluded: usize) -> Self {
        let to_team: Vec<usize> = (0..team_count).filter(|&team| team != excluded).collect();
        let mut to_vertex = vec![None; team_count];
        for (vertex, &team) in to_team.iter().enumerate() {
            to_vertex[team] = Some(vertex);
        }
        Self { to_vertex, to_team }
    }

    pub(crate) fn vertex(&self, team: usize) -> Option<usize> {
        self.to_vertex.get(team).copied().flatten()
    }

    pub(crate) fn team(&self, vertex: usize) -> Option<usize> {
        self.to_team.get(vertex).copied()
    }

    /// Division indices of the mapped teams, ordered by vertex.
    pub(crate) fn teams(&self) -> &[usize] {
        &self.to_team
    }

    pub(crate) fn len(&self) -> usize {
        self.to_team.len()
    }
}

/// Flow network asking whether the games among the other teams can all be
/// played without anyone passing the contender's best possible total.
///
/// Vertex layout: team vertices `0..m`, one vertex per unordered pair of
/// teams after that, then source and sink.
#[derive(Debug)]
pub(crate) struct EliminationNetwork {
    network: FlowNetwork,
    teams: TeamIndexMap,
    source: usize,
    sink: usize,
    scheduled_games: u64,
}

impl EliminationNetwork {
    pub(crate) fn build(division: &Division, contender: &Contender) -> Self {
        let teams = TeamIndexMap::excluding(division.number_of_teams(), contender.team());
        let m = teams.len();
        let pair_count = m * m.saturating_sub(1) / 2;
        let source = m + pair_count;
        let sink = source + 1;
        let mut network = FlowNetwork::new(sink + 1);

        for team in 0..division.number_of_teams() {
            let Some(vertex) = teams.vertex(team) else {
                continue;
            };
            let wins = u64::from(division.record_at(team).wins);
            debug_assert!(wins <= contender.max_wins());
            network.add_edge(vertex, sink, Capacity::Finite(contender.max_wins() - wins));
        }

        let mut scheduled_games = 0u64;
        let mut pair_vertex = m;
        for (a, &i) in teams.teams().iter().enumerate() {
            for (b, &j) in teams.teams().iter().enumerate().skip(a + 1) {
                let games = u64::from(division.games_between(i, j));
                network.add_edge(source, pair_vertex, Capacity::Finite(games));
                network.add_edge(pair_vertex, a, Capacity::Unbounded);
                network.add_edge(pair_vertex, b, Capacity::Unbounded);
                scheduled_games += games;
                pair_vertex += 1;
            }
        }

        tracing::trace!(
            vertices = network.vertex_count(),
            edges = network.edge_count(),
            scheduled_games,
            "built elimination network"
        );

        Self {
            network,
            teams,
            source,
            sink,
            scheduled_games,
        }
    }

    /// Run max flow and read the certificate off the source side of the cut.
    pub(crate) fn solve(mut self, division: &Division) -> Certificate {
        let flow = self.network.max_flow(self.source, self.sink);
        if flow.value >= self.scheduled_games {
            return Certificate::not_eliminated();
        }

        let teams = (0..self.teams.len())
            .filter(|&vertex| flow.in_cut(vertex))
            .filter_map(|vertex| self.teams.team(vertex))
            .map(|team| division.record_at(team).name.clone())
            .collect();
        Certificate::new(teams, EliminationMethod::MaxFlow)
    }

    #[cfg(test)]
    pub(crate) fn network(&self) -> &FlowNetwork {
        &self.network
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> usize {
        self.source
    }

    #[cfg(test)]
    pub(crate) fn sink(&self) -> usize {
        self.sink
    }

    #[cfg(test)]
    pub(crate) fn scheduled_games(&self) -> u64 {
        self.scheduled_games
    }

    #[cfg(test)]
    pub(crate) fn team_map(&self) -> &TeamIndexMap {
        &self.teams
    }
}

/// Residual capacity used for unbounded edges.
///
/// Larger than any flow a division can push: every augmenting path passes a
/// source edge bounded by a head-to-head game count.
pub const UNBOUNDED_CAPACITY: u64 = u64::MAX / 4;

/// Default tracing directive for the command line tool.
pub const DEFAULT_LOG_DIRECTIVE: &str = "elimination_core=info";

/// Tracing directive used when the command line tool runs with `--debug`.
pub const DEBUG_LOG_DIRECTIVE: &str = "elimination_core=debug";

/// Upper bound on head-to-head games per pair in generated divisions.
pub const DEFAULT_MAX_PAIR_GAMES: u32 = 6;

/// Upper bound on wins already banked by a team in generated divisions.
pub const DEFAULT_MAX_WINS: u32 = 90;

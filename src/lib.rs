//! Cricket tournament planner: library with models and the advancement /
//! bracket engine.

pub mod logic;
pub mod models;

pub use logic::{
    apply_winners, assign_knockout_fixture, clear_downstream, generate_knockout_matches,
    generate_knockout_matches_with_rng, generate_stages, generate_tournament, group_name,
    group_name_with_offset, match_count_breakdown, qualified_count, qualified_teams,
    reorder_group_teams, reseed_teams, reseed_teams_with_rng, round_robin_matches,
    set_knockout_pairing_mode, set_knockout_winner, update_team_position,
    validate_bracket_compatibility, validate_round_config,
};
pub use models::{
    AdvancementDestination, DrawsSnapshot, Group, KnockoutEntryPoint, KnockoutFixtureAssignment,
    KnockoutPairingMode, KnockoutRound, KnockoutStageConfig, KnockoutWarnings, KnockoutWinnerMap,
    Match, MatchId, RoundRobinRoundConfig, Stage, StageAdvancementConfig, Team, TeamId, Tournament,
    TournamentError, TournamentId,
};

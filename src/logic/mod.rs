//! Tournament engine: stage generation, qualification, bracket construction,
//! reseeding, and winner propagation.

pub mod display;
pub mod fixture_code;
pub mod generation;
pub mod knockout;
pub mod match_count;
pub mod naming;
pub mod qualification;
pub mod reorder;
pub mod reseeding;
pub mod round_robin;
pub mod validation;
pub mod winners;

pub use display::{
    format_round_robin_team, format_team_with_origin, origin_group_serial,
    round_robin_display_code,
};
pub use fixture_code::{fixture_code, fixture_code_for_match, fixture_code_map, round_prefix};
pub use generation::{generate_stages, generate_tournament};
pub use knockout::{
    assign_knockout_fixture, generate_knockout_matches, generate_knockout_matches_with_rng,
    regenerate_knockout, set_knockout_pairing_mode, update_team_position, validate_manual_pairing,
};
pub use match_count::{match_count_breakdown, MatchCountBreakdown};
pub use naming::{group_name, group_name_with_offset};
pub use qualification::{
    qualified_count, qualified_entries, qualified_teams, GroupSlot, QualifiedEntry,
};
pub use reorder::reorder_group_teams;
pub use reseeding::{build_match_history, reseed_teams, reseed_teams_with_rng, ReseedingResult};
pub use round_robin::round_robin_matches;
pub use validation::{
    stage_advancement_label, validate_bracket_compatibility, validate_round_config,
};
pub use winners::{apply_winners, clear_downstream, set_knockout_winner};

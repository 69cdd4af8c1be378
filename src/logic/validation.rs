//! Configuration validation, run before generation so errors surface as
//! rejections rather than half-built state.

use crate::logic::qualification::qualified_count;
use crate::models::{
    KnockoutStageConfig, RoundRobinRoundConfig, StageAdvancementConfig, TournamentError,
};

/// Validate one round's group count against the teams available to it.
pub fn validate_round_config(
    team_count: usize,
    config: &RoundRobinRoundConfig,
) -> Result<(), TournamentError> {
    if config.group_count == 0 {
        return Err(TournamentError::NonPositiveGroupCount {
            stage_number: config.round_number,
        });
    }
    if config.group_count > team_count {
        return Err(TournamentError::GroupCountExceedsTeams {
            stage_number: config.round_number,
            group_count: config.group_count,
            team_count,
        });
    }
    if team_count / config.group_count < 2 {
        return Err(TournamentError::GroupTooSmall {
            stage_number: config.round_number,
        });
    }
    Ok(())
}

/// Check that the advancement rules feed the first enabled knockout round with
/// exactly the team count it needs. Trivially satisfied when no knockout round
/// is enabled.
pub fn validate_bracket_compatibility(
    configs: &[StageAdvancementConfig],
    rounds: &[RoundRobinRoundConfig],
    knockout: &KnockoutStageConfig,
) -> Result<(), TournamentError> {
    let Some(entry_round) = knockout.first_enabled() else {
        return Ok(());
    };

    let qualified = qualified_count(configs, rounds, knockout);
    let required = entry_round.required_team_count();
    if qualified != required {
        return Err(TournamentError::QualifiedCountMismatch {
            qualified,
            required,
        });
    }
    Ok(())
}

/// Label for a stage's routing rules, e.g.
/// "Winners -> Quarter-Finals, Runners-up -> Eliminated".
pub fn stage_advancement_label(
    stage_number: u32,
    configs: &[StageAdvancementConfig],
) -> String {
    match configs.iter().find(|c| c.stage_number == stage_number) {
        Some(config) => format!(
            "Winners -> {}, Runners-up -> {}",
            config.winner_destination.label(),
            config.runner_up_destination.label()
        ),
        None => "Not configured".to_string(),
    }
}

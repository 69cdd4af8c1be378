//! Planning summary: how many matches a configuration will produce, before
//! anything is generated.

use crate::models::{
    AdvancementDestination, KnockoutRound, KnockoutStageConfig, RoundRobinRoundConfig,
    StageAdvancementConfig,
};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct StageMatchCount {
    pub stage_name: String,
    pub group_count: usize,
    pub match_count: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct KnockoutMatchCount {
    pub round_name: String,
    pub match_count: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct MatchCountBreakdown {
    pub round_robin_matches: usize,
    pub knockout_matches: usize,
    pub total_matches: usize,
    pub stage_breakdown: Vec<StageMatchCount>,
    pub knockout_breakdown: Vec<KnockoutMatchCount>,
}

/// Per-stage and per-round match counts for the given configuration. Group
/// sizes use the even floor; the odd remainder shifts counts by at most a few
/// matches and this summary is for planning, not scheduling.
pub fn match_count_breakdown(
    team_count: usize,
    rounds: &[RoundRobinRoundConfig],
    knockout: &KnockoutStageConfig,
    configs: &[StageAdvancementConfig],
) -> MatchCountBreakdown {
    let mut round_robin_matches = 0;
    let mut stage_breakdown = Vec::new();

    let mut current_teams = team_count;
    for (i, round) in rounds.iter().enumerate() {
        let teams_per_group = if round.group_count > 0 {
            current_teams / round.group_count
        } else {
            0
        };
        let matches_per_group = teams_per_group * teams_per_group.saturating_sub(1) / 2;
        let stage_matches = matches_per_group * round.group_count;

        round_robin_matches += stage_matches;
        stage_breakdown.push(StageMatchCount {
            stage_name: format!("Robin Round {}", round.round_number),
            group_count: round.group_count,
            match_count: stage_matches,
        });

        if i + 1 < rounds.len() {
            current_teams = next_stage_team_count(round, configs, i + 1);
        }
    }

    let mut knockout_matches = 0;
    let mut knockout_breakdown = Vec::new();
    for round in KnockoutRound::ORDER {
        if knockout.is_enabled(round) {
            let count = round.required_team_count() / 2;
            knockout_matches += count;
            knockout_breakdown.push(KnockoutMatchCount {
                round_name: round.name().to_string(),
                match_count: count,
            });
        }
    }

    MatchCountBreakdown {
        round_robin_matches,
        knockout_matches,
        total_matches: round_robin_matches + knockout_matches,
        stage_breakdown,
        knockout_breakdown,
    }
}

/// Teams the advancement rules forward from `round` into the round at
/// `next_index`. Without a config for the stage, winners only.
pub(crate) fn next_stage_team_count(
    round: &RoundRobinRoundConfig,
    configs: &[StageAdvancementConfig],
    next_index: usize,
) -> usize {
    let Some(config) = configs.iter().find(|c| c.stage_number == round.round_number) else {
        return round.group_count;
    };

    let mut count = 0;
    if config.winner_destination
        == (AdvancementDestination::NextStage {
            stage_index: next_index,
        })
    {
        count += round.group_count;
    }
    if config.runner_up_destination
        == (AdvancementDestination::NextStage {
            stage_index: next_index,
        })
    {
        count += round.group_count;
    }
    count
}

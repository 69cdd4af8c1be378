//! Qualification: which teams enter the knockout bracket, and how many.

use crate::models::{
    AdvancementDestination, KnockoutRound, KnockoutStageConfig, RoundRobinRoundConfig, Stage,
    StageAdvancementConfig, Team,
};

/// Finishing slot that sent a team into the bracket.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GroupSlot {
    Winner,
    RunnerUp,
}

/// A qualified team together with where it came from, used by bracket seeding.
#[derive(Clone, Debug)]
pub struct QualifiedEntry {
    pub team: Team,
    pub stage_number: u32,
    pub group_id: String,
    pub slot: GroupSlot,
}

/// Qualified teams with their origins, ordered by ascending stage number and,
/// within a stage, by stored group order with winners before runners-up. This
/// ordering is the seeding input before any reseeding.
pub fn qualified_entries(
    stages: &[Stage],
    configs: &[StageAdvancementConfig],
    knockout: &KnockoutStageConfig,
) -> Vec<QualifiedEntry> {
    let mut entries = Vec::new();

    let Some(first_entry) = knockout.first_enabled() else {
        return entries;
    };

    let mut ordered: Vec<&Stage> = stages.iter().collect();
    ordered.sort_by_key(|s| s.stage_number);

    for stage in ordered {
        let Some(config) = configs.iter().find(|c| c.stage_number == stage.stage_number) else {
            continue;
        };

        if destination_enters(&config.winner_destination, first_entry) {
            for group in &stage.groups {
                if let Some(winner) = group.teams.first() {
                    entries.push(QualifiedEntry {
                        team: winner.clone(),
                        stage_number: stage.stage_number,
                        group_id: group.id.clone(),
                        slot: GroupSlot::Winner,
                    });
                }
            }
        }

        if destination_enters(&config.runner_up_destination, first_entry) {
            for group in &stage.groups {
                if group.teams.len() >= 2 {
                    entries.push(QualifiedEntry {
                        team: group.teams[1].clone(),
                        stage_number: stage.stage_number,
                        group_id: group.id.clone(),
                        slot: GroupSlot::RunnerUp,
                    });
                }
            }
        }
    }

    entries
}

/// The teams entering the knockout bracket, in seeding order.
pub fn qualified_teams(
    stages: &[Stage],
    configs: &[StageAdvancementConfig],
    knockout: &KnockoutStageConfig,
) -> Vec<Team> {
    qualified_entries(stages, configs, knockout)
        .into_iter()
        .map(|e| e.team)
        .collect()
}

/// Count-only variant computed from configuration alone. Agrees with
/// `qualified_teams(..).len()` for every valid configuration.
pub fn qualified_count(
    configs: &[StageAdvancementConfig],
    rounds: &[RoundRobinRoundConfig],
    knockout: &KnockoutStageConfig,
) -> usize {
    if rounds.is_empty() {
        return 0;
    }
    let Some(first_entry) = knockout.first_enabled() else {
        return 0;
    };

    let mut count = 0;
    for round in rounds {
        let Some(config) = configs.iter().find(|c| c.stage_number == round.round_number) else {
            continue;
        };
        if destination_enters(&config.winner_destination, first_entry) {
            count += round.group_count;
        }
        if destination_enters(&config.runner_up_destination, first_entry) {
            count += round.group_count;
        }
    }

    count
}

/// Whether a destination routes into the bracket's entry round. `Eliminated`
/// and `NextStage` contribute nothing to qualification.
fn destination_enters(destination: &AdvancementDestination, entry_round: KnockoutRound) -> bool {
    match destination {
        AdvancementDestination::KnockoutEntry { entry_point } => entry_point.round() == entry_round,
        AdvancementDestination::NextStage { .. } | AdvancementDestination::Eliminated => false,
    }
}

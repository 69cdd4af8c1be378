//! Stage generation: partition teams into groups per round, schedule each
//! group, and advance teams between rounds per the routing rules.

use crate::logic::knockout::regenerate_knockout;
use crate::logic::naming::group_name_with_offset;
use crate::logic::round_robin::round_robin_matches;
use crate::models::{
    AdvancementDestination, Group, RoundRobinRoundConfig, Stage, StageAdvancementConfig, Team,
    Tournament, TournamentError,
};

/// Generate all round-robin stages. Stage 1 takes the full roster; every later
/// stage takes the teams its predecessor routes to it. Fails loudly on a
/// missing advancement config and on a zero or oversized group count; the
/// stricter at-least-2-teams-per-group rule lives in the validation helpers.
pub fn generate_stages(
    teams: &[Team],
    rounds: &[RoundRobinRoundConfig],
    configs: &[StageAdvancementConfig],
) -> Result<Vec<Stage>, TournamentError> {
    if !rounds
        .windows(2)
        .all(|w| w[0].round_number < w[1].round_number)
    {
        return Err(TournamentError::InvalidStageNumbers);
    }

    let mut stages: Vec<Stage> = Vec::new();
    let mut current_teams: Vec<Team> = teams.to_vec();
    let mut group_offset = 0;

    for (i, round) in rounds.iter().enumerate() {
        if i > 0 {
            let prev = &stages[i - 1];
            let config = configs
                .iter()
                .find(|c| c.stage_number == prev.stage_number)
                .ok_or(TournamentError::MissingAdvancementConfig {
                    stage_number: prev.stage_number,
                })?;
            current_teams = teams_for_next_stage(prev, config, i);
        }

        if round.group_count == 0 {
            return Err(TournamentError::NonPositiveGroupCount {
                stage_number: round.round_number,
            });
        }
        if round.group_count > current_teams.len() {
            return Err(TournamentError::GroupCountExceedsTeams {
                stage_number: round.round_number,
                group_count: round.group_count,
                team_count: current_teams.len(),
            });
        }

        let stage_id = format!("stage-{}", round.round_number);
        let groups = distribute_teams_into_groups(
            &current_teams,
            round.group_count,
            round.round_number,
            group_offset,
        );
        let matches = groups
            .iter()
            .flat_map(|g| round_robin_matches(g, &stage_id))
            .collect();
        group_offset += groups.len();

        stages.push(Stage {
            id: stage_id,
            name: format!("Robin Round {}", round.round_number),
            stage_number: round.round_number,
            groups,
            matches,
        });
    }

    Ok(stages)
}

/// Teams the given stage forwards to the round at `next_index` (0-based index
/// into the round list). Winners are each group's position 0, runners-up
/// position 1; a group with fewer than 2 teams contributes no runner-up.
fn teams_for_next_stage(
    stage: &Stage,
    config: &StageAdvancementConfig,
    next_index: usize,
) -> Vec<Team> {
    let mut advancing = Vec::new();

    if config.winner_destination
        == (AdvancementDestination::NextStage {
            stage_index: next_index,
        })
    {
        for group in &stage.groups {
            if let Some(winner) = group.teams.first() {
                advancing.push(winner.clone());
            }
        }
    }

    if config.runner_up_destination
        == (AdvancementDestination::NextStage {
            stage_index: next_index,
        })
    {
        for group in &stage.groups {
            if group.teams.len() >= 2 {
                advancing.push(group.teams[1].clone());
            }
        }
    }

    advancing
}

/// Contiguous split of `teams` into `group_count` groups: sizes differ by at
/// most 1 and the first `n mod g` groups take the extra team. Roster order is
/// preserved; assignment is never shuffled.
fn distribute_teams_into_groups(
    teams: &[Team],
    group_count: usize,
    stage_number: u32,
    group_offset: usize,
) -> Vec<Group> {
    let teams_per_group = teams.len() / group_count;
    let extra_teams = teams.len() % group_count;

    let mut groups = Vec::with_capacity(group_count);
    let mut team_index = 0;
    for i in 0..group_count {
        let group_size = teams_per_group + usize::from(i < extra_teams);
        let group_teams = teams[team_index..team_index + group_size].to_vec();
        team_index += group_size;

        groups.push(Group {
            id: format!("stage-{}-group-{}", stage_number, i + 1),
            name: group_name_with_offset(i, group_offset),
            teams: group_teams,
        });
    }

    groups
}

/// Regenerate the whole tournament from the current configuration: stages,
/// knockout bracket, and winner annotations. All-or-nothing; on error the
/// previous derived state is left untouched. Applies the strict per-round
/// checks (including at least 2 teams per group) before generating anything.
pub fn generate_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    let mut team_count = tournament.teams.len();
    for (i, round) in tournament.round_robin_rounds.iter().enumerate() {
        crate::logic::validation::validate_round_config(team_count, round)?;
        if i + 1 < tournament.round_robin_rounds.len() {
            team_count = crate::logic::match_count::next_stage_team_count(
                round,
                &tournament.stage_advancement_configs,
                i + 1,
            );
        }
    }

    let stages = generate_stages(
        &tournament.teams,
        &tournament.round_robin_rounds,
        &tournament.stage_advancement_configs,
    )?;

    let previous_stages = std::mem::replace(&mut tournament.stages, stages);
    if let Err(e) = regenerate_knockout(tournament) {
        tournament.stages = previous_stages;
        return Err(e);
    }

    tournament.is_generated = true;
    Ok(())
}

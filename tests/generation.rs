//! Integration tests for stage generation: grouping, scheduling, and naming.

use cricket_tournament_web::{
    generate_stages, group_name, group_name_with_offset, round_robin_matches,
    AdvancementDestination, Group, RoundRobinRoundConfig, StageAdvancementConfig, Team,
    TournamentError,
};

fn roster(n: usize) -> Vec<Team> {
    (1..=n).map(|i| Team::new(format!("Team {i}"))).collect()
}

fn round(round_number: u32, group_count: usize) -> RoundRobinRoundConfig {
    RoundRobinRoundConfig {
        round_number,
        group_count,
    }
}

fn forward_all_to_round(stage_number: u32, stage_index: usize) -> StageAdvancementConfig {
    StageAdvancementConfig {
        stage_number,
        winner_destination: AdvancementDestination::NextStage { stage_index },
        runner_up_destination: AdvancementDestination::NextStage { stage_index },
    }
}

#[test]
fn group_names_follow_excel_lettering() {
    assert_eq!(group_name(0), "A");
    assert_eq!(group_name(25), "Z");
    assert_eq!(group_name(26), "AA");
    assert_eq!(group_name(51), "AZ");
    assert_eq!(group_name(52), "BA");
    assert_eq!(group_name_with_offset(0, 12), "M");
}

#[test]
fn round_robin_produces_all_unique_pairs() {
    let group = Group {
        id: "stage-1-group-1".to_string(),
        name: "A".to_string(),
        teams: roster(5),
    };
    let matches = round_robin_matches(&group, "stage-1");
    assert_eq!(matches.len(), 10); // 5 * 4 / 2

    let mut seen = std::collections::HashSet::new();
    for m in &matches {
        assert_ne!(m.team1.id, m.team2.id);
        let key = if m.team1.id < m.team2.id {
            (m.team1.id.clone(), m.team2.id.clone())
        } else {
            (m.team2.id.clone(), m.team1.id.clone())
        };
        assert!(seen.insert(key), "duplicate pairing in {}", m.id);
        assert_eq!(m.group_id.as_deref(), Some("stage-1-group-1"));
        assert_eq!(m.stage_id.as_deref(), Some("stage-1"));
    }
}

#[test]
fn tiny_groups_yield_no_matches() {
    for n in [0, 1] {
        let group = Group {
            id: "stage-1-group-1".to_string(),
            name: "A".to_string(),
            teams: roster(n),
        };
        assert!(round_robin_matches(&group, "stage-1").is_empty());
    }
}

#[test]
fn groups_partition_teams_with_balanced_sizes() {
    let teams = roster(10);
    let stages = generate_stages(&teams, &[round(1, 3)], &[]).unwrap();
    let groups = &stages[0].groups;

    // 10 mod 3 = 1 extra team, carried by the first group
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].teams.len(), 4);
    assert_eq!(groups[1].teams.len(), 3);
    assert_eq!(groups[2].teams.len(), 3);

    // Contiguous split in roster order, no team repeated or dropped
    let flattened: Vec<_> = groups
        .iter()
        .flat_map(|g| g.teams.iter().map(|t| t.id.clone()))
        .collect();
    let expected: Vec<_> = teams.iter().map(|t| t.id.clone()).collect();
    assert_eq!(flattened, expected);
}

#[test]
fn stage_matches_are_union_of_group_matches() {
    let stages = generate_stages(&roster(8), &[round(1, 2)], &[]).unwrap();
    let stage = &stages[0];
    assert_eq!(stage.matches.len(), 12); // 2 groups of 4, 6 matches each
    for m in &stage.matches {
        let group_id = m.group_id.as_deref().unwrap();
        assert!(stage.groups.iter().any(|g| g.id == group_id));
    }
}

#[test]
fn second_stage_advances_routed_teams_and_continues_lettering() {
    let teams = roster(8);
    let stages = generate_stages(
        &teams,
        &[round(1, 2), round(2, 1)],
        &[forward_all_to_round(1, 1)],
    )
    .unwrap();

    assert_eq!(stages.len(), 2);
    assert_eq!(stages[0].groups[0].name, "A");
    assert_eq!(stages[0].groups[1].name, "B");
    // Lettering continues instead of restarting
    assert_eq!(stages[1].groups[0].name, "C");

    // Winners first (group order), then runners-up
    let advanced = &stages[1].groups[0].teams;
    assert_eq!(advanced.len(), 4);
    assert_eq!(advanced[0].id, stages[0].groups[0].teams[0].id);
    assert_eq!(advanced[1].id, stages[0].groups[1].teams[0].id);
    assert_eq!(advanced[2].id, stages[0].groups[0].teams[1].id);
    assert_eq!(advanced[3].id, stages[0].groups[1].teams[1].id);
}

#[test]
fn winners_only_routing_halves_the_field() {
    let config = StageAdvancementConfig {
        stage_number: 1,
        winner_destination: AdvancementDestination::NextStage { stage_index: 1 },
        runner_up_destination: AdvancementDestination::Eliminated,
    };
    let stages = generate_stages(&roster(8), &[round(1, 4), round(2, 1)], &[config]).unwrap();
    assert_eq!(stages[1].groups[0].teams.len(), 4);
}

#[test]
fn missing_advancement_config_is_rejected() {
    let result = generate_stages(&roster(8), &[round(1, 2), round(2, 1)], &[]);
    assert_eq!(
        result.unwrap_err(),
        TournamentError::MissingAdvancementConfig { stage_number: 1 }
    );
}

#[test]
fn oversized_or_zero_group_counts_are_rejected() {
    assert_eq!(
        generate_stages(&roster(4), &[round(1, 5)], &[]).unwrap_err(),
        TournamentError::GroupCountExceedsTeams {
            stage_number: 1,
            group_count: 5,
            team_count: 4,
        }
    );
    assert_eq!(
        generate_stages(&roster(4), &[round(1, 0)], &[]).unwrap_err(),
        TournamentError::NonPositiveGroupCount { stage_number: 1 }
    );
}

#[test]
fn non_increasing_round_numbers_are_rejected() {
    let result = generate_stages(&roster(8), &[round(2, 2), round(2, 1)], &[]);
    assert_eq!(result.unwrap_err(), TournamentError::InvalidStageNumbers);
}

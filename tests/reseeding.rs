//! Integration tests for the rematch-avoidance reseeder.

use cricket_tournament_web::{reseed_teams, reseed_teams_with_rng, Match, Stage, Team};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn named_teams(n: usize) -> Vec<Team> {
    (1..=n).map(|i| Team::new(format!("Team {i}"))).collect()
}

/// A stage whose matches are exactly the given team-index pairs.
fn stage_with_matches(teams: &[Team], pairs: &[(usize, usize)]) -> Stage {
    let matches = pairs
        .iter()
        .map(|&(i, j)| {
            Match::round_robin(
                format!("stage-1-group-1-match-{i}-{j}"),
                teams[i].clone(),
                teams[j].clone(),
                "stage-1-group-1",
                "stage-1",
            )
        })
        .collect();
    Stage {
        id: "stage-1".to_string(),
        name: "Robin Round 1".to_string(),
        stage_number: 1,
        groups: Vec::new(),
        matches,
    }
}

fn played(stages: &[Stage], a: &Team, b: &Team) -> bool {
    stages.iter().flat_map(|s| s.matches.iter()).any(|m| {
        (m.team1.id == a.id && m.team2.id == b.id) || (m.team1.id == b.id && m.team2.id == a.id)
    })
}

#[test]
fn zero_history_keeps_the_original_order() {
    let teams = named_teams(8);
    let result = reseed_teams(&teams, &[], 10_000);
    let ids: Vec<_> = result.teams.iter().map(|t| t.id.clone()).collect();
    let original: Vec<_> = teams.iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, original);
    assert!(result.warnings.is_empty());
}

#[test]
fn exhaustive_search_resolves_first_round_rematches() {
    let teams = named_teams(4);
    let stages = vec![stage_with_matches(&teams, &[(0, 1), (2, 3)])];

    let result = reseed_teams(&teams, &stages, 10_000);
    assert_eq!(result.teams.len(), 4);
    // A conflict-free arrangement exists for this history, so the exhaustive
    // branch must find one: no first-round pairing repeats a played match.
    for pair in result.teams.chunks(2) {
        assert!(!played(&stages, &pair[0], &pair[1]));
    }
    assert!(result.warnings.is_empty());
}

#[test]
fn total_conflict_still_returns_an_arrangement_with_warnings() {
    let teams = named_teams(8);
    let mut pairs = Vec::new();
    for i in 0..8 {
        for j in (i + 1)..8 {
            pairs.push((i, j));
        }
    }
    let stages = vec![stage_with_matches(&teams, &pairs)];

    let result = reseed_teams(&teams, &stages, 10_000);
    assert_eq!(result.teams.len(), 8);
    let mut returned: Vec<_> = result.teams.iter().map(|t| t.id.clone()).collect();
    let mut original: Vec<_> = teams.iter().map(|t| t.id.clone()).collect();
    returned.sort();
    original.sort();
    assert_eq!(returned, original);
    assert!(!result.warnings.is_empty());
}

#[test]
fn sampling_branch_is_deterministic_with_a_seeded_rng() {
    let teams = named_teams(16);
    let stages = vec![stage_with_matches(
        &teams,
        &[(0, 1), (2, 3), (4, 5), (6, 7), (8, 9), (10, 11)],
    )];

    let first = reseed_teams_with_rng(&teams, &stages, 2_000, &mut StdRng::seed_from_u64(7));
    let second = reseed_teams_with_rng(&teams, &stages, 2_000, &mut StdRng::seed_from_u64(7));
    let first_ids: Vec<_> = first.teams.iter().map(|t| t.id.clone()).collect();
    let second_ids: Vec<_> = second.teams.iter().map(|t| t.id.clone()).collect();
    assert_eq!(first_ids, second_ids);
    assert_eq!(first.warnings, second.warnings);
}

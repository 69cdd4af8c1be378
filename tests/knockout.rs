//! Integration tests for qualification and knockout bracket generation.

use cricket_tournament_web::{
    assign_knockout_fixture, generate_knockout_matches, generate_tournament, qualified_count,
    qualified_teams, set_knockout_pairing_mode, update_team_position,
    validate_bracket_compatibility, AdvancementDestination, KnockoutEntryPoint,
    KnockoutFixtureAssignment, KnockoutPairingMode, KnockoutStageConfig, RoundRobinRoundConfig,
    StageAdvancementConfig, Tournament, TournamentError,
};

fn knockout_from(entry_point: KnockoutEntryPoint) -> KnockoutStageConfig {
    match entry_point {
        KnockoutEntryPoint::PreQuarterfinals => KnockoutStageConfig {
            pre_quarter_final: true,
            quarter_final: true,
            semi_final: true,
            final_round: true,
        },
        KnockoutEntryPoint::Quarterfinals => KnockoutStageConfig {
            pre_quarter_final: false,
            quarter_final: true,
            semi_final: true,
            final_round: true,
        },
        KnockoutEntryPoint::Semifinals => KnockoutStageConfig {
            pre_quarter_final: false,
            quarter_final: false,
            semi_final: true,
            final_round: true,
        },
    }
}

fn tournament(
    team_count: usize,
    group_count: usize,
    winner_destination: AdvancementDestination,
    runner_up_destination: AdvancementDestination,
    knockout: KnockoutStageConfig,
) -> Tournament {
    let mut t = Tournament::new(team_count);
    t.set_round_robin_rounds(vec![RoundRobinRoundConfig {
        round_number: 1,
        group_count,
    }]);
    t.set_stage_advancement_config(StageAdvancementConfig {
        stage_number: 1,
        winner_destination,
        runner_up_destination,
    });
    t.set_knockout_stages(knockout);
    t
}

fn winners_to(entry_point: KnockoutEntryPoint) -> AdvancementDestination {
    AdvancementDestination::KnockoutEntry { entry_point }
}

#[test]
fn qualified_count_agrees_with_team_list() {
    let mut t = tournament(
        16,
        4,
        winners_to(KnockoutEntryPoint::Quarterfinals),
        winners_to(KnockoutEntryPoint::Quarterfinals),
        knockout_from(KnockoutEntryPoint::Quarterfinals),
    );
    generate_tournament(&mut t).unwrap();

    let teams = qualified_teams(&t.stages, &t.stage_advancement_configs, &t.knockout_stages);
    let count = qualified_count(
        &t.stage_advancement_configs,
        &t.round_robin_rounds,
        &t.knockout_stages,
    );
    assert_eq!(teams.len(), count);
    assert_eq!(count, 8);
}

#[test]
fn no_knockout_rounds_means_no_qualification() {
    let mut t = tournament(
        8,
        2,
        AdvancementDestination::Eliminated,
        AdvancementDestination::Eliminated,
        KnockoutStageConfig::default(),
    );
    generate_tournament(&mut t).unwrap();
    assert!(t.knockout_matches.is_empty());
    assert_eq!(
        qualified_count(
            &t.stage_advancement_configs,
            &t.round_robin_rounds,
            &t.knockout_stages
        ),
        0
    );
}

#[test]
fn semifinal_entry_with_two_group_winners() {
    // 8 teams, 2 groups of 4; winners to the semis, runners-up out.
    let mut t = tournament(
        8,
        2,
        winners_to(KnockoutEntryPoint::Semifinals),
        AdvancementDestination::Eliminated,
        knockout_from(KnockoutEntryPoint::Semifinals),
    );
    generate_tournament(&mut t).unwrap();

    assert_eq!(
        qualified_count(
            &t.stage_advancement_configs,
            &t.round_robin_rounds,
            &t.knockout_stages
        ),
        2
    );

    let semis: Vec<_> = t
        .knockout_matches
        .iter()
        .filter(|m| m.round.as_deref() == Some("Semifinal"))
        .collect();
    assert_eq!(semis.len(), 1);

    // The final hangs off the lone semifinal on both slots until decided.
    let finals: Vec<_> = t
        .knockout_matches
        .iter()
        .filter(|m| m.round.as_deref() == Some("Final"))
        .collect();
    assert_eq!(finals.len(), 1);
    assert_eq!(finals[0].team1_source.as_deref(), Some("S1"));
    assert_eq!(finals[0].team2_source.as_deref(), Some("S1"));
    assert_eq!(finals[0].team1.name, "S1");
    assert_eq!(finals[0].team2.name, "S1");
}

#[test]
fn quarterfinal_entry_end_to_end() {
    // 16 teams, 4 groups of 4; winners and runners-up both enter the quarters.
    let mut t = tournament(
        16,
        4,
        winners_to(KnockoutEntryPoint::Quarterfinals),
        winners_to(KnockoutEntryPoint::Quarterfinals),
        knockout_from(KnockoutEntryPoint::Quarterfinals),
    );
    generate_tournament(&mut t).unwrap();

    let quarters: Vec<_> = t
        .knockout_matches
        .iter()
        .filter(|m| m.round.as_deref() == Some("Quarterfinal"))
        .collect();
    assert_eq!(quarters.len(), 4);
    for m in &quarters {
        assert!(m.team1_source.is_none());
        assert!(m.team2_source.is_none());
        assert!(!m.team1.name.is_empty());
    }

    let semis: Vec<_> = t
        .knockout_matches
        .iter()
        .filter(|m| m.round.as_deref() == Some("Semifinal"))
        .collect();
    assert_eq!(semis.len(), 2);
    assert_eq!(semis[0].team1_source.as_deref(), Some("Q1"));
    assert_eq!(semis[0].team2_source.as_deref(), Some("Q2"));
    assert_eq!(semis[1].team1_source.as_deref(), Some("Q3"));
    assert_eq!(semis[1].team2_source.as_deref(), Some("Q4"));

    let finals: Vec<_> = t
        .knockout_matches
        .iter()
        .filter(|m| m.round.as_deref() == Some("Final"))
        .collect();
    assert_eq!(finals.len(), 1);
    assert_eq!(finals[0].team1_source.as_deref(), Some("S1"));
    assert_eq!(finals[0].team2_source.as_deref(), Some("S2"));
}

#[test]
fn auto_mode_pairs_winners_with_cross_group_runners_up() {
    let mut t = tournament(
        8,
        2,
        winners_to(KnockoutEntryPoint::Semifinals),
        winners_to(KnockoutEntryPoint::Semifinals),
        knockout_from(KnockoutEntryPoint::Semifinals),
    );
    generate_tournament(&mut t).unwrap();

    let winner_a = t.stages[0].groups[0].teams[0].clone();
    let runner_a = t.stages[0].groups[0].teams[1].clone();
    let winner_b = t.stages[0].groups[1].teams[0].clone();
    let runner_b = t.stages[0].groups[1].teams[1].clone();

    let semis: Vec<_> = t
        .knockout_matches
        .iter()
        .filter(|m| m.round.as_deref() == Some("Semifinal"))
        .collect();
    assert_eq!(semis.len(), 2);
    // Each winner meets the other group's runner-up; no rematch is possible,
    // so reseeding leaves the seeded order alone.
    assert_eq!(semis[0].team1.id, winner_a.id);
    assert_eq!(semis[0].team2.id, runner_b.id);
    assert_eq!(semis[1].team1.id, winner_b.id);
    assert_eq!(semis[1].team2.id, runner_a.id);
    assert!(t.knockout_warnings.reseeding_warnings.is_empty());
    assert!(t.knockout_warnings.seeding_rule_warnings.is_empty());
}

#[test]
fn seeding_rule_skip_is_reported_when_no_runners_up() {
    let mut t = tournament(
        8,
        2,
        winners_to(KnockoutEntryPoint::Semifinals),
        AdvancementDestination::Eliminated,
        knockout_from(KnockoutEntryPoint::Semifinals),
    );
    generate_tournament(&mut t).unwrap();
    assert_eq!(t.knockout_warnings.seeding_rule_warnings.len(), 1);
}

#[test]
fn generation_refuses_on_qualified_count_mismatch() {
    // Configs promise 2 qualifiers but no stages exist to supply them.
    let configs = vec![StageAdvancementConfig {
        stage_number: 1,
        winner_destination: winners_to(KnockoutEntryPoint::Semifinals),
        runner_up_destination: AdvancementDestination::Eliminated,
    }];
    let rounds = vec![RoundRobinRoundConfig {
        round_number: 1,
        group_count: 2,
    }];
    let result = generate_knockout_matches(
        &[],
        &knockout_from(KnockoutEntryPoint::Semifinals),
        &configs,
        &rounds,
        KnockoutPairingMode::Auto,
        &[],
    );
    assert_eq!(
        result.unwrap_err(),
        TournamentError::QualifiedCountMismatch {
            qualified: 0,
            required: 2,
        }
    );
}

#[test]
fn bracket_compatibility_checks_entry_round_size() {
    let t = tournament(
        8,
        2,
        winners_to(KnockoutEntryPoint::Semifinals),
        AdvancementDestination::Eliminated,
        knockout_from(KnockoutEntryPoint::Semifinals),
    );
    // 2 qualifiers cannot fill a canonical 4-team semifinal round.
    assert_eq!(
        validate_bracket_compatibility(
            &t.stage_advancement_configs,
            &t.round_robin_rounds,
            &t.knockout_stages
        )
        .unwrap_err(),
        TournamentError::QualifiedCountMismatch {
            qualified: 2,
            required: 4,
        }
    );
}

#[test]
fn manual_mode_resolves_assignments_and_leaves_rest_tbd() {
    let mut t = tournament(
        8,
        2,
        winners_to(KnockoutEntryPoint::Semifinals),
        winners_to(KnockoutEntryPoint::Semifinals),
        knockout_from(KnockoutEntryPoint::Semifinals),
    );
    generate_tournament(&mut t).unwrap();

    set_knockout_pairing_mode(&mut t, KnockoutPairingMode::Manual).unwrap();
    let semis: Vec<_> = t
        .knockout_matches
        .iter()
        .filter(|m| m.round.as_deref() == Some("Semifinal"))
        .collect();
    assert!(semis.iter().all(|m| m.team1.name == "TBD" && m.team2.name == "TBD"));

    let winner_a = t.stages[0].groups[0].teams[0].clone();
    let runner_b = t.stages[0].groups[1].teams[1].clone();
    assign_knockout_fixture(
        &mut t,
        KnockoutFixtureAssignment {
            match_id: "knockout-semifinal-1".to_string(),
            team1_id: Some(winner_a.id.clone()),
            team2_id: Some(runner_b.id.clone()),
        },
    )
    .unwrap();

    let first = t
        .knockout_matches
        .iter()
        .find(|m| m.id == "knockout-semifinal-1")
        .unwrap();
    assert_eq!(first.team1.id, winner_a.id);
    assert_eq!(first.team2.id, runner_b.id);
    let second = t
        .knockout_matches
        .iter()
        .find(|m| m.id == "knockout-semifinal-2")
        .unwrap();
    assert_eq!(second.team1.name, "TBD");
    assert_eq!(second.team2.name, "TBD");
    assert!(t.knockout_warnings.manual_pairing_warnings.is_empty());
}

#[test]
fn manual_same_group_pairing_is_flagged() {
    let mut t = tournament(
        8,
        2,
        winners_to(KnockoutEntryPoint::Semifinals),
        winners_to(KnockoutEntryPoint::Semifinals),
        knockout_from(KnockoutEntryPoint::Semifinals),
    );
    generate_tournament(&mut t).unwrap();
    set_knockout_pairing_mode(&mut t, KnockoutPairingMode::Manual).unwrap();

    let winner_a = t.stages[0].groups[0].teams[0].clone();
    let runner_a = t.stages[0].groups[0].teams[1].clone();
    assign_knockout_fixture(
        &mut t,
        KnockoutFixtureAssignment {
            match_id: "knockout-semifinal-1".to_string(),
            team1_id: Some(winner_a.id),
            team2_id: Some(runner_a.id),
        },
    )
    .unwrap();
    assert_eq!(t.knockout_warnings.manual_pairing_warnings.len(), 1);
}

#[test]
fn unknown_assignment_ids_fall_back_to_positional_pairing() {
    let mut t = tournament(
        8,
        2,
        winners_to(KnockoutEntryPoint::Semifinals),
        winners_to(KnockoutEntryPoint::Semifinals),
        knockout_from(KnockoutEntryPoint::Semifinals),
    );
    generate_tournament(&mut t).unwrap();
    set_knockout_pairing_mode(&mut t, KnockoutPairingMode::Manual).unwrap();

    assign_knockout_fixture(
        &mut t,
        KnockoutFixtureAssignment {
            match_id: "knockout-semifinal-1".to_string(),
            team1_id: Some("no-such-team".to_string()),
            team2_id: Some("also-missing".to_string()),
        },
    )
    .unwrap();

    let first = t
        .knockout_matches
        .iter()
        .find(|m| m.id == "knockout-semifinal-1")
        .unwrap();
    let pool = qualified_teams(&t.stages, &t.stage_advancement_configs, &t.knockout_stages);
    assert_eq!(first.team1.id, pool[0].id);
    assert_eq!(first.team2.id, pool[1].id);
}

#[test]
fn reordering_a_group_rewires_the_bracket() {
    let mut t = tournament(
        8,
        2,
        winners_to(KnockoutEntryPoint::Semifinals),
        winners_to(KnockoutEntryPoint::Semifinals),
        knockout_from(KnockoutEntryPoint::Semifinals),
    );
    generate_tournament(&mut t).unwrap();

    let promoted = t.stages[0].groups[0].teams[1].clone();
    update_team_position(&mut t, "stage-1", "stage-1-group-1", &promoted.id, 1).unwrap();
    assert_eq!(t.stages[0].groups[0].teams[0].id, promoted.id);

    // The promoted team is now group A's winner and leads the first semifinal.
    let first = t
        .knockout_matches
        .iter()
        .find(|m| m.id == "knockout-semifinal-1")
        .unwrap();
    assert_eq!(first.team1.id, promoted.id);
}

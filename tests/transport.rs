//! Integration tests for the persistence transport encoding.

use cricket_tournament_web::models::{
    deserialize_draws, serialize_draws, AdvancementRule, StageType, ELIMINATED_SENTINEL,
};
use cricket_tournament_web::{
    generate_tournament, AdvancementDestination, KnockoutEntryPoint, KnockoutStageConfig,
    RoundRobinRoundConfig, StageAdvancementConfig, Tournament, TournamentError,
};

#[test]
fn eliminated_travels_as_the_sentinel_next_stage() {
    let rule = AdvancementRule::from_destination(&AdvancementDestination::Eliminated);
    assert_eq!(rule, AdvancementRule::NextStage(ELIMINATED_SENTINEL));
    assert_eq!(rule.to_destination(), AdvancementDestination::Eliminated);
}

#[test]
fn next_stage_and_knockout_entry_round_trip() {
    let next = AdvancementDestination::NextStage { stage_index: 1 };
    assert_eq!(
        AdvancementRule::from_destination(&next).to_destination(),
        next
    );

    let entry = AdvancementDestination::KnockoutEntry {
        entry_point: KnockoutEntryPoint::Quarterfinals,
    };
    assert_eq!(
        AdvancementRule::from_destination(&entry).to_destination(),
        entry
    );
}

#[test]
fn draw_snapshot_round_trips_configuration() {
    let mut t = Tournament::new(8);
    t.set_round_robin_rounds(vec![RoundRobinRoundConfig {
        round_number: 1,
        group_count: 2,
    }]);
    let config = StageAdvancementConfig {
        stage_number: 1,
        winner_destination: AdvancementDestination::KnockoutEntry {
            entry_point: KnockoutEntryPoint::Semifinals,
        },
        runner_up_destination: AdvancementDestination::Eliminated,
    };
    t.set_stage_advancement_config(config.clone());
    t.set_knockout_stages(KnockoutStageConfig {
        pre_quarter_final: false,
        quarter_final: false,
        semi_final: true,
        final_round: true,
    });
    generate_tournament(&mut t).unwrap();

    let snapshot = serialize_draws(&t.stages, &t.stage_advancement_configs).unwrap();
    assert_eq!(snapshot.groups.len(), 2);
    assert_eq!(snapshot.groups[0].1, "A");
    assert_eq!(snapshot.groups[1].1, "B");
    assert_eq!(snapshot.stages.len(), 1);
    let StageType::RoundRobin(rules) = &snapshot.stages[0].1;
    assert_eq!(
        rules.advancement_rule_runner_up,
        AdvancementRule::NextStage(ELIMINATED_SENTINEL)
    );

    let restored = deserialize_draws(&snapshot);
    assert_eq!(restored.stage_advancement_configs, vec![config]);
    // Group counts are not persisted; the caller re-applies them.
    assert_eq!(restored.round_robin_rounds.len(), 1);
    assert_eq!(restored.round_robin_rounds[0].round_number, 1);
    assert_eq!(restored.round_robin_rounds[0].group_count, 0);
    assert_eq!(restored.group_names.get(&0).map(String::as_str), Some("A"));
}

#[test]
fn serialization_requires_an_advancement_config_per_stage() {
    let mut t = Tournament::new(8);
    t.set_round_robin_rounds(vec![RoundRobinRoundConfig {
        round_number: 1,
        group_count: 2,
    }]);
    t.set_stage_advancement_config(StageAdvancementConfig {
        stage_number: 1,
        winner_destination: AdvancementDestination::Eliminated,
        runner_up_destination: AdvancementDestination::Eliminated,
    });
    generate_tournament(&mut t).unwrap();

    assert_eq!(
        serialize_draws(&t.stages, &[]).unwrap_err(),
        TournamentError::MissingAdvancementConfig { stage_number: 1 }
    );
}

//! Transport encoding for the persistence collaborator: a flat snapshot of
//! group names and per-stage advancement rules. Elimination travels as a
//! sentinel next-stage index rather than its own tag.

use crate::models::config::{
    AdvancementDestination, KnockoutEntryPoint, RoundRobinRoundConfig, StageAdvancementConfig,
};
use crate::models::stage::Stage;
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Next-stage index the wire format uses to mean `Eliminated`.
pub const ELIMINATED_SENTINEL: u32 = 999;

/// Advancement rule as transported. `Eliminated` has no tag of its own: it is
/// written as `NextStage(ELIMINATED_SENTINEL)` and mapped back on read.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum AdvancementRule {
    NextStage(u32),
    KnockoutEntry(KnockoutEntryPoint),
}

impl AdvancementRule {
    /// Encode an engine destination for transport.
    pub fn from_destination(destination: &AdvancementDestination) -> Self {
        match destination {
            AdvancementDestination::NextStage { stage_index } => {
                AdvancementRule::NextStage(*stage_index as u32)
            }
            AdvancementDestination::KnockoutEntry { entry_point } => {
                AdvancementRule::KnockoutEntry(*entry_point)
            }
            AdvancementDestination::Eliminated => AdvancementRule::NextStage(ELIMINATED_SENTINEL),
        }
    }

    /// Decode a transported rule back into an engine destination.
    pub fn to_destination(&self) -> AdvancementDestination {
        match self {
            AdvancementRule::NextStage(index) if *index == ELIMINATED_SENTINEL => {
                AdvancementDestination::Eliminated
            }
            AdvancementRule::NextStage(index) => AdvancementDestination::NextStage {
                stage_index: *index as usize,
            },
            AdvancementRule::KnockoutEntry(entry_point) => AdvancementDestination::KnockoutEntry {
                entry_point: *entry_point,
            },
        }
    }
}

/// Per-stage rules as transported.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRobinStageRules {
    pub id: u64,
    pub advancement_rule_winner: AdvancementRule,
    pub advancement_rule_runner_up: AdvancementRule,
}

/// Stage kind on the wire. Knockout matches are not part of the draw snapshot;
/// they are rebuilt from the rules on load.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum StageType {
    RoundRobin(RoundRobinStageRules),
}

/// The draw snapshot exchanged with the persistence collaborator.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DrawsSnapshot {
    /// `(group id, group name)` over all stages, in stage then group order.
    pub groups: Vec<(u64, String)>,
    /// `(stage number, stage rules)` in stage order.
    pub stages: Vec<(u64, StageType)>,
}

/// Serialize the generated stages and their advancement rules for transport.
/// Every stage must have an advancement config.
pub fn serialize_draws(
    stages: &[Stage],
    configs: &[StageAdvancementConfig],
) -> Result<DrawsSnapshot, TournamentError> {
    let mut groups = Vec::new();
    let mut serialized_stages = Vec::new();
    let mut group_id_counter = 0u64;

    for stage in stages {
        for group in &stage.groups {
            groups.push((group_id_counter, group.name.clone()));
            group_id_counter += 1;
        }

        let config = configs
            .iter()
            .find(|c| c.stage_number == stage.stage_number)
            .ok_or(TournamentError::MissingAdvancementConfig {
                stage_number: stage.stage_number,
            })?;

        serialized_stages.push((
            u64::from(stage.stage_number),
            StageType::RoundRobin(RoundRobinStageRules {
                id: u64::from(stage.stage_number),
                advancement_rule_winner: AdvancementRule::from_destination(
                    &config.winner_destination,
                ),
                advancement_rule_runner_up: AdvancementRule::from_destination(
                    &config.runner_up_destination,
                ),
            }),
        ));
    }

    Ok(DrawsSnapshot {
        groups,
        stages: serialized_stages,
    })
}

/// Configuration inputs reconstructed from a draw snapshot. Group counts are
/// not part of the persisted draw; round configs come back with a count of
/// zero for the caller to re-apply.
#[derive(Clone, Debug, Default)]
pub struct DeserializedDraws {
    pub stage_advancement_configs: Vec<StageAdvancementConfig>,
    pub round_robin_rounds: Vec<RoundRobinRoundConfig>,
    pub group_names: HashMap<u64, String>,
}

/// Rebuild advancement and round configuration from a snapshot.
pub fn deserialize_draws(snapshot: &DrawsSnapshot) -> DeserializedDraws {
    let mut result = DeserializedDraws::default();

    for (id, name) in &snapshot.groups {
        result.group_names.insert(*id, name.clone());
    }

    for (stage_id, stage_type) in &snapshot.stages {
        let stage_number = *stage_id as u32;
        let StageType::RoundRobin(rules) = stage_type;

        result.stage_advancement_configs.push(StageAdvancementConfig {
            stage_number,
            winner_destination: rules.advancement_rule_winner.to_destination(),
            runner_up_destination: rules.advancement_rule_runner_up.to_destination(),
        });

        if !result
            .round_robin_rounds
            .iter()
            .any(|r| r.round_number == stage_number)
        {
            result.round_robin_rounds.push(RoundRobinRoundConfig {
                round_number: stage_number,
                group_count: 0,
            });
        }
    }

    result
}

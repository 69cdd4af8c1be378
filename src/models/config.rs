//! Tournament configuration: round-robin rounds, advancement routing, and the
//! knockout bracket settings.

use crate::models::fixture::{KnockoutRound, MatchId};
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Knockout entry points a group winner or runner-up can be routed to. The
/// Final is never an entry point: nothing can be routed into a bracket that
/// starts at its last match, so enabling only the Final yields an empty draw.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum KnockoutEntryPoint {
    PreQuarterfinals,
    Quarterfinals,
    Semifinals,
}

impl KnockoutEntryPoint {
    /// The bracket round this entry point opens.
    pub fn round(self) -> KnockoutRound {
        match self {
            KnockoutEntryPoint::PreQuarterfinals => KnockoutRound::PreQuarterfinal,
            KnockoutEntryPoint::Quarterfinals => KnockoutRound::Quarterfinal,
            KnockoutEntryPoint::Semifinals => KnockoutRound::Semifinal,
        }
    }
}

/// Where a group's winner or runner-up goes next. Replaced wholesale on edit.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AdvancementDestination {
    /// Forward to another round-robin round; `stage_index` is the 0-based
    /// index into the round-robin round list.
    NextStage { stage_index: usize },
    /// Enter the knockout bracket at the given point.
    KnockoutEntry { entry_point: KnockoutEntryPoint },
    /// Out of the tournament.
    Eliminated,
}

impl AdvancementDestination {
    /// Human-readable label for configuration displays.
    pub fn label(&self) -> String {
        match self {
            AdvancementDestination::NextStage { stage_index } => {
                format!("Round {}", stage_index + 1)
            }
            AdvancementDestination::KnockoutEntry { entry_point } => match entry_point {
                KnockoutEntryPoint::PreQuarterfinals => "Pre-Quarterfinals".to_string(),
                KnockoutEntryPoint::Quarterfinals => "Quarter-Finals".to_string(),
                KnockoutEntryPoint::Semifinals => "Semi-Finals".to_string(),
            },
            AdvancementDestination::Eliminated => "Eliminated".to_string(),
        }
    }
}

/// The authoritative routing rule for one round-robin stage's group winners
/// and runners-up. Exactly one per stage number.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StageAdvancementConfig {
    pub stage_number: u32,
    pub winner_destination: AdvancementDestination,
    pub runner_up_destination: AdvancementDestination,
}

/// Group count for one round-robin round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRobinRoundConfig {
    /// 1-based round number, strictly increasing across the round list.
    pub round_number: u32,
    pub group_count: usize,
}

/// Which knockout rounds are part of the tournament. The first enabled round
/// in bracket order is the entry round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutStageConfig {
    pub pre_quarter_final: bool,
    pub quarter_final: bool,
    pub semi_final: bool,
    pub final_round: bool,
}

impl KnockoutStageConfig {
    pub fn is_enabled(&self, round: KnockoutRound) -> bool {
        match round {
            KnockoutRound::PreQuarterfinal => self.pre_quarter_final,
            KnockoutRound::Quarterfinal => self.quarter_final,
            KnockoutRound::Semifinal => self.semi_final,
            KnockoutRound::Final => self.final_round,
        }
    }

    /// The bracket's entry round, or None when no round is enabled.
    pub fn first_enabled(&self) -> Option<KnockoutRound> {
        KnockoutRound::ORDER.into_iter().find(|r| self.is_enabled(*r))
    }

    /// Enabled rounds in bracket order.
    pub fn enabled_rounds(&self) -> Vec<KnockoutRound> {
        KnockoutRound::ORDER
            .into_iter()
            .filter(|r| self.is_enabled(*r))
            .collect()
    }
}

/// Pairing mode for the knockout entry round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutPairingMode {
    #[default]
    Auto,
    Manual,
}

/// Manual-mode override of an entry-round match's participants.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutFixtureAssignment {
    pub match_id: MatchId,
    pub team1_id: Option<TeamId>,
    pub team2_id: Option<TeamId>,
}

/// Winner selections keyed by knockout match id. Sparse; absence means
/// undecided.
pub type KnockoutWinnerMap = HashMap<MatchId, TeamId>;

/// Warnings produced by knockout bracket generation.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutWarnings {
    /// Unresolved rematches left by the reseeding search.
    pub reseeding_warnings: Vec<String>,
    /// Questionable manual pairings (e.g. same-group opponents).
    pub manual_pairing_warnings: Vec<String>,
    /// Seeding rules that could not be applied (e.g. winner/runner-up
    /// interleave skipped).
    pub seeding_rule_warnings: Vec<String>,
}

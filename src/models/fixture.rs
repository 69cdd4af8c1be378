//! Match record and the knockout round ladder.

use crate::models::team::{Team, TeamId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Deterministic identifier for a match. Round-robin matches use
/// `{group_id}-match-{i}-{j}`; knockout matches use `knockout-{round}-{serial}`
/// so winner maps and fixture assignments survive regeneration.
pub type MatchId = String;

/// A single match, round-robin or knockout. A knockout match has either two
/// concrete teams (entry round) or two upstream source references (later
/// rounds), never a mix under normal generation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub team1: Team,
    pub team2: Team,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    /// Owning group, set for round-robin matches.
    pub group_id: Option<String>,
    /// Owning stage, set for round-robin matches.
    pub stage_id: Option<String>,
    /// Round display name, set for knockout matches.
    pub round: Option<String>,
    pub winner_id: Option<TeamId>,
    /// Fixture code of the match feeding `team1` (e.g. "PQ1").
    pub team1_source: Option<String>,
    /// Fixture code of the match feeding `team2`.
    pub team2_source: Option<String>,
}

impl Match {
    /// Round-robin match between two concrete teams in a group.
    pub fn round_robin(id: MatchId, team1: Team, team2: Team, group_id: &str, stage_id: &str) -> Self {
        Self {
            id,
            team1,
            team2,
            date: None,
            time: None,
            group_id: Some(group_id.to_string()),
            stage_id: Some(stage_id.to_string()),
            round: None,
            winner_id: None,
            team1_source: None,
            team2_source: None,
        }
    }

    /// Knockout entry-round match between two concrete teams.
    pub fn knockout(id: MatchId, team1: Team, team2: Team, round: &str) -> Self {
        Self {
            id,
            team1,
            team2,
            date: None,
            time: None,
            group_id: None,
            stage_id: None,
            round: Some(round.to_string()),
            winner_id: None,
            team1_source: None,
            team2_source: None,
        }
    }

    /// Later-round knockout match wired to two upstream fixtures. The slots
    /// hold source-code placeholders until winners are declared.
    pub fn knockout_sourced(id: MatchId, round: &str, team1_source: String, team2_source: String) -> Self {
        Self {
            id,
            team1: Team::source_placeholder(&team1_source),
            team2: Team::source_placeholder(&team2_source),
            date: None,
            time: None,
            group_id: None,
            stage_id: None,
            round: Some(round.to_string()),
            winner_id: None,
            team1_source: Some(team1_source),
            team2_source: Some(team2_source),
        }
    }
}

/// Canonical knockout rounds, earliest to latest.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum KnockoutRound {
    PreQuarterfinal,
    Quarterfinal,
    Semifinal,
    Final,
}

impl KnockoutRound {
    /// All rounds in bracket order.
    pub const ORDER: [KnockoutRound; 4] = [
        KnockoutRound::PreQuarterfinal,
        KnockoutRound::Quarterfinal,
        KnockoutRound::Semifinal,
        KnockoutRound::Final,
    ];

    /// Round display name, used as the `round` label on knockout matches.
    pub fn name(self) -> &'static str {
        match self {
            KnockoutRound::PreQuarterfinal => "Pre-Quarterfinal",
            KnockoutRound::Quarterfinal => "Quarterfinal",
            KnockoutRound::Semifinal => "Semifinal",
            KnockoutRound::Final => "Final",
        }
    }

    /// Team count required to open the bracket at this round.
    pub fn required_team_count(self) -> usize {
        match self {
            KnockoutRound::PreQuarterfinal => 16,
            KnockoutRound::Quarterfinal => 8,
            KnockoutRound::Semifinal => 4,
            KnockoutRound::Final => 2,
        }
    }
}

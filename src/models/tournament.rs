//! Tournament aggregate state and TournamentError.

use crate::models::config::{
    KnockoutFixtureAssignment, KnockoutPairingMode, KnockoutStageConfig, KnockoutWarnings,
    KnockoutWinnerMap, RoundRobinRoundConfig, StageAdvancementConfig,
};
use crate::models::fixture::{Match, MatchId};
use crate::models::stage::{GroupId, Stage, StageId};
use crate::models::team::{Team, TeamId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A stage that must route teams onward has no advancement config.
    MissingAdvancementConfig { stage_number: u32 },
    /// A round was configured with zero groups.
    NonPositiveGroupCount { stage_number: u32 },
    /// More groups than teams available to fill them.
    GroupCountExceedsTeams {
        stage_number: u32,
        group_count: usize,
        team_count: usize,
    },
    /// A round's split would leave a group with fewer than 2 teams.
    GroupTooSmall { stage_number: u32 },
    /// Round numbers are not strictly increasing.
    InvalidStageNumbers,
    /// Advancement rules feed the bracket the wrong number of teams.
    QualifiedCountMismatch { qualified: usize, required: usize },
    /// Group names must be non-empty.
    EmptyGroupName,
    /// Group names are unique across the whole tournament (case-insensitive).
    DuplicateGroupName { name: String, stage_name: String },
    /// Team not found in the roster or referenced match.
    TeamNotFound(TeamId),
    MatchNotFound(MatchId),
    GroupNotFound(GroupId),
    StageNotFound(StageId),
    /// Target position outside 1..=group size.
    InvalidPosition { position: usize, group_size: usize },
    /// Date not in YYYY-MM-DD format.
    InvalidDate(String),
    /// Time not in HH:MM format.
    InvalidTime(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::MissingAdvancementConfig { stage_number } => {
                write!(f, "No advancement config for stage {}", stage_number)
            }
            TournamentError::NonPositiveGroupCount { stage_number } => {
                write!(f, "Round {}: number of groups must be positive", stage_number)
            }
            TournamentError::GroupCountExceedsTeams {
                stage_number,
                group_count,
                team_count,
            } => write!(
                f,
                "Round {}: cannot have more groups ({}) than teams ({})",
                stage_number, group_count, team_count
            ),
            TournamentError::GroupTooSmall { stage_number } => {
                write!(f, "Round {}: each group must have at least 2 teams", stage_number)
            }
            TournamentError::InvalidStageNumbers => {
                write!(f, "Round numbers must be strictly increasing")
            }
            TournamentError::QualifiedCountMismatch { qualified, required } => write!(
                f,
                "Qualification produced {} teams but the configuration requires exactly {}; adjust the stage advancement rules",
                qualified, required
            ),
            TournamentError::EmptyGroupName => write!(f, "Group name cannot be empty"),
            TournamentError::DuplicateGroupName { name, stage_name } => {
                write!(f, "Group name \"{}\" is already used in {}", name, stage_name)
            }
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::GroupNotFound(_) => write!(f, "Group not found"),
            TournamentError::StageNotFound(_) => write!(f, "Stage not found"),
            TournamentError::InvalidPosition { position, group_size } => write!(
                f,
                "Position {} is outside the group (size {})",
                position, group_size
            ),
            TournamentError::InvalidDate(d) => write!(f, "Invalid date \"{}\" (expected YYYY-MM-DD)", d),
            TournamentError::InvalidTime(t) => write!(f, "Invalid time \"{}\" (expected HH:MM)", t),
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// The single authoritative tournament state: roster, configuration, and all
/// derived state (stages, knockout matches, warnings, winners). Derived state
/// is only ever replaced in full, never partially mutated, apart from match
/// date/time, team names, and team positions within a group.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    /// Full roster in seeding order; stage 1 groups split this list.
    pub teams: Vec<Team>,
    pub round_robin_rounds: Vec<RoundRobinRoundConfig>,
    pub stage_advancement_configs: Vec<StageAdvancementConfig>,
    pub knockout_stages: KnockoutStageConfig,
    /// Generated round-robin stages, replaced wholesale by generation.
    pub stages: Vec<Stage>,
    /// Generated knockout bracket, annotated with the winner map.
    pub knockout_matches: Vec<Match>,
    pub knockout_pairing_mode: KnockoutPairingMode,
    pub knockout_fixture_assignments: Vec<KnockoutFixtureAssignment>,
    pub knockout_warnings: KnockoutWarnings,
    pub knockout_winners: KnockoutWinnerMap,
    pub is_generated: bool,
}

impl Tournament {
    /// Create a tournament with a roster of `number_of_teams` default-named
    /// teams ("Team 1".."Team N").
    pub fn new(number_of_teams: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            teams: (1..=number_of_teams).map(|i| Team::new(format!("Team {i}"))).collect(),
            round_robin_rounds: Vec::new(),
            stage_advancement_configs: Vec::new(),
            knockout_stages: KnockoutStageConfig::default(),
            stages: Vec::new(),
            knockout_matches: Vec::new(),
            knockout_pairing_mode: KnockoutPairingMode::Auto,
            knockout_fixture_assignments: Vec::new(),
            knockout_warnings: KnockoutWarnings::default(),
            knockout_winners: KnockoutWinnerMap::new(),
            is_generated: false,
        }
    }

    /// Resize the roster, keeping existing team identities. Growing appends
    /// default-named teams; shrinking drops from the end.
    pub fn set_number_of_teams(&mut self, number_of_teams: usize) {
        self.teams.truncate(number_of_teams);
        while self.teams.len() < number_of_teams {
            let next = self.teams.len() + 1;
            self.teams.push(Team::new(format!("Team {next}")));
        }
    }

    /// Replace the round-robin round list.
    pub fn set_round_robin_rounds(&mut self, rounds: Vec<RoundRobinRoundConfig>) {
        self.round_robin_rounds = rounds;
    }

    /// Replace the knockout round toggles.
    pub fn set_knockout_stages(&mut self, knockout: KnockoutStageConfig) {
        self.knockout_stages = knockout;
    }

    /// Insert or replace the advancement config for one stage number.
    pub fn set_stage_advancement_config(&mut self, config: StageAdvancementConfig) {
        match self
            .stage_advancement_configs
            .iter_mut()
            .find(|c| c.stage_number == config.stage_number)
        {
            Some(existing) => *existing = config,
            None => self.stage_advancement_configs.push(config),
        }
    }

    /// Replace all advancement configs.
    pub fn set_stage_advancement_configs(&mut self, configs: Vec<StageAdvancementConfig>) {
        self.stage_advancement_configs = configs;
    }

    /// Rename a team everywhere it appears: roster, groups, and both match
    /// lists. Identity-based logic is unaffected.
    pub fn update_team_name(
        &mut self,
        team_id: &str,
        new_name: impl Into<String>,
    ) -> Result<(), TournamentError> {
        let new_name = new_name.into();
        if !self.teams.iter().any(|t| t.id == team_id) {
            return Err(TournamentError::TeamNotFound(team_id.to_string()));
        }

        let rename = |team: &mut Team| {
            if team.id == team_id {
                team.name = new_name.clone();
            }
        };

        self.teams.iter_mut().for_each(rename);
        for stage in &mut self.stages {
            for group in &mut stage.groups {
                group.teams.iter_mut().for_each(rename);
            }
            for m in &mut stage.matches {
                rename(&mut m.team1);
                rename(&mut m.team2);
            }
        }
        for m in &mut self.knockout_matches {
            rename(&mut m.team1);
            rename(&mut m.team2);
        }
        Ok(())
    }

    /// Rename a group. Names are trimmed, non-empty, and unique across every
    /// stage of the tournament (case-insensitive).
    pub fn update_group_name(
        &mut self,
        stage_id: &str,
        group_id: &str,
        new_name: &str,
    ) -> Result<(), TournamentError> {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return Err(TournamentError::EmptyGroupName);
        }

        for stage in &self.stages {
            for group in &stage.groups {
                if group.id != group_id && group.name.eq_ignore_ascii_case(trimmed) {
                    return Err(TournamentError::DuplicateGroupName {
                        name: trimmed.to_string(),
                        stage_name: stage.name.clone(),
                    });
                }
            }
        }

        let stage = self
            .stages
            .iter_mut()
            .find(|s| s.id == stage_id)
            .ok_or_else(|| TournamentError::StageNotFound(stage_id.to_string()))?;
        let group = stage
            .groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| TournamentError::GroupNotFound(group_id.to_string()))?;
        group.name = trimmed.to_string();
        Ok(())
    }

    /// Set the date and time of any match, round-robin or knockout.
    pub fn update_match_datetime(
        &mut self,
        match_id: &str,
        date: &str,
        time: &str,
    ) -> Result<(), TournamentError> {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| TournamentError::InvalidDate(date.to_string()))?;
        let time = NaiveTime::parse_from_str(time, "%H:%M")
            .map_err(|_| TournamentError::InvalidTime(time.to_string()))?;

        let m = self
            .stages
            .iter_mut()
            .flat_map(|s| s.matches.iter_mut())
            .chain(self.knockout_matches.iter_mut())
            .find(|m| m.id == match_id)
            .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
        m.date = Some(date);
        m.time = Some(time);
        Ok(())
    }
}

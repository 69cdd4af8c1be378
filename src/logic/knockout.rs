//! Knockout bracket construction: entry-round seeding (automatic or manual)
//! and the source-referenced later rounds.

use crate::logic::fixture_code::fixture_code;
use crate::logic::qualification::{qualified_count, qualified_entries, GroupSlot, QualifiedEntry};
use crate::logic::reseeding::reseed_teams_with_rng;
use crate::logic::winners::apply_winners;
use crate::models::{
    KnockoutFixtureAssignment, KnockoutPairingMode, KnockoutStageConfig, KnockoutWarnings, Match,
    RoundRobinRoundConfig, Stage, StageAdvancementConfig, Team, Tournament, TournamentError,
};
use rand::Rng;

/// Random-sampling cap handed to the reseeder for large brackets.
const MAX_RESEED_ATTEMPTS: usize = 10_000;

/// Generate the knockout bracket with the thread-local RNG. Tests inject a
/// seeded RNG via [`generate_knockout_matches_with_rng`].
pub fn generate_knockout_matches(
    stages: &[Stage],
    knockout: &KnockoutStageConfig,
    configs: &[StageAdvancementConfig],
    rounds: &[RoundRobinRoundConfig],
    pairing_mode: KnockoutPairingMode,
    assignments: &[KnockoutFixtureAssignment],
) -> Result<(Vec<Match>, KnockoutWarnings), TournamentError> {
    generate_knockout_matches_with_rng(
        stages,
        knockout,
        configs,
        rounds,
        pairing_mode,
        assignments,
        &mut rand::thread_rng(),
    )
}

/// Generate the knockout bracket: the entry round from the qualified teams,
/// every later enabled round wired to its predecessor by fixture codes.
/// Refuses to produce anything when the qualified teams actually collected
/// disagree with the count the configuration promises (e.g. a group too short
/// to supply its runner-up); nothing is guessed or truncated.
pub fn generate_knockout_matches_with_rng<R: Rng + ?Sized>(
    stages: &[Stage],
    knockout: &KnockoutStageConfig,
    configs: &[StageAdvancementConfig],
    rounds: &[RoundRobinRoundConfig],
    pairing_mode: KnockoutPairingMode,
    assignments: &[KnockoutFixtureAssignment],
    rng: &mut R,
) -> Result<(Vec<Match>, KnockoutWarnings), TournamentError> {
    let mut warnings = KnockoutWarnings::default();

    let Some(entry_round) = knockout.first_enabled() else {
        return Ok((Vec::new(), warnings));
    };

    let entries = qualified_entries(stages, configs, knockout);
    let expected = qualified_count(configs, rounds, knockout);
    if entries.len() != expected {
        return Err(TournamentError::QualifiedCountMismatch {
            qualified: entries.len(),
            required: expected,
        });
    }

    let entry_teams: Vec<Team> = match pairing_mode {
        KnockoutPairingMode::Auto => {
            let ordered = match winner_runner_up_order(&entries) {
                Ok(teams) => teams,
                Err(warning) => {
                    warnings.seeding_rule_warnings.push(warning);
                    entries.iter().map(|e| e.team.clone()).collect()
                }
            };
            let reseeded = reseed_teams_with_rng(&ordered, stages, MAX_RESEED_ATTEMPTS, rng);
            warnings.reseeding_warnings = reseeded.warnings;
            reseeded.teams
        }
        KnockoutPairingMode::Manual => entries.iter().map(|e| e.team.clone()).collect(),
    };

    let mut matches = Vec::new();
    let mut serial = 1usize;
    let mut prev_round_codes: Vec<String> = Vec::new();

    for round in knockout.enabled_rounds() {
        let round_name = round.name();
        if round == entry_round {
            let match_count = entry_teams.len() / 2;
            for i in 0..match_count {
                let match_id = format!(
                    "knockout-{}-{}",
                    round_name.to_lowercase(),
                    serial + i
                );
                let (team1, team2) = match pairing_mode {
                    KnockoutPairingMode::Auto => {
                        (entry_teams[2 * i].clone(), entry_teams[2 * i + 1].clone())
                    }
                    KnockoutPairingMode::Manual => resolve_manual_slots(
                        &match_id,
                        i,
                        &entry_teams,
                        assignments,
                        stages,
                        &mut warnings.manual_pairing_warnings,
                    ),
                };
                matches.push(Match::knockout(match_id, team1, team2, round_name));
            }
            prev_round_codes = (0..match_count)
                .map(|i| fixture_code(round_name, i))
                .collect();
            serial += match_count;
        } else {
            // Pair up the previous round's fixtures; a lone fixture feeds
            // both slots of its successor.
            let match_count = prev_round_codes.len().div_ceil(2);
            for i in 0..match_count {
                let match_id = format!(
                    "knockout-{}-{}",
                    round_name.to_lowercase(),
                    serial + i
                );
                let second = (2 * i + 1).min(prev_round_codes.len() - 1);
                matches.push(Match::knockout_sourced(
                    match_id,
                    round_name,
                    prev_round_codes[2 * i].clone(),
                    prev_round_codes[second].clone(),
                ));
            }
            prev_round_codes = (0..match_count)
                .map(|i| fixture_code(round_name, i))
                .collect();
            serial += match_count;
        }
    }

    Ok((matches, warnings))
}

/// Winner-vs-runner-up seeding: interleave winners and runners-up so every
/// entry-round pairing crosses finishing slots, preferring a runner-up from a
/// different origin group than the winner. Errs with a warning message when
/// the rule cannot apply (no runners-up, or counts differ), in which case the
/// caller falls back to qualified order.
fn winner_runner_up_order(entries: &[QualifiedEntry]) -> Result<Vec<Team>, String> {
    let winners: Vec<&QualifiedEntry> =
        entries.iter().filter(|e| e.slot == GroupSlot::Winner).collect();
    let runners_up: Vec<&QualifiedEntry> =
        entries.iter().filter(|e| e.slot == GroupSlot::RunnerUp).collect();

    if runners_up.is_empty() {
        return Err(
            "Winner/runner-up seeding skipped: no runners-up qualify for the bracket.".to_string(),
        );
    }
    if winners.len() != runners_up.len() {
        return Err(format!(
            "Winner/runner-up seeding skipped: {} winners but {} runners-up qualify.",
            winners.len(),
            runners_up.len()
        ));
    }

    let mut used = vec![false; runners_up.len()];
    let mut ordered = Vec::with_capacity(entries.len());
    for winner in &winners {
        let pick = runners_up
            .iter()
            .enumerate()
            .position(|(i, r)| !used[i] && r.group_id != winner.group_id)
            .or_else(|| used.iter().position(|u| !u));
        // Both lists are the same length, so a free runner-up always exists.
        let Some(index) = pick else { break };
        used[index] = true;
        ordered.push(winner.team.clone());
        ordered.push(runners_up[index].team.clone());
    }

    Ok(ordered)
}

/// Resolve one manual-mode entry match: an assignment supplying both teams is
/// honored (unknown ids fall back to the positional default), anything else
/// leaves both slots TBD.
fn resolve_manual_slots(
    match_id: &str,
    match_index: usize,
    pool: &[Team],
    assignments: &[KnockoutFixtureAssignment],
    stages: &[Stage],
    manual_warnings: &mut Vec<String>,
) -> (Team, Team) {
    let assignment = assignments.iter().find(|a| a.match_id == match_id);
    match assignment {
        Some(a) if a.team1_id.is_some() && a.team2_id.is_some() => {
            let team1 = resolve_from_pool(a.team1_id.as_deref(), pool, 2 * match_index);
            let team2 = resolve_from_pool(a.team2_id.as_deref(), pool, 2 * match_index + 1);
            manual_warnings.extend(validate_manual_pairing(a, stages));
            (team1, team2)
        }
        _ => (Team::tbd(2 * match_index), Team::tbd(2 * match_index + 1)),
    }
}

fn resolve_from_pool(team_id: Option<&str>, pool: &[Team], positional_index: usize) -> Team {
    team_id
        .and_then(|id| pool.iter().find(|t| t.id == id))
        .or_else(|| pool.get(positional_index))
        .cloned()
        .unwrap_or_else(|| Team::tbd(positional_index))
}

/// Warnings for a manual pairing: flags opponents drawn from the same
/// round-robin group. Empty when the assignment is incomplete.
pub fn validate_manual_pairing(
    assignment: &KnockoutFixtureAssignment,
    stages: &[Stage],
) -> Vec<String> {
    let mut warnings = Vec::new();
    let (Some(team1_id), Some(team2_id)) = (&assignment.team1_id, &assignment.team2_id) else {
        return warnings;
    };

    let mut team1_group = None;
    let mut team2_group = None;
    for stage in stages {
        for group in &stage.groups {
            if group.teams.iter().any(|t| &t.id == team1_id) {
                team1_group = Some(group.name.clone());
            }
            if group.teams.iter().any(|t| &t.id == team2_id) {
                team2_group = Some(group.name.clone());
            }
        }
    }

    if let (Some(g1), Some(g2)) = (team1_group, team2_group) {
        if g1 == g2 {
            warnings.push(format!(
                "Teams from the same group ({g1}) should not meet before the final."
            ));
        }
    }

    warnings
}

/// Rebuild the knockout bracket from the current configuration and re-annotate
/// it with the stored winner map. No-op before first generation.
pub fn regenerate_knockout(tournament: &mut Tournament) -> Result<(), TournamentError> {
    let (matches, warnings) = generate_knockout_matches(
        &tournament.stages,
        &tournament.knockout_stages,
        &tournament.stage_advancement_configs,
        &tournament.round_robin_rounds,
        tournament.knockout_pairing_mode,
        &tournament.knockout_fixture_assignments,
    )?;

    tournament.knockout_matches = apply_winners(&matches, &tournament.knockout_winners);
    tournament.knockout_warnings = warnings;
    Ok(())
}

/// Switch the entry-round pairing mode and rebuild the bracket.
pub fn set_knockout_pairing_mode(
    tournament: &mut Tournament,
    mode: KnockoutPairingMode,
) -> Result<(), TournamentError> {
    let previous = tournament.knockout_pairing_mode;
    tournament.knockout_pairing_mode = mode;
    if tournament.is_generated {
        if let Err(e) = regenerate_knockout(tournament) {
            tournament.knockout_pairing_mode = previous;
            return Err(e);
        }
    }
    Ok(())
}

/// Record (or replace) a manual fixture assignment and rebuild the bracket.
pub fn assign_knockout_fixture(
    tournament: &mut Tournament,
    assignment: KnockoutFixtureAssignment,
) -> Result<(), TournamentError> {
    let mut assignments = tournament.knockout_fixture_assignments.clone();
    match assignments.iter_mut().find(|a| a.match_id == assignment.match_id) {
        Some(existing) => *existing = assignment,
        None => assignments.push(assignment),
    }

    let previous = std::mem::replace(&mut tournament.knockout_fixture_assignments, assignments);
    if tournament.is_generated {
        if let Err(e) = regenerate_knockout(tournament) {
            tournament.knockout_fixture_assignments = previous;
            return Err(e);
        }
    }
    Ok(())
}

/// Move a team to a new 1-based position within its group, then rebuild the
/// knockout bracket since finishing positions feed qualification.
pub fn update_team_position(
    tournament: &mut Tournament,
    stage_id: &str,
    group_id: &str,
    team_id: &str,
    position: usize,
) -> Result<(), TournamentError> {
    let stage = tournament
        .stages
        .iter_mut()
        .find(|s| s.id == stage_id)
        .ok_or_else(|| TournamentError::StageNotFound(stage_id.to_string()))?;
    let group = stage
        .groups
        .iter_mut()
        .find(|g| g.id == group_id)
        .ok_or_else(|| TournamentError::GroupNotFound(group_id.to_string()))?;

    group.teams = crate::logic::reorder::reorder_group_teams(&group.teams, team_id, position)?;

    regenerate_knockout(tournament)
}

//! Winner propagation through the knockout bracket, with cascading
//! invalidation of downstream results.

use crate::logic::fixture_code::{fixture_code_for_match, fixture_code_map};
use crate::models::{
    KnockoutWinnerMap, Match, MatchId, Team, TeamId, Tournament, TournamentError,
};
use std::collections::HashSet;

/// Annotate knockout matches with the winner map: every sourced slot is
/// resolved through its upstream fixture code to the declared winner, or to a
/// placeholder named after the code while that match is undecided. Matches are
/// processed in generation order, so a winner declared upstream resolves
/// transitively in a single pass. Concrete slots are left untouched; only
/// `winner_id` is copied from the map.
pub fn apply_winners(matches: &[Match], winners: &KnockoutWinnerMap) -> Vec<Match> {
    let code_to_index = fixture_code_map(matches);
    let mut resolved: Vec<Match> = Vec::with_capacity(matches.len());

    for m in matches {
        let mut next = m.clone();

        if let Some(code) = &m.team1_source {
            if let Some(team) = resolve_slot(code, &code_to_index, &resolved, matches, winners) {
                next.team1 = team;
            }
        }
        if let Some(code) = &m.team2_source {
            if let Some(team) = resolve_slot(code, &code_to_index, &resolved, matches, winners) {
                next.team2 = team;
            }
        }

        next.winner_id = winners.get(&m.id).cloned();
        resolved.push(next);
    }

    resolved
}

/// Resolve one sourced slot: the upstream match's declared winner, or a
/// source-code placeholder while undecided. None when the code resolves to no
/// match at all, in which case the slot is left as generated.
fn resolve_slot(
    code: &str,
    code_to_index: &std::collections::HashMap<String, usize>,
    resolved: &[Match],
    matches: &[Match],
    winners: &KnockoutWinnerMap,
) -> Option<Team> {
    let &source_index = code_to_index.get(code)?;
    // Earlier rounds precede later ones, so the source is normally already
    // resolved; fall back to the raw match for malformed forward references.
    let source = match resolved.get(source_index) {
        Some(m) => m,
        None => &matches[source_index],
    };
    Some(match winning_team(source, winners) {
        Some(winner) => winner,
        None => Team::source_placeholder(code),
    })
}

/// The declared winner of a match, as a concrete team. None when undecided or
/// when the declared id matches neither slot (e.g. both still placeholders).
fn winning_team(m: &Match, winners: &KnockoutWinnerMap) -> Option<Team> {
    let winner_id = winners.get(&m.id)?;
    if &m.team1.id == winner_id {
        Some(m.team1.clone())
    } else if &m.team2.id == winner_id {
        Some(m.team2.clone())
    } else {
        None
    }
}

/// Remove the winner entries of every match whose source chain traces back to
/// `changed_match_id`, and only those. Applied before recording a new winner
/// so stale downstream advancement never persists.
pub fn clear_downstream(
    matches: &[Match],
    changed_match_id: &str,
    winners: &KnockoutWinnerMap,
) -> KnockoutWinnerMap {
    let mut result = winners.clone();

    let Some(changed) = matches.iter().find(|m| m.id == changed_match_id) else {
        return result;
    };
    let Some(start_code) = fixture_code_for_match(changed, matches) else {
        return result;
    };

    let mut affected: HashSet<MatchId> = HashSet::new();
    let mut pending = vec![start_code];
    while let Some(code) = pending.pop() {
        for m in matches {
            if affected.contains(&m.id) {
                continue;
            }
            if m.team1_source.as_deref() == Some(code.as_str())
                || m.team2_source.as_deref() == Some(code.as_str())
            {
                affected.insert(m.id.clone());
                result.remove(&m.id);
                if let Some(downstream_code) = fixture_code_for_match(m, matches) {
                    pending.push(downstream_code);
                }
            }
        }
    }

    result
}

/// Declare the winner of a knockout match. Downstream winners that depended on
/// the previous result are cleared first, then the new winner is recorded and
/// propagated.
pub fn set_knockout_winner(
    tournament: &mut Tournament,
    match_id: &str,
    winner_id: TeamId,
) -> Result<(), TournamentError> {
    let m = tournament
        .knockout_matches
        .iter()
        .find(|m| m.id == match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
    if m.team1.id != winner_id && m.team2.id != winner_id {
        return Err(TournamentError::TeamNotFound(winner_id));
    }

    let mut winners = clear_downstream(&tournament.knockout_matches, match_id, &tournament.knockout_winners);
    winners.insert(match_id.to_string(), winner_id);

    tournament.knockout_matches = apply_winners(&tournament.knockout_matches, &winners);
    tournament.knockout_winners = winners;
    Ok(())
}

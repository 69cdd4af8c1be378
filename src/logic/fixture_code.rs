//! Fixture codes: stable short names for knockout matches ("PQ1", "Q2", ...).
//! These codes are the only identifier used to wire later rounds to earlier
//! ones; match ids and team names are never parsed for bracket topology.

use crate::models::Match;
use std::collections::HashMap;

/// Code prefix for a round label. Unrecognized labels map to "M".
pub fn round_prefix(round: &str) -> &'static str {
    match round {
        "Pre-Quarterfinal" => "PQ",
        "Quarterfinal" => "Q",
        "Semifinal" => "S",
        "Final" => "F",
        _ => "M",
    }
}

/// Fixture code for the match at `index_within_round` (0-based) of a round.
pub fn fixture_code(round: &str, index_within_round: usize) -> String {
    format!("{}{}", round_prefix(round), index_within_round + 1)
}

/// Fixture code for a specific match, or None if it has no round label or is
/// not present in `all`. The index within the round follows generation order.
pub fn fixture_code_for_match(m: &Match, all: &[Match]) -> Option<String> {
    let round = m.round.as_deref()?;
    let index = all
        .iter()
        .filter(|x| x.round.as_deref() == Some(round))
        .position(|x| x.id == m.id)?;
    Some(fixture_code(round, index))
}

/// Map every match's fixture code to its index in `all`. Matches without a
/// round label are skipped.
pub fn fixture_code_map(all: &[Match]) -> HashMap<String, usize> {
    let mut per_round: HashMap<&str, usize> = HashMap::new();
    let mut map = HashMap::new();

    for (i, m) in all.iter().enumerate() {
        let Some(round) = m.round.as_deref() else {
            continue;
        };
        let index_within_round = per_round.entry(round).or_insert(0);
        map.insert(fixture_code(round, *index_within_round), i);
        *index_within_round += 1;
    }

    map
}

//! Round-robin scheduling: all unique pairings within a group.

use crate::models::{Group, Match};

/// All `n*(n-1)/2` matches for a group, every unordered pair `(i, j)` with
/// `i < j` in the group's team order. A group with 0 or 1 team yields no
/// matches; there is no bye handling.
pub fn round_robin_matches(group: &Group, stage_id: &str) -> Vec<Match> {
    let mut matches = Vec::new();
    let teams = &group.teams;

    for i in 0..teams.len() {
        for j in (i + 1)..teams.len() {
            let match_id = format!("{}-match-{}-{}", group.id, i, j);
            matches.push(Match::round_robin(
                match_id,
                teams[i].clone(),
                teams[j].clone(),
                &group.id,
                stage_id,
            ));
        }
    }

    matches
}

//! Reordering teams within a group. Positions are 1-based; order encodes the
//! finishing table.

use crate::models::{Team, TournamentError};

/// Move a team to `target_position` (1-based), shifting the others. All teams
/// stay in the group with unique positions 1..N.
pub fn reorder_group_teams(
    teams: &[Team],
    team_id: &str,
    target_position: usize,
) -> Result<Vec<Team>, TournamentError> {
    if target_position < 1 || target_position > teams.len() {
        return Err(TournamentError::InvalidPosition {
            position: target_position,
            group_size: teams.len(),
        });
    }

    let current_index = teams
        .iter()
        .position(|t| t.id == team_id)
        .ok_or_else(|| TournamentError::TeamNotFound(team_id.to_string()))?;
    let target_index = target_position - 1;

    let mut reordered = teams.to_vec();
    if current_index != target_index {
        let moved = reordered.remove(current_index);
        reordered.insert(target_index, moved);
    }
    Ok(reordered)
}

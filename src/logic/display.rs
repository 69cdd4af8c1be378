//! Display codes for the presentation collaborator: origin-group serials
//! ("A-2") and in-group position codes ("A1").

use crate::models::{Match, Stage, Team};

/// Origin serial for a team: group name and 1-based position at the team's
/// earliest appearance (smallest stage number), e.g. "A-2" for group A's
/// runner-up. None when the team appears in no stage.
pub fn origin_group_serial(team_id: &str, stages: &[Stage]) -> Option<String> {
    let mut ordered: Vec<&Stage> = stages.iter().collect();
    ordered.sort_by_key(|s| s.stage_number);

    for stage in ordered {
        for group in &stage.groups {
            if let Some(index) = group.teams.iter().position(|t| t.id == team_id) {
                return Some(format!("{}-{}", group.name, index + 1));
            }
        }
    }
    None
}

/// Position code for a team within the group owning a round-robin match, e.g.
/// "A1". None when the match's stage, group, or the team cannot be found.
pub fn round_robin_display_code(m: &Match, team: &Team, stages: &[Stage]) -> Option<String> {
    let stage = stages.iter().find(|s| Some(&s.id) == m.stage_id.as_ref())?;
    let group = stage.groups.iter().find(|g| Some(&g.id) == m.group_id.as_ref())?;
    let index = group.teams.iter().position(|t| t.id == team.id)?;
    Some(format!("{}{}", group.name, index + 1))
}

/// Team label for a round-robin match. First-stage teams show their in-group
/// code ("A1 Sunrisers"); teams in later stages show where they came from
/// ("A-2 Sunrisers"). Falls back to the bare name when no code resolves.
pub fn format_round_robin_team(m: &Match, team: &Team, stages: &[Stage]) -> String {
    let stage = stages.iter().find(|s| Some(&s.id) == m.stage_id.as_ref());

    if stage.is_some_and(|s| s.stage_number > 1) {
        return match origin_group_serial(&team.id, stages) {
            Some(serial) => format!("{} {}", serial, team.name),
            None => team.name.clone(),
        };
    }

    match round_robin_display_code(m, team, stages) {
        Some(code) => format!("{} {}", code, team.name),
        None => team.name.clone(),
    }
}

/// Team label with origin serial prefix, for knockout listings.
pub fn format_team_with_origin(team: &Team, stages: &[Stage]) -> String {
    match origin_group_serial(&team.id, stages) {
        Some(serial) => format!("{} {}", serial, team.name),
        None => team.name.clone(),
    }
}

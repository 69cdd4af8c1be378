//! Group and Stage: the round-robin side of the tournament.

use crate::models::fixture::Match;
use crate::models::team::Team;
use serde::{Deserialize, Serialize};

/// Deterministic identifier for a group (`stage-{n}-group-{k}`), stable across
/// regenerations of the same configuration.
pub type GroupId = String;

/// Deterministic identifier for a stage (`stage-{n}`).
pub type StageId = String;

/// A round-robin group. Team order encodes finishing position: index 0 is the
/// group winner, index 1 the runner-up.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub teams: Vec<Team>,
}

/// A round-robin stage. Its matches are exactly the union of its groups'
/// round-robin matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    pub name: String,
    /// 1-based, strictly increasing across the tournament.
    pub stage_number: u32,
    pub groups: Vec<Group>,
    pub matches: Vec<Match>,
}

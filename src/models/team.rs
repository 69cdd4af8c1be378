//! Team data structure and placeholder constructors.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team. Real teams carry UUID strings; placeholder
/// teams carry `tbd-{n}` or `placeholder-{code}` ids so they never collide
/// with roster teams.
pub type TeamId = String;

/// A team in the tournament. Identity is `id`; `name` is display data and may
/// be edited without affecting pairing history or advancement.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    /// Create a new roster team with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }

    /// Placeholder for an unassigned manual-mode slot.
    pub fn tbd(index: usize) -> Self {
        Self {
            id: format!("tbd-{index}"),
            name: "TBD".to_string(),
        }
    }

    /// Placeholder standing in for the undecided winner of an upstream
    /// fixture; displays as the fixture code itself (e.g. "PQ1").
    pub fn source_placeholder(code: &str) -> Self {
        Self {
            id: format!("placeholder-{code}"),
            name: code.to_string(),
        }
    }
}

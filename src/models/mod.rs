//! Data structures: teams, stages, matches, configuration, aggregate state,
//! and the transport encoding for the persistence collaborator.

pub mod config;
pub mod fixture;
pub mod stage;
pub mod team;
pub mod tournament;
pub mod transport;

pub use config::{
    AdvancementDestination, KnockoutEntryPoint, KnockoutFixtureAssignment, KnockoutPairingMode,
    KnockoutStageConfig, KnockoutWarnings, KnockoutWinnerMap, RoundRobinRoundConfig,
    StageAdvancementConfig,
};
pub use fixture::{KnockoutRound, Match, MatchId};
pub use stage::{Group, GroupId, Stage, StageId};
pub use team::{Team, TeamId};
pub use tournament::{Tournament, TournamentError, TournamentId};
pub use transport::{
    deserialize_draws, serialize_draws, AdvancementRule, DeserializedDraws, DrawsSnapshot,
    RoundRobinStageRules, StageType, ELIMINATED_SENTINEL,
};

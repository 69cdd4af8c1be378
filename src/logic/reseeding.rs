//! Rematch-avoidance reseeding: reorder qualified teams so that group-stage
//! opponents meet again as late as possible in the bracket.

use crate::models::{Stage, Team, TeamId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Score penalty for a first-round rematch (adjacent pair already played).
const FIRST_ROUND_PENALTY: u32 = 1000;
/// Score penalty for a pair in the same bracket half that already played.
const SAME_HALF_PENALTY: u32 = 100;
/// Team counts up to this size are searched exhaustively.
const EXHAUSTIVE_LIMIT: usize = 8;
/// Permutation cap for the exhaustive branch (8!).
const MAX_PERMUTATIONS: usize = 40_320;

/// Best arrangement found, plus a description of every conflict left in it.
#[derive(Clone, Debug)]
pub struct ReseedingResult {
    pub teams: Vec<Team>,
    pub warnings: Vec<String>,
}

/// Unordered team pairs that have already met, derived solely from the given
/// stages' matches (current in-memory tournament state, no external history).
pub fn build_match_history(stages: &[Stage]) -> HashSet<(TeamId, TeamId)> {
    let mut history = HashSet::new();
    for stage in stages {
        for m in &stage.matches {
            history.insert(pair_key(&m.team1.id, &m.team2.id));
        }
    }
    history
}

fn pair_key(a: &str, b: &str) -> (TeamId, TeamId) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn have_played(a: &str, b: &str, history: &HashSet<(TeamId, TeamId)>) -> bool {
    history.contains(&pair_key(a, b))
}

/// Arrangement score; lower is strictly better, 0 is rematch-free.
fn score_arrangement(teams: &[Team], history: &HashSet<(TeamId, TeamId)>) -> u32 {
    let mut score = 0;
    let half = teams.len() / 2;

    for pair in teams.chunks(2) {
        if let [a, b] = pair {
            if have_played(&a.id, &b.id, history) {
                score += FIRST_ROUND_PENALTY;
            }
        }
    }

    for bracket_half in [&teams[..half], &teams[half..]] {
        for i in 0..bracket_half.len() {
            for j in (i + 1)..bracket_half.len() {
                if have_played(&bracket_half[i].id, &bracket_half[j].id, history) {
                    score += SAME_HALF_PENALTY;
                }
            }
        }
    }

    score
}

/// Human-readable description of every conflict in an arrangement. Empty for a
/// rematch-free arrangement.
fn arrangement_warnings(teams: &[Team], history: &HashSet<(TeamId, TeamId)>) -> Vec<String> {
    let mut warnings = Vec::new();
    let half = teams.len() / 2;

    let first_round: Vec<String> = teams
        .chunks(2)
        .filter_map(|pair| match pair {
            [a, b] if have_played(&a.id, &b.id, history) => {
                Some(format!("{} vs {}", a.name, b.name))
            }
            _ => None,
        })
        .collect();
    if !first_round.is_empty() {
        warnings.push(format!(
            "First-round rematches: {}. These teams already played in the group stage.",
            first_round.join(", ")
        ));
    }

    let mut same_half = Vec::new();
    for bracket_half in [&teams[..half], &teams[half..]] {
        for i in 0..bracket_half.len() {
            for j in (i + 1)..bracket_half.len() {
                if have_played(&bracket_half[i].id, &bracket_half[j].id, history) {
                    same_half.push(format!(
                        "{} & {}",
                        bracket_half[i].name, bracket_half[j].name
                    ));
                }
            }
        }
    }
    if !same_half.is_empty() {
        warnings.push(format!(
            "Same bracket half: {}. These teams may meet again before the final.",
            same_half.join(", ")
        ));
    }

    warnings
}

/// Reseed with the thread-local RNG. Production entry point; tests inject a
/// seeded RNG via [`reseed_teams_with_rng`].
pub fn reseed_teams(teams: &[Team], stages: &[Stage], max_attempts: usize) -> ReseedingResult {
    reseed_teams_with_rng(teams, stages, max_attempts, &mut rand::thread_rng())
}

/// Reorder `teams` to minimize first-round and same-half rematches.
///
/// Up to [`EXHAUSTIVE_LIMIT`] teams every permutation is tried (bounded by
/// 8! = 40,320) and the search is fully deterministic. Above that, up to
/// `min(max_attempts, n * 1000)` uniform shuffles are sampled. Both branches
/// stop on the first rematch-free arrangement; the original order is always
/// the baseline candidate and is returned unchanged when already perfect.
pub fn reseed_teams_with_rng<R: Rng + ?Sized>(
    teams: &[Team],
    stages: &[Stage],
    max_attempts: usize,
    rng: &mut R,
) -> ReseedingResult {
    if teams.is_empty() {
        return ReseedingResult {
            teams: Vec::new(),
            warnings: Vec::new(),
        };
    }

    let history = build_match_history(stages);

    let mut best_teams = teams.to_vec();
    let mut best_score = score_arrangement(&best_teams, &history);
    if best_score == 0 {
        return ReseedingResult {
            teams: best_teams,
            warnings: Vec::new(),
        };
    }

    if teams.len() <= EXHAUSTIVE_LIMIT {
        // Heap's algorithm; the starting arrangement was scored above.
        let mut arr = teams.to_vec();
        let n = arr.len();
        let mut c = vec![0usize; n];
        let mut evaluated = 1usize;
        let mut i = 0;
        while i < n && evaluated < MAX_PERMUTATIONS {
            if c[i] < i {
                if i % 2 == 0 {
                    arr.swap(0, i);
                } else {
                    arr.swap(c[i], i);
                }
                evaluated += 1;
                let score = score_arrangement(&arr, &history);
                if score < best_score {
                    best_score = score;
                    best_teams = arr.clone();
                    if best_score == 0 {
                        break;
                    }
                }
                c[i] += 1;
                i = 0;
            } else {
                c[i] = 0;
                i += 1;
            }
        }
    } else {
        let attempts = max_attempts.min(teams.len() * 1000);
        for _ in 0..attempts {
            let mut shuffled = teams.to_vec();
            shuffled.shuffle(rng);
            let score = score_arrangement(&shuffled, &history);
            if score < best_score {
                best_score = score;
                best_teams = shuffled;
                if best_score == 0 {
                    break;
                }
            }
        }
    }

    let warnings = arrangement_warnings(&best_teams, &history);
    ReseedingResult {
        teams: best_teams,
        warnings,
    }
}

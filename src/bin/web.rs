//! Single binary web server: JSON REST API around the tournament engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use cricket_tournament_web::models::{deserialize_draws, serialize_draws, DrawsSnapshot};
use cricket_tournament_web::{
    assign_knockout_fixture, generate_tournament, match_count_breakdown, set_knockout_pairing_mode,
    set_knockout_winner, update_team_position, KnockoutFixtureAssignment, KnockoutPairingMode,
    KnockoutStageConfig, RoundRobinRoundConfig, StageAdvancementConfig, Tournament, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default = "default_number_of_teams")]
    number_of_teams: usize,
}

fn default_number_of_teams() -> usize {
    48
}

#[derive(Deserialize)]
struct RosterBody {
    number_of_teams: usize,
}

#[derive(Deserialize)]
struct RoundsBody {
    rounds: Vec<RoundRobinRoundConfig>,
}

#[derive(Deserialize)]
struct TeamNameBody {
    name: String,
}

#[derive(Deserialize)]
struct GroupNameBody {
    stage_id: String,
    group_id: String,
    name: String,
}

#[derive(Deserialize)]
struct TeamPositionBody {
    stage_id: String,
    group_id: String,
    team_id: String,
    position: usize,
}

#[derive(Deserialize)]
struct MatchDateTimeBody {
    match_id: String,
    date: String,
    time: String,
}

#[derive(Deserialize)]
struct PairingModeBody {
    mode: KnockoutPairingMode,
}

#[derive(Deserialize)]
struct KnockoutWinnerBody {
    match_id: String,
    winner_id: String,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and team id.
#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: String,
}

/// Run a closure against one tournament under the write lock, mapping its
/// Result to a JSON response with the updated tournament or the error text.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), cricket_tournament_web::TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match f(t) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "cricket-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    body: Option<Json<CreateTournamentBody>>,
) -> HttpResponse {
    let number_of_teams = body
        .as_ref()
        .map(|b| b.number_of_teams)
        .unwrap_or_else(default_number_of_teams);
    let tournament = Tournament::new(number_of_teams);
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(&g.get(&id).unwrap().tournament)
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_| Ok(()))
}

/// Resize the roster (team identities are kept when growing/shrinking).
#[put("/api/tournaments/{id}/roster")]
async fn api_set_roster(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RosterBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.set_number_of_teams(body.number_of_teams);
        Ok(())
    })
}

/// Replace the round-robin round configuration.
#[put("/api/tournaments/{id}/rounds")]
async fn api_set_rounds(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RoundsBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.set_round_robin_rounds(body.rounds.clone());
        Ok(())
    })
}

/// Replace the knockout stage toggles.
#[put("/api/tournaments/{id}/knockout-stages")]
async fn api_set_knockout_stages(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<KnockoutStageConfig>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.set_knockout_stages(*body);
        Ok(())
    })
}

/// Insert or replace the advancement config for one stage.
#[put("/api/tournaments/{id}/advancement")]
async fn api_set_advancement(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<StageAdvancementConfig>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.set_stage_advancement_config(body.into_inner());
        Ok(())
    })
}

/// Generate stages and knockout bracket from the current configuration.
#[post("/api/tournaments/{id}/generate")]
async fn api_generate(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, generate_tournament)
}

/// Rename a team everywhere it appears.
#[put("/api/tournaments/{id}/teams/{team_id}/name")]
async fn api_update_team_name(
    state: AppState,
    path: Path<TournamentTeamPath>,
    body: Json<TeamNameBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.update_team_name(&path.team_id, body.name.trim())
    })
}

/// Rename a group (names are unique across the tournament).
#[put("/api/tournaments/{id}/groups/name")]
async fn api_update_group_name(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<GroupNameBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.update_group_name(&body.stage_id, &body.group_id, &body.name)
    })
}

/// Move a team within its group; knockout matches are rebuilt from the new
/// finishing positions.
#[put("/api/tournaments/{id}/teams/position")]
async fn api_update_team_position(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TeamPositionBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        update_team_position(t, &body.stage_id, &body.group_id, &body.team_id, body.position)
    })
}

/// Set the date and time of a match.
#[put("/api/tournaments/{id}/matches/datetime")]
async fn api_update_match_datetime(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<MatchDateTimeBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.update_match_datetime(&body.match_id, &body.date, &body.time)
    })
}

/// Switch knockout pairing between automatic and manual.
#[put("/api/tournaments/{id}/knockout/pairing-mode")]
async fn api_set_pairing_mode(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<PairingModeBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| set_knockout_pairing_mode(t, body.mode))
}

/// Assign the participants of an entry-round knockout match (manual mode).
#[put("/api/tournaments/{id}/knockout/fixture")]
async fn api_assign_fixture(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<KnockoutFixtureAssignment>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        assign_knockout_fixture(t, body.into_inner())
    })
}

/// Declare the winner of a knockout match; downstream results that depended
/// on the previous winner are invalidated.
#[put("/api/tournaments/{id}/knockout/winner")]
async fn api_set_knockout_winner(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<KnockoutWinnerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        set_knockout_winner(t, &body.match_id, body.winner_id.clone())
    })
}

/// Match-count breakdown for the current configuration.
#[get("/api/tournaments/{id}/match-count")]
async fn api_match_count(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &entry.tournament;
    let breakdown = match_count_breakdown(
        t.teams.len(),
        &t.round_robin_rounds,
        &t.knockout_stages,
        &t.stage_advancement_configs,
    );
    HttpResponse::Ok().json(breakdown)
}

/// Export group assignments as CSV: stage, group, position, team.
#[get("/api/tournaments/{id}/groups/export")]
async fn api_export_groups(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();

    let mut writer = csv::Writer::from_writer(Vec::new());
    if writer.write_record(["stage", "group", "position", "team"]).is_err() {
        return HttpResponse::InternalServerError().body("csv error");
    }
    for stage in &entry.tournament.stages {
        for group in &stage.groups {
            for (i, team) in group.teams.iter().enumerate() {
                let position = (i + 1).to_string();
                if writer
                    .write_record([&stage.name, &group.name, &position, &team.name])
                    .is_err()
                {
                    return HttpResponse::InternalServerError().body("csv error");
                }
            }
        }
    }
    match writer.into_inner() {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(bytes),
        Err(_) => HttpResponse::InternalServerError().body("csv error"),
    }
}

/// Draw snapshot for the persistence collaborator.
#[get("/api/tournaments/{id}/draws")]
async fn api_get_draws(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    match serialize_draws(
        &entry.tournament.stages,
        &entry.tournament.stage_advancement_configs,
    ) {
        Ok(snapshot) => HttpResponse::Ok().json(snapshot),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Load advancement and round configuration from a draw snapshot. Group
/// counts are not part of the snapshot and must be re-applied before
/// generating.
#[post("/api/tournaments/{id}/draws")]
async fn api_load_draws(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<DrawsSnapshot>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let draws = deserialize_draws(&body);
        t.set_stage_advancement_configs(draws.stage_advancement_configs);
        t.set_round_robin_rounds(draws.round_robin_rounds);
        Ok(())
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_set_roster)
            .service(api_set_rounds)
            .service(api_set_knockout_stages)
            .service(api_set_advancement)
            .service(api_generate)
            .service(api_update_team_name)
            .service(api_update_group_name)
            .service(api_update_team_position)
            .service(api_update_match_datetime)
            .service(api_set_pairing_mode)
            .service(api_assign_fixture)
            .service(api_set_knockout_winner)
            .service(api_match_count)
            .service(api_export_groups)
            .service(api_get_draws)
            .service(api_load_draws)
    })
    .bind(bind)?
    .run()
    .await
}

//! Single binary web server: JSON API over in-memory match logs and rally analysis.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use rally_analysis_web::{
    analyze_rallies, MatchId, MatchLog, MatchLogError, PlayerId, ShotEvent, ShotId, ShotResult,
    ShotType,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-match entry: shot log + last activity time (for auto-cleanup).
struct MatchEntry {
    match_log: MatchLog,
    last_activity: Instant,
}

/// In-memory state: match logs by id. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<MatchId, MatchEntry>>>;

/// Inactivity threshold: match logs not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Listing row for GET /api/matches.
#[derive(Serialize)]
struct MatchSummary {
    id: MatchId,
    name: String,
    created_at: DateTime<Utc>,
    shot_count: usize,
}

#[derive(Deserialize)]
struct CreateMatchBody {
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct RenameBody {
    name: String,
}

/// A shot as posted by clients; the match id comes from the path.
#[derive(Deserialize)]
struct NewShotBody {
    #[serde(default)]
    id: Option<ShotId>,
    timestamp: f64,
    shot_type: ShotType,
    hit_player: PlayerId,
    receive_player: PlayerId,
    #[serde(default)]
    result: ShotResult,
}

impl NewShotBody {
    fn into_shot(self, match_id: MatchId) -> ShotEvent {
        ShotEvent {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            match_id,
            timestamp: self.timestamp,
            shot_type: self.shot_type,
            hit_player: self.hit_player,
            receive_player: self.receive_player,
            result: self.result,
        }
    }
}

#[derive(Serialize)]
struct ImportResponse<'a> {
    imported: usize,
    #[serde(rename = "match")]
    match_log: &'a MatchLog,
}

/// Optional `?player=<uuid>`: subject player for win statistics.
#[derive(Deserialize)]
struct SubjectQuery {
    player: Option<PlayerId>,
}

/// Path segment: match id (e.g. /api/matches/{id})
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Path segments: match id and shot id (e.g. /api/matches/{id}/shots/{shot_id})
#[derive(Deserialize)]
struct MatchShotPath {
    id: MatchId,
    shot_id: ShotId,
}

#[derive(Deserialize)]
struct PlayerPath {
    player_id: PlayerId,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Missing resources are 404, everything else is a bad request.
fn error_response(e: MatchLogError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        MatchLogError::MatchNotFound(_) | MatchLogError::ShotNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "rally-analysis-web",
    })
}

/// Create a new, empty match log (returns it with id).
#[post("/api/matches")]
async fn api_create_match(state: AppState, body: Option<Json<CreateMatchBody>>) -> HttpResponse {
    let name = body.map(|b| b.into_inner().name).unwrap_or_default();
    let match_log = MatchLog::new(name);
    let id = match_log.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    log::info!("Created match {} ({})", id, match_log.name);
    let response = HttpResponse::Ok().json(&match_log);
    g.insert(
        id,
        MatchEntry {
            match_log,
            last_activity: Instant::now(),
        },
    );
    response
}

/// List all match logs, newest first.
#[get("/api/matches")]
async fn api_list_matches(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let mut summaries: Vec<MatchSummary> = g
        .values()
        .map(|e| MatchSummary {
            id: e.match_log.id,
            name: e.match_log.name.clone(),
            created_at: e.match_log.created_at,
            shot_count: e.match_log.shots.len(),
        })
        .collect();
    summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    HttpResponse::Ok().json(summaries)
}

/// Get a match log by id. Touching it refreshes last_activity.
#[get("/api/matches/{id}")]
async fn api_get_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.match_log)
        }
        None => error_response(MatchLogError::MatchNotFound(path.id)),
    }
}

#[delete("/api/matches/{id}")]
async fn api_delete_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.remove(&path.id) {
        Some(_) => {
            log::info!("Deleted match {}", path.id);
            HttpResponse::NoContent().finish()
        }
        None => error_response(MatchLogError::MatchNotFound(path.id)),
    }
}

#[put("/api/matches/{id}/name")]
async fn api_rename_match(state: AppState, path: Path<MatchPath>, body: Json<RenameBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return error_response(MatchLogError::MatchNotFound(path.id)),
    };
    entry.last_activity = Instant::now();
    let m = &mut entry.match_log;
    match m.rename(&body.name) {
        Ok(()) => HttpResponse::Ok().json(m),
        Err(e) => error_response(e),
    }
}

/// Add shots (JSON array). Shots are kept sorted by timestamp.
#[post("/api/matches/{id}/shots")]
async fn api_add_shots(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<Vec<NewShotBody>>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return error_response(MatchLogError::MatchNotFound(path.id)),
    };
    entry.last_activity = Instant::now();
    let m = &mut entry.match_log;
    let shots: Vec<ShotEvent> = body
        .into_inner()
        .into_iter()
        .map(|s| s.into_shot(m.id))
        .collect();
    match m.add_shots(shots) {
        Ok(()) => HttpResponse::Ok().json(m),
        Err(e) => {
            log::warn!("Rejected shots for match {}: {}", m.id, e);
            error_response(e)
        }
    }
}

/// Import shots from a CSV body (header: id,timestamp,shot_type,hit_player,receive_player,result).
#[post("/api/matches/{id}/shots/csv")]
async fn api_import_shots_csv(state: AppState, path: Path<MatchPath>, body: String) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return error_response(MatchLogError::MatchNotFound(path.id)),
    };
    entry.last_activity = Instant::now();
    let m = &mut entry.match_log;
    match m.import_csv(&body) {
        Ok(imported) => {
            log::info!("Imported {} shot(s) into match {}", imported, m.id);
            HttpResponse::Ok().json(ImportResponse {
                imported,
                match_log: m,
            })
        }
        Err(e) => {
            log::warn!("CSV import failed for match {}: {}", m.id, e);
            error_response(e)
        }
    }
}

#[delete("/api/matches/{id}/shots/{shot_id}")]
async fn api_remove_shot(state: AppState, path: Path<MatchShotPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return error_response(MatchLogError::MatchNotFound(path.id)),
    };
    entry.last_activity = Instant::now();
    let m = &mut entry.match_log;
    match m.remove_shot(path.shot_id) {
        Ok(_) => HttpResponse::Ok().json(m),
        Err(e) => error_response(e),
    }
}

/// Completed rallies of a match; `?player=` marks the subject's wins.
#[get("/api/matches/{id}/rallies")]
async fn api_match_rallies(state: AppState, path: Path<MatchPath>, query: Query<SubjectQuery>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(entry.match_log.rallies(query.player))
        }
        None => error_response(MatchLogError::MatchNotFound(path.id)),
    }
}

/// Rally statistics for a match; `?player=` sets the subject for win rates.
#[get("/api/matches/{id}/analysis")]
async fn api_match_analysis(state: AppState, path: Path<MatchPath>, query: Query<SubjectQuery>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(entry.match_log.analyze(query.player))
        }
        None => error_response(MatchLogError::MatchNotFound(path.id)),
    }
}

/// Rally statistics over every match a player appears in, with that player as subject.
/// Rallies are reconstructed per match, then aggregated together.
#[get("/api/players/{player_id}/analysis")]
async fn api_player_analysis(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let rallies: Vec<_> = g
        .values()
        .filter(|e| e.match_log.players().contains(&path.player_id))
        .flat_map(|e| e.match_log.rallies(Some(path.player_id)))
        .collect();
    HttpResponse::Ok().json(analyze_rallies(&rallies))
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

    let state = Data::new(RwLock::new(HashMap::<MatchId, MatchEntry>::new()));

    // Background task: every 30 minutes, remove match logs inactive for 12+ hours
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
                log::info!("Cleaned up {} inactive match(es) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_match)
            .service(api_list_matches)
            .service(api_get_match)
            .service(api_delete_match)
            .service(api_rename_match)
            .service(api_add_shots)
            .service(api_import_shots_csv)
            .service(api_remove_shot)
            .service(api_match_rallies)
            .service(api_match_analysis)
            .service(api_player_analysis)
    })
    .bind(bind)?
    .run()
    .await
}

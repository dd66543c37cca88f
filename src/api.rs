//! JSON API over an in-memory club (actix-web handlers and their shared state).

use crate::{
    announce, clear_result, generate_matches, import_members_csv, mark_all_read, mark_read,
    record_result, schedule_matches, Club, ClubError, MatchId, Member, MemberId, NotificationId,
    Player, PlayerId, Side,
};
use actix_web::{
    delete, get, post, put,
    web::{Bytes, Data, Json, Path, Query, ServiceConfig},
    HttpResponse, Responder,
};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared state: the club plus settings read at startup.
pub struct AppData {
    pub club: RwLock<Club>,
    /// Courts used when a schedule request does not name a count.
    pub default_courts: u32,
}

impl AppData {
    pub fn new(club: Club, default_courts: u32) -> Self {
        Self {
            club: RwLock::new(club),
            default_courts,
        }
    }
}

pub type AppState = Data<AppData>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddMemberBody {
    name: String,
    #[serde(default)]
    email: Option<String>,
}

/// Partial update: only fields present are changed.
#[derive(Deserialize)]
struct UpdateMemberBody {
    name: Option<String>,
    is_admin: Option<bool>,
    active: Option<bool>,
}

#[derive(Deserialize)]
struct ScheduleBody {
    courts: Option<u32>,
}

#[derive(Deserialize)]
struct RecordResultBody {
    winner: Side,
    #[serde(default)]
    score: Option<(u32, u32)>,
}

#[derive(Deserialize)]
struct GenerateBody {
    players: Vec<RosterEntry>,
    courts: u32,
    /// Fixed seed for a reproducible draw.
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct AnnouncementBody {
    message: String,
}

#[derive(Deserialize)]
struct InboxQuery {
    #[serde(default)]
    unread: bool,
}

#[derive(Deserialize)]
struct MemberPath {
    id: MemberId,
}

#[derive(Deserialize)]
struct DatePath {
    date: NaiveDate,
}

#[derive(Deserialize)]
struct AttendancePath {
    date: NaiveDate,
    member_id: MemberId,
}

#[derive(Deserialize)]
struct MatchPath {
    match_id: MatchId,
}

#[derive(Deserialize)]
struct NotificationPath {
    id: NotificationId,
}

/// Player on an ad-hoc roster. The id is any caller-chosen string; a fresh one is assigned when absent.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AdHocMatch {
    pub court: u32,
    pub team_1: [RosterEntry; 2],
    pub team_2: [RosterEntry; 2],
}

/// Ad-hoc draw, with every entry carrying an id.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AdHocGeneration {
    pub matches: Vec<AdHocMatch>,
    pub unused: Vec<RosterEntry>,
}

/// Run the generator over caller-supplied entries and map the draw back to their ids.
pub fn generate_ad_hoc<R: Rng + ?Sized>(
    entries: &[RosterEntry],
    courts: u32,
    rng: &mut R,
) -> AdHocGeneration {
    let players: Vec<Player> = entries.iter().map(|e| Player::new(e.name.clone())).collect();
    let by_player: HashMap<PlayerId, RosterEntry> = players
        .iter()
        .zip(entries)
        .map(|(p, e)| {
            let id = e.id.clone().unwrap_or_else(|| p.id.to_string());
            (p.id, RosterEntry { id: Some(id), name: e.name.clone() })
        })
        .collect();
    let entry = |p: &Player| {
        by_player.get(&p.id).cloned().unwrap_or_else(|| RosterEntry {
            id: Some(p.id.to_string()),
            name: p.name.clone(),
        })
    };

    let generation = generate_matches(&players, courts, rng);
    AdHocGeneration {
        matches: generation
            .matches
            .iter()
            .map(|m| {
                let [a, b] = m.team_1.players();
                let [c, d] = m.team_2.players();
                AdHocMatch {
                    court: m.court,
                    team_1: [entry(a), entry(b)],
                    team_2: [entry(c), entry(d)],
                }
            })
            .collect(),
        unused: generation.unused.iter().map(entry).collect(),
    }
}

fn error_response(e: &ClubError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    if e.is_not_found() {
        HttpResponse::NotFound().json(body)
    } else {
        HttpResponse::BadRequest().json(body)
    }
}

fn lock_club(state: &AppState) -> Result<RwLockWriteGuard<'_, Club>, HttpResponse> {
    state
        .club
        .write()
        .map_err(|_| HttpResponse::InternalServerError().body("lock error"))
}

/// Shared lock for handlers that only read.
fn read_club(state: &AppState) -> Result<RwLockReadGuard<'_, Club>, HttpResponse> {
    state
        .club
        .read()
        .map_err(|_| HttpResponse::InternalServerError().body("lock error"))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-club",
    })
}

#[get("/api/members")]
async fn api_list_members(state: AppState) -> HttpResponse {
    let g = match read_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(&g.members)
}

#[post("/api/members")]
async fn api_add_member(state: AppState, body: Json<AddMemberBody>) -> HttpResponse {
    let mut g = match lock_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let body = body.into_inner();
    match g.add_member(&body.name, body.email) {
        Ok(id) => HttpResponse::Ok().json(g.member(id)),
        Err(e) => error_response(&e),
    }
}

fn update_member(
    club: &mut Club,
    id: MemberId,
    body: &UpdateMemberBody,
) -> Result<Member, ClubError> {
    if let Some(name) = &body.name {
        club.rename_member(id, name)?;
    }
    if let Some(is_admin) = body.is_admin {
        club.set_admin(id, is_admin)?;
    }
    if let Some(active) = body.active {
        club.set_active(id, active)?;
    }
    club.member(id).cloned().ok_or(ClubError::MemberNotFound(id))
}

/// Rename, promote/demote or (de)activate a member.
#[put("/api/members/{id}")]
async fn api_update_member(
    state: AppState,
    path: Path<MemberPath>,
    body: Json<UpdateMemberBody>,
) -> HttpResponse {
    let mut g = match lock_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let result = update_member(&mut g, path.id, &body);
    match result {
        Ok(member) => HttpResponse::Ok().json(member),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/members/{id}")]
async fn api_remove_member(state: AppState, path: Path<MemberPath>) -> HttpResponse {
    let mut g = match lock_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match g.remove_member(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

#[get("/api/members/{id}/stats")]
async fn api_member_stats(state: AppState, path: Path<MemberPath>) -> HttpResponse {
    let g = match read_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match g.member_stats(path.id) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(&e),
    }
}

/// Import members from a CSV request body (header row: name,email).
#[post("/api/members/import")]
async fn api_import_members(state: AppState, body: Bytes) -> HttpResponse {
    let mut g = match lock_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match import_members_csv(&mut g, body.as_ref()) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_response(&e),
    }
}

#[get("/api/attendance/{date}")]
async fn api_attendance(state: AppState, path: Path<DatePath>) -> HttpResponse {
    let g = match read_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(g.attendance(path.date))
}

#[post("/api/attendance/{date}/{member_id}")]
async fn api_check_in(state: AppState, path: Path<AttendancePath>) -> HttpResponse {
    let mut g = match lock_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match g.check_in(path.date, path.member_id) {
        Ok(()) => HttpResponse::Ok().json(g.attendance(path.date)),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/attendance/{date}/{member_id}")]
async fn api_check_out(state: AppState, path: Path<AttendancePath>) -> HttpResponse {
    let mut g = match lock_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match g.check_out(path.date, path.member_id) {
        Ok(()) => HttpResponse::Ok().json(g.attendance(path.date)),
        Err(e) => error_response(&e),
    }
}

/// Generate (or regenerate) the schedule for a date from its attendance.
#[post("/api/schedules/{date}")]
async fn api_generate_schedule(
    state: AppState,
    path: Path<DatePath>,
    body: Option<Json<ScheduleBody>>,
) -> HttpResponse {
    let courts = body
        .and_then(|b| b.into_inner().courts)
        .unwrap_or(state.default_courts);
    let mut g = match lock_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match schedule_matches(&mut g, path.date, courts, &mut rand::thread_rng()) {
        Ok(schedule) => HttpResponse::Ok().json(schedule),
        Err(e) => error_response(&e),
    }
}

#[get("/api/schedules/{date}")]
async fn api_get_schedule(state: AppState, path: Path<DatePath>) -> HttpResponse {
    let g = match read_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match g.schedule(path.date) {
        Some(schedule) => HttpResponse::Ok().json(schedule),
        None => error_response(&ClubError::ScheduleNotFound(path.date)),
    }
}

#[delete("/api/schedules/{date}")]
async fn api_clear_schedule(state: AppState, path: Path<DatePath>) -> HttpResponse {
    let mut g = match lock_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match g.clear_schedule(path.date) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

#[put("/api/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    let mut g = match lock_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match record_result(&mut g, path.match_id, body.winner, body.score) {
        Ok(()) => HttpResponse::Ok().json(g.find_match(path.match_id)),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/matches/{match_id}/result")]
async fn api_clear_result(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match lock_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match clear_result(&mut g, path.match_id) {
        Ok(()) => HttpResponse::Ok().json(g.find_match(path.match_id)),
        Err(e) => error_response(&e),
    }
}

/// Stateless draw over an ad-hoc roster; nothing is stored. Ids are echoed back as given.
#[post("/api/generate")]
async fn api_generate(body: Json<GenerateBody>) -> HttpResponse {
    let generation = match body.seed {
        Some(seed) => {
            generate_ad_hoc(&body.players, body.courts, &mut StdRng::seed_from_u64(seed))
        }
        None => generate_ad_hoc(&body.players, body.courts, &mut rand::thread_rng()),
    };
    HttpResponse::Ok().json(generation)
}

#[get("/api/members/{id}/notifications")]
async fn api_notifications(
    state: AppState,
    path: Path<MemberPath>,
    query: Query<InboxQuery>,
) -> HttpResponse {
    let g = match read_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    if g.member(path.id).is_none() {
        return error_response(&ClubError::MemberNotFound(path.id));
    }
    HttpResponse::Ok().json(g.notifications_for(path.id, query.unread))
}

#[put("/api/notifications/{id}/read")]
async fn api_mark_read(state: AppState, path: Path<NotificationPath>) -> HttpResponse {
    let mut g = match lock_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match mark_read(&mut g, path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

#[post("/api/members/{id}/notifications/read-all")]
async fn api_mark_all_read(state: AppState, path: Path<MemberPath>) -> HttpResponse {
    let mut g = match lock_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match mark_all_read(&mut g, path.id) {
        Ok(count) => HttpResponse::Ok().json(serde_json::json!({ "marked": count })),
        Err(e) => error_response(&e),
    }
}

#[post("/api/announcements")]
async fn api_announce(state: AppState, body: Json<AnnouncementBody>) -> HttpResponse {
    let mut g = match lock_club(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match announce(&mut g, &body.message) {
        Ok(sent) => HttpResponse::Ok().json(serde_json::json!({ "sent": sent })),
        Err(e) => error_response(&e),
    }
}

/// Register every API route.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(api_health)
        .service(api_generate)
        .service(api_import_members)
        .service(api_list_members)
        .service(api_add_member)
        .service(api_update_member)
        .service(api_remove_member)
        .service(api_member_stats)
        .service(api_notifications)
        .service(api_mark_all_read)
        .service(api_attendance)
        .service(api_check_in)
        .service(api_check_out)
        .service(api_generate_schedule)
        .service(api_get_schedule)
        .service(api_clear_schedule)
        .service(api_record_result)
        .service(api_clear_result)
        .service(api_mark_read)
        .service(api_announce);
}

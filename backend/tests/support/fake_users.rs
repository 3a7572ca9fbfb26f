//! In-process stand-in for the remote user directory.
//!
//! Serves `GET /users/{id}` with these answers:
//! - a registered id: 200 with a small JSON body;
//! - `broken`: 500;
//! - `slow`: 200 after a two second delay;
//! - anything else: 404.

use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::json;
use url::Url;

/// Delay applied to the `slow` user.
pub const SLOW_RESPONSE_DELAY: Duration = Duration::from_secs(2);

struct Directory {
    registered: Vec<String>,
    hits: Arc<AtomicUsize>,
}

/// Running fake directory.
pub struct FakeUsers {
    pub base_url: Url,
    pub handle: ServerHandle,
    hits: Arc<AtomicUsize>,
}

impl FakeUsers {
    /// Requests answered so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn lookup(directory: web::Data<Directory>, path: web::Path<String>) -> HttpResponse {
    directory.hits.fetch_add(1, Ordering::SeqCst);
    let id = path.into_inner();
    match id.as_str() {
        "broken" => HttpResponse::InternalServerError().json(json!({"error": "boom"})),
        "slow" => {
            actix_web::rt::time::sleep(SLOW_RESPONSE_DELAY).await;
            HttpResponse::Ok().json(json!({"id": id}))
        }
        _ if directory.registered.contains(&id) => {
            HttpResponse::Ok().json(json!({"id": id, "name": format!("User {id}")}))
        }
        _ => HttpResponse::NotFound().json(json!({"error": "User not found"})),
    }
}

/// Start a fake directory knowing `registered` users.
///
/// Must run inside an Actix system or a `LocalSet`.
pub async fn spawn_fake_users(registered: &[&str]) -> Result<FakeUsers, String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let hits = Arc::new(AtomicUsize::new(0));
    let directory = web::Data::new(Directory {
        registered: registered.iter().map(|id| (*id).to_owned()).collect(),
        hits: hits.clone(),
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(directory.clone())
            .route("/users/{id}", web::get().to(lookup))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    let base_url = Url::parse(&format!("http://{addr}")).map_err(|err| err.to_string())?;
    Ok(FakeUsers {
        base_url,
        handle,
        hits,
    })
}

/// A URL nothing listens on.
pub fn unreachable_users_url() -> Result<Url, String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    drop(listener);
    Url::parse(&format!("http://{addr}")).map_err(|err| err.to_string())
}

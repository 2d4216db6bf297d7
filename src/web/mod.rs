mod assets;

use std::{
    convert::Infallible,
    net::SocketAddr,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Result;
use axum::body::Body;
use axum::http::StatusCode;
use axum::{
    extract::{Path, State},
    http::header,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::broadcast};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use crate::{
    assets::AssetCatalog,
    engine::{Engine, EngineBuilder, EngineSettings},
    scenario::Scenario,
    snapshot::{SaveError, SaveStore},
    systems::{CombatSystem, MovementSystem, SettlementSystem, TerritorySystem},
    world::{CharacterKind, RenderFrame, ResourceKind, World},
};

/// Host cadence: one engine step per frame, roughly 60 per second.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct WebServerConfig {
    pub scenario: Scenario,
    pub save_dir: PathBuf,
    pub assets_dir: Option<PathBuf>,
    pub host: String,
    pub port: u16,
}

struct Sim {
    engine: Engine,
    world: World,
}

struct AppState {
    sim: Mutex<Sim>,
    broadcaster: broadcast::Sender<String>,
    save_store: SaveStore,
    assets_dir: Option<PathBuf>,
    scenario_name: String,
}

pub async fn run(config: WebServerConfig) -> Result<()> {
    let WebServerConfig {
        scenario,
        save_dir,
        assets_dir,
        host,
        port,
    } = config;

    // The first tick waits on the full sprite set when a texture dir is
    // configured.
    if let Some(dir) = &assets_dir {
        AssetCatalog::new(dir).verify()?;
    }

    let world = scenario.build_world();
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
        speed: scenario.speed,
        day_duration: scenario.day_duration,
    };
    let engine = EngineBuilder::new(settings)
        .with_system(MovementSystem::new())
        .with_system(SettlementSystem::new())
        .with_system(CombatSystem::new())
        .with_system(TerritorySystem::new())
        .build();

    let (tx, _) = broadcast::channel::<String>(512);
    let state = Arc::new(AppState {
        sim: Mutex::new(Sim { engine, world }),
        broadcaster: tx,
        save_store: SaveStore::new(save_dir),
        assets_dir,
        scenario_name: scenario.name.clone(),
    });

    let loop_state = state.clone();
    tokio::spawn(async move {
        let mut frames = tokio::time::interval(FRAME_INTERVAL);
        loop {
            frames.tick().await;
            let payload = {
                let mut sim = loop_state.sim.lock().expect("sim lock poisoned");
                let Sim { engine, world } = &mut *sim;
                match engine.step(world) {
                    Ok(outcome) if outcome.day_elapsed => serde_json::to_string(&world.frame()).ok(),
                    Ok(_) => None,
                    Err(err) => {
                        eprintln!("[web] simulation error: {err:?}");
                        None
                    }
                }
            };
            if let Some(payload) = payload {
                let _ = loop_state.broadcaster.send(payload);
            }
        }
    });

    let router = Router::new()
        .route("/", get(index))
        .route("/api/state", get(current_state))
        .route("/api/events", get(stream_events))
        .route("/api/speed", post(set_speed))
        .route("/api/season", post(advance_season))
        .route("/api/save", post(save_game))
        .route("/api/load", post(load_game))
        .route("/api/place", post(place_resource))
        .route("/api/destroy", post(destroy_resource))
        .route("/api/character", post(place_character))
        .route("/sprites/:name", get(sprite))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("invalid address");

    println!("hakoniwa live at http://{}:{} (Ctrl+C to stop)", host, port);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    println!("Shutting down...");
}

async fn index() -> Html<&'static str> {
    Html(assets::INDEX_HTML)
}

#[derive(Serialize)]
struct StateEnvelope {
    scenario: String,
    speed: f64,
    frame: RenderFrame,
}

async fn current_state(State(state): State<Arc<AppState>>) -> Json<StateEnvelope> {
    let sim = state.sim.lock().expect("sim lock poisoned");
    Json(StateEnvelope {
        scenario: state.scenario_name.clone(),
        speed: sim.engine.speed(),
        frame: sim.world.frame(),
    })
}

async fn stream_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.broadcaster.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(payload) => Some(Ok(Event::default().data(payload))),
        Err(_) => None,
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(2))
            .text("keep-alive"),
    )
}

#[derive(Deserialize)]
struct SpeedRequest {
    speed: f64,
}

async fn set_speed(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SpeedRequest>,
) -> StatusCode {
    let mut sim = state.sim.lock().expect("sim lock poisoned");
    sim.engine.set_speed(request.speed);
    StatusCode::NO_CONTENT
}

#[derive(Serialize)]
struct SeasonResponse {
    season: String,
}

async fn advance_season(State(state): State<Arc<AppState>>) -> Json<SeasonResponse> {
    let mut sim = state.sim.lock().expect("sim lock poisoned");
    sim.world.advance_season();
    Json(SeasonResponse {
        season: sim.world.season.label().to_string(),
    })
}

async fn save_game(State(state): State<Arc<AppState>>) -> Response {
    let sim = state.sim.lock().expect("sim lock poisoned");
    match state.save_store.save(&sim.world) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

async fn load_game(State(state): State<Arc<AppState>>) -> Response {
    let mut sim = state.sim.lock().expect("sim lock poisoned");
    match state.save_store.load_into(&mut sim.world) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err @ SaveError::NoSaveData(_)) => {
            (StatusCode::NOT_FOUND, err.to_string()).into_response()
        }
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

#[derive(Deserialize)]
struct PlaceRequest {
    kind: ResourceKind,
    x: f32,
    y: f32,
}

async fn place_resource(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlaceRequest>,
) -> StatusCode {
    let mut sim = state.sim.lock().expect("sim lock poisoned");
    sim.world.place_resource(request.kind, request.x, request.y);
    StatusCode::NO_CONTENT
}

#[derive(Deserialize)]
struct DestroyRequest {
    x: f32,
    y: f32,
}

async fn destroy_resource(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DestroyRequest>,
) -> StatusCode {
    let mut sim = state.sim.lock().expect("sim lock poisoned");
    sim.world.destroy_resource(request.x, request.y);
    StatusCode::NO_CONTENT
}

#[derive(Deserialize)]
struct CharacterRequest {
    kind: CharacterKind,
    x: f32,
    y: f32,
}

async fn place_character(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CharacterRequest>,
) -> StatusCode {
    let mut sim = state.sim.lock().expect("sim lock poisoned");
    let Sim { engine, world } = &mut *sim;
    let mut rng = engine.edit_rng();
    world.place_character(request.kind, request.x, request.y, &mut rng);
    StatusCode::NO_CONTENT
}

async fn sprite(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    let Some(dir) = &state.assets_dir else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let path = AssetCatalog::new(dir).texture_path(&name);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Response::builder()
            .header(header::CONTENT_TYPE, "image/png")
            .body(Body::from(Bytes::from(bytes)))
            .unwrap(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

//! Sleigh Party demo
//!
//! Runs the lobby flow for a handful of local players, then drives a
//! reindeer (with its follow camera) and Santa through a scripted input
//! sequence at the simulation tick rate.

use std::time::Duration;

use anyhow::Context;
use glam::Vec3;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sleigh_party::{
    host::{
        sim::{ScriptedAnimator, SimBody, SimMotor, SimWorld},
        StateId,
    },
    lobby::{LocalCloud, LocalSession, Matchmaker, RoleSelector, SessionService},
    reindeer::animator::{STATE_EATING_IN, STATE_EATING_LOOP, STATE_EATING_OUT, STATE_IDLE},
    CameraInput, DeterministicRng, FollowCamera, FrameContext, GameConfig, ReindeerController,
    ReindeerEvent, ReindeerInput, Role, SantaController, SantaInput, FRAME_DT, TICK_RATE, VERSION,
};

/// Demo length (10 seconds).
const DEMO_TICKS: u32 = 10 * TICK_RATE;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("Sleigh Party v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path).with_context(|| format!("loading config from {path}"))?,
        None => GameConfig::default(),
    };

    demo_lobby(&config).await?;

    tokio::select! {
        result = demo_round(&config) => result?,
        _ = tokio::signal::ctrl_c() => info!("Interrupted"),
    }
    Ok(())
}

// =============================================================================
// LOBBY
// =============================================================================

struct LobbyClient {
    matchmaker: Matchmaker<LocalSession>,
    roles: RoleSelector<LocalSession>,
}

/// Deliver callbacks until every inbox is empty.
async fn pump(clients: &mut [LobbyClient]) -> anyhow::Result<()> {
    loop {
        let mut delivered = 0;
        for client in clients.iter_mut() {
            let callbacks = client.matchmaker.session().poll().await;
            delivered += callbacks.len();
            for callback in &callbacks {
                client.matchmaker.handle(callback).await?;
                client.roles.handle(callback).await;
            }
            if let Some(scene) = client.matchmaker.take_scene_request() {
                info!("Loading scene {}", scene);
                client.roles.refresh().await;
            }
        }
        if delivered == 0 {
            return Ok(());
        }
    }
}

async fn demo_lobby(config: &GameConfig) -> anyhow::Result<()> {
    info!("=== Lobby ===");
    let cloud = LocalCloud::new();
    let names = ["nick", "dasher", "dancer", "prancer", "vixen"];

    let mut clients = Vec::new();
    for name in names {
        let session = cloud.session(name).await;
        let mut matchmaker = Matchmaker::new(session.clone(), config.lobby.clone());
        matchmaker.start().await?;
        clients.push(LobbyClient {
            matchmaker,
            roles: RoleSelector::new(session, &config.lobby),
        });
        pump(&mut clients).await?;
    }

    let wishes = [Role::Santa, Role::Santa, Role::Reindeer, Role::Reindeer, Role::Reindeer];
    for (i, wish) in wishes.into_iter().enumerate() {
        if clients[i].roles.try_select(wish).await.is_err() {
            info!("{}: {}", names[i], clients[i].roles.status_text());
            clients[i].roles.try_select(Role::Reindeer).await?;
        }
        info!("{}: {}", names[i], clients[i].roles.status_text());
        pump(&mut clients).await?;
    }

    info!("{}", clients[0].matchmaker.player_list_text().trim_end());
    info!("{}", clients[0].roles.player_list_text().trim_end());
    Ok(())
}

// =============================================================================
// ROUND
// =============================================================================

fn reindeer_input(tick: u32) -> ReindeerInput {
    match tick {
        60..=179 => ReindeerInput::with_movement(0.0, 1.0),
        180 => ReindeerInput::with_movement(0.0, 1.0).with_flags(ReindeerInput::FLAG_JUMP),
        181..=269 => ReindeerInput::with_movement(0.6, 0.8).with_flags(ReindeerInput::FLAG_RUN),
        330 => ReindeerInput::new().with_flags(ReindeerInput::FLAG_EAT),
        540 => ReindeerInput::new().with_flags(ReindeerInput::FLAG_ATTACK),
        _ => ReindeerInput::new(),
    }
}

fn santa_input(tick: u32) -> SantaInput {
    SantaInput {
        move_y: if tick < 480 { 1.0 } else { 0.0 },
        look_x: 0.25,
        run: tick < 360,
        ..SantaInput::default()
    }
}

/// States the animator walks through once eating starts.
fn eating_script() -> impl Iterator<Item = StateId> {
    std::iter::repeat(STATE_EATING_IN)
        .take(20)
        .chain(std::iter::repeat(STATE_EATING_LOOP).take(60))
        .chain(std::iter::repeat(STATE_EATING_OUT).take(20))
        .chain(std::iter::once(STATE_IDLE))
}

async fn demo_round(config: &GameConfig) -> anyhow::Result<()> {
    info!("=== Round ===");
    let world = SimWorld::with_floor(config.reindeer.ground_mask);

    let mut reindeer = ReindeerController::new(config.reindeer.clone(), DeterministicRng::new(2024), 0.0);
    let mut body = SimBody::new(Vec3::new(0.0, 0.5, 0.0));
    let mut reindeer_anim = ScriptedAnimator::new(STATE_IDLE);
    let mut camera = FollowCamera::new(config.camera.clone(), body.position);

    let mut santa = SantaController::new(config.santa.clone());
    let mut motor = SimMotor::new(Vec3::new(5.0, 0.0, 0.0), 0.0);
    let mut santa_anim = ScriptedAnimator::default();

    let mut interval = tokio::time::interval(Duration::from_secs_f32(FRAME_DT));
    for tick in 0..DEMO_TICKS {
        interval.tick().await;
        let now = tick as f32 * FRAME_DT;

        let input = reindeer_input(tick);
        let ctx = FrameContext { now, dt: FRAME_DT };
        let events = reindeer.step(
            ctx,
            Some(FRAME_DT),
            &input,
            Some(camera.basis()),
            &world,
            &mut body,
            &mut reindeer_anim,
        );
        world.integrate(&mut body, FRAME_DT);
        reindeer_anim.advance();

        for event in &events {
            if *event == ReindeerEvent::EatingStarted {
                reindeer_anim.queue_states(eating_script());
            }
            info!(tick, ?event, "reindeer");
        }

        let look = CameraInput { look_x: 0.1, look_y: 0.0, moving: input.has_movement() };
        camera.update(FRAME_DT, &look, body.position, &world);

        let frame = santa.update(now, FRAME_DT, &santa_input(tick), &mut motor, &mut santa_anim);
        if frame.stamina_depleted {
            info!(tick, "santa ran out of stamina");
        }

        if tick % (2 * TICK_RATE) == 0 {
            info!(
                "Tick {}: reindeer at ({:.2}, {:.2}, {:.2}) speed {:.2}, santa stamina {:.0}%",
                tick,
                body.position.x,
                body.position.y,
                body.position.z,
                reindeer.animator_speed(),
                frame.stamina_fraction * 100.0,
            );
        }
    }

    info!("=== Round Finished ===");
    info!("Reindeer: {:?}, eating phase {:?}", reindeer.state().current_state, reindeer.eating_phase());
    info!("Camera at {:?}", camera.position());
    info!(
        "Santa yaw {:.1}, stamina {:.1}/{:.0}",
        santa.yaw(),
        santa.stamina().current(),
        santa.stamina().max()
    );
    Ok(())
}

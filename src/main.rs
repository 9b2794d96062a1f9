use echo_sign::asset::{abandon_unfinished_loads, start_avatar_load, start_clip_loads};
use echo_sign::player::{Player, PlayerEvent};
use echo_sign::protocol::parse_message;
use echo_sign::settings::Settings;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{Instant, MissedTickBehavior};

async fn frame_loop(player: Player, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last = Instant::now();
    loop {
        ticker.tick().await;
        let now = Instant::now();
        player.tick(now - last);
        last = now;
    }
}

async fn wait_for_idle(player: &Player) {
    let mut events = player.subscribe();
    if !player.is_draining() {
        return;
    }
    loop {
        match events.recv().await {
            Ok(PlayerEvent::Idle) | Err(RecvError::Closed) => return,
            Ok(_) | Err(RecvError::Lagged(_)) => {}
        }
    }
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    let player = Player::new(settings.playback.clone(), settings.fallback.clone());

    // Assets stream in while messages are already accepted
    let mut loads = start_clip_loads(&player, &settings.assets);
    loads.push(start_avatar_load(&player, &settings.assets));

    let frames = tokio::spawn(frame_loop(
        player.clone(),
        settings.playback.frame_interval(),
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_message(line) {
            Ok(Some(gloss)) => {
                log::debug!("Received gloss '{}' (clip loaded: {})", gloss, player.has_clip(&gloss));
                player.enqueue(gloss);
            }
            Ok(None) => log::trace!("Ignoring message: {}", line),
            Err(e) => log::warn!("Dropping message: {}", e),
        }
    }

    // Input closed: let queued glosses finish
    wait_for_idle(&player).await;
    abandon_unfinished_loads(&loads);
    frames.abort();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut settings = Settings::load();
    if args.len() > 1 {
        settings.assets.base = args[1].clone();
    }
    log::info!("Loading assets from '{}'", settings.assets.base);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(settings))
}

use crate::asset::loader::{AssetBase, clip_path, load_gloss_clip, load_rigged_avatar};
use crate::player::Player;
use crate::settings::AssetSettings;
use tokio::task::JoinHandle;

/// Spawn one background load per configured gloss. Each success registers
/// its clip with the player; failures are logged and leave the gloss on the
/// fallback.
pub fn start_clip_loads(player: &Player, settings: &AssetSettings) -> Vec<JoinHandle<()>> {
    let base = AssetBase::parse(&settings.base);

    settings
        .glosses
        .iter()
        .map(|gloss| {
            let player = player.clone();
            let base = base.clone();
            let settings = settings.clone();
            let gloss = gloss.clone();

            tokio::spawn(async move {
                log::debug!(
                    "Loading clip '{}' from {}",
                    gloss,
                    base.describe(&clip_path(&settings, &gloss))
                );
                match load_gloss_clip(&base, &settings, &gloss).await {
                    Ok(clip) => player.register_clip(gloss.into(), clip),
                    Err(e) => log::error!("Failed to load clip '{}': {}", gloss, e),
                }
            })
        })
        .collect()
}

/// Load the rigged avatar in the background. The placeholder stays in place
/// when it cannot be loaded.
pub fn start_avatar_load(player: &Player, settings: &AssetSettings) -> JoinHandle<()> {
    let base = AssetBase::parse(&settings.base);
    let player = player.clone();
    let settings = settings.clone();

    tokio::spawn(async move {
        match load_rigged_avatar(&base, &settings).await {
            Ok(avatar) => player.attach_avatar(avatar),
            Err(e) => log::error!(
                "Failed to load avatar '{}', keeping placeholder: {}",
                base.describe(&settings.avatar_file),
                e
            ),
        }
    })
}

/// Abort every load that has not finished yet. Returns how many were cut.
pub fn abandon_unfinished_loads(loads: &[JoinHandle<()>]) -> usize {
    let mut abandoned = 0;
    for load in loads.iter().filter(|load| !load.is_finished()) {
        load.abort();
        abandoned += 1;
    }
    if abandoned > 0 {
        log::debug!("Abandoned {} asset loads still in flight", abandoned);
    }
    abandoned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gloss::GlossName;
    use crate::parser::test_support::wave_glb;
    use crate::settings::{FallbackSettings, PlaybackSettings};
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("echo-sign-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(dir.join("animations")).unwrap();
        dir
    }

    #[tokio::test]
    async fn loaded_clips_register_and_failures_do_not() {
        let dir = scratch_dir("clips");
        std::fs::write(dir.join("animations/hello.glb"), wave_glb()).unwrap();
        std::fs::write(dir.join("animations/clap.glb"), b"broken").unwrap();

        let settings = AssetSettings {
            base: dir.display().to_string(),
            glosses: vec!["hello".into(), "clap".into(), "think".into()],
            ..Default::default()
        };
        let player = Player::new(PlaybackSettings::default(), FallbackSettings::default());

        for handle in start_clip_loads(&player, &settings) {
            handle.await.unwrap();
        }

        assert!(player.has_clip(&GlossName::from("hello")));
        assert!(!player.has_clip(&GlossName::from("clap")));
        assert!(!player.has_clip(&GlossName::from("think")));

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn avatar_load_replaces_placeholder() {
        let dir = scratch_dir("avatar");
        std::fs::write(dir.join("avatar.glb"), wave_glb()).unwrap();

        let settings = AssetSettings {
            base: dir.display().to_string(),
            ..Default::default()
        };
        let player = Player::new(PlaybackSettings::default(), FallbackSettings::default());
        start_avatar_load(&player, &settings).await.unwrap();

        assert_eq!(player.avatar_name(), "avatar");
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn missing_avatar_keeps_placeholder() {
        let dir = scratch_dir("no-avatar");
        let settings = AssetSettings {
            base: dir.display().to_string(),
            ..Default::default()
        };
        let player = Player::new(PlaybackSettings::default(), FallbackSettings::default());
        start_avatar_load(&player, &settings).await.unwrap();

        assert_eq!(player.avatar_name(), crate::model::PLACEHOLDER_NAME);
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn unfinished_loads_are_aborted() {
        let done = tokio::spawn(async {});
        let stuck = tokio::spawn(std::future::pending::<()>());
        while !done.is_finished() {
            tokio::task::yield_now().await;
        }

        let loads = vec![done, stuck];
        assert_eq!(abandon_unfinished_loads(&loads), 1);

        let mut loads = loads.into_iter();
        assert!(loads.next().unwrap().await.is_ok());
        assert!(loads.next().unwrap().await.unwrap_err().is_cancelled());
    }
}

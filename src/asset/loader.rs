use crate::animation::Clip;
use crate::error::SignError;
use crate::model::Avatar;
use crate::parser::{load_avatar, load_clip};
use crate::settings::AssetSettings;
use std::path::{Path, PathBuf};

/// Where packaged assets live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetBase {
    Local(PathBuf),
    Remote(String),
}

impl AssetBase {
    pub fn parse(base: &str) -> Self {
        if base.starts_with("http://") || base.starts_with("https://") {
            AssetBase::Remote(base.trim_end_matches('/').to_string())
        } else {
            AssetBase::Local(PathBuf::from(base))
        }
    }

    /// Human readable location of `relative`, for logs.
    pub fn describe(&self, relative: &str) -> String {
        match self {
            AssetBase::Local(dir) => dir.join(relative).display().to_string(),
            AssetBase::Remote(url) => format!("{}/{}", url, relative.trim_start_matches('/')),
        }
    }
}

/// Load an asset from local file
pub async fn load_from_file(path: &Path) -> Result<Vec<u8>, SignError> {
    let data = tokio::fs::read(path).await?;
    Ok(data)
}

/// Download an asset over HTTP
pub async fn download(url: &str) -> Result<Vec<u8>, SignError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| SignError::from(e).context("download").with_arg("url", url))?;

    if !response.status().is_success() {
        return Err(SignError::new("http-status")
            .with_arg("status", response.status())
            .with_arg("url", url));
    }

    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}

pub async fn fetch(base: &AssetBase, relative: &str) -> Result<Vec<u8>, SignError> {
    match base {
        AssetBase::Local(dir) => load_from_file(&dir.join(relative))
            .await
            .map_err(|e| e.context("read").with_arg("path", base.describe(relative))),
        AssetBase::Remote(_) => download(&base.describe(relative)).await,
    }
}

pub fn clip_path(settings: &AssetSettings, gloss: &str) -> String {
    format!("{}/{}.glb", settings.animations_dir.trim_end_matches('/'), gloss)
}

/// Fetch and decode the animation clip for one gloss.
pub async fn load_gloss_clip(
    base: &AssetBase,
    settings: &AssetSettings,
    gloss: &str,
) -> Result<Clip, SignError> {
    let bytes = fetch(base, &clip_path(settings, gloss)).await?;
    load_clip(gloss, &bytes)
}

/// Fetch and decode the rigged avatar.
pub async fn load_rigged_avatar(
    base: &AssetBase,
    settings: &AssetSettings,
) -> Result<Avatar, SignError> {
    let bytes = fetch(base, &settings.avatar_file).await?;
    let name = Path::new(&settings.avatar_file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("avatar");
    load_avatar(name, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_distinguishes_urls_from_directories() {
        assert_eq!(
            AssetBase::parse("https://cdn.example.com/signs/"),
            AssetBase::Remote("https://cdn.example.com/signs".to_string())
        );
        assert_eq!(
            AssetBase::parse("assets"),
            AssetBase::Local(PathBuf::from("assets"))
        );
    }

    #[test]
    fn remote_paths_are_joined_with_a_single_slash() {
        let base = AssetBase::parse("http://localhost:8080/");
        assert_eq!(
            base.describe("animations/yes.glb"),
            "http://localhost:8080/animations/yes.glb"
        );
    }

    #[test]
    fn clip_path_uses_the_animation_directory() {
        let settings = AssetSettings {
            animations_dir: "clips/".to_string(),
            ..Default::default()
        };
        assert_eq!(clip_path(&settings, "think"), "clips/think.glb");
    }

    #[tokio::test]
    async fn missing_local_file_reports_the_path() {
        let base = AssetBase::parse("/nonexistent-echo-sign-assets");
        let err = load_gloss_clip(&base, &AssetSettings::default(), "hello")
            .await
            .unwrap_err();
        assert_eq!(err.key, "read");
        assert!(err.args["path"].ends_with("hello.glb"));
    }
}

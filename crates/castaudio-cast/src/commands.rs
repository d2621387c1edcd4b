use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use castaudio_core::config::{load_config, CastConfig};
use castaudio_core::{discover, host_bytes, host_file, MediaHost};
use tracing::info;

use crate::cache::AudioCache;
use crate::{device, tts};

/// `castaudio say <text> [--lang X] [--no-cache]`
///
/// Resolve the audio (cache, then TTS), host it, and play it on the first
/// discovered device.
pub async fn say(text: &str, lang: Option<&str>, no_cache: bool) -> anyhow::Result<()> {
    let config = load_config()?;
    let lang = lang.unwrap_or(&config.language);

    let cache = AudioCache::open_default();
    let use_cache = config.cache_enabled && !no_cache;

    let audio = match use_cache.then(|| cache.lookup(text, lang)).flatten() {
        Some(audio) => audio,
        None => {
            let audio = tts::synthesize(text, lang)
                .await
                .context("Speech synthesis failed")?;
            if use_cache {
                cache.store(text, lang, &audio);
            }
            audio
        }
    };

    let host = host_bytes(audio).await.context("Failed to host audio")?;
    launch(&host, &config).await
}

/// `castaudio file <path>`
pub async fn cast_file(path: &Path) -> anyhow::Result<()> {
    let config = load_config()?;
    let host = host_file(path)
        .await
        .with_context(|| format!("Failed to host {}", path.display()))?;
    launch(&host, &config).await
}

/// `castaudio discover [--timeout-secs N]`
pub async fn discover_device(timeout_secs: u64) -> anyhow::Result<()> {
    let config = load_config()?;
    let location = discover(&config.service_type, Duration::from_secs(timeout_secs)).await?;
    println!("{} at {}", config.service_type, location);
    Ok(())
}

/// Hosting must have finished (listener bound, URL known) before the load
/// command goes out; discovery happens in between.
async fn launch(host: &MediaHost, config: &CastConfig) -> anyhow::Result<()> {
    let location = discover(
        &config.service_type,
        Duration::from_secs(config.discovery_timeout_secs),
    )
    .await
    .with_context(|| format!("No {} device found", config.service_type))?;

    info!(%location, url = host.url(), "casting");
    device::play(location, host.url().to_string(), host.mime_type().to_string()).await
}

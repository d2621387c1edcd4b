use anyhow::Context;
use castaudio_core::ServiceLocation;
use rust_cast::channels::media::{Media, StreamType};
use rust_cast::channels::receiver::CastDeviceApp;
use rust_cast::CastDevice;
use tracing::info;

const RECEIVER_ID: &str = "receiver-0";

/// Instruct the device at `location` to launch the default media receiver and
/// load `url` with the given MIME type. The underlying client is blocking, so
/// it runs on the blocking pool.
pub async fn play(location: ServiceLocation, url: String, mime_type: String) -> anyhow::Result<()> {
    tokio::task::spawn_blocking(move || load_media(location, &url, &mime_type)).await?
}

fn load_media(location: ServiceLocation, url: &str, mime_type: &str) -> anyhow::Result<()> {
    let device = CastDevice::connect_without_host_verification(
        location.addr.to_string(),
        location.port,
    )
    .context("Failed to connect to cast device")?;

    device
        .connection
        .connect(RECEIVER_ID)
        .context("Failed to connect to receiver")?;

    let app = device
        .receiver
        .launch_app(&CastDeviceApp::DefaultMediaReceiver)
        .context("Failed to launch media receiver")?;

    device
        .connection
        .connect(app.transport_id.as_str())
        .context("Failed to connect to media app")?;

    let media = Media {
        content_id: url.to_string(),
        content_type: mime_type.to_string(),
        stream_type: StreamType::Buffered,
        duration: None,
        metadata: None,
    };

    device
        .media
        .load(app.transport_id.as_str(), app.session_id.as_str(), &media)
        .context("Failed to load media")?;

    info!(%location, url, mime_type, "media loaded on device");
    Ok(())
}

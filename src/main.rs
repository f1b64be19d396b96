//! Demo: drives the presenter with a simulated download against an in-memory surface.
//!
//! Usage: `m3u8-notifier-demo [label] [--fail]`
//!
//! `--fail` ends the simulated download with `NoSpace` instead of `Success`.

use std::sync::Arc;
use std::time::Duration;

use m3u8_notifier::config::NotifierConfig;
use m3u8_notifier::logging::init_tracing;
use m3u8_notifier::notification::{
    HostContext, NotificationPresenter, RecordingSurface, SharedPresenter, StaticEntryPoint,
    TaskState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let working_dir = std::env::current_dir()?;
    let config = NotifierConfig::load(&working_dir);
    init_tracing(config.debug_mode);

    let mut label = String::new();
    let mut fail = false;
    for arg in std::env::args().skip(1) {
        if arg == "--fail" {
            fail = true;
        } else {
            label = arg;
        }
    }

    let surface = RecordingSurface::shared();
    let resolver = StaticEntryPoint::new(
        "m3u8_downloader::MainActivity",
        config.select_action.clone(),
        config.slot_id,
    );
    let presenter = NotificationPresenter::shared(&config, surface.clone(), Arc::new(resolver));

    presenter.setup(&HostContext::new("M3U8 Downloader")).await;

    let worker = tokio::spawn(simulate_download(presenter.clone(), label, fail));
    worker.await?;

    let snapshot = presenter.snapshot().await;
    tracing::info!(
        "Surface received {} updates, final watermark {}",
        surface.push_count().await,
        snapshot.watermark
    );
    for directive in surface.pushed().await {
        println!("{}", serde_json::to_string(&directive)?);
    }

    presenter.cancel().await;
    tracing::info!("Notification withdrawn: {}", !presenter.is_registered().await);

    Ok(())
}

/// Stand-in for the download engine: one progress event per percent.
async fn simulate_download(presenter: SharedPresenter, label: String, fail: bool) {
    presenter.apply(&label, TaskState::Prepare, 0).await;
    presenter.apply(&label, TaskState::Pending, 0).await;

    for progress in 0..=100 {
        if fail && progress == 63 {
            presenter.apply(&label, TaskState::NoSpace, progress).await;
            return;
        }
        presenter.apply(&label, TaskState::Downloading, progress).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    presenter.apply(&label, TaskState::Success, 100).await;
}

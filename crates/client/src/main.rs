//! Fieldwalk session client binary.
//!
//! Composition root that assembles:
//! 1. Content (task table, collision mask, config) via ContentFactory
//! 2. Runtime (session worker, recorder, relay) via RuntimeBuilder
//! 3. A scripted command provider replaying a session file
//!
//! # Examples
//!
//! ```bash
//! FIELDWALK_DATA_DIR=data FIELDWALK_PLAYER_ID=p01 cargo run -p fieldwalk-client
//!
//! # With a live collector endpoint
//! FIELDWALK_COLLECTOR_URL=https://script.google.com/macros/s/.../exec \
//!     cargo run -p fieldwalk-client
//! ```

mod config;
mod script;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use game_content::ContentFactory;
use runtime::{
    CollectorSink, FileSessionLog, HttpCollectorSink, NullSink, Runtime, RuntimeConfig,
};

use crate::config::ClientConfig;
use crate::script::SessionScript;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let client_config = ClientConfig::from_env();
    info!(
        data_dir = %client_config.data_dir.display(),
        player = %client_config.player_id,
        "starting session"
    );

    // 1. Load content
    let bundle = ContentFactory::new(&client_config.data_dir)
        .load_all()
        .context("failed to load session content")?;

    // 2. Assemble the runtime
    let sink: Arc<dyn CollectorSink> = match &client_config.collector_url {
        Some(url) => Arc::new(HttpCollectorSink::new(url.clone())),
        None => {
            info!("no collector configured; telemetry stays local");
            Arc::new(NullSink)
        }
    };

    let log_name = format!(
        "session-{}.jsonl",
        chrono::Utc::now().format("%Y%m%d-%H%M%S")
    );
    let session_log = FileSessionLog::create(&client_config.log_dir, &log_name)
        .context("failed to create session log")?;
    info!("session log: {}", session_log.path().display());

    let script = SessionScript::load(&client_config.script_path)?;
    info!(
        commands = script.commands.len(),
        "replaying session script {}",
        client_config.script_path.display()
    );

    let mut runtime_config = RuntimeConfig::default();
    runtime_config.player_id = client_config.player_id.clone();

    let mut runtime = Runtime::builder()
        .config(runtime_config)
        .content(bundle)
        .sink(sink)
        .repository(Box::new(session_log))
        .provider(script.into_provider())
        .build()
        .context("failed to build runtime")?;

    // 3. Drive the session to completion
    let summary = runtime.run().await?;
    info!(
        session = %summary.session_uuid,
        elapsed = %summary.elapsed,
        interactions = summary.interactions,
        discovered = summary.discovered_rooms,
        trace_points = summary.trace_points,
        "session complete"
    );

    runtime.shutdown().await?;

    Ok(())
}

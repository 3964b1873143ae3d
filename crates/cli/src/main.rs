mod args;
mod render;

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use novalib::{BookArchive, IntentOutcome, InventorySession, InventoryStore};
use novalib_kernel::settings::{Settings, StorageBackend};
use novalib_storage::{FileStore, KeyValueStore, MemoryStore};

use args::{Args, Command};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load().with_context(|| "failed to load NovaLib settings")?;
    if let Some(dir) = &args.data_dir {
        settings.storage.data_dir = dir.clone();
    }

    novalib_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        backend = ?settings.storage.backend,
        data_dir = %settings.storage.data_dir.display(),
        "novalib starting"
    );

    let backend: Box<dyn KeyValueStore> = match settings.storage.backend {
        StorageBackend::File => Box::new(FileStore::new(&settings.storage.data_dir)),
        StorageBackend::Memory => Box::new(MemoryStore::new()),
    };
    let archive = BookArchive::with_key(backend, settings.storage.key.clone());
    let mut session = InventorySession::new(InventoryStore::initialize(archive));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let intents = args.command.intents(|raw| session.resolve_id(raw));
    for intent in intents {
        let outcome = session.dispatch(intent);
        render::outcome(&mut out, &outcome)?;
        if !matches!(outcome, IntentOutcome::SearchUpdated | IntentOutcome::Rejected)
            && session.store().has_unsaved_changes()
        {
            writeln!(out, "Warning: change kept for this run only; saving to storage failed")?;
        }
    }

    match &args.command {
        Command::List { json: true, .. } => {
            serde_json::to_writer_pretty(&mut out, &session.view())
                .with_context(|| "failed to encode view")?;
            writeln!(out)?;
        }
        Command::List { .. } => render::view(&mut out, &session.view())?,
        Command::Stats => render::stats(&mut out, &session.view().stats)?,
        Command::Add { .. } | Command::Toggle { .. } | Command::Remove { .. } => {}
    }

    Ok(())
}

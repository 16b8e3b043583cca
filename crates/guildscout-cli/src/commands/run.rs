use guildscout_core::storage;
use guildscout_core::{
    BlacklistStore, CommandLevelSource, CommandMailer, Config, Pipeline, SnapshotStore,
    SystemClock,
};

pub fn run(dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    let snapshot = SnapshotStore::new(storage::snapshot_path()?);
    let blacklist = BlacklistStore::new(storage::blacklist_path()?);
    let source =
        CommandLevelSource::new(config.fetcher.program.clone(), config.fetcher.args.clone());
    let sender = CommandMailer::new(config.mailer.program.clone(), config.mailer.args.clone());

    let pipeline = Pipeline::new(config, snapshot, blacklist, source, sender, SystemClock);
    let report = pipeline.run(dry_run)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

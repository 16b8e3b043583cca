use std::collections::BTreeMap;

use clap::Subcommand;
use guildscout_core::storage;
use guildscout_core::SnapshotStore;

#[derive(Subcommand)]
pub enum SnapshotAction {
    /// Print the stored snapshot as a sorted name -> level map
    Show,
    /// Print the snapshot file path
    Path,
}

pub fn run(action: SnapshotAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SnapshotStore::new(storage::snapshot_path()?);
    match action {
        SnapshotAction::Show => match store.load_previous()? {
            Some(levels) => {
                let sorted: BTreeMap<String, u32> = levels.into_iter().collect();
                println!("{}", serde_json::to_string_pretty(&sorted)?);
            }
            None => println!("no snapshot recorded yet"),
        },
        SnapshotAction::Path => {
            println!("{}", store.path().display());
        }
    }
    Ok(())
}

use std::collections::BTreeSet;

use clap::Subcommand;
use guildscout_core::storage;
use guildscout_core::BlacklistStore;

#[derive(Subcommand)]
pub enum BlacklistAction {
    /// Show blacklisted names
    List,
    /// Add a name to the blacklist
    Add {
        /// Player name
        name: String,
    },
    /// Remove a name from the blacklist
    Remove {
        /// Player name
        name: String,
    },
    /// Remove every name
    Clear,
}

pub fn run(action: BlacklistAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = BlacklistStore::new(storage::blacklist_path()?);
    match action {
        BlacklistAction::List => {
            let blacklist = store.load()?;
            println!("{}", serde_json::to_string_pretty(&blacklist)?);
        }
        BlacklistAction::Add { name } => {
            let mut blacklist = store.load()?;
            if blacklist.insert(name.clone()) {
                store.save(&blacklist)?;
                println!("added '{name}'");
            } else {
                println!("'{name}' is already blacklisted");
            }
        }
        BlacklistAction::Remove { name } => {
            let mut blacklist = store.load()?;
            if blacklist.remove(&name) {
                store.save(&blacklist)?;
                println!("removed '{name}'");
            } else {
                println!("'{name}' is not blacklisted");
            }
        }
        BlacklistAction::Clear => {
            store.save(&BTreeSet::new())?;
            println!("blacklist cleared");
        }
    }
    Ok(())
}

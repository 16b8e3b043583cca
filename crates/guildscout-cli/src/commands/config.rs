use clap::Subcommand;
use guildscout_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Write the current effective configuration to disk
    Init,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
        ConfigAction::Init => {
            let config = Config::load_or_default();
            config.save()?;
            println!("wrote {}", Config::path()?.display());
        }
    }
    Ok(())
}

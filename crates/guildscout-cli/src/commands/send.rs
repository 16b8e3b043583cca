use guildscout_core::{build_invitation, CommandMailer, Config, MessageSender};

/// Send one invitation right now, bypassing the raffle and the window.
pub fn run(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mailer = CommandMailer::new(config.mailer.program.clone(), config.mailer.args.clone());

    let body = build_invitation(name, &config.message);
    mailer.send(name, &body)?;

    println!("invitation sent to '{name}'");
    Ok(())
}

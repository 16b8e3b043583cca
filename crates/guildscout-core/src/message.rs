//! Invitation message text.

use crate::storage::MessageConfig;

/// Build the in-game invitation body for one recipient.
pub fn build_invitation(name: &str, config: &MessageConfig) -> String {
    let guild = &config.guild_name;
    format!(
        "Guild invitation\n\
         Greetings {name}.\n\n\
         I am contacting you because your level and activity speak for themselves.\n\
         Our guild {guild} is recruiting only strong, dedicated players who want real progress.\n\n\
         We are ambitious, disciplined and active every day.\n\
         We win attacks, we win defenses, and we rise steadily through the rankings.\n\
         Members who join us grow fast, because everyone contributes and everyone plays.\n\n\
         If you want a guild that does not waste time, that expects effort and rewards commitment, then you will fit in perfectly with us.\n\n\
         Should you choose to join, you must send a message to any of the officers in {guild}, and they will add you to the guild.\n\
         If not, I respect your decision.\n\n\
         The invitation is open.\n\n"
    )
}

use clap::Subcommand;
use studyroom_core::Notes;

use super::open_env;

#[derive(Subcommand)]
pub enum NotesAction {
    /// Print the session notes
    Show,
    /// Replace the session notes
    Set { text: String },
    /// Clear the session notes
    Clear,
}

pub fn run(action: NotesAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, _clock) = open_env()?;
    let notes = Notes::new(store);

    match action {
        NotesAction::Show => println!("{}", notes.load()),
        NotesAction::Set { text } => {
            notes.save(&text);
            println!("ok");
        }
        NotesAction::Clear => {
            notes.clear();
            println!("ok");
        }
    }
    Ok(())
}

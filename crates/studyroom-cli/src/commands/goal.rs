use clap::Subcommand;
use serde_json::json;
use studyroom_core::GoalList;

use super::open_env;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a goal
    Add {
        text: String,
        /// Goal category label
        #[arg(long, default_value = "Study")]
        category: String,
    },
    /// List all goals with their indices
    List,
    /// Mark a goal done
    Done { index: usize },
    /// Mark a goal not done
    Undone { index: usize },
    /// Replace a goal's text
    Edit { index: usize, text: String },
    /// Remove a goal
    Remove { index: usize },
    /// Remove every completed goal
    ClearDone,
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let (store, _clock) = open_env()?;
    let goals = GoalList::new(store);

    match action {
        GoalAction::Add { text, category } => {
            goals.add(&text, &category);
            println!("ok");
        }
        GoalAction::List => {
            let (done, total) = goals.summary();
            let output = json!({
                "done": done,
                "total": total,
                "goals": goals.all(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        GoalAction::Done { index } => mark(&goals, index, true)?,
        GoalAction::Undone { index } => mark(&goals, index, false)?,
        GoalAction::Edit { index, text } => {
            if !goals.edit(index, &text) {
                return Err(format!("no goal at index {index}").into());
            }
            println!("ok");
        }
        GoalAction::Remove { index } => {
            match goals.remove(index) {
                Some(goal) => println!("removed: {}", goal.text),
                None => return Err(format!("no goal at index {index}").into()),
            }
        }
        GoalAction::ClearDone => {
            let removed = goals.clear_done();
            println!("cleared {removed} completed goal(s)");
        }
    }
    Ok(())
}

fn mark(goals: &GoalList, index: usize, done: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !goals.set_done(index, done) {
        return Err(format!("no goal at index {index}").into());
    }
    println!("ok");
    Ok(())
}

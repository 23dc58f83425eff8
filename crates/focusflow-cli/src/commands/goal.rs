//! Daily focus goal commands.

use clap::Subcommand;
use focusflow_core::{Settings, Store, TaskCollection};

use super::format_hms;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Show the daily goal and progress toward it
    Show,
    /// Set the daily goal in minutes
    Set {
        /// Goal in minutes
        minutes: u32,
    },
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = Settings::load_or_default();

    match action {
        GoalAction::Show => {
            let store = Store::open()?;
            let collection = TaskCollection::from_tasks(store.load_tasks()?);
            let total = collection.total_elapsed_seconds();
            let progress = settings.goal_progress_percent(total);
            println!(
                "{} of {} ({progress:.0}%)",
                format_hms(total),
                format_hms(u64::from(settings.daily_goal_minutes) * 60),
            );
        }
        GoalAction::Set { minutes } => {
            if minutes == 0 {
                return Err("daily goal must be greater than zero minutes".into());
            }
            settings.daily_goal_minutes = minutes;
            settings.save()?;
            println!("Daily goal set to {minutes} minutes");
        }
    }
    Ok(())
}

//! Focus statistics commands.

use clap::Subcommand;
use focusflow_core::{Store, TaskCollection};

use super::format_hms;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Show totals across all tasks
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let collection = TaskCollection::from_tasks(store.load_tasks()?);

    match action {
        StatsAction::Show { json } => {
            if json {
                let stats = serde_json::json!({
                    "total_elapsed_seconds": collection.total_elapsed_seconds(),
                    "completed_tasks": collection.completed_count(),
                    "active_tasks": collection.active_count(),
                });
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!(
                    "Total focus time: {}",
                    format_hms(collection.total_elapsed_seconds())
                );
                println!("Completed tasks:  {}", collection.completed_count());
                println!("Active tasks:     {}", collection.active_count());
            }
        }
    }
    Ok(())
}

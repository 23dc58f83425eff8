//! Global Pomodoro default commands.

use clap::Subcommand;
use focusflow_core::Settings;

#[derive(Subcommand)]
pub enum PomodoroAction {
    /// Show the global Pomodoro defaults
    Show,
    /// Make new tasks default to Pomodoro mode
    Enable,
    /// Make new tasks default to simple timer mode
    Disable,
    /// Set the default focus/break phase lengths
    Set {
        /// Focus phase minutes
        #[arg(long)]
        focus: Option<u32>,
        /// Break phase minutes
        #[arg(long = "break")]
        break_minutes: Option<u32>,
    },
}

pub fn run(action: PomodoroAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = Settings::load_or_default();

    match action {
        PomodoroAction::Show => {
            println!("{}", serde_json::to_string_pretty(&settings.pomodoro)?);
        }
        PomodoroAction::Enable => {
            settings.pomodoro.enabled = true;
            settings.save()?;
            println!("Pomodoro enabled: new tasks will use Pomodoro mode by default");
        }
        PomodoroAction::Disable => {
            settings.pomodoro.enabled = false;
            settings.save()?;
            println!("Pomodoro disabled: new tasks will use regular timer mode");
        }
        PomodoroAction::Set {
            focus,
            break_minutes,
        } => {
            if let Some(focus) = focus {
                if focus == 0 {
                    return Err("focus minutes must be greater than zero".into());
                }
                settings.pomodoro.focus_minutes = focus;
            }
            if let Some(break_minutes) = break_minutes {
                if break_minutes == 0 {
                    return Err("break minutes must be greater than zero".into());
                }
                settings.pomodoro.break_minutes = break_minutes;
            }
            settings.save()?;
            println!(
                "{}min focus / {}min break",
                settings.pomodoro.focus_minutes, settings.pomodoro.break_minutes
            );
        }
    }
    Ok(())
}

use std::io::{self, Write};

use anyhow::Result;

use crate::app::App;

pub fn run(app: &mut App, yes: bool) -> Result<()> {
    if !yes {
        print!("This clears all learning progress and cannot be undone. Continue? [y/N] ");
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    app.session.tracker_mut().reset_progress();
    println!("Learning progress cleared.");
    Ok(())
}

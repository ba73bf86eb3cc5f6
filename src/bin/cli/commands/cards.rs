use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, favorites_only: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let tracker = app.session.tracker();
    let favorites = app.session.favorites();

    let rows: Vec<_> = app
        .session
        .cards()
        .iter()
        .enumerate()
        .filter(|(_, card)| !favorites_only || favorites.contains(card))
        .map(|(i, card)| {
            let views = tracker.progress(card).map(|p| p.view_count).unwrap_or(0);
            (i + 1, card, tracker.classify_difficulty(card), views, favorites.contains(card))
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = rows
                .iter()
                .map(|(number, card, difficulty, views, favorite)| {
                    serde_json::json!({
                        "card": number,
                        "source": card.source,
                        "translation": card.translation,
                        "difficulty": difficulty,
                        "views": views,
                        "favorite": favorite,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if rows.is_empty() {
                println!("No cards found.");
                return Ok(());
            }

            for (number, card, difficulty, views, favorite) in &rows {
                let star = if *favorite { "\u{2605}" } else { " " };
                println!(
                    "{:>4} {} {} \u{2192} {}  [{}, {} view{}]",
                    number,
                    star,
                    card.translation,
                    card.source,
                    terminal::difficulty_label(*difficulty, use_color),
                    views,
                    if *views == 1 { "" } else { "s" }
                );
            }
        }
    }

    Ok(())
}

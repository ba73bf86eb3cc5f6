use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, current: usize, format: &OutputFormat, use_color: bool) -> Result<()> {
    let (current_index, _) = app.card_at(current)?;
    let tracker = app.session.tracker();
    let cards = app.session.cards();

    let next_index = tracker.select_next(cards, current_index);
    let card = &cards[next_index];
    let difficulty = tracker.classify_difficulty(card);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "card": next_index + 1,
                "source": card.source,
                "translation": card.translation,
                "difficulty": difficulty,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "{} {} \u{2192} {} [{}]",
                terminal::paint(&format!("#{}", next_index + 1), Color::BOLD, use_color),
                card.translation,
                card.source,
                terminal::difficulty_label(difficulty, use_color)
            );
        }
    }

    Ok(())
}

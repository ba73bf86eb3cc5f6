use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stats = app.session.tracker().summary();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::paint("Your Learning Stats", Color::BOLD, use_color));
            println!();
            println!("  Cards studied:      {}/{}", stats.viewed_cards, stats.total_cards);
            println!("  Avg. time per card: {}", terminal::format_seconds(stats.average_time_seconds));
            println!("  Day streak:         {}", stats.study_streak);
            println!();

            println!("{}", terminal::paint("Most Challenging Cards", Color::BOLD, use_color));
            if stats.most_difficult_cards.is_empty() {
                println!("  Start studying to see your challenging cards!");
            } else {
                for card in &stats.most_difficult_cards {
                    println!(
                        "  {} \u{2192} {}  {}",
                        card.translation,
                        card.source,
                        terminal::paint(&terminal::format_seconds(card.avg_time_seconds), Color::YELLOW, use_color)
                    );
                }
            }
            println!();

            let last_studied = stats.last_studied.with_timezone(&chrono::Local);
            println!(
                "{}",
                terminal::paint(
                    &format!("Last studied: {}", last_studied.format("%b %-d, %Y %H:%M")),
                    Color::DIM,
                    use_color
                )
            );
        }
    }

    Ok(())
}

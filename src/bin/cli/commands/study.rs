use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{self, Color};

enum Action {
    Next,
    Favorite,
    Quit,
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

fn prompt_action(input: &mut impl BufRead, use_color: bool) -> Result<Action> {
    loop {
        print!(
            "{} ",
            terminal::paint("[Enter] next  [f] favorite  [q] quit >", Color::GRAY, use_color)
        );
        io::stdout().flush()?;

        match read_line(input)?.as_deref() {
            None | Some("q") => return Ok(Action::Quit),
            Some("") | Some("n") => return Ok(Action::Next),
            Some("f") => return Ok(Action::Favorite),
            Some(_) => continue,
        }
    }
}

pub fn run(app: &mut App, rounds: Option<u64>, use_color: bool) -> Result<()> {
    let session = &mut app.session;
    if session.start().is_none() {
        println!("No cards to study.");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut studied = 0u64;

    'cards: while let Some(card) = session.current_card().cloned() {
        println!();
        println!("{}", terminal::render_face("Romanian", &card.translation, use_color));
        print!("{} ", terminal::paint("[Enter] reveal >", Color::GRAY, use_color));
        io::stdout().flush()?;

        let shown_at = Instant::now();
        if read_line(&mut input)?.is_none() {
            break;
        }
        let elapsed = shown_at.elapsed();

        let difficulty = session.reveal(elapsed);
        studied += 1;

        println!("{}", terminal::render_face("Latin", &card.source, use_color));
        if let Some(difficulty) = difficulty {
            println!(
                "  {} after {}",
                terminal::difficulty_label(difficulty, use_color),
                terminal::format_seconds(elapsed.as_secs_f64())
            );
        }

        if rounds.map_or(false, |max| studied >= max) {
            break;
        }

        loop {
            match prompt_action(&mut input, use_color)? {
                Action::Quit => break 'cards,
                Action::Next => break,
                Action::Favorite => {
                    if let Some(is_favorite) = session.toggle_favorite() {
                        let msg = if is_favorite { "Added to favorites" } else { "Removed from favorites" };
                        println!("  {}", terminal::paint(msg, Color::CYAN, use_color));
                    }
                }
            }
        }

        session.advance();
    }

    let stats = session.tracker().summary();
    println!();
    println!(
        "Studied {} card{} this session. {}/{} cards seen, {} average.",
        studied,
        if studied == 1 { "" } else { "s" },
        stats.viewed_cards,
        stats.total_cards,
        terminal::format_seconds(stats.average_time_seconds)
    );

    Ok(())
}

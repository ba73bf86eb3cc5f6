use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat) -> Result<()> {
    let favorites = app.session.favorites().list();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(favorites)?);
        }
        OutputFormat::Plain => {
            if favorites.is_empty() {
                println!("No favorites yet.");
                return Ok(());
            }
            for card in favorites {
                println!("\u{2605} {} \u{2192} {}", card.translation, card.source);
            }
        }
    }

    Ok(())
}

pub fn run_add(app: &mut App, number: usize) -> Result<()> {
    let card = app.card_at(number)?.1.clone();
    if app.session.favorites_mut().add(&card) {
        println!("Added to favorites: {}", card.source);
    } else {
        println!("Already a favorite: {}", card.source);
    }
    Ok(())
}

pub fn run_remove(app: &mut App, number: usize) -> Result<()> {
    let card = app.card_at(number)?.1.clone();
    if app.session.favorites_mut().remove(&card) {
        println!("Removed from favorites: {}", card.source);
    } else {
        println!("Not a favorite: {}", card.source);
    }
    Ok(())
}

use latinsay_lib::flashcards::Difficulty;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub fn difficulty_label(difficulty: Difficulty, use_color: bool) -> String {
    let color = match difficulty {
        Difficulty::New => Color::BLUE,
        Difficulty::Easy => Color::GREEN,
        Difficulty::Medium => Color::YELLOW,
        Difficulty::Hard => Color::RED,
    };
    paint(difficulty.as_str(), color, use_color)
}

/// Seconds rounded to one decimal, e.g. `4.5s`
pub fn format_seconds(seconds: f64) -> String {
    format!("{}s", (seconds * 10.0).round() / 10.0)
}

/// A framed card face
pub fn render_face(heading: &str, text: &str, use_color: bool) -> String {
    let width = text.chars().count().max(heading.chars().count()).clamp(20, 76);
    let rule = "\u{2500}".repeat(width + 2);

    let mut lines = Vec::new();
    lines.push(format!("\u{250c}{}\u{2510}", rule));
    lines.push(format!(
        "\u{2502} {} \u{2502}",
        paint(&pad(heading, width), Color::DIM, use_color)
    ));
    for line in wrap(text, width) {
        lines.push(format!(
            "\u{2502} {} \u{2502}",
            paint(&pad(&line, width), Color::BOLD, use_color)
        ));
    }
    lines.push(format!("\u{2514}{}\u{2518}", rule));
    lines.join("\n")
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace().flat_map(|w| split_long_word(w, width)) {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

/// Chunks of at most `width` chars
fn split_long_word(word: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

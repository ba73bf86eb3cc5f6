use std::fs;
use std::path::Path;

use crate::flashcards::Card;

use super::{FeedError, Result};

pub const DEFAULT_DELIMITER: u8 = b',';

/// Parse saying rows.
///
/// The first line is a header. Each following line is one row, parsed on
/// its own so a malformed line only drops itself. Fields may be quoted to
/// contain the delimiter, with or without padding after the delimiter.
/// Empty fields are ignored and rows left with fewer than two fields are
/// dropped. The first field is the source text, the second the translation.
pub fn parse_sayings(content: &str, delimiter: u8) -> Vec<Card> {
    let mut cards = Vec::new();

    for (line_idx, line) in content.lines().enumerate().skip(1) {
        let fields = match parse_line(line, delimiter) {
            Ok(fields) => fields,
            Err(e) => {
                log::debug!("Skipping unreadable line {}: {}", line_idx + 1, e);
                continue;
            }
        };

        let mut fields = fields.into_iter().filter(|f| !f.is_empty());
        match (fields.next(), fields.next()) {
            (Some(source), Some(translation)) => cards.push(Card::new(source, translation)),
            _ => log::debug!("Skipping line {} with fewer than two fields", line_idx + 1),
        }
    }

    cards
}

/// Read and parse a saying file. A file without usable rows is an error.
pub fn load_sayings(path: &Path, delimiter: u8) -> Result<Vec<Card>> {
    let content = fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let cards = parse_sayings(&content, delimiter);
    if cards.is_empty() {
        return Err(FeedError::Empty(path.to_path_buf()));
    }

    log::info!("Loaded {} sayings from {:?}", cards.len(), path);
    Ok(cards)
}

fn parse_line(line: &str, delimiter: u8) -> csv::Result<Vec<String>> {
    let line = strip_field_padding(line, delimiter);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

/// Drop whitespace at the start of each unquoted field so `a, "b, c"` reads
/// the second field as quoted
fn strip_field_padding(line: &str, delimiter: u8) -> String {
    let delimiter = delimiter as char;
    let mut out = String::with_capacity(line.len());
    let mut in_quotes = false;
    let mut field_start = true;

    for ch in line.chars() {
        if field_start && !in_quotes && ch.is_whitespace() {
            continue;
        }
        field_start = false;
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            field_start = true;
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_skips_header() {
        let content = "latin,romana\nad astra,spre stele\ncarpe diem,prinde ziua\n";
        let cards = parse_sayings(content, DEFAULT_DELIMITER);

        assert_eq!(
            cards,
            vec![
                Card::new("ad astra", "spre stele"),
                Card::new("carpe diem", "prinde ziua"),
            ]
        );
    }

    #[test]
    fn test_parse_quoted_fields() {
        let content = "latin,romana\n\"veni, vidi, vici\",\"am venit, am văzut, am învins\"\n";
        let cards = parse_sayings(content, DEFAULT_DELIMITER);

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].source, "veni, vidi, vici");
        assert_eq!(cards[0].translation, "am venit, am văzut, am învins");
    }

    #[test]
    fn test_parse_spaced_quotes() {
        let content = "latin,romana\n\"ad astra\", \"spre stele\"\n";
        let cards = parse_sayings(content, DEFAULT_DELIMITER);

        assert_eq!(cards, vec![Card::new("ad astra", "spre stele")]);
    }

    #[test]
    fn test_parse_spaced_quotes_with_delimiter() {
        let content = "latin,romana\n\"veni, vidi, vici\", \"am venit, am văzut, am învins\"\n";
        let cards = parse_sayings(content, DEFAULT_DELIMITER);

        assert_eq!(
            cards,
            vec![Card::new("veni, vidi, vici", "am venit, am văzut, am învins")]
        );
    }

    #[test]
    fn test_unbalanced_quote_only_drops_its_line() {
        let content = "latin,romana\n\"ad astra,spre stele\ncarpe diem,prinde ziua\nmemento mori,adu-ți aminte\ntempus fugit,timpul zboară\n";
        let cards = parse_sayings(content, DEFAULT_DELIMITER);

        assert_eq!(
            cards,
            vec![
                Card::new("carpe diem", "prinde ziua"),
                Card::new("memento mori", "adu-ți aminte"),
                Card::new("tempus fugit", "timpul zboară"),
            ]
        );
    }

    #[test]
    fn test_parse_crlf_lines() {
        let content = "latin,romana\r\nad astra,spre stele\r\ncarpe diem,prinde ziua\r\n";
        let cards = parse_sayings(content, DEFAULT_DELIMITER);

        assert_eq!(
            cards,
            vec![
                Card::new("ad astra", "spre stele"),
                Card::new("carpe diem", "prinde ziua"),
            ]
        );
    }

    #[test]
    fn test_parse_drops_short_rows() {
        let content = "latin,romana\nsolitary\n\n   \n,only second\nmemento mori,adu-ți aminte că vei muri\n";
        let cards = parse_sayings(content, DEFAULT_DELIMITER);

        assert_eq!(cards, vec![Card::new("memento mori", "adu-ți aminte că vei muri")]);
    }

    #[test]
    fn test_parse_skips_empty_fields() {
        let content = "latin,romana\nfestina lente,,grăbește-te încet\n";
        let cards = parse_sayings(content, DEFAULT_DELIMITER);

        assert_eq!(cards, vec![Card::new("festina lente", "grăbește-te încet")]);
    }

    #[test]
    fn test_parse_custom_delimiter() {
        let content = "latin;romana\nerrare humanum est;a greși e omenește\n";
        let cards = parse_sayings(content, b';');

        assert_eq!(cards, vec![Card::new("errare humanum est", "a greși e omenește")]);
    }

    #[test]
    fn test_parse_header_only() {
        let cards = parse_sayings("latin,romana\n", DEFAULT_DELIMITER);
        assert!(cards.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_sayings(Path::new("/nonexistent/db.csv"), DEFAULT_DELIMITER);
        assert!(matches!(result, Err(FeedError::Io { .. })));
    }

    #[test]
    fn test_load_empty_feed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "latin,romana").unwrap();

        let result = load_sayings(file.path(), DEFAULT_DELIMITER);
        assert!(matches!(result, Err(FeedError::Empty(_))));
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "latin,romana").unwrap();
        writeln!(file, "ad astra,spre stele").unwrap();

        let cards = load_sayings(file.path(), DEFAULT_DELIMITER).unwrap();
        assert_eq!(cards, vec![Card::new("ad astra", "spre stele")]);
    }
}

//! Parser for plain-text sheets

use crate::config::{LoadConfig, read_bounded};
use crate::error::Result;
use std::path::Path;

/// Read a sheet file and return its rows of raw cell text.
pub fn parse_sheet(path: &Path, config: &LoadConfig) -> Result<Vec<Vec<String>>> {
    let content = read_bounded(path, config.max_file_bytes)?;
    Ok(parse_sheet_content(&content, config))
}

/// Split sheet text into rows of raw cell text.
///
/// Every separator splits, so doubled or trailing separators produce empty
/// cells. Those are kept (they evaluate as invalid input) so that column
/// positions match what the author typed.
pub fn parse_sheet_content(content: &str, config: &LoadConfig) -> Vec<Vec<String>> {
    content
        .lines()
        .map(|line| line.split(config.separator).map(str::to_string).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(content: &str) -> Vec<Vec<String>> {
        parse_sheet_content(content, &LoadConfig::default())
    }

    #[test]
    fn test_parse_rows() {
        assert_eq!(
            parse("5 =A1+3 [] =B1*2\n1 2\n"),
            vec![
                vec!["5", "=A1+3", "[]", "=B1*2"],
                vec!["1", "2"],
            ]
        );
    }

    #[test]
    fn test_parse_crlf() {
        assert_eq!(parse("1 2\r\n3\r\n"), vec![vec!["1", "2"], vec!["3"]]);
    }

    #[test]
    fn test_parse_keeps_empty_cells() {
        assert_eq!(parse("1  2 "), vec![vec!["1", "", "2", ""]]);
        assert_eq!(parse("1\n\n2"), vec![vec!["1"], vec![""], vec!["2"]]);
    }

    #[test]
    fn test_parse_empty_content() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_custom_separator() {
        let config = LoadConfig {
            separator: ';',
            ..LoadConfig::default()
        };
        assert_eq!(
            parse_sheet_content("1;=A1+1", &config),
            vec![vec!["1", "=A1+1"]]
        );
    }

    #[test]
    fn test_parse_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "1 =A1*2\n").unwrap();
        let rows = parse_sheet(file.path(), &LoadConfig::default()).unwrap();
        assert_eq!(rows, vec![vec!["1", "=A1*2"]]);
    }
}

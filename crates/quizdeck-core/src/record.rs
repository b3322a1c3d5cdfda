//! Delimited record scanner.
//!
//! Turns raw comma-separated text into an ordered sequence of row records,
//! respecting double-quote quoting rules. Pure and synchronous; the
//! caller is responsible for skipping the header row.

/// One logical record: an ordered sequence of trimmed string fields.
///
/// A logical record may span multiple physical lines when a field is
/// quoted and contains embedded newlines.
pub type RawRecord = Vec<String>;

/// Parse comma-separated text into records.
///
/// Rules:
/// - a field may be wrapped in double quotes; a doubled quote inside a
///   quoted field collapses to a single literal quote
/// - inside an open quote, commas and line breaks are literal content
/// - CRLF and lone CR are normalized to LF before scanning
/// - a leading byte-order mark is stripped
/// - every field is trimmed of surrounding whitespace on emission
/// - an unterminated quote at end of input closes the field with whatever
///   was accumulated; this is never an error
///
/// All rows are returned, including row 0 (the header) — skipping it is
/// the caller's job.
pub fn parse_records(input: &str) -> Vec<RawRecord> {
    let normalized = input
        .trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let mut rows: Vec<RawRecord> = Vec::new();
    let mut row: RawRecord = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = normalized.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                row.push(field.trim().to_string());
                field.clear();
            }
            '\n' if !in_quotes => {
                row.push(field.trim().to_string());
                field.clear();
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    // Flush the tail: input without a trailing newline, or an
    // unterminated quote at end of input.
    if !field.is_empty() {
        row.push(field.trim().to_string());
    }
    if !row.is_empty() {
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(input: &str) -> Vec<Vec<String>> {
        parse_records(input)
    }

    #[test]
    fn plain_rows() {
        assert_eq!(
            rows("a,b,c\nd,e,f"),
            vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]
        );
    }

    #[test]
    fn quoted_comma_and_embedded_newline() {
        assert_eq!(
            rows("\"a,b\",c\n\"x\ny\",z"),
            vec![vec!["a,b", "c"], vec!["x\ny", "z"]]
        );
    }

    #[test]
    fn doubled_quote_collapses() {
        assert_eq!(rows("\"say \"\"hi\"\"\",b"), vec![vec!["say \"hi\"", "b"]]);
    }

    #[test]
    fn crlf_and_lone_cr_normalize() {
        assert_eq!(
            rows("a,b\r\nc,d\re,f"),
            vec![vec!["a", "b"], vec!["c", "d"], vec!["e", "f"]]
        );
    }

    #[test]
    fn leading_bom_is_stripped() {
        assert_eq!(rows("\u{feff}a,b"), vec![vec!["a", "b"]]);
    }

    #[test]
    fn fields_are_trimmed() {
        assert_eq!(rows("  a , b \n c ,d"), vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn unterminated_quote_closes_field() {
        // No panic, no error: the open quote runs to end of input.
        assert_eq!(rows("a,\"unclosed\nstill going"), vec![vec![
            "a",
            "unclosed\nstill going"
        ]]);
    }

    #[test]
    fn trailing_newline_adds_no_empty_row() {
        assert_eq!(rows("a,b\n"), vec![vec!["a", "b"]]);
    }

    #[test]
    fn empty_fields_are_kept() {
        assert_eq!(rows("a,,c"), vec![vec!["a", "", "c"]]);
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(rows("").is_empty());
    }

    #[test]
    fn header_row_is_returned() {
        let parsed = rows("Question,A,B\nWhat?,yes,no");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0][0], "Question");
    }
}

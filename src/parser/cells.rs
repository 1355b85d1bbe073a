//! Cell tokenizer for a single catalog line.
//!
//! Cells are separated by commas. Leading whitespace in each cell is dropped.
//! A cell whose first non-whitespace character is `"` is quoted: commas inside
//! it are literal and `""` stands for one quote character. Only whitespace may
//! follow the closing quote before the next comma. Quoted cells cannot span
//! lines.

use super::FormatErrorCause;

pub(super) fn split_cells(line: &str) -> Result<Vec<String>, FormatErrorCause> {
    let mut cells = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let mut cell = String::new();
        if chars.next_if_eq(&'"').is_some() {
            loop {
                match chars.next() {
                    Some('"') if chars.next_if_eq(&'"').is_some() => cell.push('"'),
                    Some('"') => break,
                    Some(c) => cell.push(c),
                    None => return Err(FormatErrorCause::UnterminatedQuote),
                }
            }

            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            match chars.next() {
                Some(',') => {
                    cells.push(cell);
                    continue;
                }
                None => {
                    cells.push(cell);
                    return Ok(cells);
                }
                Some(_) => return Err(FormatErrorCause::MalformedQuote),
            }
        }

        let mut at_separator = false;
        for c in chars.by_ref() {
            if c == ',' {
                at_separator = true;
                break;
            }
            cell.push(c);
        }

        cells.push(cell);
        if !at_separator {
            return Ok(cells);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<String> {
        split_cells(line).unwrap()
    }

    #[test]
    fn splits_on_commas_and_trims_leading_space() {
        assert_eq!(split("a, b,  c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn keeps_trailing_space_and_empty_cells() {
        assert_eq!(split("a ,,c,"), vec!["a ", "", "c", ""]);
    }

    #[test]
    fn empty_line_is_one_empty_cell() {
        assert_eq!(split(""), vec![""]);
    }

    #[test]
    fn quoted_cells_keep_commas_and_escaped_quotes() {
        assert_eq!(
            split(r#"Brand, "Silk, Shiny", "say ""hi""",60"#),
            vec!["Brand", "Silk, Shiny", r#"say "hi""#, "60"]
        );
    }

    #[test]
    fn whitespace_after_closing_quote_is_allowed() {
        assert_eq!(split(r#""Acme"  ,PLA, "Red" "#), vec!["Acme", "PLA", "Red"]);
    }

    #[test]
    fn text_after_closing_quote_is_an_error() {
        assert_eq!(
            split_cells(r#""Acme"x,PLA"#),
            Err(FormatErrorCause::MalformedQuote)
        );
        assert_eq!(
            split_cells(r#"Brand,"PLA" "Silk",Red"#),
            Err(FormatErrorCause::MalformedQuote)
        );
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert_eq!(
            split_cells(r#"Brand,"PLA,Red"#),
            Err(FormatErrorCause::UnterminatedQuote)
        );
    }
}

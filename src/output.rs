//! Terminal and JSON rendering for search results

use crate::entity::Identifiable;
use crate::query::tokenizer::SearchToken;
use crate::query::SearchResult;
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print a page of results to stdout
pub fn print_result<T>(result: &SearchResult<T>, choice: ColorChoice) -> io::Result<()>
where
    T: Identifiable + Display,
{
    let mut stdout = StandardStream::stdout(choice);
    write_result(&mut stdout, result)
}

/// Write a page of results: a summary header, then one line per record
pub fn write_result<T, W>(out: &mut W, result: &SearchResult<T>) -> io::Result<()>
where
    T: Identifiable + Display,
    W: WriteColor,
{
    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "Showing {} of {}", result.records.len(), result.total_count)?;
    out.reset()?;

    for record in &result.records {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{:>6}", record.id())?;
        out.reset()?;
        writeln!(out, "  {}", record)?;
    }

    Ok(())
}

/// Print a result as `{"records": [...], "totalCount": N}`
pub fn print_json<T: Serialize>(result: &SearchResult<T>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, result)?;
    writeln!(lock)
}

/// Print a token sequence, one per line, quoted tokens highlighted
pub fn print_tokens(tokens: &[SearchToken], choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    write_tokens(&mut stdout, tokens)
}

pub fn write_tokens<W: WriteColor>(out: &mut W, tokens: &[SearchToken]) -> io::Result<()> {
    for token in tokens {
        if token.in_quotes {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            writeln!(out, "\"{}\"", token.term)?;
            out.reset()?;
        } else if token.operator().is_some() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
            writeln!(out, "{}", token.term)?;
            out.reset()?;
        } else {
            writeln!(out, "{}", token.term)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::tokenize;
    use termcolor::NoColor;

    struct Item(u64, &'static str);

    impl Identifiable for Item {
        fn id(&self) -> u64 {
            self.0
        }
    }

    impl Display for Item {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.1)
        }
    }

    #[test]
    fn test_write_result_plain() {
        let result = SearchResult {
            records: vec![Item(3, "UC"), Item(12, "UC Library")],
            total_count: 5,
        };
        let mut out = NoColor::new(Vec::new());
        write_result(&mut out, &result).unwrap();

        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text, "Showing 2 of 5\n     3  UC\n    12  UC Library\n");
    }

    #[test]
    fn test_write_tokens_plain() {
        let mut out = NoColor::new(Vec::new());
        write_tokens(&mut out, &tokenize("cafe OR \"Mc Ronalds\"")).unwrap();

        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text, "cafe\nOR\n\"Mc Ronalds\"\n");
    }
}

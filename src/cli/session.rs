//! Interactive conversion form for the terminal.

use super::{history, ui};
use crate::core::Session;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

const HELP: &str = "\
Commands:
  <FROM> <TO> <AMOUNT>   convert, e.g. `USD EUR 100`
  history                show conversions made in this session
  currencies             list the available currency codes
  help                   show this message
  quit | exit            save the history and leave";

#[derive(Debug, PartialEq)]
pub enum Command {
    Convert { from: String, to: String, amount: f64 },
    History,
    Currencies,
    Help,
    Quit,
    Empty,
}

pub fn parse_line(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] => Ok(Command::Empty),
        [word] => match word.to_lowercase().as_str() {
            "history" => Ok(Command::History),
            "currencies" => Ok(Command::Currencies),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(format!("Unknown command: {word}. Type `help` for usage.")),
        },
        [from, to, amount] => {
            let amount = amount
                .parse::<f64>()
                .map_err(|_| format!("Invalid amount: {amount}"))?;
            Ok(Command::Convert {
                from: from.to_uppercase(),
                to: to.to_uppercase(),
                amount,
            })
        }
        _ => Err("Expected `<FROM> <TO> <AMOUNT>`. Type `help` for usage.".to_string()),
    }
}

fn is_supported(currencies: &[String], code: &str) -> bool {
    currencies.is_empty() || currencies.iter().any(|c| c.eq_ignore_ascii_case(code))
}

/// Runs the form until `quit` or end of input, then writes the history to
/// `history_path`.
///
/// The history is written even when reading input or writing output fails;
/// that failure is returned after the save.
pub async fn run_with_io<R, W>(
    session: &mut Session,
    currencies: &[String],
    history_path: &Path,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let outcome = read_commands(session, currencies, input, out).await;
    if let Err(e) = &outcome {
        warn!(error = %e, "Session ended early");
    }

    session.save(history_path)?;
    outcome?;
    writeln!(
        out,
        "Saved {} conversion(s) to {}",
        session.history().len(),
        history_path.display()
    )?;
    Ok(())
}

async fn read_commands<R, W>(
    session: &mut Session,
    currencies: &[String],
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", ui::style_text("Currency converter", ui::StyleType::Title))?;
    writeln!(out, "{HELP}")?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            debug!("Input closed");
            return Ok(());
        };

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{}", ui::style_text(&message, ui::StyleType::Error))?;
                continue;
            }
        };

        match command {
            Command::Empty => {}
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Currencies => {
                if currencies.is_empty() {
                    writeln!(out, "Any currency code is accepted.")?;
                } else {
                    writeln!(out, "{}", currencies.join(", "))?;
                }
            }
            Command::History => {
                writeln!(out, "{}", history::display_as_table(session.history()))?
            }
            Command::Quit => return Ok(()),
            Command::Convert { from, to, amount } => {
                if let Some(code) = [&from, &to]
                    .into_iter()
                    .find(|c| !is_supported(currencies, c.as_str()))
                {
                    let message = format!("Unsupported currency: {code}");
                    writeln!(out, "{}", ui::style_text(&message, ui::StyleType::Error))?;
                    continue;
                }
                match session.convert(&from, &to, amount).await {
                    Ok(record) => writeln!(out, "{}", history::format_result(&record))?,
                    Err(e) => {
                        warn!(error = %e, "Conversion failed");
                        let message = format!("Error: {e}");
                        writeln!(out, "{}", ui::style_text(&message, ui::StyleType::Error))?;
                    }
                }
            }
        }
    }
}

pub async fn run(session: &mut Session, currencies: &[String], history_path: &Path) -> Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_with_io(session, currencies, history_path, stdin, &mut stdout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Credential;
    use crate::core::currency::stub::{StubRateProvider, StubReply};
    use crate::core::history::load_history;
    use std::io::Cursor;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn currencies() -> Vec<String> {
        vec!["USD".to_string(), "EUR".to_string(), "GBP".to_string()]
    }

    async fn run_script(
        reply: StubReply,
        script: &str,
        history_path: &Path,
    ) -> (String, Arc<StubRateProvider>) {
        let provider = Arc::new(StubRateProvider::new(reply));
        let mut session = Session::new(provider.clone(), Credential::new("test-key"));
        let mut out = Vec::new();

        run_with_io(
            &mut session,
            &currencies(),
            history_path,
            Cursor::new(script.to_string()),
            &mut out,
        )
        .await
        .unwrap();

        let output = console::strip_ansi_codes(&String::from_utf8(out).unwrap()).to_string();
        (output, provider)
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("usd eur 100"),
            Ok(Command::Convert {
                from: "USD".to_string(),
                to: "EUR".to_string(),
                amount: 100.0,
            })
        );
        assert_eq!(parse_line("  "), Ok(Command::Empty));
        assert_eq!(parse_line("HISTORY"), Ok(Command::History));
        assert_eq!(parse_line("exit"), Ok(Command::Quit));
        assert_eq!(parse_line("?"), Ok(Command::Help));
        assert!(parse_line("usd eur abc").unwrap_err().contains("Invalid amount"));
        assert!(parse_line("usd eur").is_err());
        assert!(parse_line("convert").is_err());
    }

    #[tokio::test]
    async fn test_session_converts_and_saves_on_quit() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");

        let (output, provider) = run_script(
            StubReply::Rate(0.92),
            "USD EUR 100\nhistory\nquit\nUSD EUR 1\n",
            &path,
        )
        .await;

        assert!(output.contains("Result: 100 USD = 92.00 EUR"));
        assert!(output.contains("Conversion history"));
        assert!(output.contains("Saved 1 conversion(s)"));
        assert_eq!(provider.calls(), 1);

        let saved = load_history(&path).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].result(), 92.0);
    }

    #[tokio::test]
    async fn test_session_reports_errors_and_keeps_history() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");

        let (output, provider) = run_script(
            StubReply::Rate(2.0),
            "USD EUR 10\nUSD EUR -5\nUSD JPY 10\nUSD EUR ten\n",
            &path,
        )
        .await;

        assert!(output.contains("Amount must be greater than zero"));
        assert!(output.contains("Unsupported currency: JPY"));
        assert!(output.contains("Invalid amount: ten"));
        assert_eq!(provider.calls(), 1);
        assert_eq!(load_history(&path).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_session_surfaces_provider_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");

        let (output, _provider) =
            run_script(StubReply::Timeout, "GBP USD 5\nhistory\n", &path).await;

        assert!(output.contains("Error: Network error for currency pair GBP/USD"));
        assert!(output.contains(history::EMPTY_HISTORY));
        assert!(load_history(&path).unwrap().is_empty());
    }

    /// Accepts output until it is asked to print a conversion result.
    struct FailingOnResult(Vec<u8>);

    impl Write for FailingOnResult {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if buf.starts_with(b"Result:") {
                return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
            }
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unreadable_input_still_saves_history() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        let provider = Arc::new(StubRateProvider::new(StubReply::Rate(0.92)));
        let mut session = Session::new(provider, Credential::new("test-key"));
        let mut out = Vec::new();

        let result = run_with_io(
            &mut session,
            &currencies(),
            &path,
            Cursor::new(b"USD EUR 100\n\xff\xfe\n".to_vec()),
            &mut out,
        )
        .await;

        let err = result.expect_err("Invalid UTF-8 should end the session with an error");
        assert!(err.to_string().contains("Failed to read input"));
        let saved = load_history(&path).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].result(), 92.0);
    }

    #[tokio::test]
    async fn test_output_failure_still_saves_history() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        let provider = Arc::new(StubRateProvider::new(StubReply::Rate(2.0)));
        let mut session = Session::new(provider, Credential::new("test-key"));
        let mut out = FailingOnResult(Vec::new());

        let result = run_with_io(
            &mut session,
            &currencies(),
            &path,
            Cursor::new("GBP USD 5\nGBP USD 6\n"),
            &mut out,
        )
        .await;

        assert!(result.is_err());
        let saved = load_history(&path).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].amount(), 5.0);
    }
}

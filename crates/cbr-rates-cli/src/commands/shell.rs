//! Interactive currency picker.
//!
//! Keeps the selection state a GUI front-end would: the list currently shown
//! and the selected code. Selecting re-renders the rate; refreshing reloads
//! the list and re-renders the selected code against the new snapshot.

use std::io::{BufRead, Write};

use cbr_rates_core::{retry_refresh, RateCatalog, RetryConfig};

use crate::error::CliError;

const HELP: &str = "enter a number or a code to select; r = refresh, l = list, h = help, q = quit";

#[derive(Debug, Default)]
struct Selection {
    listed: Vec<String>,
    selected: Option<String>,
}

pub async fn run_session<R, W>(
    catalog: &RateCatalog,
    retry: &RetryConfig,
    input: R,
    mut output: W,
) -> Result<(), CliError>
where
    R: BufRead,
    W: Write,
{
    let mut state = Selection::default();

    print_list(catalog, &mut state, &mut output).await?;
    if let Some(first) = state.listed.first().cloned() {
        select(catalog, &mut state, &first, &mut output).await?;
    }
    writeln!(output, "{HELP}")?;

    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let command = line.trim();

        match command {
            "" => {}
            "q" | "quit" | "exit" => break,
            "h" | "help" => writeln!(output, "{HELP}")?,
            "l" | "list" => print_list(catalog, &mut state, &mut output).await?,
            "r" | "refresh" => match retry_refresh(catalog, retry).await {
                Ok(()) => {
                    print_list(catalog, &mut state, &mut output).await?;
                    if let Some(code) = state.selected.clone() {
                        select(catalog, &mut state, &code, &mut output).await?;
                    }
                }
                Err(error) => writeln!(output, "error: {error}")?,
            },
            other => {
                let code = match other.parse::<usize>() {
                    Ok(index) if index >= 1 && index <= state.listed.len() => {
                        state.listed[index - 1].clone()
                    }
                    Ok(index) => {
                        writeln!(output, "error: no entry number {index}")?;
                        continue;
                    }
                    Err(_) => other.to_owned(),
                };
                select(catalog, &mut state, &code, &mut output).await?;
            }
        }
    }

    writeln!(output)?;
    Ok(())
}

async fn print_list<W: Write>(
    catalog: &RateCatalog,
    state: &mut Selection,
    output: &mut W,
) -> Result<(), CliError> {
    let currencies = catalog.list_currencies().await;
    if currencies.is_empty() {
        writeln!(output, "the feed lists no currencies")?;
    }
    for (index, (code, name)) in currencies.iter().enumerate() {
        writeln!(output, "{:>3}. {code:<4} {name}", index + 1)?;
    }
    state.listed = currencies.into_iter().map(|(code, _)| code).collect();
    Ok(())
}

async fn select<W: Write>(
    catalog: &RateCatalog,
    state: &mut Selection,
    code: &str,
    output: &mut W,
) -> Result<(), CliError> {
    match catalog.rate_text(code).await {
        Ok(text) => {
            state.selected = Some(code.to_owned());
            writeln!(output, "{text}")?;
        }
        Err(error) => {
            if state.selected.as_deref() == Some(code) {
                state.selected = None;
            }
            writeln!(output, "error: {error}")?;
        }
    }
    Ok(())
}

//! Line-oriented interactive session.
//!
//! Every input line is one viewer interaction and is handled completely
//! before the next line is read.

use std::io::{self, BufRead, Write};

use crate::report::Report;
use crate::types::SortOrder;
use crate::view::TableView;

/// A parsed input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Filter(String),
    Clear,
    Sort { key: String, order: SortOrder },
    Show,
    Summary,
    State,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line.trim_end(), ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Command::Empty,
            "filter" | "f" => Command::Filter(rest.trim_end_matches(['\r', '\n']).to_owned()),
            "clear" => Command::Clear,
            "sort" | "s" => {
                let mut args = rest.split_whitespace();
                let key = args.next().unwrap_or_default().to_owned();
                match args.next().map(str::parse::<SortOrder>) {
                    None => Command::Sort {
                        key,
                        order: SortOrder::Ascending,
                    },
                    Some(Ok(order)) => Command::Sort { key, order },
                    Some(Err(err)) => Command::Unknown(err.to_string()),
                }
            }
            "show" | "ls" => Command::Show,
            "summary" => Command::Summary,
            "state" => Command::State,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => Command::Unknown(format!("unknown command '{other}'")),
        }
    }
}

const HELP: &str = "\
Commands:
  filter <text>            show totes with a SKU containing <text>
  clear                    show all totes
  sort <key> [asc|desc]    key: id, itemCount, volumeUtilization
  show                     print the table
  summary                  print totals for the shown totes
  state                    print the current view state as JSON
  quit                     leave the session
";

/// Runs commands from `input` until it ends or `quit` is read.
pub fn run<R: BufRead, W: Write>(
    report: &mut Report<TableView>,
    input: R,
    mut output: W,
) -> io::Result<()> {
    write!(output, "{}", report.view().render(report.store()))?;

    for line in input.lines() {
        let line = line?;
        match Command::parse(&line) {
            Command::Filter(text) => {
                report.apply_filter(&text);
                write!(output, "{}", report.view().render(report.store()))?;
            }
            Command::Clear => {
                report.apply_filter("");
                write!(output, "{}", report.view().render(report.store()))?;
            }
            Command::Sort { key, order } => {
                report.apply_sort_named(&key, order);
                write!(output, "{}", report.view().render(report.store()))?;
            }
            Command::Show => write!(output, "{}", report.view().render(report.store()))?,
            Command::Summary => writeln!(output, "{}", report.summary())?,
            Command::State => {
                let state = serde_json::to_string(report.state()).map_err(io::Error::other)?;
                writeln!(output, "{state}")?;
            }
            Command::Help => write!(output, "{HELP}")?,
            Command::Quit => break,
            Command::Empty => {}
            Command::Unknown(message) => writeln!(output, "{message} (type 'help')")?,
        }
        output.flush()?;
    }
    Ok(())
}

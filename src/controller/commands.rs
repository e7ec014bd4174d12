//! User commands read from stdin

use std::str::FromStr;
use thiserror::Error;
use crate::table::{PairColumn, SortColumn, TokenColumn};

pub const HELP: &str = "\
Commands:
  tokens sort <name|symbol|price|volume|tvl>
  pairs sort <name|tvl|volume|fees|apr>
  tokens page <n|next|prev>
  pairs page <n|next|prev>
  refresh
  help
  quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableTarget {
    Tokens,
    Pairs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    To(usize),
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SortTokens(TokenColumn),
    SortPairs(PairColumn),
    Page(TableTarget, PageMove),
    Refresh,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("unknown {table} column: {column}")]
    UnknownColumn { table: &'static str, column: String },
    #[error("invalid page: {0}")]
    InvalidPage(String),
}

fn parse_page(raw: &str) -> Result<PageMove, CommandError> {
    match raw {
        "next" | "n" | "+" => Ok(PageMove::Next),
        "prev" | "previous" | "p" | "-" => Ok(PageMove::Previous),
        other => other
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(PageMove::To)
            .ok_or_else(|| CommandError::InvalidPage(other.to_string())),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let lowered = line.trim().to_ascii_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();

        match words.as_slice() {
            [] => Err(CommandError::Empty),
            ["refresh" | "r"] => Ok(Command::Refresh),
            ["help" | "h" | "?"] => Ok(Command::Help),
            ["quit" | "q" | "exit"] => Ok(Command::Quit),
            ["tokens", "sort", column] => TokenColumn::parse(column)
                .map(Command::SortTokens)
                .ok_or_else(|| CommandError::UnknownColumn {
                    table: "token",
                    column: column.to_string(),
                }),
            ["pairs", "sort", column] => PairColumn::parse(column)
                .map(Command::SortPairs)
                .ok_or_else(|| CommandError::UnknownColumn {
                    table: "pair",
                    column: column.to_string(),
                }),
            ["tokens", "page", page] => Ok(Command::Page(TableTarget::Tokens, parse_page(page)?)),
            ["pairs", "page", page] => Ok(Command::Page(TableTarget::Pairs, parse_page(page)?)),
            _ => Err(CommandError::Unknown(line.trim().to_string())),
        }
    }
}

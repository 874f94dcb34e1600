//! Shell command - line-driven browse session
//!
//! Each input line is one event:
//!
//! | Input               | Effect                                   |
//! |---------------------|------------------------------------------|
//! | plain text          | set the search text                      |
//! | `:brand NAME`       | toggle the brand facet                   |
//! | `:tag NAME`         | toggle the tag facet                     |
//! | `:clear`            | reset search, brand and tag              |
//! | `:pick PUB/ITEM`    | select an item and save favorites        |
//! | `:esc`              | clear the search, or quit when empty     |
//! | `:quit`             | quit                                     |
//!
//! The snapshot is printed after every event.

use super::CliSink;
use crate::{
    ModbrowseError,
    browse::{BrowseSession, SortMode},
    catalog::Catalog,
    favorites::FavoriteStore,
    output,
};
use std::io::{BufRead, Write};

type Result<T> = std::result::Result<T, ModbrowseError>;

/// One parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Brand(String),
    Tag(String),
    Clear,
    Pick { publisher: String, item: String },
    Escape,
    Quit,
    Invalid(String),
}

impl ShellCommand {
    /// Parse a single input line
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return Self::Search(line.to_string());
        };

        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(n, a)| (n, a.trim()));

        match name {
            "brand" | "b" if !arg.is_empty() => Self::Brand(arg.to_string()),
            "tag" | "t" if !arg.is_empty() => Self::Tag(arg.to_string()),
            "clear" | "c" => Self::Clear,
            "esc" => Self::Escape,
            "quit" | "q" => Self::Quit,
            "pick" | "p" => match arg.split_once('/') {
                Some((publisher, item)) if !publisher.is_empty() && !item.is_empty() => Self::Pick {
                    publisher: publisher.to_string(),
                    item: item.to_string(),
                },
                _ => Self::Invalid("usage: :pick PUBLISHER/ITEM".into()),
            },
            "brand" | "b" | "tag" | "t" => Self::Invalid(format!("usage: :{name} NAME")),
            _ => Self::Invalid(format!("unknown command ':{name}'")),
        }
    }
}

/// Execute the shell command
///
/// Reads events from `input` until end of input, `:quit`, or `:esc` with an
/// empty search. Favorites are saved after every pick.
///
/// # Errors
/// Returns an error if the store cannot be read or written, or I/O fails
pub fn execute<R: BufRead, W: Write>(
    catalog: &Catalog,
    store: &dyn FavoriteStore,
    sort_mode: SortMode,
    quiet: bool,
    input: R,
    out: &mut W,
) -> Result<()> {
    let favorites = store.load()?;
    let mut session = BrowseSession::with_sort_mode(catalog, favorites, sort_mode);

    write!(out, "{}", output::render_snapshot(&session, None, quiet))?;
    prompt(out, quiet)?;

    for line in input.lines() {
        match ShellCommand::parse(&line?) {
            ShellCommand::Search(text) => {
                session.set_search(&text);
            }
            ShellCommand::Brand(brand) => {
                session.toggle_brand(&brand);
            }
            ShellCommand::Tag(tag) => {
                let tag = catalog
                    .allowed_tags()
                    .canonical(&tag)
                    .map_or(tag.clone(), str::to_string);
                session.toggle_tag(&tag);
            }
            ShellCommand::Clear => {
                session.clear_all();
            }
            ShellCommand::Pick { publisher, item } => {
                let mut sink = CliSink::new(store, out, quiet);
                match session.select_by_key(&publisher, &item, &mut sink) {
                    Ok(_) => sink.finish()?,
                    Err(e) => {
                        drop(sink);
                        writeln!(out, "{e}")?;
                    }
                }
                session.refresh();
            }
            ShellCommand::Escape => {
                if session.escape() {
                    break;
                }
            }
            ShellCommand::Quit => break,
            ShellCommand::Invalid(message) => {
                writeln!(out, "{message}")?;
                prompt(out, quiet)?;
                continue;
            }
        }

        write!(out, "{}", output::render_snapshot(&session, None, quiet))?;
        prompt(out, quiet)?;
    }

    out.flush()?;
    Ok(())
}

fn prompt<W: Write>(out: &mut W, quiet: bool) -> Result<()> {
    if !quiet {
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}

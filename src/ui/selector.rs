//! Line-based title selector shown before the session screen

use std::io::{self, BufRead, Write};
use tracing::info;

use crate::{
    error::TitleError,
    services::TitleRegistry,
    state::Title,
};

const EMPTY_HINT: &str = "No titles available - add one below";

/// Outcome of the selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Open(Title),
    Quit,
}

/// Open an existing title by name, registering it first if it is new
pub fn open_by_name(registry: &mut TitleRegistry, name: &str) -> Result<Title, TitleError> {
    let title = Title::parse(name)?;
    if registry.contains(title.as_str()) {
        return Ok(title);
    }
    registry.add(title.as_str())
}

/// Let the user pick or create a title.
///
/// Commands: a list number opens that title, `a <name>` adds a title and
/// selects it, an empty line opens the selection, `q` quits.
pub fn select_title<R: BufRead, W: Write>(
    registry: &mut TitleRegistry,
    mut input: R,
    mut out: W,
) -> io::Result<Selection> {
    let mut selected: Option<usize> = None;

    loop {
        writeln!(out, "Select Speedrun Title:")?;
        if registry.is_empty() {
            writeln!(out, "  {}", EMPTY_HINT)?;
        }
        for (index, title) in registry.list().iter().enumerate() {
            let marker = if selected == Some(index) { '*' } else { ' ' };
            writeln!(out, "{} {}) {}", marker, index + 1, title)?;
        }
        write!(out, "Number to start, 'a <name>' to add, Enter for selection, 'q' to quit: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(Selection::Quit);
        }
        let line = line.trim();

        if line.eq_ignore_ascii_case("q") {
            return Ok(Selection::Quit);
        }

        if line.is_empty() {
            match selected.and_then(|index| registry.get(index)) {
                Some(title) => return Ok(open(title.clone())),
                None => {
                    writeln!(out, "! Please select a title first!")?;
                    continue;
                }
            }
        }

        if let Some(name) = strip_add_command(line) {
            let name = if name.is_empty() {
                write!(out, "Enter speedrun title: ")?;
                out.flush()?;
                let mut name = String::new();
                input.read_line(&mut name)?;
                name
            } else {
                name.to_string()
            };
            match registry.add(&name) {
                Ok(title) => {
                    selected = registry.list().iter().position(|t| *t == title);
                    writeln!(out, "Added \"{}\" - press Enter to start", title)?;
                }
                Err(e) if e.is_duplicate() => writeln!(out, "! This title already exists!")?,
                Err(e) => writeln!(out, "! {}", e)?,
            }
            continue;
        }

        match line.parse::<usize>() {
            Ok(number) if number >= 1 => match registry.get(number - 1) {
                Some(title) => return Ok(open(title.clone())),
                None => writeln!(out, "! No title numbered {}", number)?,
            },
            _ => writeln!(out, "! Unrecognised input: {}", line)?,
        }
    }
}

fn strip_add_command(line: &str) -> Option<&str> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    if command.eq_ignore_ascii_case("a") || command.eq_ignore_ascii_case("add") {
        Some(rest)
    } else {
        None
    }
}

fn open(title: Title) -> Selection {
    info!("Selected title: {}", title);
    Selection::Open(title)
}

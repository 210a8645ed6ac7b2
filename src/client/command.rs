//! Editor Commands
//!
//! Line-oriented commands accepted by the `xfdocs-editor` binary.

use crate::shared::DocumentId;

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    New(String),
    Open(DocumentId),
    /// Replace the open document's body and save it
    Edit(String),
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parse a line of input
    ///
    /// The argument of `new` and `edit` is everything after the first space,
    /// kept verbatim so bodies may contain any text.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (name, rest) = match line.trim_start().split_once(' ') {
            Some((name, rest)) => (name, Some(rest)),
            None => (line.trim(), None),
        };

        match name {
            "list" | "ls" => Ok(Self::List),
            "new" => match rest {
                Some(title) => Ok(Self::New(title.to_string())),
                None => Err("usage: new <title>".to_string()),
            },
            "open" => {
                let arg = rest.map(str::trim).unwrap_or_default();
                arg.parse::<DocumentId>()
                    .map(Self::Open)
                    .map_err(|_| format!("invalid document id: '{}'", arg))
            }
            "edit" => Ok(Self::Edit(rest.unwrap_or_default().to_string())),
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command: '{}' (try 'help')", other)),
        }
    }
}

pub const HELP: &str = "\
commands:
  list            list documents
  new <title>     create a document
  open <id>       open a document for editing
  edit <body>     replace the open document's body and save
  show            print the open document
  quit            exit";

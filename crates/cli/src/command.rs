//! Operator input parsing.

use std::path::PathBuf;

pub const HELP: &str = "\
Scan a barcode:     <ean> [quantity]
Load invoices:      :load <file.csv> [more.csv ...]
Show all tables:    :show
Export report:      :export <report.csv|report.json>
Help:               :help
Quit:               :quit";

/// One line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A scan: fills the scan field and, if given, the quantity field.
    Scan {
        code: String,
        quantity: Option<String>,
    },
    Load(Vec<PathBuf>),
    Show,
    Export(PathBuf),
    Help,
    Quit,
    Empty,
    /// A `:` command that is not understood.
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Command::Empty;
        }

        if let Some(rest) = line.trim_start().strip_prefix(':') {
            let mut words = rest.split_whitespace();
            let name = words.next().unwrap_or_default();
            let args: Vec<&str> = words.collect();
            return match (name, args.as_slice()) {
                ("load" | "l", paths) if !paths.is_empty() => {
                    Command::Load(paths.iter().map(PathBuf::from).collect())
                }
                ("show" | "s", []) => Command::Show,
                ("export" | "e", [path]) => Command::Export(PathBuf::from(path)),
                ("help" | "h" | "?", []) => Command::Help,
                ("quit" | "q" | "exit", []) => Command::Quit,
                _ => Command::Unknown(line.trim().to_string()),
            };
        }

        // Whitespace separates the code from the quantity, so padding around
        // the code is stripped here and never reaches the validator.
        match line.trim().split_once(char::is_whitespace) {
            Some((code, quantity)) => Command::Scan {
                code: code.to_string(),
                quantity: Some(quantity.trim().to_string()),
            },
            None => Command::Scan {
                code: line.trim().to_string(),
                quantity: None,
            },
        }
    }
}

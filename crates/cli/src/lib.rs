//! `scancheck` terminal front end: configuration, scan session and text
//! rendering on top of the invoicing domain.

pub mod app;
pub mod command;
pub mod config;
pub mod presenter;
pub mod session;

pub use app::{Flow, handle_line, run};
pub use command::Command;
pub use config::{AppConfig, ConfigError};
pub use presenter::{RowView, TableView, TerminalPresenter};
pub use session::{LoadSummary, ScanSession};

//! Output formatting for CLI.

mod presenter;

pub use presenter::TerminalPresenter;

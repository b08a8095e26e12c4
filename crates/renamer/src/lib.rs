pub mod fsops;
pub mod naming;
pub mod orchestrate;
pub mod ui;

pub use fsops::{RenameError, RenameOp};
pub use orchestrate::{Orchestrator, Outcome, ProcessError};
pub use ui::{Interaction, MovieChoice, Selection, SeriesChoice};

//! TUI widgets for the recall companion

pub mod fragments;
pub mod input;
pub mod status_bar;
pub mod transcript;

pub use fragments::FragmentPanelWidget;
pub use input::InputWidget;
pub use status_bar::StatusBarWidget;
pub use transcript::TranscriptWidget;

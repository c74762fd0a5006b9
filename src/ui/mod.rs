pub mod display;
pub mod menu;
pub mod prompt;

pub use menu::MenuSystem;
#[cfg(feature = "cli")]
pub use prompt::LinePrompt;
pub use prompt::{Prompt, ScriptedPrompt};

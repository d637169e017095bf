//! Terminal front end for the calculator.

pub mod render;
pub mod repl;
mod session;

pub use render::render_outcome;
pub use repl::{ShellOptions, present};
pub use session::{InputState, Session};

//! Domain facades over the task repository.

mod board;

pub use board::TaskBoard;

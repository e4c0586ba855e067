//! Common building blocks shared by the mode-stack lexer and the language
//! tables: source positions, checkpoints and shared text slices.

pub mod checkpoint;
pub mod position;
pub mod text_slice;

pub use checkpoint::Checkpoint;
pub use position::Position;
pub use text_slice::TextSlice;

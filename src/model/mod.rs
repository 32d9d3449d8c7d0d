// File: src/model/mod.rs
pub mod item;
pub mod mutate;
pub mod parser;

pub use item::{Item, ItemKind, TaskStatus, Token, TokenKind};
pub use mutate::Draft;
pub use parser::{DUE_SIGIL, LineParser, stringify};

// Crate root library declaration and module exports.
pub mod cache;
pub mod config;
pub mod model;

pub use cache::ParseCache;
pub use config::{AutoLinkRule, Settings};
pub use model::{Item, ItemKind, LineParser, TaskStatus, Token, TokenKind, stringify};

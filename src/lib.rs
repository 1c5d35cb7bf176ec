//! Lexer for a Sass-like stylesheet dialect.
//!
//! The dialect adds variables (`$name: value;`), interpolation
//! (`#{expr}`) and built-in sprite/image commands such as
//! `sprite-map("*.png")` to plain CSS. The lexer turns source text
//! into a pull-based stream of typed [`Item`]s for a downstream
//! parser. It classifies each lexeme but never validates how they
//! combine.
//!
//! # Quick start
//!
//! ```
//! use sprite_lex::{tokenize, ItemType};
//!
//! let items = tokenize("$images: sprite-map(\"*.png\");").unwrap();
//! assert_eq!(items[0].kind, ItemType::Var);
//! assert_eq!(items[1].kind, ItemType::CmdVar);
//! assert_eq!(items[2].value, "sprite-map");
//! assert_eq!(items[4].kind, ItemType::File);
//! ```
//!
//! ## Pulling items one at a time
//!
//! ```
//! use sprite_lex::{Lexer, ItemType};
//!
//! let mut lexer = Lexer::new("width: 10px;");
//! assert_eq!(lexer.next_item().value, "width");
//! let rest: Vec<_> = lexer.map(|item| item.kind).collect();
//! assert_eq!(rest.last(), Some(&ItemType::Eof));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod classify;
pub mod context;
pub mod lexer;
pub mod token;

pub use classify::classify_literal;
pub use context::StatementPosition;
pub use lexer::{LexError, LexErrorKind, Lexer, State, tokenize};
pub use token::{Item, ItemType, Span};

use std::fmt;

use crate::lexer::LexError;

/// Human-readable source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset into the input.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    /// Resolve a byte offset into a 1-based line and column.
    ///
    /// Offsets past the end or inside a multi-byte character are
    /// clamped back to the nearest preceding character boundary.
    #[must_use]
    pub fn locate(input: &str, offset: usize) -> Self {
        let mut end = offset.min(input.len());
        while !input.is_char_boundary(end) {
            end -= 1;
        }
        let before = &input[..end];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Self {
            offset,
            line,
            column,
        }
    }
}

/// Item kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    /// Variable name as a declaration target (`$name:`).
    Var,
    /// Variable reference or interpolation payload.
    Sub,
    /// `:` binding a declared variable to a command invocation.
    CmdVar,
    /// Identifier immediately followed by `(`.
    Cmd,
    /// The built-in `sprite` command.
    Sprite,
    /// Quoted literal that looks like a file path or glob.
    File,
    /// Quoted literal or bare word that is not a file path.
    Text,
    /// Integer literal.
    Int,
    /// A standalone `-`.
    Minus,
    /// The `@import` directive.
    Import,
    LParen,
    RParen,
    LBracket,
    RBracket,
    /// Any other punctuation.
    Extra,
    /// End of input.
    Eof,
    /// Lexing stopped on a malformed lexeme.
    Error,
}

impl ItemType {
    /// Whether this kind ends the stream.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Eof | Self::Error)
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Var => "VAR",
            Self::Sub => "SUB",
            Self::CmdVar => "CMDVAR",
            Self::Cmd => "CMD",
            Self::Sprite => "SPRITE",
            Self::File => "FILE",
            Self::Text => "TEXT",
            Self::Int => "INT",
            Self::Minus => "MINUS",
            Self::Import => "IMPORT",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::LBracket => "LBRACKET",
            Self::RBracket => "RBRACKET",
            Self::Extra => "EXTRA",
            Self::Eof => "EOF",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single lexical item: kind, covered text, and byte position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemType,
    /// Source text covered by the item, or the message for
    /// [`ItemType::Error`].
    pub value: String,
    /// Byte offset where `value` begins.
    pub pos: usize,
    pub error: Option<LexError>,
}

impl Item {
    #[must_use]
    pub const fn new(kind: ItemType, value: String, pos: usize) -> Self {
        Self {
            kind,
            value,
            pos,
            error: None,
        }
    }

    /// The terminal item for a failed scan.
    #[must_use]
    pub fn from_error(error: LexError) -> Self {
        Self {
            kind: ItemType::Error,
            value: error.kind.to_string(),
            pos: error.span.offset,
            error: Some(error),
        }
    }

    /// The error carried by an [`ItemType::Error`] item.
    #[must_use]
    pub const fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

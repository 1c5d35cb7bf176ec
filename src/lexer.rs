use std::fmt;

use crate::classify::classify_literal;
use crate::context::StatementPosition;
use crate::token::{Item, ItemType, Span};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Quoted literal reached end of input.
    UnterminatedString,
    /// `#{` without a matching `}`.
    UnterminatedInterpolation,
    /// `/*` without a closing `*/`.
    UnterminatedComment,
    /// Character that cannot start any item.
    UnexpectedCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => {
                write!(f, "unterminated quoted string")
            }
            Self::UnterminatedInterpolation => {
                write!(f, "unterminated interpolation, expected '}}'")
            }
            Self::UnterminatedComment => {
                write!(f, "unterminated block comment")
            }
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character: {}", ch.escape_debug())
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Tokenize a source string into its items, excluding the final EOF.
///
/// # Errors
///
/// Returns `LexError` on unterminated strings, interpolations or
/// comments, and on characters that start no item.
pub fn tokenize(input: &str) -> Result<Vec<Item>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut items = Vec::new();
    loop {
        let mut item = lexer.next_item();
        if let Some(error) = item.error.take() {
            return Err(error);
        }
        if item.kind == ItemType::Eof {
            return Ok(items);
        }
        items.push(item);
    }
}

/// Scanner states. Each one consumes a lexeme category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Skip trivia and pick the next state from the upcoming rune.
    Action,
    Variable,
    Interpolation,
    Quoted,
    Number,
    Directive,
    Identifier,
    Symbol,
}

impl State {
    /// The state that scans a lexeme starting at `rest`, or `None` at
    /// end of input.
    fn select(rest: &str) -> Option<Self> {
        let mut chars = rest.chars();
        let next = match chars.next()? {
            '$' => Self::Variable,
            '#' if chars.next() == Some('{') => Self::Interpolation,
            '"' | '\'' => Self::Quoted,
            c if c.is_ascii_digit() => Self::Number,
            '@' => Self::Directive,
            c if is_ident_start(c) => Self::Identifier,
            _ => Self::Symbol,
        };
        Some(next)
    }
}

const BOM: &str = "\u{feff}";

/// Pull-based lexer over an in-memory source string.
pub struct Lexer<'a> {
    input: &'a str,
    start: usize,
    pos: usize,
    state: Option<State>,
    context: StatementPosition,
    pending: Option<Item>,
    terminal: Option<Item>,
    exhausted: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_state(input, State::Action)
    }

    /// Create a lexer that begins in `state` instead of [`State::Action`].
    ///
    /// A leading byte order mark is skipped. If the input does not open
    /// with a lexeme of `state`'s category, scanning starts from
    /// [`State::Action`] instead.
    #[must_use]
    pub fn with_state(input: &'a str, state: State) -> Self {
        let start = if input.starts_with(BOM) { BOM.len() } else { 0 };
        let state = if State::select(&input[start..]) == Some(state) {
            state
        } else {
            State::Action
        };
        Self {
            input,
            start,
            pos: start,
            state: Some(state),
            context: StatementPosition::Statement,
            pending: None,
            terminal: None,
            exhausted: false,
        }
    }

    /// Current statement-position context.
    #[must_use]
    pub const fn context(&self) -> StatementPosition {
        self.context
    }

    /// Advance until one item is ready and return it.
    ///
    /// Once an EOF or error item has been returned, every later call
    /// returns that same item.
    pub fn next_item(&mut self) -> Item {
        if let Some(item) = &self.terminal {
            return item.clone();
        }
        loop {
            if let Some(item) = self.pending.take() {
                if item.kind.is_terminal() {
                    self.terminal = Some(item.clone());
                }
                return item;
            }
            self.state = match self.state {
                Some(State::Action) => self.lex_action(),
                Some(State::Variable) => self.lex_variable(),
                Some(State::Interpolation) => self.lex_interpolation(),
                Some(State::Quoted) => self.lex_quoted(),
                Some(State::Number) => self.lex_number(),
                Some(State::Directive) => self.lex_directive(),
                Some(State::Identifier) => self.lex_identifier(),
                Some(State::Symbol) => self.lex_symbol(),
                None => {
                    // halted without a terminal item
                    self.start = self.input.len();
                    self.pos = self.input.len();
                    self.emit(ItemType::Eof);
                    None
                }
            };
        }
    }

    // -- cursor --

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
    }

    /// First char after any trivia at or after `from`, without consuming.
    fn next_significant(&self, from: usize) -> Option<(usize, char)> {
        let at = trivia_end(self.input, from).ok()?;
        self.input[at..].chars().next().map(|c| (at, c))
    }

    // -- emission --

    fn emit(&mut self, kind: ItemType) {
        self.emit_span(kind, self.start, self.pos);
    }

    fn emit_span(&mut self, kind: ItemType, start: usize, end: usize) {
        let input = self.input;
        let value = &input[start..end];
        tracing::trace!(%kind, pos = start, value, "item");
        self.context = self.context.after(kind, value);
        self.pending = Some(Item::new(kind, value.to_string(), start));
    }

    fn fail(&mut self, kind: LexErrorKind, at: usize) -> Option<State> {
        let error = LexError {
            kind,
            span: Span::locate(self.input, at),
        };
        tracing::debug!(%error, "lexing halted");
        self.pending = Some(Item::from_error(error));
        None
    }

    // -- states --

    fn lex_action(&mut self) -> Option<State> {
        match trivia_end(self.input, self.pos) {
            Ok(end) => self.pos = end,
            Err(at) => return self.fail(LexErrorKind::UnterminatedComment, at),
        }
        self.start = self.pos;
        let next = State::select(&self.input[self.pos..]);
        if next.is_none() {
            self.emit(ItemType::Eof);
        }
        next
    }

    fn lex_variable(&mut self) -> Option<State> {
        self.bump(); // skip $
        let name_start = self.pos;
        self.eat_while(is_ident_char);
        if self.pos == name_start {
            return self.fail(LexErrorKind::UnexpectedCharacter('$'), self.start);
        }

        let declares = self.context.allows_declaration()
            && self.next_significant(self.pos).map(|(_, c)| c) == Some(':');
        self.emit(if declares { ItemType::Var } else { ItemType::Sub });
        Some(State::Action)
    }

    fn lex_interpolation(&mut self) -> Option<State> {
        self.bump(); // skip #
        self.bump(); // skip {
        let body = self.pos;
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => {
                    return self.fail(LexErrorKind::UnterminatedInterpolation, self.start);
                }
                Some('"' | '\'') => {
                    if self.skip_quoted().is_none() {
                        return self.fail(LexErrorKind::UnterminatedInterpolation, self.start);
                    }
                    continue;
                }
                Some('}') if depth == 0 => break,
                Some('}') => depth -= 1,
                Some('{') => depth += 1,
                Some(_) => {}
            }
            self.bump();
        }
        self.emit_span(ItemType::Sub, body, self.pos);
        self.bump(); // skip }
        Some(State::Action)
    }

    fn lex_quoted(&mut self) -> Option<State> {
        let body = self.start + 1;
        let Some(end) = self.skip_quoted() else {
            return self.fail(LexErrorKind::UnterminatedString, self.start);
        };
        let kind = classify_literal(&self.input[body..end]);
        self.emit_span(kind, body, end);
        Some(State::Action)
    }

    /// Consume a quoted run opening at the cursor, escapes included.
    /// Returns the offset of the closing quote, or `None` if input ends
    /// first.
    fn skip_quoted(&mut self) -> Option<usize> {
        let quote = self.bump()?;
        loop {
            match self.bump()? {
                '\\' => {
                    self.bump();
                }
                c if c == quote => return Some(self.pos - c.len_utf8()),
                _ => {}
            }
        }
    }

    fn lex_number(&mut self) -> Option<State> {
        self.eat_while(|c| c.is_ascii_digit());
        self.emit(ItemType::Int);
        Some(State::Action)
    }

    fn lex_directive(&mut self) -> Option<State> {
        self.bump(); // skip @
        let name_start = self.pos;
        self.eat_while(is_ident_char);
        let input = self.input;
        let kind = match &input[name_start..self.pos] {
            "" => return self.fail(LexErrorKind::UnexpectedCharacter('@'), self.start),
            "import" => ItemType::Import,
            _ => ItemType::Text,
        };
        self.emit(kind);
        Some(State::Action)
    }

    fn lex_identifier(&mut self) -> Option<State> {
        self.eat_while(is_ident_char);
        let kind = if self.peek() == Some('(') {
            if &self.input[self.start..self.pos] == "sprite" {
                ItemType::Sprite
            } else {
                ItemType::Cmd
            }
        } else {
            ItemType::Text
        };
        self.emit(kind);
        Some(State::Action)
    }

    fn lex_symbol(&mut self) -> Option<State> {
        let ch = self.bump()?;
        let kind = match ch {
            '-' => ItemType::Minus,
            '(' => ItemType::LParen,
            ')' => ItemType::RParen,
            '[' => ItemType::LBracket,
            ']' => ItemType::RBracket,
            ':' if self.context.binds_command() && self.command_follows() => ItemType::CmdVar,
            '#' => {
                self.eat_while(is_ident_char);
                if self.pos - self.start > 1 {
                    ItemType::Text
                } else {
                    ItemType::Extra
                }
            }
            c if c.is_ascii_punctuation() => ItemType::Extra,
            c => return self.fail(LexErrorKind::UnexpectedCharacter(c), self.start),
        };
        self.emit(kind);
        Some(State::Action)
    }

    /// Whether the right-hand side after the cursor opens with `ident(`.
    fn command_follows(&self) -> bool {
        let Some((at, first)) = self.next_significant(self.pos) else {
            return false;
        };
        if !is_ident_start(first) {
            return false;
        }
        self.input[at..]
            .chars()
            .find(|&c| !is_ident_char(c))
            .is_some_and(|c| c == '(')
    }
}

impl Iterator for Lexer<'_> {
    type Item = crate::token::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let item = self.next_item();
        if item.kind.is_terminal() {
            self.exhausted = true;
        }
        Some(item)
    }
}

/// Offset of the first char at or after `from` that is not whitespace
/// or a comment. `Err` holds the offset of an unterminated `/*`.
fn trivia_end(input: &str, from: usize) -> Result<usize, usize> {
    let mut pos = from;
    loop {
        let rest = &input[pos..];
        if rest.starts_with("/*") {
            let end = rest[2..].find("*/").ok_or(pos)?;
            pos += end + 4;
        } else if rest.starts_with("//") && opens_line_comment(input, pos) {
            pos += rest.find('\n').unwrap_or(rest.len());
        } else if let Some(ch) = rest.chars().next().filter(|c| c.is_whitespace()) {
            pos += ch.len_utf8();
        } else {
            return Ok(pos);
        }
    }
}

/// `//` only opens a comment where a new token could begin, so values
/// like `url(http://host/a.png)` keep their slashes.
fn opens_line_comment(input: &str, pos: usize) -> bool {
    input[..pos]
        .chars()
        .next_back()
        .is_none_or(|c| c.is_whitespace() || matches!(c, ';' | '{' | '}' | '\u{feff}'))
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

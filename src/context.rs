use crate::token::ItemType;

/// Where the cursor sits relative to statement boundaries.
///
/// Lets the lexer tell a declaration (`$a: ...`) from a reference
/// without a parse tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementPosition {
    /// Start of input, or right after `;`, `{` or `}`.
    #[default]
    Statement,
    /// A `VAR` was just emitted; its `:` comes next.
    Declared,
    /// Anywhere inside an expression or selector.
    Expression,
}

impl StatementPosition {
    /// Context after emitting an item of `kind` covering `value`.
    #[must_use]
    pub fn after(self, kind: ItemType, value: &str) -> Self {
        match kind {
            ItemType::Var => Self::Declared,
            ItemType::Extra if matches!(value, ";" | "{" | "}") => Self::Statement,
            _ => Self::Expression,
        }
    }

    /// A `$name` here may be a declaration target.
    #[must_use]
    pub const fn allows_declaration(self) -> bool {
        matches!(self, Self::Statement)
    }

    /// A `:` here may bind the declared variable to a command.
    #[must_use]
    pub const fn binds_command(self) -> bool {
        matches!(self, Self::Declared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_declaration_legal() {
        assert!(StatementPosition::default().allows_declaration());
    }

    #[test]
    fn var_then_colon() {
        let ctx = StatementPosition::Statement.after(ItemType::Var, "$s");
        assert_eq!(ctx, StatementPosition::Declared);
        assert!(ctx.binds_command());
        assert!(!ctx.allows_declaration());

        let ctx = ctx.after(ItemType::CmdVar, ":");
        assert_eq!(ctx, StatementPosition::Expression);
    }

    #[test]
    fn statement_terminators_reset() {
        for sep in [";", "{", "}"] {
            assert_eq!(
                StatementPosition::Expression.after(ItemType::Extra, sep),
                StatementPosition::Statement
            );
        }
    }

    #[test]
    fn other_punctuation_stays_in_expression() {
        for punct in [",", ":", "."] {
            assert_eq!(
                StatementPosition::Statement.after(ItemType::Extra, punct),
                StatementPosition::Expression
            );
        }
    }

    #[test]
    fn values_leave_statement_position() {
        let ctx = StatementPosition::Statement.after(ItemType::Text, "div");
        assert_eq!(ctx, StatementPosition::Expression);
        let ctx = StatementPosition::Declared.after(ItemType::Extra, ":");
        assert!(!ctx.binds_command());
    }
}

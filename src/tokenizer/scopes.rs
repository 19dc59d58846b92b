//! Scope name tables
//!
//! Pure lookup functions from classification codes to the dot-qualified
//! style category strings a theming layer consumes. Two parallel tables
//! exist, one per dialect, differing only by the `.ts` / `.js` suffix so a
//! theme can style the dialects differently even for identical token kinds.

use serde::Serialize;

use crate::tokenizer::classify::TokenClass;

/// Source dialect: TypeScript (typed superset) or JavaScript (untyped base).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dialect {
    TypeScript,
    JavaScript,
}

impl Dialect {
    /// Suffix appended to every scope name emitted for this dialect.
    pub fn suffix(self) -> &'static str {
        match self {
            Dialect::TypeScript => ".ts",
            Dialect::JavaScript => ".js",
        }
    }
}

/// Scope for a shebang line (`#!...`), dialect-independent.
pub const SHEBANG_SCOPE: &str = "comment.shebang";

/// Scope for a lexical-path classification code.
///
/// Total over [`TokenClass`]: codes without a specific style map to the
/// empty scope, which is a valid emittable value (distinct from "no token")
/// so unmapped runs still occupy their columns in the span stream.
pub fn token_scope(class: TokenClass, dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::TypeScript => match class {
            TokenClass::Identifier => "identifier.ts",
            TokenClass::Keyword => "keyword.ts",
            TokenClass::Operator => "delimiter.ts",
            TokenClass::Punctuation => "delimiter.ts",
            TokenClass::Comment => "comment.ts",
            TokenClass::NumberLiteral => "number.ts",
            TokenClass::StringLiteral => "string.ts",
            TokenClass::RegExpLiteral => "regexp.ts",
            TokenClass::Whitespace => "",
        },
        Dialect::JavaScript => match class {
            TokenClass::Identifier => "identifier.js",
            TokenClass::Keyword => "keyword.js",
            TokenClass::Operator => "delimiter.js",
            TokenClass::Punctuation => "delimiter.js",
            TokenClass::Comment => "comment.js",
            TokenClass::NumberLiteral => "number.js",
            TokenClass::StringLiteral => "string.js",
            TokenClass::RegExpLiteral => "regexp.js",
            TokenClass::Whitespace => "",
        },
    }
}

/// Scope for a documentation comment (`/** ... */`).
pub fn doc_comment_scope(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::TypeScript => "comment.doc.ts",
        Dialect::JavaScript => "comment.doc.js",
    }
}

/// Bracket-specific delimiter scope, if `ch` is one of `( ) { } [ ]`.
///
/// Punctuation outside this table falls back to the generic delimiter scope
/// from [`token_scope`].
pub fn bracket_scope(ch: char, dialect: Dialect) -> Option<&'static str> {
    let scope = match dialect {
        Dialect::TypeScript => match ch {
            '(' | ')' => "delimiter.parenthesis.ts",
            '{' | '}' => "delimiter.bracket.ts",
            '[' | ']' => "delimiter.array.ts",
            _ => return None,
        },
        Dialect::JavaScript => match ch {
            '(' | ')' => "delimiter.parenthesis.js",
            '{' | '}' => "delimiter.bracket.js",
            '[' | ']' => "delimiter.array.js",
            _ => return None,
        },
    };
    Some(scope)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_differ_only_by_suffix() {
        let classes = [
            TokenClass::Identifier,
            TokenClass::Keyword,
            TokenClass::Operator,
            TokenClass::Punctuation,
            TokenClass::Comment,
            TokenClass::NumberLiteral,
            TokenClass::StringLiteral,
            TokenClass::RegExpLiteral,
        ];
        for class in classes {
            let ts = token_scope(class, Dialect::TypeScript);
            let js = token_scope(class, Dialect::JavaScript);
            assert_eq!(ts.strip_suffix(".ts"), js.strip_suffix(".js"));
        }
    }

    #[test]
    fn whitespace_maps_to_empty_scope() {
        assert_eq!(token_scope(TokenClass::Whitespace, Dialect::TypeScript), "");
        assert_eq!(token_scope(TokenClass::Whitespace, Dialect::JavaScript), "");
    }

    #[test]
    fn brackets_resolve_per_pair() {
        assert_eq!(
            bracket_scope('(', Dialect::TypeScript),
            Some("delimiter.parenthesis.ts")
        );
        assert_eq!(
            bracket_scope('}', Dialect::JavaScript),
            Some("delimiter.bracket.js")
        );
        assert_eq!(
            bracket_scope(']', Dialect::TypeScript),
            Some("delimiter.array.ts")
        );
        assert_eq!(bracket_scope(':', Dialect::TypeScript), None);
        assert_eq!(bracket_scope(';', Dialect::JavaScript), None);
    }
}

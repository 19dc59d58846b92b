//! Incremental per-line tokenization for syntax highlighting
//!
//! The host editor calls [`Tokenizer::tokenize_line`] once per line, in line
//! order, feeding the end state of line *n* back in as the start state of
//! line *n + 1*. An edit invalidates state from the edited line onward; the
//! host compares the fresh end states against the ones it cached to decide
//! how far re-tokenization has to run.
//!
//! Two classification back-ends sit behind one output contract:
//!
//! - the **lexical path** ([`lexical`], JavaScript dialect): a line-local
//!   classifier with explicit continuation state, plus shebang detection and
//!   doc-comment threading;
//! - the **program-aware path** ([`program`], TypeScript dialect): a
//!   collaborator that classifies against the file's parsed representation
//!   and can tell type names, parameters, and JSX constructs apart.
//!
//! Whichever path runs, the output is the same shape: spans strictly
//! increasing by start offset, adjacent spans with identical scopes
//! coalesced.

pub mod classify;
mod lexical;
mod program;
pub mod scanner;
pub mod scopes;
pub mod state;

use std::fmt;

use serde::Serialize;

use crate::tokenizer::classify::{LexicalClassifier, ProgramClassifier};
use crate::tokenizer::scanner::Scanner;
use crate::tokenizer::scopes::Dialect;
use crate::tokenizer::state::LineState;

/// Errors surfaced by a tokenize call.
///
/// There is no retry and no partial output: a classifier failure or a
/// malformed classification propagates to the host as-is, since a wrong
/// token stream is worse than a missing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// The classifier collaborator itself failed.
    Classifier(String),
    /// A classification entry ran past the end of the line it classifies.
    EntryOverrun {
        line_number: usize,
        span_end: usize,
        line_len: usize,
    },
    /// A classification entry boundary fell inside a UTF-8 character.
    EntryMisaligned { line_number: usize, offset: usize },
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeError::Classifier(msg) => write!(f, "Classifier error: {}", msg),
            TokenizeError::EntryOverrun {
                line_number,
                span_end,
                line_len,
            } => write!(
                f,
                "Classification entry on line {} ends at byte {} past the line's length {}",
                line_number, span_end, line_len
            ),
            TokenizeError::EntryMisaligned { line_number, offset } => write!(
                f,
                "Classification entry on line {} splits a character at byte {}",
                line_number, offset
            ),
        }
    }
}

impl std::error::Error for TokenizeError {}

/// One styled span: a start column (character offset within the line) and a
/// dot-qualified scope name. The empty scope is a valid value for runs that
/// have no style of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenSpan {
    pub start_index: usize,
    pub scope: String,
}

/// Result of tokenizing one line: the ordered spans plus the state to feed
/// into the next line's call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTokens {
    pub tokens: Vec<TokenSpan>,
    pub end_state: LineState,
}

/// Append a span, coalescing with the previous one when the scope repeats.
pub(crate) fn append_span(tokens: &mut Vec<TokenSpan>, start_index: usize, scope: &str) {
    if tokens.last().map_or(true, |last| last.scope != scope) {
        tokens.push(TokenSpan {
            start_index,
            scope: scope.to_string(),
        });
    }
}

/// Classification strategy, fixed at tokenizer creation.
enum Backend {
    Lexical(Box<dyn LexicalClassifier>),
    Program(Box<dyn ProgramClassifier>),
}

/// Per-document tokenizer: dialect tables and classification back-end are
/// selected once at creation, then [`tokenize_line`](Self::tokenize_line)
/// runs as a pure function of `(state, text)`.
pub struct Tokenizer {
    dialect: Dialect,
    file_path: String,
    backend: Backend,
}

impl Tokenizer {
    /// JavaScript tokenizer backed by the built-in lexical [`Scanner`].
    pub fn javascript(file_path: impl Into<String>) -> Self {
        Tokenizer {
            dialect: Dialect::JavaScript,
            file_path: file_path.into(),
            backend: Backend::Lexical(Box::new(Scanner::new())),
        }
    }

    /// TypeScript tokenizer backed by a program-aware classifier.
    pub fn typescript(
        file_path: impl Into<String>,
        classifier: Box<dyn ProgramClassifier>,
    ) -> Self {
        Tokenizer {
            dialect: Dialect::TypeScript,
            file_path: file_path.into(),
            backend: Backend::Program(classifier),
        }
    }

    /// Tokenizer for either dialect driving a caller-supplied lexical
    /// classifier. This is the fallback for typed-dialect documents when no
    /// program-aware service is available: highlighting stays line-local but
    /// keeps the dialect's scope suffix.
    pub fn with_lexical_classifier(
        dialect: Dialect,
        file_path: impl Into<String>,
        classifier: Box<dyn LexicalClassifier>,
    ) -> Self {
        Tokenizer {
            dialect,
            file_path: file_path.into(),
            backend: Backend::Lexical(classifier),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The zero state for this document. Created once per document/model;
    /// every later state comes out of [`tokenize_line`](Self::tokenize_line).
    pub fn initial_state(&self) -> LineState {
        LineState::initial(self.dialect, self.file_path.clone())
    }

    /// Tokenize one line given the prior line's end state.
    ///
    /// `text` is the line without its terminator. The returned end state is
    /// the sole valid input for the next line; the input state is never
    /// mutated.
    pub fn tokenize_line(&self, state: &LineState, text: &str) -> Result<LineTokens, TokenizeError> {
        match &self.backend {
            Backend::Lexical(classifier) => lexical::tokenize_lexically(classifier.as_ref(), state, text),
            Backend::Program(classifier) => program::tokenize_with_program(classifier.as_ref(), state, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::classify::{ClassificationKind, ClassifiedSpan};

    struct EchoProgram;

    impl ProgramClassifier for EchoProgram {
        fn classify_line(
            &self,
            _file_path: &str,
            _line_start: usize,
            text: &str,
        ) -> Result<Vec<ClassifiedSpan>, TokenizeError> {
            Ok(vec![ClassifiedSpan {
                text: text.to_string(),
                kind: ClassificationKind::Comment,
            }])
        }
    }

    #[test]
    fn javascript_uses_the_lexical_path() {
        let tokenizer = Tokenizer::javascript("a.js");
        let state = tokenizer.initial_state();
        let result = tokenizer.tokenize_line(&state, "var x").unwrap();
        assert_eq!(result.tokens[0].scope, "keyword.js");
    }

    #[test]
    fn typescript_uses_the_program_path() {
        let tokenizer = Tokenizer::typescript("a.ts", Box::new(EchoProgram));
        let state = tokenizer.initial_state();
        let result = tokenizer.tokenize_line(&state, "anything").unwrap();
        assert_eq!(result.tokens[0].scope, "comment.ts");
    }

    #[test]
    fn initial_state_captures_file_identity() {
        let tokenizer = Tokenizer::javascript("src/app.js");
        let state = tokenizer.initial_state();
        assert_eq!(state.file_path, "src/app.js");
        assert_eq!(state.line_number, 0);
        assert_eq!(state.line_start_index, 0);
    }

    #[test]
    fn tokenizing_is_idempotent_for_equal_inputs() {
        let tokenizer = Tokenizer::javascript("");
        let state = tokenizer.initial_state();
        let first = tokenizer.tokenize_line(&state, "const a = `x`;").unwrap();
        let second = tokenizer.tokenize_line(&state, "const a = `x`;").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn append_span_coalesces_repeated_scopes() {
        let mut tokens = Vec::new();
        append_span(&mut tokens, 0, "delimiter.js");
        append_span(&mut tokens, 1, "delimiter.js");
        append_span(&mut tokens, 2, "string.js");
        append_span(&mut tokens, 5, "delimiter.js");
        assert_eq!(
            tokens
                .iter()
                .map(|t| (t.start_index, t.scope.as_str()))
                .collect::<Vec<_>>(),
            vec![(0, "delimiter.js"), (2, "string.js"), (5, "delimiter.js")]
        );
    }

    #[test]
    fn error_messages_name_the_violation() {
        let err = TokenizeError::EntryOverrun {
            line_number: 3,
            span_end: 12,
            line_len: 8,
        };
        assert!(err.to_string().contains("line 3"));
        let err = TokenizeError::Classifier("service went away".to_string());
        assert!(err.to_string().contains("service went away"));
    }
}

//! Per-line tokenizer state
//!
//! Tokenization is incremental: the host feeds the end state of line *n* back
//! in as the start state of line *n + 1*, and compares states to decide how
//! far a re-tokenization pass has to run after an edit. Everything needed to
//! resume scanning mid-construct (block comment, string, template) lives in
//! [`LineState`]; the classifiers themselves stay stateless between calls.

use serde::Serialize;

use crate::tokenizer::scopes::Dialect;

/// End-of-line continuation marker carried across line boundaries.
///
/// Mirrors the classifier's notion of "the line ended inside ...": the next
/// line's classification must resume in the same construct instead of
/// rescanning from the construct's opening line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LexMode {
    None,
    InMultiLineComment,
    InDoubleQuoteString,
    InSingleQuoteString,
    InTemplateLiteral,
}

/// State threaded from one tokenized line to the next.
///
/// Value object, immutable by convention: every `tokenize_line` call produces
/// a fresh end state and never mutates its input. Offsets count characters:
/// `line_start_index` is the cumulative character offset of the line's first
/// character within the file, advancing by `text.chars().count() + 1` per
/// line (the `+ 1` accounts for the line terminator).
#[derive(Debug, Clone, Serialize)]
pub struct LineState {
    pub dialect: Dialect,
    pub lex_mode: LexMode,
    pub in_doc_comment: bool,
    /// Owning file's identity; empty when the document has none.
    pub file_path: String,
    /// 0-based line number of the line this state is the *input* for.
    pub line_number: usize,
    pub line_start_index: usize,
}

impl LineState {
    /// The zero state for a fresh document: line 0, offset 0, no active modes.
    ///
    /// The file identity is captured once at tokenizer creation and never
    /// changes afterwards; the core treats it as a fixed input.
    pub fn initial(dialect: Dialect, file_path: impl Into<String>) -> Self {
        LineState {
            dialect,
            lex_mode: LexMode::None,
            in_doc_comment: false,
            file_path: file_path.into(),
            line_number: 0,
            line_start_index: 0,
        }
    }

    /// The end state for a line with this start state, before any
    /// continuation mode is recorded: line number advances by one, the start
    /// offset by the line's character length plus one for the terminator, and
    /// the mode/doc fields reset to their non-continuing values.
    pub fn advance_past(&self, text: &str) -> LineState {
        LineState {
            dialect: self.dialect,
            lex_mode: LexMode::None,
            in_doc_comment: false,
            file_path: self.file_path.clone(),
            line_number: self.line_number + 1,
            line_start_index: self.line_start_index + text.chars().count() + 1,
        }
    }
}

/// Equality deliberately ignores `dialect`.
///
/// The host compares states to decide whether downstream lines need
/// re-tokenizing. A document's dialect is fixed for its whole lifetime, so
/// including it could not change any such decision; the exclusion is kept
/// from the original contract rather than "fixed" (see DESIGN.md).
impl PartialEq for LineState {
    fn eq(&self, other: &Self) -> bool {
        self.lex_mode == other.lex_mode
            && self.in_doc_comment == other.in_doc_comment
            && self.file_path == other.file_path
            && self.line_number == other.line_number
            && self.line_start_index == other.line_start_index
    }
}

impl Eq for LineState {}

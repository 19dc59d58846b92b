//! Classifier contracts
//!
//! The tokenizer core does not scan source text itself; it drives one of two
//! collaborating classifiers and folds their output into scope-tagged spans:
//!
//! - [`LexicalClassifier`]: line-local classification with an explicit
//!   continuation mode, used for the JavaScript dialect (and as a fallback
//!   when no program-aware service is available). The crate ships a default
//!   implementation in [`scanner`](crate::tokenizer::scanner).
//! - [`ProgramClassifier`]: classification backed by the file's full parsed
//!   and type-checked representation, used for the TypeScript dialect. How
//!   the collaborator maps a (file, offset) pair back into its parse tree,
//!   and any per-file caching, is opaque to this core.
//!
//! Both are synchronous and expected to be deterministic for identical
//! inputs. Failures propagate to the host unswallowed; there is no retry.

use crate::tokenizer::state::LexMode;
use crate::tokenizer::TokenizeError;

/// Classification codes produced by the lexical path.
///
/// A small fixed set; codes this core does not map fall back to the empty
/// scope rather than erroring, so a classifier may grow new codes without
/// breaking the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Identifier,
    Keyword,
    Operator,
    Punctuation,
    Comment,
    Whitespace,
    NumberLiteral,
    StringLiteral,
    RegExpLiteral,
}

/// One contiguous run of the line with a single classification.
///
/// `length` is in UTF-8 bytes. Entries arrive in line order and must cover
/// the line exactly: the sum of lengths equals the line's byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationEntry {
    pub length: usize,
    pub class: TokenClass,
}

/// Full classification of one line by a [`LexicalClassifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClassification {
    pub entries: Vec<ClassificationEntry>,
    /// Continuation mode at end of line; the caller carries this into the
    /// next line's state so multi-line constructs resume correctly.
    pub final_lex_mode: LexMode,
}

/// Line-local classifier with cross-line continuation support.
///
/// Stateless between calls: all continuation state travels through the
/// `prior_mode` argument and the reported `final_lex_mode`, so one instance
/// may be shared across many lines and documents.
pub trait LexicalClassifier {
    fn classify_line(
        &self,
        text: &str,
        prior_mode: LexMode,
    ) -> Result<LineClassification, TokenizeError>;
}

/// Classification codes produced by the program-aware path.
///
/// Richer than [`TokenClass`]: the backing language service can tell type
/// names from value identifiers, spot JSX constructs, and report keywords by
/// their literal text. Codes without a scope mapping (whitespace included)
/// are dropped rather than emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationKind {
    NumericLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    Operator,
    Comment,
    ClassName,
    EnumName,
    InterfaceName,
    ModuleName,
    TypeParameterName,
    TypeAliasName,
    Keyword,
    Identifier,
    ParameterName,
    Punctuation,
    JsxOpenTagName,
    JsxCloseTagName,
    JsxSelfClosingTagName,
    JsxAttribute,
    JsxAttributeStringLiteralValue,
    WhiteSpace,
}

/// One classified run of line text from a [`ProgramClassifier`].
///
/// Spans arrive in line order and concatenate back to the full line text;
/// the tokenizer derives column offsets by accumulating `text` character
/// counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedSpan {
    pub text: String,
    pub kind: ClassificationKind,
}

/// Classifier that consults a file's parsed/type-checked representation.
///
/// `line_start` is the absolute character offset of the line within the file;
/// together with `file_path` it lets the collaborator locate the line in its
/// own (cached) view of the file. An empty `file_path` degrades to
/// classification without cross-file context, at the collaborator's
/// discretion.
pub trait ProgramClassifier {
    fn classify_line(
        &self,
        file_path: &str,
        line_start: usize,
        text: &str,
    ) -> Result<Vec<ClassifiedSpan>, TokenizeError>;
}

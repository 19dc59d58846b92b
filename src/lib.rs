//! # linescan
//!
//! An incremental, per-line tokenizer for TypeScript/JavaScript editor
//! syntax highlighting.
//!
//! Lines are tokenized one at a time, front to back; the end state of each
//! line is the start state of the next, so an edit only invalidates state
//! from the edited line onward. See the [tokenizer] module for the two
//! classification back-ends and the span output contract.

pub mod tokenizer;

pub use tokenizer::classify::{
    ClassificationEntry, ClassificationKind, ClassifiedSpan, LexicalClassifier,
    LineClassification, ProgramClassifier, TokenClass,
};
pub use tokenizer::scanner::Scanner;
pub use tokenizer::scopes::Dialect;
pub use tokenizer::state::{LexMode, LineState};
pub use tokenizer::{LineTokens, TokenSpan, TokenizeError, Tokenizer};

//! Lexical tokenizer path
//!
//! Drives a [`LexicalClassifier`] one line at a time and folds its
//! classification entries into scope-tagged spans: brackets resolve through
//! the bracket table, comments are promoted to documentation comments when
//! the line is inside a `/** ... */` block, and everything else goes through
//! the dialect's token-type table. The doc-comment decision threads through
//! [`LineState::in_doc_comment`] so a JSDoc block spanning many lines
//! highlights correctly without rescanning from its opening line.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tokenizer::classify::{LexicalClassifier, TokenClass};
use crate::tokenizer::scopes::{bracket_scope, doc_comment_scope, token_scope, Dialect, SHEBANG_SCOPE};
use crate::tokenizer::state::{LexMode, LineState};
use crate::tokenizer::{append_span, LineTokens, TokenizeError};

/// A doc comment opens somewhere on the line and runs to its end.
static DOC_COMMENT_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*\*.*$").unwrap());

/// A doc comment both opens and closes within a single classified entry.
static DOC_COMMENT_COMPLETE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*\*.*\*/").unwrap());

pub(crate) fn tokenize_lexically(
    classifier: &dyn LexicalClassifier,
    state: &LineState,
    text: &str,
) -> Result<LineTokens, TokenizeError> {
    let mut end_state = state.advance_past(text);
    let mut tokens = Vec::new();

    // A shebang can only be the very first line of an untyped-dialect
    // document; on any other line `#!` is ordinary source text.
    if state.dialect == Dialect::JavaScript && state.line_number == 0 && text.starts_with("#!") {
        append_span(&mut tokens, 0, SHEBANG_SCOPE);
        return Ok(LineTokens { tokens, end_state });
    }

    let classification = classifier.classify_line(text, state.lex_mode)?;
    end_state.lex_mode = classification.final_lex_mode;
    // The doc flag only survives while the line still ends inside the block
    // comment; once the block closes the flag resets with it.
    end_state.in_doc_comment = classification.final_lex_mode == LexMode::InMultiLineComment
        && (state.in_doc_comment || DOC_COMMENT_OPEN.is_match(text));

    // Entry lengths are byte lengths of the line's UTF-8 text; the emitted
    // span starts are character columns, so both cursors run together.
    let mut offset = 0usize;
    let mut column = 0usize;
    for entry in &classification.entries {
        let end = offset + entry.length;
        if end > text.len() {
            return Err(TokenizeError::EntryOverrun {
                line_number: state.line_number,
                span_end: end,
                line_len: text.len(),
            });
        }

        let entry_text = text.get(offset..end).ok_or(TokenizeError::EntryMisaligned {
            line_number: state.line_number,
            offset,
        })?;

        match entry.class {
            TokenClass::Punctuation => {
                let ch = entry_text.chars().next().unwrap_or('\0');
                let scope = bracket_scope(ch, state.dialect)
                    .unwrap_or_else(|| token_scope(TokenClass::Punctuation, state.dialect));
                append_span(&mut tokens, column, scope);
            }
            TokenClass::Comment => {
                let is_doc = state.in_doc_comment
                    || end_state.in_doc_comment
                    || DOC_COMMENT_COMPLETE.is_match(entry_text);
                let scope = if is_doc {
                    doc_comment_scope(state.dialect)
                } else {
                    token_scope(TokenClass::Comment, state.dialect)
                };
                append_span(&mut tokens, column, scope);
            }
            other => append_span(&mut tokens, column, token_scope(other, state.dialect)),
        }

        offset = end;
        column += entry_text.chars().count();
    }

    Ok(LineTokens { tokens, end_state })
}

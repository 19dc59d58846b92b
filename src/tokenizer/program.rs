//! Program-aware tokenizer path
//!
//! Drives a [`ProgramClassifier`] — a collaborator that classifies tokens
//! against the file's full parsed and type-checked representation — and maps
//! its richer classification set onto scope names. This is what lets the
//! typed dialect distinguish a type name from a value identifier or style
//! JSX tags, which no line-local lexer can do.
//!
//! This path carries no lexical continuation state: the backing service
//! already resolves multi-line constructs internally, so the end state only
//! advances the line number and start offset.

use crate::tokenizer::classify::{ClassificationKind, ClassifiedSpan, ProgramClassifier};
use crate::tokenizer::state::LineState;
use crate::tokenizer::{append_span, LineTokens, TokenizeError};

pub(crate) fn tokenize_with_program(
    classifier: &dyn ProgramClassifier,
    state: &LineState,
    text: &str,
) -> Result<LineTokens, TokenizeError> {
    let end_state = state.advance_past(text);
    let spans = classifier.classify_line(&state.file_path, state.line_start_index, text)?;

    // Spans are matched against the line with a byte cursor (for slicing in
    // the definition heuristic); the emitted starts are character columns.
    let mut tokens = Vec::new();
    let mut offset = 0usize;
    let mut column = 0usize;
    for span in &spans {
        let end = offset + span.text.len();
        if end > text.len() {
            return Err(TokenizeError::EntryOverrun {
                line_number: state.line_number,
                span_end: end,
                line_len: text.len(),
            });
        }
        if let Some(base) = style_for_span(span, text, offset) {
            let scope = format!("{}{}", base, state.dialect.suffix());
            append_span(&mut tokens, column, &scope);
        }
        offset = end;
        column += span.text.chars().count();
    }

    Ok(LineTokens { tokens, end_state })
}

/// Base scope (without dialect suffix) for one classified span, or `None`
/// when the span has nothing to emit (whitespace, unrecognized codes).
fn style_for_span(span: &ClassifiedSpan, line: &str, offset: usize) -> Option<&'static str> {
    match span.kind {
        ClassificationKind::NumericLiteral => Some("constant.numeric"),
        ClassificationKind::StringLiteral => Some("string"),
        ClassificationKind::RegularExpressionLiteral => Some("constant.character"),
        ClassificationKind::Operator => Some("keyword.operator"),
        ClassificationKind::Comment => Some("comment"),
        ClassificationKind::ClassName
        | ClassificationKind::EnumName
        | ClassificationKind::InterfaceName
        | ClassificationKind::ModuleName
        | ClassificationKind::TypeParameterName
        | ClassificationKind::TypeAliasName => Some("variable-2"),
        ClassificationKind::Keyword => Some(match span.text.as_str() {
            // Primitive type keywords style like type names.
            "string" | "number" | "void" | "bool" | "boolean" => "variable-2",
            "static" | "public" | "private" | "get" | "set" => "qualifier",
            "function" | "var" | "let" | "const" => "qualifier",
            // Historical quirk kept for theme compatibility: `this` styles
            // like a constant.
            "this" => "number",
            _ => "keyword",
        }),
        ClassificationKind::Identifier => {
            // Heuristic, not a parse: only the trailing characters of the
            // text before the span on this line are inspected, so it can
            // misfire across line boundaries or inside strings.
            let preceding = line.get(..offset).map(str::trim_end).unwrap_or("");
            if preceding.ends_with("let")
                || preceding.ends_with("const")
                || preceding.ends_with("var")
            {
                Some("def")
            } else {
                Some("variable")
            }
        }
        ClassificationKind::ParameterName => Some("variable.parameter"),
        ClassificationKind::Punctuation => Some(match span.text.as_str() {
            "{" | "}" => "delimiter.bracket",
            "(" | ")" => "delimiter.parenthesis",
            _ => "bracket",
        }),
        ClassificationKind::JsxOpenTagName
        | ClassificationKind::JsxCloseTagName
        | ClassificationKind::JsxSelfClosingTagName => Some("tag"),
        ClassificationKind::JsxAttribute => Some("property"),
        ClassificationKind::JsxAttributeStringLiteralValue => Some("string"),
        ClassificationKind::WhiteSpace => None,
    }
}

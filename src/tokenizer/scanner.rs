//! Built-in lexical classifier
//!
//! A line-local classifier for the ECMAScript/TypeScript token set
//! implementing [`LexicalClassifier`]. The single-line token shapes (keywords,
//! identifiers, numbers, operators, punctuation, comments, terminated
//! strings) are recognized by a logos-derived [`RawToken`] lexer; a thin
//! resumable wrapper around it handles everything that crosses a line
//! boundary: resuming a block comment, string, or template entered on a prior
//! line, and reporting unterminated constructs through `final_lex_mode`. The
//! scanner itself stays stateless and can be shared across documents.
//!
//! Classification entries cover the line exactly, in order, with byte lengths
//! summing to the line's byte length. Punctuation is emitted one character
//! per entry so the downstream bracket table can resolve each character
//! individually; operator runs and whitespace runs are emitted as single
//! entries.
//!
//! Template literals are classified as a single string run, including any
//! `${...}` interior. Regex literals are told apart from division by the
//! class of the previous significant token, a standard lexer heuristic; that
//! decision is context-dependent, so the wrapper makes it and restarts the
//! raw lexer past the literal.

use std::collections::HashSet;

use logos::Logos;
use once_cell::sync::Lazy;

use crate::tokenizer::classify::{
    ClassificationEntry, LexicalClassifier, LineClassification, TokenClass,
};
use crate::tokenizer::state::LexMode;
use crate::tokenizer::TokenizeError;

/// Reserved words of both dialects, classified as [`TokenClass::Keyword`].
static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "abstract",
        "any",
        "as",
        "async",
        "await",
        "boolean",
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "declare",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "from",
        "function",
        "get",
        "if",
        "implements",
        "import",
        "in",
        "instanceof",
        "interface",
        "is",
        "keyof",
        "let",
        "module",
        "namespace",
        "never",
        "new",
        "null",
        "number",
        "of",
        "package",
        "private",
        "protected",
        "public",
        "readonly",
        "return",
        "set",
        "static",
        "string",
        "super",
        "switch",
        "symbol",
        "this",
        "throw",
        "true",
        "try",
        "type",
        "typeof",
        "undefined",
        "var",
        "void",
        "while",
        "with",
        "yield",
    ]
    .into_iter()
    .collect()
});

/// Raw single-line token set. Strings and block comments match in both their
/// terminated and unterminated-at-end-of-line forms; the wrapper inspects the
/// matched text to decide which continuation mode, if any, to report.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[regex(r"\s+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*(\*/|\*?)")]
    BlockComment,

    #[regex(r#""([^"\\]|\\.)*("|\\)?"#)]
    DoubleQuoted,

    #[regex(r"'([^'\\]|\\.)*('|\\)?")]
    SingleQuoted,

    #[regex(r"`([^`\\]|\\.)*(`|\\)?")]
    Template,

    #[regex(r"0[xX][0-9a-fA-F_]+")]
    #[regex(r"0[bB][01_]+")]
    #[regex(r"0[oO][0-7_]+")]
    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r"[\p{XID_Start}$_][\p{XID_Continue}$]*")]
    Word,

    #[regex(r"[+\-*/%=<>!&|^~?]")]
    OperatorChar,

    #[token("(")]
    #[token(")")]
    #[token("{")]
    #[token("}")]
    #[token("[")]
    #[token("]")]
    #[token(";")]
    #[token(",")]
    #[token(".")]
    #[token(":")]
    Punct,
}

/// Default [`LexicalClassifier`] implementation.
#[derive(Debug, Default)]
pub struct Scanner;

impl Scanner {
    pub fn new() -> Self {
        Scanner
    }
}

impl LexicalClassifier for Scanner {
    fn classify_line(
        &self,
        text: &str,
        prior_mode: LexMode,
    ) -> Result<LineClassification, TokenizeError> {
        Ok(classify(text, prior_mode))
    }
}

/// Outcome of scanning a string/template body for its closing delimiter.
struct BodyScan {
    /// Bytes consumed, up to and including the closing delimiter if found.
    consumed: usize,
    closed: bool,
    /// Line ended with an escape pending (a lone `\` before the terminator).
    escaped_eol: bool,
}

fn classify(text: &str, prior_mode: LexMode) -> LineClassification {
    let mut entries: Vec<ClassificationEntry> = Vec::new();
    let mut pos = 0usize;
    // Class and final character of the previous significant (non-trivia)
    // token, for the regex-vs-division decision.
    let mut prev: Option<(TokenClass, char)> = None;

    // Resume a construct left open on the previous line.
    match prior_mode {
        LexMode::None => {}
        LexMode::InMultiLineComment => match text.find("*/") {
            Some(idx) => {
                push(&mut entries, idx + 2, TokenClass::Comment);
                pos = idx + 2;
            }
            None => {
                push(&mut entries, text.len(), TokenClass::Comment);
                return LineClassification {
                    entries,
                    final_lex_mode: LexMode::InMultiLineComment,
                };
            }
        },
        LexMode::InDoubleQuoteString | LexMode::InSingleQuoteString => {
            let quote = if prior_mode == LexMode::InDoubleQuoteString {
                '"'
            } else {
                '\''
            };
            let scan = scan_string_body(text, quote);
            push(&mut entries, scan.consumed, TokenClass::StringLiteral);
            pos = scan.consumed;
            if !scan.closed {
                let mode = if scan.escaped_eol { prior_mode } else { LexMode::None };
                return LineClassification {
                    entries,
                    final_lex_mode: mode,
                };
            }
            prev = Some((TokenClass::StringLiteral, quote));
        }
        LexMode::InTemplateLiteral => {
            let scan = scan_string_body(text, '`');
            push(&mut entries, scan.consumed, TokenClass::StringLiteral);
            pos = scan.consumed;
            if !scan.closed {
                return LineClassification {
                    entries,
                    final_lex_mode: LexMode::InTemplateLiteral,
                };
            }
            prev = Some((TokenClass::StringLiteral, '`'));
        }
    }

    let mut final_mode = LexMode::None;

    // The raw lexer is restarted after every hand-scanned regex literal; that
    // is the only token the wrapper takes over mid-stream.
    'scan: while pos < text.len() {
        let mut lexer = RawToken::lexer(&text[pos..]);
        while let Some(raw) = lexer.next() {
            let slice = lexer.slice();
            let at = pos + lexer.span().start;
            match raw {
                Ok(RawToken::Whitespace) => {
                    push(&mut entries, slice.len(), TokenClass::Whitespace);
                }
                Ok(RawToken::LineComment) => {
                    push(&mut entries, slice.len(), TokenClass::Comment);
                }
                Ok(RawToken::BlockComment) => {
                    push(&mut entries, slice.len(), TokenClass::Comment);
                    if !block_comment_closed(slice) {
                        final_mode = LexMode::InMultiLineComment;
                    }
                }
                Ok(RawToken::DoubleQuoted)
                | Ok(RawToken::SingleQuoted)
                | Ok(RawToken::Template) => {
                    push(&mut entries, slice.len(), TokenClass::StringLiteral);
                    let quote = slice.chars().next().unwrap_or('"');
                    let body = scan_string_body(&slice[1..], quote);
                    if body.closed {
                        prev = Some((TokenClass::StringLiteral, quote));
                    } else {
                        final_mode = match quote {
                            '`' => LexMode::InTemplateLiteral,
                            '"' if body.escaped_eol => LexMode::InDoubleQuoteString,
                            '\'' if body.escaped_eol => LexMode::InSingleQuoteString,
                            _ => LexMode::None,
                        };
                    }
                }
                Ok(RawToken::Number) => {
                    push(&mut entries, slice.len(), TokenClass::NumberLiteral);
                    prev = Some((TokenClass::NumberLiteral, last_char(slice)));
                }
                Ok(RawToken::Word) => {
                    let class = if KEYWORDS.contains(slice) {
                        TokenClass::Keyword
                    } else {
                        TokenClass::Identifier
                    };
                    push(&mut entries, slice.len(), class);
                    prev = Some((class, last_char(slice)));
                }
                Ok(RawToken::OperatorChar) => {
                    let ch = slice.chars().next().unwrap_or('\0');
                    if ch == '/' && regex_allowed(&prev) {
                        if let Some(body) = scan_regex_body(&text[at + 1..]) {
                            let len = 1 + body;
                            push(&mut entries, len, TokenClass::RegExpLiteral);
                            prev = Some((TokenClass::RegExpLiteral, last_char(&text[at..at + len])));
                            pos = at + len;
                            continue 'scan;
                        }
                    }
                    push_operator(&mut entries, slice.len());
                    prev = Some((TokenClass::Operator, ch));
                }
                Ok(RawToken::Punct) => {
                    push(&mut entries, slice.len(), TokenClass::Punctuation);
                    prev = Some((TokenClass::Punctuation, slice.chars().next().unwrap_or('\0')));
                }
                // Anything the raw lexer rejects is punctuation, one
                // character per entry so brackets resolve individually.
                Err(_) => {
                    for ch in slice.chars() {
                        push(&mut entries, ch.len_utf8(), TokenClass::Punctuation);
                        prev = Some((TokenClass::Punctuation, ch));
                    }
                }
            }
        }
        break;
    }

    LineClassification {
        entries,
        final_lex_mode: final_mode,
    }
}

fn push(entries: &mut Vec<ClassificationEntry>, length: usize, class: TokenClass) {
    if length > 0 {
        entries.push(ClassificationEntry { length, class });
    }
}

/// Operator characters lex one at a time (so `//` and `/*` stay comments and
/// a lone `/` can become a regex); consecutive ones fold back into a run.
fn push_operator(entries: &mut Vec<ClassificationEntry>, length: usize) {
    if let Some(last) = entries.last_mut() {
        if last.class == TokenClass::Operator {
            last.length += length;
            return;
        }
    }
    push(entries, length, TokenClass::Operator);
}

/// The block comment pattern also matches an unterminated `/* ...` running to
/// end of line; terminated means the match carries its own `*/`, not one
/// overlapping the opener.
fn block_comment_closed(s: &str) -> bool {
    s.len() >= 4 && s.ends_with("*/")
}

fn last_char(s: &str) -> char {
    s.chars().next_back().unwrap_or('\0')
}

/// A regex literal may only start where an expression may start; after a
/// value-like token a `/` is division. Line-local, like the rest of the
/// scanner, so the first token of a line defaults to "expression position".
fn regex_allowed(prev: &Option<(TokenClass, char)>) -> bool {
    match prev {
        None => true,
        Some((TokenClass::Operator, _)) => true,
        Some((TokenClass::Keyword, _)) => true,
        Some((TokenClass::Punctuation, c)) => !matches!(c, ')' | ']'),
        _ => false,
    }
}

/// Scan a string/template body for `quote`, honoring backslash escapes.
/// `s` starts just after the opening delimiter (or at the start of a
/// continuation line).
fn scan_string_body(s: &str, quote: char) -> BodyScan {
    let mut iter = s.char_indices();
    while let Some((i, c)) = iter.next() {
        if c == '\\' {
            if iter.next().is_none() {
                // Escape pending at end of line: the terminator is escaped
                // and the string continues on the next line.
                return BodyScan {
                    consumed: s.len(),
                    closed: false,
                    escaped_eol: true,
                };
            }
            continue;
        }
        if c == quote {
            return BodyScan {
                consumed: i + c.len_utf8(),
                closed: true,
                escaped_eol: false,
            };
        }
    }
    BodyScan {
        consumed: s.len(),
        closed: false,
        escaped_eol: false,
    }
}

/// Scan a regex body starting just after the opening `/`. Returns the byte
/// length through the closing `/` plus any flag letters, or `None` when the
/// literal does not terminate on this line (then it was not a regex).
fn scan_regex_body(s: &str) -> Option<usize> {
    let mut in_class = false;
    let mut iter = s.char_indices();
    while let Some((i, c)) = iter.next() {
        match c {
            '\\' => {
                iter.next()?;
            }
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                let mut end = i + 1;
                for (j, f) in s[i + 1..].char_indices() {
                    if !f.is_ascii_alphabetic() {
                        break;
                    }
                    end = i + 1 + j + f.len_utf8();
                }
                return Some(end);
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(text: &str, prior: LexMode) -> (Vec<(usize, TokenClass)>, LexMode) {
        let result = classify(text, prior);
        (
            result
                .entries
                .iter()
                .map(|e| (e.length, e.class))
                .collect(),
            result.final_lex_mode,
        )
    }

    #[test]
    fn entries_cover_the_line() {
        for line in [
            "const x = 1;",
            "foo({a: 1})",
            "let s = \"hi\\\"there\";",
            "  // trailing comment",
            "a /= b / c",
            "",
            "\t\t",
        ] {
            let result = classify(line, LexMode::None);
            let total: usize = result.entries.iter().map(|e| e.length).sum();
            assert_eq!(total, line.len(), "coverage of {line:?}");
        }
    }

    #[test]
    fn keywords_and_identifiers() {
        let (entries, mode) = classes("const x = 1;", LexMode::None);
        let significant: Vec<TokenClass> = entries
            .iter()
            .map(|&(_, c)| c)
            .filter(|c| *c != TokenClass::Whitespace)
            .collect();
        assert_eq!(
            significant,
            vec![
                TokenClass::Keyword,
                TokenClass::Identifier,
                TokenClass::Operator,
                TokenClass::NumberLiteral,
                TokenClass::Punctuation,
            ]
        );
        assert_eq!(mode, LexMode::None);
    }

    #[test]
    fn unicode_identifier_is_one_entry() {
        let (entries, _) = classes("émoji = 1", LexMode::None);
        assert_eq!(entries[0], ("émoji".len(), TokenClass::Identifier));
    }

    #[test]
    fn punctuation_is_one_entry_per_character() {
        let (entries, _) = classes("({[]})", LexMode::None);
        assert_eq!(entries.len(), 6);
        assert!(entries
            .iter()
            .all(|&(len, c)| len == 1 && c == TokenClass::Punctuation));
    }

    #[test]
    fn unrecognized_characters_fall_back_to_punctuation() {
        let (entries, _) = classes("#!", LexMode::None);
        assert_eq!(entries[0], (1, TokenClass::Punctuation));
    }

    #[test]
    fn line_comment_runs_to_end_of_line() {
        let (entries, mode) = classes("x // rest of line ", LexMode::None);
        assert_eq!(entries.last().unwrap().1, TokenClass::Comment);
        assert_eq!(mode, LexMode::None);
    }

    #[test]
    fn unterminated_block_comment_reports_continuation() {
        let (entries, mode) = classes("code(); /* open", LexMode::None);
        assert_eq!(entries.last().unwrap().1, TokenClass::Comment);
        assert_eq!(mode, LexMode::InMultiLineComment);
    }

    #[test]
    fn block_comment_resumes_and_closes() {
        let (entries, mode) = classes(" still comment */ after()", LexMode::InMultiLineComment);
        assert_eq!(entries[0], (" still comment */".len(), TokenClass::Comment));
        assert_eq!(mode, LexMode::None);
        assert!(entries
            .iter()
            .any(|&(_, c)| c == TokenClass::Identifier));
    }

    #[test]
    fn block_comment_spanning_whole_line_stays_open() {
        let (entries, mode) = classes("middle of the comment", LexMode::InMultiLineComment);
        assert_eq!(entries, vec![(21, TokenClass::Comment)]);
        assert_eq!(mode, LexMode::InMultiLineComment);
    }

    #[test]
    fn terminated_block_comment_is_one_entry() {
        let (entries, mode) = classes("/* a ** b */ x", LexMode::None);
        assert_eq!(entries[0], ("/* a ** b */".len(), TokenClass::Comment));
        assert_eq!(mode, LexMode::None);
    }

    #[test]
    fn string_with_escaped_terminator_continues() {
        let (_, mode) = classes("let s = \"unfinished\\", LexMode::None);
        assert_eq!(mode, LexMode::InDoubleQuoteString);

        let (entries, mode) = classes("rest of string\";", LexMode::InDoubleQuoteString);
        assert_eq!(entries[0], (15, TokenClass::StringLiteral));
        assert_eq!(mode, LexMode::None);
    }

    #[test]
    fn unterminated_string_without_escape_does_not_continue() {
        let (entries, mode) = classes("let s = \"broken", LexMode::None);
        assert_eq!(entries.last().unwrap().1, TokenClass::StringLiteral);
        assert_eq!(mode, LexMode::None);
    }

    #[test]
    fn template_literal_spans_lines() {
        let (_, mode) = classes("let t = `first", LexMode::None);
        assert_eq!(mode, LexMode::InTemplateLiteral);

        let (entries, mode) = classes("second ${x} last`;", LexMode::InTemplateLiteral);
        assert_eq!(entries[0], (17, TokenClass::StringLiteral));
        assert_eq!(mode, LexMode::None);
    }

    #[test]
    fn regex_after_operator_division_after_value() {
        let (entries, _) = classes("x = /ab+c/g;", LexMode::None);
        assert!(entries
            .iter()
            .any(|&(len, c)| c == TokenClass::RegExpLiteral && len == "/ab+c/g".len()));

        let (entries, _) = classes("a / b", LexMode::None);
        assert!(!entries.iter().any(|&(_, c)| c == TokenClass::RegExpLiteral));
        assert!(entries.iter().any(|&(_, c)| c == TokenClass::Operator));
    }

    #[test]
    fn regex_character_class_may_contain_slash() {
        let (entries, _) = classes("x = /[/]/;", LexMode::None);
        assert!(entries
            .iter()
            .any(|&(len, c)| c == TokenClass::RegExpLiteral && len == "/[/]/".len()));
    }

    #[test]
    fn numbers_in_common_notations() {
        for (line, expected) in [
            ("42", 2),
            ("3.14", 4),
            ("0xFF_EC", 7),
            ("0b1010", 6),
            ("1e-9", 4),
            (".5", 2),
        ] {
            let (entries, _) = classes(line, LexMode::None);
            assert_eq!(
                entries[0],
                (expected, TokenClass::NumberLiteral),
                "number {line:?}"
            );
        }
    }

    #[test]
    fn operator_characters_fold_into_one_run() {
        let (entries, _) = classes("a === b", LexMode::None);
        assert!(entries
            .iter()
            .any(|&(len, c)| c == TokenClass::Operator && len == 3));
    }

    #[test]
    fn comment_adjacent_to_operator_run() {
        let (entries, _) = classes("a+=/*c*/b", LexMode::None);
        let kinds: Vec<TokenClass> = entries.iter().map(|&(_, c)| c).collect();
        assert_eq!(
            kinds,
            vec![
                TokenClass::Identifier,
                TokenClass::Operator,
                TokenClass::Comment,
                TokenClass::Identifier,
            ]
        );
    }

    #[test]
    fn deterministic_for_identical_input() {
        let line = "const re = /a\\/b/; // done";
        assert_eq!(classify(line, LexMode::None), classify(line, LexMode::None));
    }
}

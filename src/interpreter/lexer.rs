use logos::{FilterResult, Logos};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
pub enum Token {
    /// Integer literal tokens, such as `42`. Unary minus is a separate
    /// token, so the literal itself is always non-negative.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens. The lexer resolves the `\\`, `\"`, `\n`, and
    /// `\t` escapes; any other escape is an error.
    #[token("\"", lex_string)]
    Str(String),
    /// Boolean literal tokens, `true` or `false`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `let`
    #[token("let")]
    Let,
    /// `rec`
    #[token("rec")]
    Rec,
    /// `in`
    #[token("in")]
    In,
    /// `if`
    #[token("if")]
    If,
    /// `then`
    #[token("then")]
    Then,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `do`
    #[token("do")]
    Do,
    /// `done`
    #[token("done")]
    Done,
    /// `type`
    #[token("type")]
    Type,
    /// `mutable`
    #[token("mutable")]
    Mutable,
    /// `fun`
    #[token("fun")]
    Fun,
    /// `int`
    #[token("int")]
    IntType,
    /// `bool`
    #[token("bool")]
    BoolType,
    /// `unit`
    #[token("unit")]
    UnitType,
    /// `string`
    #[token("string")]
    StringType,
    /// `array`
    #[token("array")]
    Array,
    /// `mod`
    #[token("mod")]
    Mod,
    /// Identifier tokens; variable, function, field, or record names.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `(* Block comments. *)` They nest and may span lines; the token is
    /// never emitted.
    #[token("(*", lex_block_comment)]
    BlockComment,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `.(`, opening an array index; closed by an ordinary `)`.
    #[token(".(")]
    DotParen,
    /// `.`
    #[token(".")]
    Dot,
    /// `<-`
    #[token("<-")]
    LeftArrow,
    /// `->`
    #[token("->")]
    Arrow,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `&&`
    #[token("&&")]
    DoubleAmp,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `!`
    #[token("!")]
    Bang,

    /// Newlines advance the line counter and are otherwise skipped.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, and feeds.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// The kind of lexing failure, before the source line is attached.
///
/// The lexer loop in [`crate::run_program`] pairs the kind with the line
/// from [`LexerExtras`] and the offending slice to build the full
/// [`crate::error::LexError`]. `BadChar` is the default kind, produced
/// whenever no token matches.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LexErrorKind {
    /// A character that belongs to no token, or an unknown string escape.
    #[default]
    BadChar,
    /// End of input inside a `(* ... *)` comment.
    UnterminatedComment,
    /// End of input inside a string literal.
    UnterminatedString,
    /// Integer literal outside the 64-bit signed range.
    IntOverflow,
}

/// Parses an integer literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Ok(i64)`: The parsed integer value.
/// - `Err(IntOverflow)`: If the literal does not fit a 64-bit signed
///   integer.
fn parse_integer(lex: &logos::Lexer<Token>) -> Result<i64, LexErrorKind> {
    lex.slice().parse().map_err(|_| LexErrorKind::IntOverflow)
}

/// Parses a boolean literal from the current token slice (`true` or
/// `false`).
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Lexes the remainder of a string literal, starting just after the opening
/// quote.
///
/// Consumes up to and including the closing quote, resolving the four
/// escapes `\\`, `\"`, `\n`, and `\t`. Strings may span lines; embedded
/// newlines advance the line counter. Non-ASCII text is permitted inside
/// the literal.
///
/// # Returns
/// - `Ok(String)`: The literal's value with escapes resolved.
/// - `Err(UnterminatedString)`: If the input ends before the closing quote.
/// - `Err(BadChar)`: On an unknown escape.
fn lex_string(lex: &mut logos::Lexer<Token>) -> Result<String, LexErrorKind> {
    let mut value = String::new();
    let mut chars = lex.remainder().char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                lex.bump(i + 1);
                return Ok(value);
            },
            '\\' => match chars.next() {
                Some((_, '\\')) => value.push('\\'),
                Some((_, '"')) => value.push('"'),
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some(_) => return Err(LexErrorKind::BadChar),
                None => return Err(LexErrorKind::UnterminatedString),
            },
            '\n' => {
                lex.extras.line += 1;
                value.push('\n');
            },
            _ => value.push(c),
        }
    }

    Err(LexErrorKind::UnterminatedString)
}

/// Lexes a block comment, starting just after the opening `(*`.
///
/// Comments nest: each `(*` increments and each `*)` decrements a depth
/// counter, and the comment ends when the depth returns to zero. Newlines
/// inside the comment advance the line counter. The whole comment is
/// skipped; end of input before the comment closes is an error.
fn lex_block_comment(lex: &mut logos::Lexer<Token>) -> FilterResult<(), LexErrorKind> {
    let bytes = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'(' if bytes.get(i + 1) == Some(&b'*') => {
                depth += 1;
                i += 2;
            },
            b'*' if bytes.get(i + 1) == Some(&b')') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    lex.bump(i);
                    return FilterResult::Skip;
                }
            },
            b'\n' => {
                lex.extras.line += 1;
                i += 1;
            },
            _ => i += 1,
        }
    }

    FilterResult::Error(LexErrorKind::UnterminatedComment)
}

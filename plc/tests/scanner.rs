use plc::{LexError, Scanner, TokenKind, TokenKind::*};

fn case(code: &str, expects: Vec<TokenKind>) {
    let tokens: Vec<_> = Scanner::new(code)
        .collect::<Result<_, _>>()
        .unwrap_or_else(|e| panic!("lexical error in {code:?}: {e}"));

    println!(" {code}");
    for (idx, token) in tokens.iter().enumerate() {
        println!("{:>2}: {:<3} {:?} {:?}", idx, token.line, token.kind, token.lexeme);
    }

    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, expects);
}

fn fails(code: &str) -> LexError {
    match Scanner::new(code).find_map(Result::err) {
        Some(e) => e,
        None => panic!("expected lexical error in {code:?}"),
    }
}

macro_rules! case {
    ($name:ident, $code:expr, $expect:expr) => {
        #[test]
        fn $name() {
            case($code, $expect);
        }
    };
}

// ---- Double-char operators ----
case!(assign, ":=", vec![Assign]);
case!(less_equal, "<=", vec![LessEqual]);
case!(not_equal, "<>", vec![NotEqual]);
case!(greater_equal, ">=", vec![GreaterEqual]);

// ---- Single-char operators ----
case!(colon, ":", vec![Colon]);
case!(less, "<", vec![Less]);
case!(greater, ">", vec![Greater]);
case!(
    punctuation,
    "; , . + - * / ( ) =",
    vec![Semicolon, Comma, Period, Plus, Minus, Star, Slash, LParen, RParen, Equal]
);
case!(greater_then_less, "><", vec![Greater, Less]);

// ---- Keywords ----
case!(keywords_lower, "program var begin end", vec![Program, Var, Begin, End]);
case!(keywords_upper, "PROGRAM VAR BEGIN END", vec![Program, Var, Begin, End]);
case!(keywords_mixed, "If tHeN eLsE", vec![If, Then, Else]);
case!(
    keywords_ops,
    "div mod and or not true false",
    vec![Div, Mod, And, Or, Not, True, False]
);
case!(keyword_prefix, "beginx end_ iff", vec![Ident, Ident, Ident]);

// ---- Identifiers and numbers ----
case!(ident_underscore, "_tmp x1 a_b_c", vec![Ident, Ident, Ident]);
case!(number_then_ident, "12ab", vec![Number, Ident]);

// ---- Comments ----
case!(block_comment, "a (* b c *) d", vec![Ident, Ident]);
case!(block_comment_stars, "a (** b **) d", vec![Ident, Ident]);
case!(line_comment, "a // b c\nd", vec![Ident, Ident]);
case!(paren_not_comment, "(a)", vec![LParen, Ident, RParen]);
case!(slash_not_comment, "a / b", vec![Ident, Slash, Ident]);
case!(empty, "  \n\t ", vec![]);

#[test]
fn lexeme_value_and_line() {
    let tokens: Vec<_> = Scanner::new("x\n  := 42\n\n(* c\n *) y")
        .collect::<Result<_, _>>()
        .unwrap();
    let summary: Vec<_> = tokens
        .iter()
        .map(|t| (t.kind, t.lexeme, t.line, t.value))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Ident, "x", 1, None),
            (Assign, ":=", 2, None),
            (Number, "42", 2, Some(42)),
            (Ident, "y", 5, None),
        ]
    );
}

#[test]
fn keyword_keeps_source_lexeme() {
    let token = Scanner::new("BeGiN").next().unwrap().unwrap();
    assert_eq!(token.kind, Begin);
    assert_eq!(token.lexeme, "BeGiN");
}

#[test]
fn ident_of_twenty_chars() {
    let name = "a".repeat(20);
    case(&name, vec![Ident]);
}

#[test]
fn ident_of_twenty_one_chars() {
    let name = "a".repeat(21);
    assert!(matches!(fails(&name), LexError::IdentTooLong { ref ident, line: 1 } if *ident == name));
}

#[test]
fn unterminated_comment() {
    let e = fails("a\n(* open\n\n");
    assert!(matches!(e, LexError::UnterminatedComment { line: 4 }));
}

#[test]
fn invalid_char() {
    let e = fails("a\nb { c");
    assert!(matches!(e, LexError::InvalidChar { ch: '{', line: 2 }));
}

#[test]
fn number_out_of_range() {
    let e = fails("99999999999");
    assert!(matches!(e, LexError::NumberOutOfRange { line: 1, .. }));
    case("2147483647", vec![Number]);
}

#[test]
fn iteration_ends_after_lexical_error() {
    let items: Vec<Result<_, LexError>> = Scanner::new("a # b c").collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().map(|t| t.kind).ok(), Some(Ident));
    assert!(matches!(items[1], Err(LexError::InvalidChar { ch: '#', line: 1 })));
}

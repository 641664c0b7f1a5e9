//! Token sequences for whole messages and PRI brackets.
use std::fmt::Write as _;
use syslex::{ErrorKind, Field, LexConfig, Lexer, TokenKind, tokenize};
use test_case::test_case;

fn dump(mut lexer: Lexer<'_>) -> String {
    let mut lines = Vec::new();
    loop {
        let token = lexer.next_token();
        let mut line = String::new();
        write!(
            line,
            "{:?} {:?} {}..{}",
            token.kind,
            token.text,
            token.span.start(),
            token.span.end()
        )
        .unwrap();
        lines.push(line);
        if token.is_terminal() {
            break;
        }
    }
    if let Some(err) = lexer.error() {
        lines.push(err.to_string());
    }
    lines.join("\n")
}

fn lex(input: &str) -> String {
    dump(Lexer::new("test", input))
}

fn kinds(input: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new("test", input);
    let mut kinds = Vec::new();
    loop {
        let token = lexer.next_token();
        kinds.push(token.kind);
        if token.is_terminal() {
            return kinds;
        }
    }
}

#[test]
fn test_empty_input_is_eof_at_zero() {
    insta::assert_snapshot!(lex(""), @r#"Eof "" 0..0"#);
}

#[test]
fn test_pri_groups_digit_runs() {
    insta::assert_snapshot!(lex("<86>"), @r#"
LeftAngle "<" 0..1
Number "86" 1..3
RightAngle ">" 3..4
Eof "" 4..4
"#);
}

#[test]
fn test_pri_with_blanks() {
    insta::assert_snapshot!(lex("< 1\t>"), @r#"
LeftAngle "<" 0..1
Space " " 1..2
Number "1" 2..3
Space "\t" 3..4
RightAngle ">" 4..5
Eof "" 5..5
"#);
}

#[test]
fn test_text_before_pri() {
    insta::assert_snapshot!(lex("hello <1>"), @r#"
Text "hello " 0..6
LeftAngle "<" 6..7
Number "1" 7..8
RightAngle ">" 8..9
Eof "" 9..9
"#);
}

#[test]
fn test_full_message_without_structured_data() {
    let input = "<34>1 2003-10-11T22:14:15.003Z mymachine.example.com su - ID47 - 'su root' failed for lonvick on /dev/pts/8";
    insta::assert_snapshot!(lex(input), @r#"
LeftAngle "<" 0..1
Number "34" 1..3
RightAngle ">" 3..4
Number "1" 4..5
Space " " 5..6
Number "2003" 6..10
Hyphen "-" 10..11
Number "10" 11..13
Hyphen "-" 13..14
Number "11" 14..16
Text "T" 16..17
Number "22" 17..19
Colon ":" 19..20
Number "14" 20..22
Colon ":" 22..23
Number "15" 23..25
Text "." 25..26
Number "003" 26..29
Text "Z" 29..30
Space " " 30..31
Text "mymachine.example.com" 31..52
Space " " 52..53
Text "su" 53..55
Space " " 55..56
Hyphen "-" 56..57
Space " " 57..58
Text "ID47" 58..62
Space " " 62..63
Hyphen "-" 63..64
Space " " 64..65
Text "'su root' failed for lonvick on /dev/pts/8" 65..107
Eof "" 107..107
"#);
}

#[test]
fn test_full_message_with_structured_data() {
    insta::assert_snapshot!(lex(r#"<14>1 - host app - - [ex@1 a="b"] hi"#), @r#"
LeftAngle "<" 0..1
Number "14" 1..3
RightAngle ">" 3..4
Number "1" 4..5
Space " " 5..6
Hyphen "-" 6..7
Space " " 7..8
Text "host" 8..12
Space " " 12..13
Text "app" 13..16
Space " " 16..17
Hyphen "-" 17..18
Space " " 18..19
Hyphen "-" 19..20
Space " " 20..21
LeftBracket "[" 21..22
Text "ex" 22..24
At "@" 24..25
Number "1" 25..26
Space " " 26..27
Text "a" 27..28
Equals "=" 28..29
QuotedString "\"b\"" 29..32
RightBracket "]" 32..33
Space " " 33..34
Text "hi" 34..36
Eof "" 36..36
"#);
}

#[test]
fn test_rfc_example_with_structured_data() {
    use TokenKind::*;

    let input = r#"<165>1 2003-10-11T22:14:15.003Z mymachine.example.com evntslog - ID47 [exampleSDID@32473 iut="3" eventSource="Application" eventID="1011"] An application event log entry..."#;
    let tokens = tokenize("rfc", input).unwrap();

    let sd: Vec<_> = tokens
        .iter()
        .skip_while(|t| t.kind != LeftBracket)
        .take_while(|t| t.kind != RightBracket)
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        sd,
        [
            LeftBracket, Text, At, Number, Space, Text, Equals, QuotedString, Space, Text, Equals,
            QuotedString, Space, Text, Equals, QuotedString
        ]
    );

    let values: Vec<_> = tokens.iter().filter_map(|t| t.param_value()).collect();
    assert_eq!(values, ["3", "Application", "1011"]);

    let message = tokens.last().unwrap();
    assert_eq!(message.kind, Text);
    assert_eq!(message.text, "An application event log entry...");
}

#[test]
fn test_sd_separator_is_one_blank() {
    use TokenKind::*;

    let tokens = tokenize("test", "<1>1 - - - - - -  two spaces").unwrap();
    let tail: Vec<_> = tokens.iter().rev().take(3).map(|t| (t.kind, t.text)).collect();
    assert_eq!(tail, [(Text, " two spaces"), (Space, " "), (Hyphen, "-")]);
}

#[test]
fn test_message_keeps_line_endings_and_unicode() {
    let tokens = tokenize("test", "<1>1 - - - - - - line one\r\nzweite Zeile ü [x]").unwrap();
    let message = tokens.last().unwrap();
    assert_eq!(message.text, "line one\r\nzweite Zeile ü [x]");
}

#[test_case("<1>1", &[TokenKind::LeftAngle, TokenKind::Number, TokenKind::RightAngle, TokenKind::Number, TokenKind::Eof]; "version only")]
#[test_case("<1>1 ", &[TokenKind::LeftAngle, TokenKind::Number, TokenKind::RightAngle, TokenKind::Number, TokenKind::Space, TokenKind::Eof]; "trailing separator")]
#[test_case("<1>1 - - - - -", &[
    TokenKind::LeftAngle, TokenKind::Number, TokenKind::RightAngle, TokenKind::Number,
    TokenKind::Space, TokenKind::Hyphen, TokenKind::Space, TokenKind::Hyphen,
    TokenKind::Space, TokenKind::Hyphen, TokenKind::Space, TokenKind::Hyphen,
    TokenKind::Space, TokenKind::Hyphen, TokenKind::Eof,
]; "stops before structured data")]
fn test_truncated_header_ends_in_eof(input: &str, expected: &[TokenKind]) {
    assert_eq!(kinds(input), expected);
}

#[test]
fn test_nil_hyphen_needs_separator() {
    let tokens = tokenize("test", "<1>1 - -host").unwrap();
    let hostname = tokens.last().unwrap();
    assert_eq!(hostname.kind, TokenKind::Text);
    assert_eq!(hostname.text, "-host");
}

#[test]
fn test_timestamp_with_offset() {
    let tokens = tokenize("test", "<1>1 1985-04-12T19:20:50.52-04:00 h").unwrap();
    let texts: Vec<_> = tokens[5..tokens.len() - 2].iter().map(|t| t.text).collect();
    assert_eq!(
        texts,
        ["1985", "-", "04", "-", "12", "T", "19", ":", "20", ":", "50", ".", "52", "-", "04", ":", "00"]
    );
}

#[test]
fn test_pri_only_leaves_header_as_text() {
    let lexer = Lexer::with_config("test", "<86>1 - x", LexConfig::new().pri_only());
    insta::assert_snapshot!(dump(lexer), @r#"
LeftAngle "<" 0..1
Number "86" 1..3
RightAngle ">" 3..4
Text "1 - x" 4..9
Eof "" 9..9
"#);
}

#[test]
fn test_custom_delimiters() {
    let lexer = Lexer::with_delimiters("test", "{{86}}", "{{", "}}");
    insta::assert_snapshot!(dump(lexer), @r#"
LeftAngle "{{" 0..2
Number "86" 2..4
RightAngle "}}" 4..6
Eof "" 6..6
"#);
}

#[test]
fn test_empty_delimiters_use_defaults() {
    let mut lexer = Lexer::with_delimiters("test", "<7>", "", "");
    assert_eq!(lexer.config().left_delim(), "<");
    assert_eq!(lexer.next_token().text, "<");
}

#[test]
fn test_unclosed_pri() {
    insta::assert_snapshot!(lex("<86"), @r#"
LeftAngle "<" 0..1
Number "86" 1..3
Error "" 3..3
test:3: unclosed PRI bracket
"#);
}

#[test_case("<1a>", 2, ErrorKind::UnrecognizedCharacter { found: 'a', field: Field::Pri }; "letter in pri")]
#[test_case("<86", 3, ErrorKind::UnclosedBracket(Field::Pri); "pri at eof")]
#[test_case("<8\n6>", 2, ErrorKind::UnclosedBracket(Field::Pri); "pri at line ending")]
#[test_case("<1>x", 3, ErrorKind::UnrecognizedCharacter { found: 'x', field: Field::Version }; "bad version")]
#[test_case("<1>1x", 4, ErrorKind::UnrecognizedCharacter { found: 'x', field: Field::Version }; "missing separator after version")]
#[test_case("<1>1 2003\n", 9, ErrorKind::UnrecognizedCharacter { found: '\n', field: Field::Timestamp }; "line ending in timestamp")]
#[test_case("<1>1 - hé", 8, ErrorKind::UnrecognizedCharacter { found: 'é', field: Field::Hostname }; "non ascii hostname")]
#[test_case("<1>1 - h \u{7}", 9, ErrorKind::UnrecognizedCharacter { found: '\u{7}', field: Field::AppName }; "control char in app name")]
#[test_case("<1>1 - - - - - x", 15, ErrorKind::UnrecognizedCharacter { found: 'x', field: Field::StructuredData }; "bad structured data")]
#[test_case("<1>1 - - - - - -x", 16, ErrorKind::UnrecognizedCharacter { found: 'x', field: Field::StructuredData }; "nil sd without separator")]
fn test_lex_errors(input: &str, position: usize, kind: ErrorKind) {
    let err = tokenize("test", input).unwrap_err();
    assert_eq!(err.kind, kind);
    assert_eq!(err.position, position);
    assert_eq!(&*err.name, "test");
}

#[test]
fn test_error_context_is_partial_token() {
    let err = tokenize("udp", r#"[a="unterminated"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnterminatedQuotedString);
    assert_eq!(err.context, r#""unterminated"#);
    assert_eq!(err.message(), "unterminated quoted string");
}

#[test_case("<86>1 - - - - - - a]b", "1 - - - - - - a]b"; "unmatched close")]
#[test_case("<86>hello [world", "hello [world"; "unmatched open")]
#[test_case("<86>x ] y", "x ] y"; "lone close")]
#[test_case(r#"<86>[ex@1 iut="3"]"#, r#"[ex@1 iut="3"]"#; "element stays text")]
fn test_pri_only_body_ignores_brackets(input: &str, body: &str) {
    let config = LexConfig::new().pri_only();
    let tokens: Vec<_> = Lexer::with_config("test", input, config)
        .collect::<Result<_, _>>()
        .unwrap();

    let tail: Vec<_> = tokens[2..].iter().map(|t| (t.kind, t.text)).collect();
    assert_eq!(tail, [(TokenKind::RightAngle, ">"), (TokenKind::Text, body)]);

    let rebuilt: String = tokens.iter().map(|t| t.text).collect();
    assert_eq!(rebuilt, input);
}

#[test]
fn test_pri_only_body_stops_at_next_pri() {
    let lexer = Lexer::with_config("test", "<1>a]<2>b[", LexConfig::new().pri_only());
    insta::assert_snapshot!(dump(lexer), @r#"
LeftAngle "<" 0..1
Number "1" 1..2
RightAngle ">" 2..3
Text "a]" 3..5
LeftAngle "<" 5..6
Number "2" 6..7
RightAngle ">" 7..8
Text "b[" 8..10
Eof "" 10..10
"#);
}

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use syslex::{LexConfig, Lexer, TokenKind};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    message: &'a str,
    left: &'a str,
    right: &'a str,
    max_depth: u8,
    pri_only: bool,
}

fuzz_target!(|input: Input<'_>| {
    let mut config = LexConfig::new()
        .with_delimiters(input.left.to_owned(), input.right.to_owned())
        .with_max_nesting_depth(usize::from(input.max_depth % 4));
    if input.pri_only {
        config = config.pri_only();
    }
    let max_depth = config.max_nesting_depth();

    let mut lexer = Lexer::with_config("fuzz", input.message, config);
    let mut cursor = 0;
    let mut rebuilt = String::with_capacity(input.message.len());

    let terminal = loop {
        let token = lexer.next_token();
        assert_eq!(token.span.start(), cursor, "tokens must be contiguous");
        assert_eq!(&input.message[token.span.range()], token.text);
        assert!(lexer.nesting_depth() <= max_depth);

        if token.is_terminal() {
            break token;
        }
        assert!(!token.span.is_empty(), "empty {token:?}");
        cursor = token.span.end();
        rebuilt.push_str(token.text);
    };

    match terminal.kind {
        TokenKind::Eof => {
            assert_eq!(rebuilt, input.message);
            assert!(lexer.error().is_none());
        }
        TokenKind::Error => {
            let err = lexer.error().expect("error token without error");
            assert!(err.position <= input.message.len());
        }
        _ => unreachable!(),
    }

    assert_eq!(lexer.next_token(), terminal);
});

//! Lexical analysis (§4.1-§4.3): turns raw source bytes into a buffered
//! stream of tokens for `cc0-par` to consume.

pub mod buffered;
pub mod cursor;
pub mod error;
mod lexer;
pub mod token;

pub use buffered::BufferedTokenStream;
pub use cursor::Cursor;
pub use error::{LexError, LexResult};
pub use lexer::Lexer;
pub use token::{Token, TokenKind};

#[cfg(test)]
mod roundtrip {
    //! §8's lexer round-trip property: `concat(t.text for t in lex(S)) == S`
    //! once whitespace between tokens is accounted for. Built with
    //! `proptest` rather than a handful of fixed cases, the way the teacher
    //! reaches for property testing over example-based tests for this kind
    //! of structural invariant.

    use proptest::prelude::*;

    use crate::lexer::Lexer;
    use crate::token::TokenKind;

    fn simple_token() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z_][a-zA-Z0-9_]{0,6}".prop_filter("not a keyword", |s| !is_keyword(s)),
            "[0-9]{1,5}".prop_map(String::from),
            Just("+".to_string()),
            Just("-".to_string()),
            Just("*".to_string()),
            Just("(".to_string()),
            Just(")".to_string()),
            Just(";".to_string()),
        ]
    }

    fn is_keyword(s: &str) -> bool {
        matches!(s, "if" | "else" | "while" | "return" | "break" | "continue" | "int")
    }

    proptest! {
        #[test]
        fn concatenated_token_text_reconstructs_the_source_modulo_whitespace(tokens in prop::collection::vec(simple_token(), 1..12)) {
            let source = tokens.join(" ");
            let mut lexer = Lexer::new(source.as_bytes());
            let mut reconstructed = String::new();
            loop {
                let token = lexer.next_token().expect("fixture tokens never lex-error");
                if token.kind == TokenKind::Eof {
                    break;
                }
                reconstructed.push_str(&token.text);
            }
            let without_whitespace: String = source.chars().filter(|c| !c.is_whitespace()).collect();
            prop_assert_eq!(reconstructed, without_whitespace);
        }

        #[test]
        fn any_non_keyword_identifier_shaped_run_lexes_as_identifier(name in "[a-zA-Z_][a-zA-Z0-9_]{0,8}".prop_filter("not a keyword", |s| !is_keyword(s))) {
            let mut lexer = Lexer::new(name.as_bytes());
            let token = lexer.next_token().unwrap();
            prop_assert_eq!(token.kind, TokenKind::Identifier);
            prop_assert_eq!(token.text, name);
        }
    }
}

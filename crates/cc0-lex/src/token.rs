//! Token kinds (§3) and the token record itself.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    IntegerLiteral,
    StringLiteral,
    CharacterLiteral,

    KwIf,
    KwElse,
    KwWhile,
    KwReturn,
    KwBreak,
    KwContinue,
    KwInt,

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,

    EqEq,
    NotEq,
    AndAnd,
    OrOr,
    Ge,
    Le,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    Shl,
    Shr,
    ShlEq,
    ShrEq,

    Pipe,
    Caret,
    Slash,
    Percent,
    Eq,
    Lt,
    Gt,
    Bang,
    Tilde,

    /// Ambiguous: unary value-of or binary multiplication (§4.2, §9).
    Star,
    /// Ambiguous: unary address-of or binary bitwise-and.
    Amp,
    /// Ambiguous: unary positive or binary addition.
    Plus,
    /// Ambiguous: unary negative or binary subtraction.
    Minus,

    Eof,
}

impl TokenKind {
    /// Human-readable name used in "expected X, encountered Y instead"
    /// parser diagnostics (§4.4).
    pub fn describe(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Identifier => "identifier",
            IntegerLiteral => "integer literal",
            StringLiteral => "string literal",
            CharacterLiteral => "character literal",
            KwIf => "'if'",
            KwElse => "'else'",
            KwWhile => "'while'",
            KwReturn => "'return'",
            KwBreak => "'break'",
            KwContinue => "'continue'",
            KwInt => "'int'",
            LParen => "'('",
            RParen => "')'",
            LBracket => "'['",
            RBracket => "']'",
            LBrace => "'{'",
            RBrace => "'}'",
            Comma => "','",
            Semicolon => "';'",
            EqEq => "'=='",
            NotEq => "'!='",
            AndAnd => "'&&'",
            OrOr => "'||'",
            Ge => "'>='",
            Le => "'<='",
            PlusEq => "'+='",
            MinusEq => "'-='",
            StarEq => "'*='",
            SlashEq => "'/='",
            PercentEq => "'%='",
            AmpEq => "'&='",
            PipeEq => "'|='",
            CaretEq => "'^='",
            Shl => "'<<'",
            Shr => "'>>'",
            ShlEq => "'<<='",
            ShrEq => "'>>='",
            Pipe => "'|'",
            Caret => "'^'",
            Slash => "'/'",
            Percent => "'%'",
            Eq => "'='",
            Lt => "'<'",
            Gt => "'>'",
            Bang => "'!'",
            Tilde => "'~'",
            Star => "'*'",
            Amp => "'&'",
            Plus => "'+'",
            Minus => "'-'",
            Eof => "end-of-file",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Position of the token's *last* byte (§4.2).
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }
}

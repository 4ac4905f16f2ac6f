//! AST node shapes (§3): one type (`int`, with a pointer depth) and a small,
//! flat statement/expression grammar. Every node keeps its source `Span` so
//! `cc0-sem` and `cc0-gen` can still point at the right source line.

use cc0_util::{Span, Symbol};

/// `int` with `pointer_depth` levels of `*` stacked on top (`int` is depth 0,
/// `int*` is depth 1, `int**` is depth 2, …).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeT {
    pub pointer_depth: u32,
}

impl TypeT {
    pub const fn int() -> Self {
        Self { pointer_depth: 0 }
    }

    pub fn is_pointer(&self) -> bool {
        self.pointer_depth > 0
    }

    /// The type one dereference away from this one. Panics on `int` itself;
    /// callers only call this once `cc0-sem` has confirmed the operand is a
    /// pointer.
    pub fn deref_once(&self) -> Self {
        assert!(self.pointer_depth > 0, "cannot dereference a non-pointer type");
        Self {
            pointer_depth: self.pointer_depth - 1,
        }
    }

    pub fn ref_once(&self) -> Self {
        Self {
            pointer_depth: self.pointer_depth + 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
}

impl BinOp {
    /// The plain operator a compound-assignment desugars to in `cc0-sem`
    /// Pass B (§4.6). `None` for `Assign` itself and for the non-assigning
    /// operators.
    pub fn underlying(&self) -> Option<BinOp> {
        use BinOp::*;
        Some(match self {
            AddAssign => Add,
            SubAssign => Sub,
            MulAssign => Mul,
            DivAssign => Div,
            ModAssign => Mod,
            AndAssign => BitAnd,
            OrAssign => BitOr,
            XorAssign => BitXor,
            ShlAssign => Shl,
            ShrAssign => Shr,
            _ => return None,
        })
    }

    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            BinOp::Assign
                | BinOp::AddAssign
                | BinOp::SubAssign
                | BinOp::MulAssign
                | BinOp::DivAssign
                | BinOp::ModAssign
                | BinOp::AndAssign
                | BinOp::OrAssign
                | BinOp::XorAssign
                | BinOp::ShlAssign
                | BinOp::ShrAssign
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    /// Unary `+`, a no-op kept only so the AST mirrors what was written.
    Plus,
    Neg,
    Not,
    BitNot,
    Deref,
    AddrOf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    IntegerLiteral(String),
    /// Raw text between the quotes, escapes not yet expanded. `bytes` is
    /// filled in by `cc0-sem` Pass A; `label` is filled in later by
    /// `cc0-gen`'s string pool, which assigns and emits the data (§4.6, §4.7).
    StringLiteral {
        raw: String,
        bytes: Option<Vec<u8>>,
        label: Option<u32>,
    },
    /// Raw text between the quotes (one character, or one escape). `value`
    /// is the expanded byte, filled in by `cc0-sem` Pass A.
    CharacterLiteral {
        raw: String,
        value: Option<u8>,
    },
    Identifier(Symbol),
    Indexing {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        callee: Symbol,
        args: Vec<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Filled in by `cc0-sem` Pass A; absent until then (§4.6).
    pub return_type: Option<TypeT>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self {
            kind,
            span,
            return_type: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StmtKind {
    Compound(Vec<Stmt>),
    /// No `else` branch (§9 Open Question 1): a conditional is a test plus a
    /// single body statement, full stop.
    Conditional {
        cond: Expr,
        body: Box<Stmt>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    Return(Expr),
    VarDecl {
        ty: TypeT,
        name: Symbol,
        init: Option<Expr>,
    },
    NoOp,
    Break,
    Continue,
    ExpressionStmt(Expr),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub ty: TypeT,
    pub name: Symbol,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    pub return_type: TypeT,
    pub name: Symbol,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Program {
    pub functions: Vec<Function>,
}

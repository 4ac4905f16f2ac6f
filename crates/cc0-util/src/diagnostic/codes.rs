//! Closed set of diagnostic codes, one per distinct failure named in §7/§8.
//! These are for machine-readable categorization (tests assert on them);
//! the user-visible text is the message passed to [`super::Diagnostic::new`].

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticCode(pub &'static str);

pub const E_LEX_UNEXPECTED_BYTE: DiagnosticCode = DiagnosticCode("E_LEX_UNEXPECTED_BYTE");

pub const E_PARSE_UNEXPECTED_TOKEN: DiagnosticCode = DiagnosticCode("E_PARSE_UNEXPECTED_TOKEN");
pub const E_PARSE_EXPECTED_LITERAL: DiagnosticCode = DiagnosticCode("E_PARSE_EXPECTED_LITERAL");

pub const E_SEM_UNDECLARED_IDENT: DiagnosticCode = DiagnosticCode("E_SEM_UNDECLARED_IDENT");
pub const E_SEM_RESERVED_NAME: DiagnosticCode = DiagnosticCode("E_SEM_RESERVED_NAME");
pub const E_SEM_RVALUE_ASSIGNMENT: DiagnosticCode = DiagnosticCode("E_SEM_RVALUE_ASSIGNMENT");
pub const E_SEM_RVALUE_ADDRESS_OF: DiagnosticCode = DiagnosticCode("E_SEM_RVALUE_ADDRESS_OF");
pub const E_SEM_POINTER_ARITHMETIC: DiagnosticCode = DiagnosticCode("E_SEM_POINTER_ARITHMETIC");
pub const E_SEM_TYPE_MISMATCH: DiagnosticCode = DiagnosticCode("E_SEM_TYPE_MISMATCH");
pub const E_SEM_BAD_CHAR_LITERAL: DiagnosticCode = DiagnosticCode("E_SEM_BAD_CHAR_LITERAL");
pub const E_SEM_UNKNOWN_ESCAPE: DiagnosticCode = DiagnosticCode("E_SEM_UNKNOWN_ESCAPE");
pub const E_SEM_MISSING_RETURN: DiagnosticCode = DiagnosticCode("E_SEM_MISSING_RETURN");
pub const E_SEM_REDEFINITION: DiagnosticCode = DiagnosticCode("E_SEM_REDEFINITION");
pub const E_SEM_ARITY_MISMATCH: DiagnosticCode = DiagnosticCode("E_SEM_ARITY_MISMATCH");
pub const E_SEM_LOOP_CONTROL_OUTSIDE_LOOP: DiagnosticCode =
    DiagnosticCode("E_SEM_LOOP_CONTROL_OUTSIDE_LOOP");

//! Statement validation and function validation (§4.6 Pass A). Grounded on
//! `original_source/semantic/semantic_analyzer.hpp`'s `validate_statement`/
//! `validate_function`.

use cc0_par::ast::{Function, Stmt, StmtKind, TypeT};
use cc0_util::diagnostic::{
    E_SEM_LOOP_CONTROL_OUTSIDE_LOOP, E_SEM_MISSING_RETURN, E_SEM_REDEFINITION,
    E_SEM_RESERVED_NAME, E_SEM_TYPE_MISMATCH,
};
use cc0_util::Symbol as Ident;

use crate::scope::Symbol;
use crate::{can_convert, is_reserved, prettyprint_type, Analyzer, RETURN_SLOT};

impl<'a> Analyzer<'a> {
    pub(crate) fn validate_function(&mut self, function: &mut Function) {
        self.scopes.enter();
        for param in &function.params {
            if is_reserved(param.name) {
                self.die(
                    E_SEM_RESERVED_NAME,
                    function.span,
                    format!("cannot declare parameter with reserved identifier '{}'", param.name.as_str()),
                );
            }
            self.scopes.add(Symbol::variable(param.ty, param.name));
        }
        self.scopes.add(Symbol::variable(function.return_type, Ident::intern(RETURN_SLOT)));

        let mut had_return = false;
        for stmt in &mut function.body {
            self.validate_statement(stmt);
            if matches!(stmt.kind, StmtKind::Return(_)) {
                had_return = true;
            }
        }
        if !had_return {
            self.die(
                E_SEM_MISSING_RETURN,
                function.span,
                format!("function '{}' has no return statement", function.name.as_str()),
            );
        }
        self.scopes.exit();
    }

    pub(crate) fn validate_statement(&mut self, stmt: &mut Stmt) {
        match &mut stmt.kind {
            StmtKind::Compound(stmts) => {
                self.scopes.enter();
                for inner in stmts {
                    self.validate_statement(inner);
                }
                self.scopes.exit();
            }
            StmtKind::Conditional { cond, body } => {
                self.validate_expr(cond);
                self.check_converts_to_int(cond.return_type.unwrap(), stmt.span);
                self.scopes.enter();
                self.validate_statement(body);
                self.scopes.exit();
            }
            StmtKind::While { cond, body } => {
                self.validate_expr(cond);
                self.check_converts_to_int(cond.return_type.unwrap(), stmt.span);
                self.scopes.enter_loop();
                self.validate_statement(body);
                self.scopes.exit();
            }
            StmtKind::Return(value) => {
                self.validate_expr(value);
                let value_ty = value.return_type.unwrap();
                let return_ty = self.scopes.fetch(Ident::intern(RETURN_SLOT)).ty;
                if !can_convert(value_ty, return_ty) {
                    self.die(
                        E_SEM_TYPE_MISMATCH,
                        stmt.span,
                        format!(
                            "no conversion from value of type '{}' to function return type '{}'",
                            prettyprint_type(value_ty),
                            prettyprint_type(return_ty)
                        ),
                    );
                }
            }
            StmtKind::VarDecl { ty, name, init } => {
                let name = *name;
                let ty = *ty;
                if is_reserved(name) {
                    self.die(
                        E_SEM_RESERVED_NAME,
                        stmt.span,
                        format!("cannot declare variable with reserved identifier '{}'", name.as_str()),
                    );
                }
                if let Some(init) = init {
                    self.validate_expr(init);
                    let init_ty = init.return_type.unwrap();
                    if !can_convert(init_ty, ty) {
                        self.die(
                            E_SEM_TYPE_MISMATCH,
                            stmt.span,
                            format!(
                                "no conversion from initializer value of type '{}' to variable type '{}'",
                                prettyprint_type(init_ty),
                                prettyprint_type(ty)
                            ),
                        );
                    }
                }
                if self.scopes.exists_locally(name) {
                    self.die(E_SEM_REDEFINITION, stmt.span, format!("redefinition of '{}'", name.as_str()));
                }
                self.scopes.add(Symbol::variable(ty, name));
            }
            StmtKind::Break | StmtKind::Continue => {
                if !self.scopes.in_loop() {
                    self.die(E_SEM_LOOP_CONTROL_OUTSIDE_LOOP, stmt.span, "break/continue outside of a loop");
                }
            }
            StmtKind::NoOp => {}
            StmtKind::ExpressionStmt(expr) => self.validate_expr(expr),
        }
    }

    fn check_converts_to_int(&self, ty: TypeT, span: cc0_util::Span) {
        if !can_convert(ty, TypeT::int()) {
            self.die(
                E_SEM_TYPE_MISMATCH,
                span,
                format!("cannot convert expression of type '{}' to 'int'", prettyprint_type(ty)),
            );
        }
    }
}

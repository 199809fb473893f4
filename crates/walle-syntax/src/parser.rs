use crate::ast::{
    Expr, ExprCall, ExprInfix, ExprLiteral, ExprPrefix, ExprS, ExprVariable, Func, Instruction,
    OpInfix, OpPrefix, Program, Stmt, StmtAssign, StmtInstruction, StmtJump, StmtLabel, StmtS,
};
use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

use walle_common::error::{Error, ParseError, Result};

/// Recursive-descent parser for statements with precedence climbing for
/// expressions. Stops at the first structurally invalid construct; no
/// recovery.
#[derive(Debug)]
pub struct Parser {
    cursor: Cursor,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { cursor: Cursor::new(tokens) }
    }

    pub fn parse(mut self) -> Result<Program> {
        let mut stmts = Vec::new();
        loop {
            // Blank lines and comments between statements carry no meaning.
            while self.cursor.matches(&TokenKind::Eol) || self.cursor.matches(&TokenKind::Comment) {
            }
            if self.cursor.peek().kind == TokenKind::Eof {
                break;
            }
            stmts.push(self.parse_stmt()?);
        }
        Ok(Program { stmts })
    }

    fn parse_stmt(&mut self) -> Result<StmtS> {
        let token = self.cursor.peek().clone();
        match &token.kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.cursor.advance();
                let next = self.cursor.peek().clone();
                if self.cursor.matches(&TokenKind::Colon) {
                    let span = token.span.start..next.span.end;
                    Ok((Stmt::Label(StmtLabel { name }), span))
                } else if self.cursor.matches(&TokenKind::Arrow) {
                    let value = self.parse_expr(0)?;
                    let span = token.span.start..value.1.end;
                    Ok((Stmt::Assign(StmtAssign { name, value }), span))
                } else {
                    Err(Error::ParseError(ParseError::ExpectedToken {
                        message: "expected ':' or '<-' after identifier".to_string(),
                        found: next.kind.to_string(),
                        span: next.span,
                    }))
                }
            }
            TokenKind::Spawn
            | TokenKind::Color
            | TokenKind::Size
            | TokenKind::DrawLine
            | TokenKind::DrawCircle
            | TokenKind::DrawRectangle
            | TokenKind::Fill => self.parse_instruction(),
            TokenKind::Goto => self.parse_jump(),
            _ => Err(Error::ParseError(ParseError::UnexpectedToken {
                token: token.kind.to_string(),
                span: token.span,
            })),
        }
    }

    fn parse_instruction(&mut self) -> Result<StmtS> {
        let token = self.cursor.advance();
        let kind = match token.kind {
            TokenKind::Spawn => Instruction::Spawn,
            TokenKind::Color => Instruction::Color,
            TokenKind::Size => Instruction::Size,
            TokenKind::DrawLine => Instruction::DrawLine,
            TokenKind::DrawCircle => Instruction::DrawCircle,
            TokenKind::DrawRectangle => Instruction::DrawRectangle,
            TokenKind::Fill => Instruction::Fill,
            _ => unreachable!("parse_instruction called on a non-instruction token"),
        };
        self.cursor.expect(&TokenKind::LtParen, &format!("expected '(' after {}", kind.name()))?;
        let (args, rt_paren) = self.parse_args(kind.name())?;
        let span = token.span.start..rt_paren.span.end;
        Ok((Stmt::Instruction(StmtInstruction { kind, args }), span))
    }

    fn parse_jump(&mut self) -> Result<StmtS> {
        let goto = self.cursor.advance();
        self.cursor.expect(&TokenKind::LtBracket, "expected '[' after GoTo")?;
        let (label, _) = self.cursor.expect_identifier("expected label identifier")?;
        self.cursor.expect(&TokenKind::RtBracket, "expected ']' after label")?;
        self.cursor.expect(&TokenKind::LtParen, "expected '(' before condition")?;
        let cond = self.parse_expr(0)?;
        let rt_paren = self.cursor.expect(&TokenKind::RtParen, "expected ')' after condition")?;
        let span = goto.span.start..rt_paren.span.end;
        Ok((Stmt::Jump(StmtJump { label, cond }), span))
    }

    /// Zero or more comma-separated expressions, up to the closing paren.
    /// Arity is checked by the interpreter, not here.
    fn parse_args(&mut self, name: &str) -> Result<(Vec<ExprS>, Token)> {
        let mut args = Vec::new();
        if self.cursor.peek().kind != TokenKind::RtParen {
            loop {
                args.push(self.parse_expr(0)?);
                if !self.cursor.matches(&TokenKind::Comma) {
                    break;
                }
            }
        }
        let rt_paren = self
            .cursor
            .expect(&TokenKind::RtParen, &format!("expected ')' after {name} arguments"))?;
        Ok((args, rt_paren))
    }

    /// Precedence climbing: recurse into the right-hand side with the
    /// consumed operator's level as the new floor, then keep folding
    /// higher-level operators at this call. Every operator, `^` included,
    /// ends up left-associative.
    fn parse_expr(&mut self, min_precedence: u8) -> Result<ExprS> {
        let mut lt = self.parse_primary()?;
        while let Some(op) = infix_op(&self.cursor.peek().kind) {
            let precedence = op.precedence();
            if precedence <= min_precedence {
                break;
            }
            self.cursor.advance();
            let rt = self.parse_expr(precedence)?;
            let span = lt.1.start..rt.1.end;
            lt = (Expr::Infix(Box::new(ExprInfix { lt, op, rt })), span);
        }
        Ok(lt)
    }

    fn parse_primary(&mut self) -> Result<ExprS> {
        let token = self.cursor.peek().clone();
        if let Some(func) = builtin_func(&token.kind) {
            return self.parse_call(func);
        }
        match token.kind {
            TokenKind::Number(value) => {
                self.cursor.advance();
                Ok((Expr::Literal(ExprLiteral::Number(value)), token.span))
            }
            TokenKind::True => {
                self.cursor.advance();
                Ok((Expr::Literal(ExprLiteral::Bool(true)), token.span))
            }
            TokenKind::False => {
                self.cursor.advance();
                Ok((Expr::Literal(ExprLiteral::Bool(false)), token.span))
            }
            TokenKind::String(value) => {
                self.cursor.advance();
                Ok((Expr::Literal(ExprLiteral::String(value)), token.span))
            }
            TokenKind::Identifier(name) => {
                self.cursor.advance();
                Ok((Expr::Variable(ExprVariable { name }), token.span))
            }
            TokenKind::LtParen => {
                self.cursor.advance();
                let (expr, _) = self.parse_expr(0)?;
                let rt_paren =
                    self.cursor.expect(&TokenKind::RtParen, "expected ')' after expression")?;
                Ok((expr, token.span.start..rt_paren.span.end))
            }
            TokenKind::Not => {
                self.cursor.advance();
                let rt = self.parse_primary()?;
                let span = token.span.start..rt.1.end;
                Ok((Expr::Prefix(Box::new(ExprPrefix { op: OpPrefix::Not, rt })), span))
            }
            TokenKind::Minus => {
                self.cursor.advance();
                let rt = self.parse_primary()?;
                let span = token.span.start..rt.1.end;
                Ok((Expr::Prefix(Box::new(ExprPrefix { op: OpPrefix::Negate, rt })), span))
            }
            _ => Err(Error::ParseError(ParseError::UnexpectedToken {
                token: token.kind.to_string(),
                span: token.span,
            })),
        }
    }

    fn parse_call(&mut self, func: Func) -> Result<ExprS> {
        let token = self.cursor.advance();
        self.cursor.expect(&TokenKind::LtParen, &format!("expected '(' after {}", func.name()))?;
        let (args, rt_paren) = self.parse_args(func.name())?;
        let span = token.span.start..rt_paren.span.end;
        Ok((Expr::Call(ExprCall { func, args }), span))
    }
}

fn infix_op(kind: &TokenKind) -> Option<OpInfix> {
    let op = match kind {
        TokenKind::Or => OpInfix::LogicOr,
        TokenKind::And => OpInfix::LogicAnd,
        TokenKind::EqualEqual => OpInfix::Equal,
        TokenKind::BangEqual => OpInfix::NotEqual,
        TokenKind::Less => OpInfix::Less,
        TokenKind::LessEqual => OpInfix::LessEqual,
        TokenKind::Greater => OpInfix::Greater,
        TokenKind::GreaterEqual => OpInfix::GreaterEqual,
        TokenKind::Plus => OpInfix::Add,
        TokenKind::Minus => OpInfix::Subtract,
        TokenKind::Star => OpInfix::Multiply,
        TokenKind::Slash => OpInfix::Divide,
        TokenKind::Percent => OpInfix::Modulo,
        TokenKind::Caret => OpInfix::Power,
        _ => return None,
    };
    Some(op)
}

/// The built-in functions form an explicit closed set rather than a token
/// ordinal range.
fn builtin_func(kind: &TokenKind) -> Option<Func> {
    let func = match kind {
        TokenKind::GetActualX => Func::GetActualX,
        TokenKind::GetActualY => Func::GetActualY,
        TokenKind::GetCanvasSize => Func::GetCanvasSize,
        TokenKind::GetColorCount => Func::GetColorCount,
        TokenKind::IsBrushColor => Func::IsBrushColor,
        TokenKind::IsBrushSize => Func::IsBrushSize,
        TokenKind::IsCanvasColor => Func::IsCanvasColor,
        _ => return None,
    };
    Some(func)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    use pretty_assertions::assert_eq;

    fn parse_expr(source: &str) -> Expr {
        // Wrap in an assignment so the expression is a whole statement.
        let program = parse(&format!("x <- {source}")).unwrap();
        let (stmt, _) = program.stmts.into_iter().next().unwrap();
        match stmt {
            Stmt::Assign(assign) => assign.value.0,
            stmt => panic!("expected assignment, got {stmt:?}"),
        }
    }

    fn infix(lt: ExprS, op: OpInfix, rt: ExprS) -> ExprS {
        let span = lt.1.start..rt.1.end;
        (Expr::Infix(Box::new(ExprInfix { lt, op, rt })), span)
    }

    fn number(value: i64, at: usize) -> ExprS {
        let len = value.to_string().len();
        (Expr::Literal(ExprLiteral::Number(value)), at..at + len)
    }

    #[test]
    fn parse_label_assignment_and_jump() {
        let program = parse("top:\nx <- 1\nGoTo [top] (x < 3)\n").unwrap();
        let got: Vec<Stmt> = program.stmts.into_iter().map(|(stmt, _)| stmt).collect();
        let exp = vec![
            Stmt::Label(StmtLabel { name: "top".to_string() }),
            Stmt::Assign(StmtAssign {
                name: "x".to_string(),
                value: (Expr::Literal(ExprLiteral::Number(1)), 10..11),
            }),
            Stmt::Jump(StmtJump {
                label: "top".to_string(),
                cond: infix(
                    (Expr::Variable(ExprVariable { name: "x".to_string() }), 24..25),
                    OpInfix::Less,
                    number(3, 28),
                ),
            }),
        ];
        assert_eq!(exp, got);
    }

    #[test]
    fn parse_instruction_args() {
        let program = parse("DrawLine(1, 0, 5)").unwrap();
        let (stmt, span) = program.stmts.into_iter().next().unwrap();
        assert_eq!(0..17, span);
        let exp = Stmt::Instruction(StmtInstruction {
            kind: Instruction::DrawLine,
            args: vec![number(1, 9), number(0, 12), number(5, 15)],
        });
        assert_eq!(exp, stmt);
    }

    #[test]
    fn parse_empty_args() {
        let program = parse("Fill()").unwrap();
        let (stmt, _) = program.stmts.into_iter().next().unwrap();
        let exp = Stmt::Instruction(StmtInstruction { kind: Instruction::Fill, args: vec![] });
        assert_eq!(exp, stmt);
    }

    #[test]
    fn parse_skips_blank_lines_and_comments() {
        let program = parse("\n// header\n\nFill()\n// trailer\n").unwrap();
        assert_eq!(1, program.stmts.len());
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let exp =
            infix(number(1, 5), OpInfix::Add, infix(number(2, 9), OpInfix::Multiply, number(3, 13))).0;
        assert_eq!(exp, parse_expr("1 + 2 * 3"));
    }

    #[test]
    fn power_is_left_associative() {
        // `2 ^ 3 ^ 2` folds as `(2 ^ 3) ^ 2`.
        let exp = infix(infix(number(2, 5), OpInfix::Power, number(3, 9)), OpInfix::Power, number(2, 13)).0;
        assert_eq!(exp, parse_expr("2 ^ 3 ^ 2"));
    }

    #[test]
    fn comparison_binds_tighter_than_logic() {
        let got = parse_expr("1 == 2 and true");
        match got {
            Expr::Infix(op) => {
                assert_eq!(OpInfix::LogicAnd, op.op);
                assert!(matches!(op.lt.0, Expr::Infix(ref eq) if eq.op == OpInfix::Equal));
                assert_eq!(Expr::Literal(ExprLiteral::Bool(true)), op.rt.0);
            }
            got => panic!("expected infix expression, got {got:?}"),
        }
    }

    #[test]
    fn unary_binds_tighter_than_power() {
        let got = parse_expr("-2 ^ 2");
        match got {
            Expr::Infix(op) => {
                assert_eq!(OpInfix::Power, op.op);
                assert!(matches!(op.lt.0, Expr::Prefix(ref prefix) if prefix.op == OpPrefix::Negate));
            }
            got => panic!("expected infix expression, got {got:?}"),
        }
    }

    #[test]
    fn unary_operators_nest() {
        let got = parse_expr("not not true");
        let exp = Expr::Prefix(Box::new(ExprPrefix {
            op: OpPrefix::Not,
            rt: (
                Expr::Prefix(Box::new(ExprPrefix {
                    op: OpPrefix::Not,
                    rt: (Expr::Literal(ExprLiteral::Bool(true)), 13..17),
                })),
                9..17,
            ),
        }));
        assert_eq!(exp, got);
    }

    #[test]
    fn parentheses_override_precedence() {
        let got = parse_expr("(1 + 2) * 3");
        match got {
            Expr::Infix(op) => {
                assert_eq!(OpInfix::Multiply, op.op);
                assert!(matches!(op.lt.0, Expr::Infix(ref add) if add.op == OpInfix::Add));
            }
            got => panic!("expected infix expression, got {got:?}"),
        }
    }

    #[test]
    fn builtin_call_in_expression() {
        let got = parse_expr("GetActualX() + 1");
        match got {
            Expr::Infix(op) => match op.lt.0 {
                Expr::Call(call) => {
                    assert_eq!(Func::GetActualX, call.func);
                    assert!(call.args.is_empty());
                }
                got => panic!("expected call, got {got:?}"),
            },
            got => panic!("expected infix expression, got {got:?}"),
        }
    }

    #[test]
    fn parse_is_deterministic() {
        let source = "Spawn(0, 0)\nloop:\nDrawLine(1, 0, 1)\nGoTo [loop] (GetActualX() < 5)\n";
        assert_eq!(parse(source), parse(source));
    }

    #[test]
    fn error_on_identifier_without_colon_or_arrow() {
        let got = parse("x 1");
        let exp = Err(Error::ParseError(ParseError::ExpectedToken {
            message: "expected ':' or '<-' after identifier".to_string(),
            found: "number".to_string(),
            span: 2..3,
        }));
        assert_eq!(exp, got);
    }

    #[test]
    fn error_on_missing_closing_paren() {
        let got = parse("Spawn(1, 2");
        let exp = Err(Error::ParseError(ParseError::ExpectedToken {
            message: "expected ')' after Spawn arguments".to_string(),
            found: "end of file".to_string(),
            span: 10..10,
        }));
        assert_eq!(exp, got);
    }

    #[test]
    fn error_on_unexpected_statement_start() {
        let got = parse("+ 1");
        let exp = Err(Error::ParseError(ParseError::UnexpectedToken {
            token: "'+'".to_string(),
            span: 0..1,
        }));
        assert_eq!(exp, got);
    }

    #[test]
    fn error_on_goto_without_bracket() {
        let got = parse("GoTo top (true)");
        let exp = Err(Error::ParseError(ParseError::ExpectedToken {
            message: "expected '[' after GoTo".to_string(),
            found: "identifier \"top\"".to_string(),
            span: 5..8,
        }));
        assert_eq!(exp, got);
    }
}

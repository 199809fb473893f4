use crate::color::Color;
use crate::value::Value;
use crate::visualizer::{CanvasRead, Visualizer};

use rustc_hash::FxHashMap;
use walle_common::error::{Error, Result, RuntimeError};
use walle_common::types::Span;
use walle_syntax::ast::{
    Expr, ExprCall, ExprInfix, ExprLiteral, ExprPrefix, ExprS, Func, Instruction, OpInfix,
    OpPrefix, Program, Stmt, StmtInstruction, StmtJump, StmtS,
};

use std::io;

/// What to do after a statement: fall through to the next, or resume after
/// the jumped-to label.
enum Flow {
    Advance,
    Jump(usize),
}

/// A tree-walking interpreter that drives a visualizer. The interpreter owns
/// the robot state (position, brush) and the variable and label tables; the
/// visualizer owns the pixels.
pub struct Interpreter<'a, V> {
    visualizer: &'a mut V,
    variables: FxHashMap<String, Value>,
    labels: FxHashMap<String, usize>,
    canvas_size: i64,
    x: i64,
    y: i64,
    brush_color: Color,
    brush_size: i64,
    spawned: bool,
}

impl<'a, V: Visualizer + CanvasRead> Interpreter<'a, V> {
    pub fn new(canvas_size: i64, visualizer: &'a mut V) -> Self {
        Self {
            visualizer,
            variables: FxHashMap::default(),
            labels: FxHashMap::default(),
            canvas_size,
            x: 0,
            y: 0,
            brush_color: Color::Transparent,
            brush_size: 1,
            spawned: false,
        }
    }

    pub fn run(&mut self, program: &Program) -> Result<()> {
        // Labels are collected up front so jumps can go backwards or
        // forwards. A duplicate name resolves to its last occurrence.
        for (index, (stmt, _)) in program.stmts.iter().enumerate() {
            if let Stmt::Label(label) = stmt {
                self.labels.insert(label.name.clone(), index);
            }
        }

        let mut pc = 0;
        while pc < program.stmts.len() {
            pc = match self.run_stmt(&program.stmts[pc])? {
                Flow::Advance => pc + 1,
                Flow::Jump(target) => target + 1,
            };
        }
        Ok(())
    }

    fn run_stmt(&mut self, (stmt, span): &StmtS) -> Result<Flow> {
        match stmt {
            Stmt::Assign(assign) => {
                let value = self.eval_expr(&assign.value)?;
                self.variables.insert(assign.name.clone(), value);
                Ok(Flow::Advance)
            }
            Stmt::Instruction(instruction) => {
                self.run_instruction(instruction, span)?;
                Ok(Flow::Advance)
            }
            Stmt::Jump(jump) => self.run_jump(jump, span),
            Stmt::Label(_) => Ok(Flow::Advance),
        }
    }

    fn run_jump(&mut self, jump: &StmtJump, span: &Span) -> Result<Flow> {
        if !self.eval_bool(&jump.cond)? {
            return Ok(Flow::Advance);
        }
        match self.labels.get(&jump.label) {
            Some(&target) => Ok(Flow::Jump(target)),
            None => Err(Error::RuntimeError(RuntimeError::LabelNotFound {
                name: jump.label.clone(),
                span: span.clone(),
            })),
        }
    }

    fn run_instruction(&mut self, instruction: &StmtInstruction, span: &Span) -> Result<()> {
        if instruction.kind != Instruction::Spawn && !self.spawned {
            return Err(Error::RuntimeError(RuntimeError::SpawnRequired { span: span.clone() }));
        }

        let args = &instruction.args;
        match instruction.kind {
            Instruction::Spawn => {
                if self.spawned {
                    return Err(Error::RuntimeError(RuntimeError::SpawnAlreadyCalled {
                        span: span.clone(),
                    }));
                }
                self.check_arity("Spawn", 2, args, span)?;
                let x = self.eval_number(&args[0])?;
                let y = self.eval_number(&args[1])?;
                self.check_in_bounds("spawn position", x, y, span)?;
                self.x = x;
                self.y = y;
                self.spawned = true;
                self.visualizer.spawn(x, y).map_err(|e| io_error(e, span))
            }
            Instruction::Color => {
                self.check_arity("Color", 1, args, span)?;
                let color = self.eval_color(&args[0])?;
                self.brush_color = color;
                self.visualizer.color_changed(color).map_err(|e| io_error(e, span))
            }
            Instruction::Size => {
                self.check_arity("Size", 1, args, span)?;
                let size = self.eval_number(&args[0])?;
                if size <= 0 {
                    return Err(Error::RuntimeError(RuntimeError::NonPositive {
                        what: "brush size",
                        span: span.clone(),
                    }));
                }
                // An even size rounds down to the next odd size, so the brush
                // footprint stays centered on the cursor.
                self.brush_size = if size % 2 == 0 { size - 1 } else { size };
                self.visualizer
                    .brush_size_changed(self.brush_size)
                    .map_err(|e| io_error(e, span))
            }
            Instruction::DrawLine => {
                self.check_arity("DrawLine", 3, args, span)?;
                let dx = self.eval_number(&args[0])?;
                let dy = self.eval_number(&args[1])?;
                let distance = self.eval_number(&args[2])?;
                self.check_direction(dx, dy, span)?;
                self.check_positive("distance", distance, span)?;
                let x = self.x.wrapping_add(dx.wrapping_mul(distance));
                let y = self.y.wrapping_add(dy.wrapping_mul(distance));
                self.check_in_bounds("line endpoint", x, y, span)?;
                self.visualizer
                    .draw_line(self.x, self.y, x, y, self.brush_color, self.brush_size)
                    .map_err(|e| io_error(e, span))?;
                self.x = x;
                self.y = y;
                Ok(())
            }
            Instruction::DrawCircle => {
                self.check_arity("DrawCircle", 3, args, span)?;
                let dx = self.eval_number(&args[0])?;
                let dy = self.eval_number(&args[1])?;
                let radius = self.eval_number(&args[2])?;
                self.check_direction(dx, dy, span)?;
                self.check_positive("radius", radius, span)?;
                let x = self.x.wrapping_add(dx.wrapping_mul(radius));
                let y = self.y.wrapping_add(dy.wrapping_mul(radius));
                self.check_in_bounds("circle center", x, y, span)?;
                self.visualizer
                    .draw_circle(x, y, radius, self.brush_color, self.brush_size)
                    .map_err(|e| io_error(e, span))?;
                self.x = x;
                self.y = y;
                Ok(())
            }
            Instruction::DrawRectangle => {
                self.check_arity("DrawRectangle", 5, args, span)?;
                let dx = self.eval_number(&args[0])?;
                let dy = self.eval_number(&args[1])?;
                let distance = self.eval_number(&args[2])?;
                let width = self.eval_number(&args[3])?;
                let height = self.eval_number(&args[4])?;
                self.check_direction(dx, dy, span)?;
                self.check_positive("distance", distance, span)?;
                self.check_positive("width", width, span)?;
                self.check_positive("height", height, span)?;
                let x = self.x.wrapping_add(dx.wrapping_mul(distance));
                let y = self.y.wrapping_add(dy.wrapping_mul(distance));
                self.check_in_bounds("rectangle corner", x, y, span)?;
                self.check_in_bounds(
                    "rectangle corner",
                    x.wrapping_add(width - 1),
                    y.wrapping_add(height - 1),
                    span,
                )?;
                self.visualizer
                    .draw_rectangle(x, y, width, height, self.brush_color, self.brush_size)
                    .map_err(|e| io_error(e, span))?;
                self.x = x;
                self.y = y;
                Ok(())
            }
            Instruction::Fill => {
                self.check_arity("Fill", 0, args, span)?;
                self.visualizer
                    .fill(self.x, self.y, self.brush_color)
                    .map_err(|e| io_error(e, span))
            }
        }
    }

    fn eval_expr(&mut self, (expr, span): &ExprS) -> Result<Value> {
        match expr {
            Expr::Call(call) => self.eval_call(call, span),
            Expr::Infix(infix) => self.eval_infix(infix, span),
            Expr::Literal(literal) => {
                let value = match literal {
                    ExprLiteral::Bool(value) => Value::Bool(*value),
                    ExprLiteral::Number(value) => Value::Number(*value),
                    ExprLiteral::String(value) => Value::String(value.clone()),
                };
                Ok(value)
            }
            Expr::Prefix(prefix) => self.eval_prefix(prefix, span),
            Expr::Variable(variable) => {
                self.variables.get(&variable.name).cloned().ok_or_else(|| {
                    Error::RuntimeError(RuntimeError::UndefinedVariable {
                        name: variable.name.clone(),
                        span: span.clone(),
                    })
                })
            }
        }
    }

    /// Both operands are evaluated before the operator is applied, `and` and
    /// `or` included.
    fn eval_infix(&mut self, infix: &ExprInfix, span: &Span) -> Result<Value> {
        let lt = self.eval_expr(&infix.lt)?;
        let rt = self.eval_expr(&infix.rt)?;
        let value = match (infix.op, lt, rt) {
            (OpInfix::LogicOr, Value::Bool(lt), Value::Bool(rt)) => Value::Bool(lt || rt),
            (OpInfix::LogicAnd, Value::Bool(lt), Value::Bool(rt)) => Value::Bool(lt && rt),
            (OpInfix::Equal, lt, rt) if lt.type_() == rt.type_() => Value::Bool(lt == rt),
            (OpInfix::NotEqual, lt, rt) if lt.type_() == rt.type_() => Value::Bool(lt != rt),
            (OpInfix::Less, Value::Number(lt), Value::Number(rt)) => Value::Bool(lt < rt),
            (OpInfix::LessEqual, Value::Number(lt), Value::Number(rt)) => Value::Bool(lt <= rt),
            (OpInfix::Greater, Value::Number(lt), Value::Number(rt)) => Value::Bool(lt > rt),
            (OpInfix::GreaterEqual, Value::Number(lt), Value::Number(rt)) => Value::Bool(lt >= rt),
            (OpInfix::Add, Value::Number(lt), Value::Number(rt)) => {
                Value::Number(lt.wrapping_add(rt))
            }
            (OpInfix::Subtract, Value::Number(lt), Value::Number(rt)) => {
                Value::Number(lt.wrapping_sub(rt))
            }
            (OpInfix::Multiply, Value::Number(lt), Value::Number(rt)) => {
                Value::Number(lt.wrapping_mul(rt))
            }
            (OpInfix::Divide, Value::Number(lt), Value::Number(rt)) => {
                if rt == 0 {
                    return Err(Error::RuntimeError(RuntimeError::DivisionByZero {
                        span: span.clone(),
                    }));
                }
                Value::Number(lt.wrapping_div(rt))
            }
            (OpInfix::Modulo, Value::Number(lt), Value::Number(rt)) => {
                if rt == 0 {
                    return Err(Error::RuntimeError(RuntimeError::DivisionByZero {
                        span: span.clone(),
                    }));
                }
                Value::Number(lt.wrapping_rem(rt))
            }
            // Exponentiation goes through floats, so large results saturate
            // instead of wrapping.
            (OpInfix::Power, Value::Number(lt), Value::Number(rt)) => {
                Value::Number((lt as f64).powf(rt as f64) as i64)
            }
            (op, lt, rt) => {
                return Err(Error::RuntimeError(RuntimeError::UnsupportedOperandInfix {
                    op: op.to_string(),
                    lt_type: lt.type_(),
                    rt_type: rt.type_(),
                    span: span.clone(),
                }))
            }
        };
        Ok(value)
    }

    fn eval_prefix(&mut self, prefix: &ExprPrefix, span: &Span) -> Result<Value> {
        let rt = self.eval_expr(&prefix.rt)?;
        let value = match (prefix.op, rt) {
            (OpPrefix::Negate, Value::Number(rt)) => Value::Number(rt.wrapping_neg()),
            (OpPrefix::Not, Value::Bool(rt)) => Value::Bool(!rt),
            (op, rt) => {
                return Err(Error::RuntimeError(RuntimeError::UnsupportedOperandPrefix {
                    op: op.to_string(),
                    rt_type: rt.type_(),
                    span: span.clone(),
                }))
            }
        };
        Ok(value)
    }

    fn eval_call(&mut self, call: &ExprCall, span: &Span) -> Result<Value> {
        let args = &call.args;
        let value = match call.func {
            Func::GetActualX => {
                self.check_spawned(span)?;
                self.check_arity("GetActualX", 0, args, span)?;
                Value::Number(self.x)
            }
            Func::GetActualY => {
                self.check_spawned(span)?;
                self.check_arity("GetActualY", 0, args, span)?;
                Value::Number(self.y)
            }
            Func::GetCanvasSize => {
                self.check_arity("GetCanvasSize", 0, args, span)?;
                Value::Number(self.canvas_size)
            }
            Func::GetColorCount => {
                self.check_arity("GetColorCount", 5, args, span)?;
                let color = self.eval_color(&args[0])?;
                let x1 = self.eval_number(&args[1])?;
                let y1 = self.eval_number(&args[2])?;
                let x2 = self.eval_number(&args[3])?;
                let y2 = self.eval_number(&args[4])?;
                // A region with any corner off the canvas counts as empty.
                if !self.in_bounds(x1, y1) || !self.in_bounds(x2, y2) {
                    Value::Number(0)
                } else {
                    let mut count = 0;
                    for x in x1.min(x2)..=x1.max(x2) {
                        for y in y1.min(y2)..=y1.max(y2) {
                            if self.visualizer.cell_color(x, y) == color {
                                count += 1;
                            }
                        }
                    }
                    Value::Number(count)
                }
            }
            Func::IsBrushColor => {
                self.check_arity("IsBrushColor", 1, args, span)?;
                let color = self.eval_color(&args[0])?;
                Value::Number((self.brush_color == color) as i64)
            }
            Func::IsBrushSize => {
                self.check_arity("IsBrushSize", 1, args, span)?;
                let size = self.eval_number(&args[0])?;
                Value::Number((self.brush_size == size) as i64)
            }
            Func::IsCanvasColor => {
                self.check_arity("IsCanvasColor", 3, args, span)?;
                let color = self.eval_color(&args[0])?;
                let vertical = self.eval_number(&args[1])?;
                let horizontal = self.eval_number(&args[2])?;
                let x = self.x.wrapping_add(horizontal);
                let y = self.y.wrapping_add(vertical);
                if self.in_bounds(x, y) {
                    Value::Number((self.visualizer.cell_color(x, y) == color) as i64)
                } else {
                    Value::Number(0)
                }
            }
        };
        Ok(value)
    }

    fn eval_number(&mut self, expr: &ExprS) -> Result<i64> {
        match self.eval_expr(expr)? {
            Value::Number(value) => Ok(value),
            value => Err(Error::RuntimeError(RuntimeError::ExpectedType {
                expected: "number",
                found: value.type_(),
                span: expr.1.clone(),
            })),
        }
    }

    fn eval_bool(&mut self, expr: &ExprS) -> Result<bool> {
        match self.eval_expr(expr)? {
            Value::Bool(value) => Ok(value),
            value => Err(Error::RuntimeError(RuntimeError::ExpectedType {
                expected: "boolean",
                found: value.type_(),
                span: expr.1.clone(),
            })),
        }
    }

    fn eval_string(&mut self, expr: &ExprS) -> Result<String> {
        match self.eval_expr(expr)? {
            Value::String(value) => Ok(value),
            value => Err(Error::RuntimeError(RuntimeError::ExpectedType {
                expected: "string",
                found: value.type_(),
                span: expr.1.clone(),
            })),
        }
    }

    fn eval_color(&mut self, expr: &ExprS) -> Result<Color> {
        let name = self.eval_string(expr)?;
        Color::from_name(&name).ok_or_else(|| {
            Error::RuntimeError(RuntimeError::InvalidColor { name, span: expr.1.clone() })
        })
    }

    fn in_bounds(&self, x: i64, y: i64) -> bool {
        (0..self.canvas_size).contains(&x) && (0..self.canvas_size).contains(&y)
    }

    fn check_in_bounds(&self, what: &'static str, x: i64, y: i64, span: &Span) -> Result<()> {
        if self.in_bounds(x, y) {
            return Ok(());
        }
        Err(Error::RuntimeError(RuntimeError::OutsideCanvas { what, x, y, span: span.clone() }))
    }

    fn check_direction(&self, dx: i64, dy: i64, span: &Span) -> Result<()> {
        if !(-1..=1).contains(&dx) || !(-1..=1).contains(&dy) || (dx == 0 && dy == 0) {
            return Err(Error::RuntimeError(RuntimeError::InvalidDirection {
                dx,
                dy,
                span: span.clone(),
            }));
        }
        Ok(())
    }

    fn check_positive(&self, what: &'static str, value: i64, span: &Span) -> Result<()> {
        if value <= 0 {
            return Err(Error::RuntimeError(RuntimeError::NonPositive {
                what,
                span: span.clone(),
            }));
        }
        Ok(())
    }

    fn check_arity(&self, name: &str, exp_args: usize, args: &[ExprS], span: &Span) -> Result<()> {
        if args.len() != exp_args {
            return Err(Error::RuntimeError(RuntimeError::ArityMismatch {
                name: name.to_string(),
                exp_args,
                got_args: args.len(),
                span: span.clone(),
            }));
        }
        Ok(())
    }

    fn check_spawned(&self, span: &Span) -> Result<()> {
        if !self.spawned {
            return Err(Error::RuntimeError(RuntimeError::SpawnRequired { span: span.clone() }));
        }
        Ok(())
    }
}

fn io_error(e: io::Error, span: &Span) -> Error {
    Error::RuntimeError(RuntimeError::Io { message: e.to_string(), span: span.clone() })
}

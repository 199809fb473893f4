use walle_common::types::Spanned;

use std::fmt::{self, Display, Formatter};

pub type StmtS = Spanned<Stmt>;
pub type ExprS = Spanned<Expr>;

#[derive(Debug, Default, PartialEq)]
pub struct Program {
    pub stmts: Vec<StmtS>,
}

#[derive(Debug, PartialEq)]
pub enum Stmt {
    Assign(StmtAssign),
    Instruction(StmtInstruction),
    Jump(StmtJump),
    Label(StmtLabel),
}

#[derive(Debug, PartialEq)]
pub struct StmtAssign {
    pub name: String,
    pub value: ExprS,
}

#[derive(Debug, PartialEq)]
pub struct StmtInstruction {
    pub kind: Instruction,
    pub args: Vec<ExprS>,
}

/// A jump target; occupies a statement slot but is a no-op at execution
/// time.
#[derive(Debug, PartialEq)]
pub struct StmtLabel {
    pub name: String,
}

/// `GoTo [label] (condition)` — the sole control-flow construct.
#[derive(Debug, PartialEq)]
pub struct StmtJump {
    pub label: String,
    pub cond: ExprS,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Instruction {
    Spawn,
    Color,
    Size,
    DrawLine,
    DrawCircle,
    DrawRectangle,
    Fill,
}

impl Instruction {
    pub fn name(self) -> &'static str {
        match self {
            Instruction::Spawn => "Spawn",
            Instruction::Color => "Color",
            Instruction::Size => "Size",
            Instruction::DrawLine => "DrawLine",
            Instruction::DrawCircle => "DrawCircle",
            Instruction::DrawRectangle => "DrawRectangle",
            Instruction::Fill => "Fill",
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Expr {
    Call(ExprCall),
    Infix(Box<ExprInfix>),
    Literal(ExprLiteral),
    Prefix(Box<ExprPrefix>),
    Variable(ExprVariable),
}

/// A built-in query function call. The function set is closed, so the name
/// is an enum rather than a string.
#[derive(Debug, PartialEq)]
pub struct ExprCall {
    pub func: Func,
    pub args: Vec<ExprS>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Func {
    GetActualX,
    GetActualY,
    GetCanvasSize,
    GetColorCount,
    IsBrushColor,
    IsBrushSize,
    IsCanvasColor,
}

impl Func {
    pub fn name(self) -> &'static str {
        match self {
            Func::GetActualX => "GetActualX",
            Func::GetActualY => "GetActualY",
            Func::GetCanvasSize => "GetCanvasSize",
            Func::GetColorCount => "GetColorCount",
            Func::IsBrushColor => "IsBrushColor",
            Func::IsBrushSize => "IsBrushSize",
            Func::IsCanvasColor => "IsCanvasColor",
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ExprLiteral {
    Bool(bool),
    Number(i64),
    String(String),
}

#[derive(Debug, PartialEq)]
pub struct ExprInfix {
    pub lt: ExprS,
    pub op: OpInfix,
    pub rt: ExprS,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpInfix {
    LogicOr,
    LogicAnd,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl OpInfix {
    /// Binding levels for precedence climbing, low to high. All operators
    /// fold left-to-right, including `^`.
    pub fn precedence(self) -> u8 {
        match self {
            OpInfix::LogicOr => 1,
            OpInfix::LogicAnd => 2,
            OpInfix::Equal
            | OpInfix::NotEqual
            | OpInfix::Less
            | OpInfix::LessEqual
            | OpInfix::Greater
            | OpInfix::GreaterEqual => 3,
            OpInfix::Add | OpInfix::Subtract => 4,
            OpInfix::Multiply | OpInfix::Divide | OpInfix::Modulo => 5,
            OpInfix::Power => 6,
        }
    }
}

impl Display for OpInfix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            OpInfix::LogicOr => write!(f, "or"),
            OpInfix::LogicAnd => write!(f, "and"),
            OpInfix::Equal => write!(f, "=="),
            OpInfix::NotEqual => write!(f, "!="),
            OpInfix::Less => write!(f, "<"),
            OpInfix::LessEqual => write!(f, "<="),
            OpInfix::Greater => write!(f, ">"),
            OpInfix::GreaterEqual => write!(f, ">="),
            OpInfix::Add => write!(f, "+"),
            OpInfix::Subtract => write!(f, "-"),
            OpInfix::Multiply => write!(f, "*"),
            OpInfix::Divide => write!(f, "/"),
            OpInfix::Modulo => write!(f, "%"),
            OpInfix::Power => write!(f, "^"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct ExprPrefix {
    pub op: OpPrefix,
    pub rt: ExprS,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpPrefix {
    Negate,
    Not,
}

impl Display for OpPrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            OpPrefix::Negate => write!(f, "-"),
            OpPrefix::Not => write!(f, "not"),
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
pub struct ExprVariable {
    pub name: String,
}

use crate::types::Span;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term;
use termcolor::WriteColor;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum Error {
    #[error("LexicalError: {0}")]
    LexicalError(LexicalError),
    #[error("ParseError: {0}")]
    ParseError(ParseError),
    #[error("RuntimeError: {0}")]
    RuntimeError(RuntimeError),
}

impl AsDiagnostic for Error {
    fn as_diagnostic(&self) -> Diagnostic<()> {
        match self {
            Error::LexicalError(e) => e.as_diagnostic(),
            Error::ParseError(e) => e.as_diagnostic(),
            Error::RuntimeError(e) => e.as_diagnostic(),
        }
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum LexicalError {
    #[error("number literal does not fit in an integer")]
    NumberTooLarge { span: Span },
    #[error("unrecognized character {character:?}")]
    UnrecognizedCharacter { character: char, span: Span },
    #[error("unterminated string")]
    UnterminatedString { span: Span },
}

impl AsDiagnostic for LexicalError {
    fn as_diagnostic(&self) -> Diagnostic<()> {
        match self {
            LexicalError::NumberTooLarge { span }
            | LexicalError::UnrecognizedCharacter { span, .. }
            | LexicalError::UnterminatedString { span } => Diagnostic::error()
                .with_code("LexicalError")
                .with_message(self.to_string())
                .with_labels(vec![Label::primary((), span.clone())]),
        }
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("{message}, found {found}")]
    ExpectedToken { message: String, found: String, span: Span },
    #[error("unexpected token {token}")]
    UnexpectedToken { token: String, span: Span },
}

impl AsDiagnostic for ParseError {
    fn as_diagnostic(&self) -> Diagnostic<()> {
        match self {
            ParseError::ExpectedToken { span, .. } | ParseError::UnexpectedToken { span, .. } => {
                Diagnostic::error()
                    .with_code("ParseError")
                    .with_message(self.to_string())
                    .with_labels(vec![Label::primary((), span.clone())])
            }
        }
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum RuntimeError {
    #[error("{name} takes {exp_args} arguments but {got_args} were given")]
    ArityMismatch { name: String, exp_args: usize, got_args: usize, span: Span },
    #[error("division by zero")]
    DivisionByZero { span: Span },
    #[error("expected {expected} value, found {found}")]
    ExpectedType { expected: &'static str, found: &'static str, span: Span },
    #[error("invalid color {name:?}")]
    InvalidColor { name: String, span: Span },
    #[error("invalid direction vector ({dx}, {dy})")]
    InvalidDirection { dx: i64, dy: i64, span: Span },
    #[error("unable to notify visualizer: {message}")]
    Io { message: String, span: Span },
    #[error("label {name:?} not found")]
    LabelNotFound { name: String, span: Span },
    #[error("{what} must be positive")]
    NonPositive { what: &'static str, span: Span },
    #[error("{what} ({x}, {y}) is outside the canvas")]
    OutsideCanvas { what: &'static str, x: i64, y: i64, span: Span },
    #[error("Spawn can only be called once")]
    SpawnAlreadyCalled { span: Span },
    #[error("must call Spawn before any other instructions")]
    SpawnRequired { span: Span },
    #[error("variable {name:?} is not defined")]
    UndefinedVariable { name: String, span: Span },
    #[error("unsupported operand types for {op}: {lt_type:?} and {rt_type:?}")]
    UnsupportedOperandInfix { op: String, lt_type: &'static str, rt_type: &'static str, span: Span },
    #[error("unsupported operand type for {op}: {rt_type:?}")]
    UnsupportedOperandPrefix { op: String, rt_type: &'static str, span: Span },
}

impl AsDiagnostic for RuntimeError {
    fn as_diagnostic(&self) -> Diagnostic<()> {
        match self {
            RuntimeError::ArityMismatch { span, .. }
            | RuntimeError::DivisionByZero { span }
            | RuntimeError::ExpectedType { span, .. }
            | RuntimeError::InvalidColor { span, .. }
            | RuntimeError::InvalidDirection { span, .. }
            | RuntimeError::Io { span, .. }
            | RuntimeError::LabelNotFound { span, .. }
            | RuntimeError::NonPositive { span, .. }
            | RuntimeError::OutsideCanvas { span, .. }
            | RuntimeError::SpawnAlreadyCalled { span }
            | RuntimeError::SpawnRequired { span }
            | RuntimeError::UndefinedVariable { span, .. }
            | RuntimeError::UnsupportedOperandInfix { span, .. }
            | RuntimeError::UnsupportedOperandPrefix { span, .. } => Diagnostic::error()
                .with_code("RuntimeError")
                .with_message(self.to_string())
                .with_labels(vec![Label::primary((), span.clone())]),
        }
    }
}

trait AsDiagnostic {
    fn as_diagnostic(&self) -> Diagnostic<()>;
}

/// Renders an error against its source, pointing at the offending line and
/// column.
pub fn report_err(writer: &mut dyn WriteColor, source: &str, e: &Error) {
    let file = SimpleFile::new("<script>", source);
    let config = term::Config::default();
    let diagnostic = e.as_diagnostic();
    term::emit(writer, &config, &file, &diagnostic).ok();
}

pub mod ast;
pub mod cursor;
pub mod lexer;
pub mod parser;
pub mod token;

use crate::ast::Program;
use crate::parser::Parser;

use walle_common::error::Result;

pub fn parse(source: &str) -> Result<Program> {
    let tokens = lexer::tokenize(source)?;
    Parser::new(tokens).parse()
}

#![forbid(unsafe_code)]

pub mod ast;
mod compiler;
mod diagnostic;
pub mod lexer;
pub mod parser;
pub mod reader;
pub mod token;
mod util;

pub use compiler::{MiniAsnCompiler, SourceId};
pub use diagnostic::{Diagnostic, Label, Level};
pub use parser::{ParserError, Rule, SemanticFault};

/// Parse a single schema document that is not associated with a named file
pub fn parse(source: &str) -> Result<ast::Program, ParserError> {
    let lexer = lexer::Lexer::new(SourceId::default(), source)?;
    parser::Parser::new(lexer).run()
}

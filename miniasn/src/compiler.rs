//! The primary interface to parsing MiniASN schema files.

use tracing::info;

use crate::{
    ast::Program,
    lexer::Lexer,
    parser::{Parser, ParserError},
};

/// Store of all schema files given to the compiler, along with the result of
/// parsing each of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MiniAsnCompiler {
    /// List of all included source files.
    sources: Vec<Source>,
}

/// Information relating to a single source file
#[derive(Debug, Clone, PartialEq, Eq)]
struct Source {
    /// File name and path.
    file_name: String,

    /// Source text of the file
    source: String,

    /// The parsed schema, if parsing succeeded
    program: Option<Program>,
}

/// Reference to a single source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SourceId(usize);

impl MiniAsnCompiler {
    /// Create a new compiler
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a new file to the compiler and parse it.  The file is kept even if
    /// parsing fails, so that errors can refer to its text.
    pub fn add_file(&mut self, file_name: String, source: String) -> Result<SourceId, ParserError> {
        let id = SourceId(self.sources.len());
        info!(file = %file_name, ?id, "adding source file");

        let result = Lexer::new(id, &source)
            .map_err(ParserError::from)
            .and_then(|lexer| Parser::new(lexer).run());

        let (program, result) = match result {
            Ok(program) => (Some(program), Ok(id)),
            Err(err) => (None, Err(err)),
        };

        self.sources.push(Source {
            file_name,
            source,
            program,
        });

        result
    }

    /// Get an iterator over all source IDs
    pub fn all_sources(&self) -> impl Iterator<Item = SourceId> + '_ {
        (0..self.sources.len()).map(SourceId)
    }

    /// The text of a source file.  Panics if the id was not created by this
    /// compiler.
    pub fn source_text(&self, file: SourceId) -> &str {
        &self.sources[file.0].source
    }

    /// The name a source file was added with.  Panics if the id was not
    /// created by this compiler.
    pub fn source_name(&self, file: SourceId) -> &str {
        &self.sources[file.0].file_name
    }

    /// The parsed schema of a file, `None` if the file failed to parse or the
    /// id is unknown
    pub fn program(&self, file: SourceId) -> Option<&Program> {
        self.sources.get(file.0)?.program.as_ref()
    }

    /// Canonical rendering of a parsed file
    pub fn render(&self, file: SourceId) -> Option<String> {
        self.program(file).map(|p| p.to_string())
    }
}

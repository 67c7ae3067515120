use std::{error::Error, fmt::Display, ops::Range};

use crate::{
    compiler::SourceId,
    lexer::LexerError,
    parser::{ParserError, SemanticFault},
};

/// Any kind of error reported by the compiler, in a form ready to be shown
/// to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Unique error code reference
    pub error_code: String,

    /// Severity of the error
    pub level: Level,

    /// Name of the diagnostic
    pub name: String,

    /// All labels with information about this diagnostic
    pub labels: Vec<Label>,
}

/// Reference to a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// The source file
    pub source: Option<SourceId>,

    /// Byte range within the source file that the diagnostic should be shown
    /// at.  An empty range marks a single position.
    pub location: Option<Range<usize>>,

    /// The message to display to the user.
    pub message: String,
}

/// Severity of a given diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// A fatal error
    Error,

    /// Should be fixed but the compiler can still continue.
    Warning,

    /// Notice about some code
    Note,
}

impl Diagnostic {
    fn new(level: Level, code: String) -> Self {
        Diagnostic {
            error_code: code,
            level,
            name: String::new(),
            labels: vec![],
        }
    }

    /// Create an error diagnostic
    pub(crate) fn error(code: impl Into<String>) -> Self {
        Self::new(Level::Error, code.into())
    }

    /// Set the descriptive name of an error
    pub(crate) fn name(self, value: impl Into<String>) -> Self {
        Self {
            name: value.into(),
            ..self
        }
    }

    /// Add a label to the diagnostic
    pub(crate) fn label(mut self, label: impl Into<Label>) -> Self {
        self.labels.push(label.into());
        self
    }
}

impl Label {
    /// Create a new source label
    pub(crate) fn new() -> Label {
        Label {
            source: None,
            location: None,
            message: String::new(),
        }
    }

    /// Set the message for this label
    pub(crate) fn message(self, value: impl Into<String>) -> Self {
        Self {
            message: value.into(),
            ..self
        }
    }

    /// Set the source file for this label
    pub fn source(self, id: SourceId) -> Self {
        Self {
            source: Some(id),
            ..self
        }
    }

    /// Set the location within the source file for this label
    pub fn loc(self, loc: Range<usize>) -> Self {
        Self {
            location: Some(loc),
            ..self
        }
    }
}

impl From<&ParserError> for Diagnostic {
    fn from(err: &ParserError) -> Self {
        let at = Label::new().source(err.id()).loc(err.span());

        match err {
            ParserError::Syntax { expected, got, .. } => Diagnostic::error("0001")
                .name("Syntax error")
                .label(at.message(format!("expected {expected}, found {got}"))),
            ParserError::InvalidNumber { value, .. } => Diagnostic::error("0002")
                .name("Invalid number")
                .label(at.message(format!("`{value}` is not a valid number here")))
                .label("bit widths must be greater than zero and numbers must fit in 64 bits"),
            ParserError::ArgumentsLoad { name, expected, got, .. } => Diagnostic::error("0003")
                .name("Wrong number of declared parameters")
                .label(at.message(format!(
                    "`{name}` declares {got} parameters, expected {expected}"
                ))),
            ParserError::NameInUse {
                name, first, id, ..
            } => Diagnostic::error("0004")
                .name(format!("Name `{name}` is already in use"))
                .label(at.message("declared again here"))
                .label(
                    Label::new()
                        .source(*id)
                        .loc(*first..first + name.len())
                        .message("first declared here"),
                ),
            ParserError::NotDeclaredType { name, .. } => Diagnostic::error("0005")
                .name("Undeclared type")
                .label(at.message(format!("type `{name}` is not declared before this point")))
                .label("a type can only be used after it has been declared"),
            ParserError::ParametersLoad { name, expected, got, .. } => Diagnostic::error("0006")
                .name("Wrong number of values")
                .label(at.message(format!(
                    "`{name}` takes {expected} values, but {got} were given"
                ))),
            ParserError::Semantic { fault, name, .. } => {
                let diag = Diagnostic::error("0007")
                    .name(format!("Invalid declaration of `{name}`"))
                    .label(at.message(fault.to_string()));

                match *fault {
                    SemanticFault::MissingDefault => {
                        diag.label("add a branch with the condition `DEFAULT`")
                    }
                    SemanticFault::DuplicateDefault { first } => diag.label(
                        Label::new()
                            .source(err.id())
                            .loc(first..first)
                            .message("first DEFAULT branch here"),
                    ),
                }
            }
            ParserError::NotDeclaredName { name, .. } => Diagnostic::error("0008")
                .name("Undeclared name")
                .label(at.message(format!(
                    "`{name}` is not a parameter or an earlier field of this declaration"
                ))),
            ParserError::ParserDepthExceeded { .. } => Diagnostic::error("0009")
                .name("Nesting too deep")
                .label(at.message("expression nested too deeply")),
            ParserError::WrongNode { rule, .. } => Diagnostic::error("0010")
                .name("Internal parser error")
                .label(at.message(format!("rule {rule:?} produced an unexpected node"))),
            ParserError::Lexer(LexerError::NotNormalized { .. }) => Diagnostic::error("0011")
                .name("Source text is not normalized")
                .label(at.message("source text must be in unicode normalization form C")),
        }
    }
}

impl From<ParserError> for Diagnostic {
    fn from(err: ParserError) -> Self {
        Diagnostic::from(&err)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} {:04}: {}", self.level, self.error_code, self.name)?;

        for label in &self.labels {
            if let Some(source) = label.source {
                writeln!(f)?;

                write!(f, "\t{:?} [{source:?}", self.level)?;
                if let Some(location) = &label.location {
                    write!(f, "@{}..{}", location.start, location.end)?;
                }
                write!(f, "]: {}", label.message)?;
            }
        }

        for label in &self.labels {
            if label.source.is_none() {
                writeln!(f)?;
                write!(f, "\t{:?}: {}", self.level, label.message)?;
            }
        }

        Ok(())
    }
}

impl Error for Diagnostic {}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::new().message(value)
    }
}

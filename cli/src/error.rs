use std::{collections::HashMap, error::Error, ops::Range};

use ariadne::{Config, IndexType, ReportKind};
use miniasn::{Diagnostic, Level, MiniAsnCompiler, SourceId};

type Report = ariadne::Report<'static, (SourceId, Range<usize>)>;

/// Convert a compiler diagnostic into a report that can be printed with the
/// source text it refers to.
pub fn to_error(diag: &Diagnostic, color: bool) -> Result<Report, Box<dyn Error>> {
    let kind = match diag.level {
        Level::Error => ReportKind::Error,
        Level::Warning => ReportKind::Warning,
        Level::Note => ReportKind::Advice,
    };

    let Some((source, offset)) = diag
        .labels
        .iter()
        .find_map(|l| Some((l.source?, l.location.as_ref()?.start)))
    else {
        return Err("Unable to get source location from diagnostic".into());
    };

    let mut report = Report::build(kind, source, offset)
        .with_code(&diag.error_code)
        .with_message(&diag.name)
        .with_config(
            Config::default()
                .with_index_type(IndexType::Byte)
                .with_color(color),
        );

    let mut note: Option<String> = None;
    for label in &diag.labels {
        let (Some(source), Some(location)) = (label.source, &label.location) else {
            note = Some(match note {
                Some(note) => note + "\n" + &label.message,
                None => label.message.clone(),
            });
            continue;
        };
        report.add_label(
            ariadne::Label::new((source, location.clone())).with_message(&label.message),
        );
    }

    if let Some(note) = note {
        report.set_note(note);
    }

    Ok(report.finish())
}

/// Source file cache provider for the MiniASN compiler
pub struct MiniAsnCompilerCache<'a> {
    cache: HashMap<SourceId, ariadne::Source<&'a str>>,
    compiler: &'a MiniAsnCompiler,
}

impl<'a> ariadne::Cache<SourceId> for MiniAsnCompilerCache<'a> {
    type Storage = &'a str;

    fn fetch(
        &mut self,
        id: &SourceId,
    ) -> Result<&ariadne::Source<Self::Storage>, Box<dyn std::fmt::Debug + '_>> {
        let compiler = self.compiler;
        Ok(self
            .cache
            .entry(*id)
            .or_insert_with(|| ariadne::Source::from(compiler.source_text(*id))))
    }

    fn display<'b>(&self, id: &'b SourceId) -> Option<Box<dyn std::fmt::Display + 'b>> {
        Some(Box::new(self.compiler.source_name(*id).to_string()))
    }
}

impl<'a> MiniAsnCompilerCache<'a> {
    pub fn new(compiler: &'a MiniAsnCompiler) -> Self {
        MiniAsnCompilerCache {
            cache: HashMap::new(),
            compiler,
        }
    }
}

use std::fmt;

use super::ShaderStage;

/// Which compilation step rejected the shader.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderErrorKind {
    /// WGSL did not parse.
    Parse,
    /// The module parsed but failed validation.
    Validation,
    /// No entry point for the requested stage.
    MissingEntryPoint,
    /// More than one entry point for the requested stage.
    AmbiguousEntryPoint,
}

impl fmt::Display for ShaderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderErrorKind::Parse => "parse error",
            ShaderErrorKind::Validation => "validation error",
            ShaderErrorKind::MissingEntryPoint => "missing entry point",
            ShaderErrorKind::AmbiguousEntryPoint => "ambiguous entry point",
        })
    }
}

/// A shader that failed to compile.
///
/// Carries the compiler log and the offending source so the message is
/// diagnosable on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderError {
    pub stage: ShaderStage,
    pub label: String,
    pub kind: ShaderErrorKind,
    /// Compiler diagnostic. Never empty.
    pub log: String,
    pub source_text: String,
}

impl ShaderError {
    pub(crate) fn new(
        stage: ShaderStage,
        label: &str,
        kind: ShaderErrorKind,
        log: impl Into<String>,
        source_text: &str,
    ) -> Self {
        let mut log = log.into();
        if log.trim().is_empty() {
            log = format!("{kind} (no diagnostic provided)");
        }

        Self {
            stage,
            label: label.to_string(),
            kind,
            log,
            source_text: source_text.to_string(),
        }
    }

    pub fn log(&self) -> &str {
        &self.log
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "failed to compile {} shader `{}` ({}):",
            self.stage, self.label, self.kind
        )?;
        writeln!(f, "{}", self.log.trim_end())?;
        writeln!(f, "source:")?;
        write!(f, "{}", self.source_text)
    }
}

impl std::error::Error for ShaderError {}

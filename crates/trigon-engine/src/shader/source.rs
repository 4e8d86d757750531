use std::borrow::Cow;

/// Labelled WGSL source text.
///
/// Sources are normally embedded at build time with `include_str!` through
/// [`ShaderSource::from_static`]; changing them requires recompilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    label: Cow<'static, str>,
    text: Cow<'static, str>,
}

impl ShaderSource {
    pub const fn from_static(label: &'static str, text: &'static str) -> Self {
        Self {
            label: Cow::Borrowed(label),
            text: Cow::Borrowed(text),
        }
    }

    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: Cow::Owned(label.into()),
            text: Cow::Owned(text.into()),
        }
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

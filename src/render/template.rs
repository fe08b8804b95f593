//! Template types for typed variable injection.

use std::{
    fs,
    marker::PhantomData,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template `{0}` not found")]
    Missing(PathBuf),

    #[error("failed to read template `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Template with typed variable injection, read from the templates directory.
#[derive(Debug, Clone)]
pub struct Template<V> {
    content: String,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            _marker: PhantomData,
        }
    }

    /// Read a template file. A missing file is an error, never an empty page.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        if !path.is_file() {
            return Err(TemplateError::Missing(path.to_path_buf()));
        }
        fs::read_to_string(path)
            .map(Self::new)
            .map_err(|err| TemplateError::Io(path.to_path_buf(), err))
    }

    #[cfg(test)]
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(&self.content)
    }
}

/// Replace `{key}` placeholders in one pass.
///
/// Substituted values are not scanned again, so a title containing
/// `{content}` stays literal. Unknown placeholders are left untouched.
pub fn fill(content: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let value = tail.find('}').and_then(|end| {
            let key = &tail[1..end];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end + 1))
        });
        match value {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

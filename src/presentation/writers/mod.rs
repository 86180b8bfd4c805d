use crate::domain::{candidate::ResolvedTarget, ports::OutputWriter};
use anyhow::Result;

use self::{json::JsonWriter, text::TextWriter};

pub mod json;
pub mod text;

/// Register available writers - add new ones without touching main.rs
pub fn all_writers() -> Vec<Box<dyn OutputWriter>> {
    vec![Box::new(TextWriter), Box::new(JsonWriter)]
}

pub fn writer_for(format: &str) -> Option<Box<dyn OutputWriter>> {
    all_writers().into_iter().find(|w| w.name() == format)
}

/// Formats the target with the chosen writer, always ending in a newline.
pub fn render_target(writer: &dyn OutputWriter, target: ResolvedTarget<'_>) -> Result<String> {
    let mut content = writer.format(target)?;
    if !content.ends_with('\n') {
        content.push('\n');
    }
    Ok(content)
}

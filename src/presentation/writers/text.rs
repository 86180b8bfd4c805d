use anyhow::Result;
use std::fmt::Write as FmtWrite;

use crate::domain::{candidate::ResolvedTarget, ports::OutputWriter};

/// `key: value` lines, one per field.
pub struct TextWriter;

impl OutputWriter for TextWriter {
    fn format(&self, target: ResolvedTarget<'_>) -> Result<String> {
        let mut s = String::new();
        match target {
            ResolvedTarget::AppEnvironment(c) => {
                writeln!(s, "account:     {}", c.account_name)?;
                writeln!(s, "app:         {}", c.app_name)?;
                writeln!(s, "environment: {}", c.environment_name)?;
                if !c.repository_uri.is_empty() {
                    writeln!(s, "repository:  {}", c.repository_uri)?;
                }
            }
            ResolvedTarget::Environment(e) => {
                writeln!(s, "account:     {}", e.account_name)?;
                writeln!(s, "environment: {}", e.environment_name)?;
            }
        }
        Ok(s)
    }

    fn name(&self) -> &'static str {
        "text"
    }
}

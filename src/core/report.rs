//! Rendering a generated table for people to read.

use ron::ser::PrettyConfig;
use std::str::FromStr;

use crate::core::config::UnknownVariant;
use crate::schema::connection::Connection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// One block per connection under the playset name.
    #[default]
    Text,
    /// Pretty-printed RON list of connections.
    Ron,
}

impl FromStr for ReportFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "ron" => Ok(Self::Ron),
            _ => Err(UnknownVariant {
                kind: "report format",
                value: s.to_string(),
                expected: "text, ron",
            }),
        }
    }
}

pub fn render(
    format: ReportFormat,
    playset_name: &str,
    table: &[Connection],
) -> Result<String, ron::Error> {
    match format {
        ReportFormat::Text => Ok(render_text(playset_name, table)),
        ReportFormat::Ron => render_ron(table),
    }
}

pub fn render_text(playset_name: &str, table: &[Connection]) -> String {
    let mut out = format!("{} ({} connections)\n", playset_name, table.len());
    for connection in table {
        out.push('\n');
        out.push_str(&connection.to_string());
        out.push('\n');
    }
    out
}

pub fn render_ron(table: &[Connection]) -> Result<String, ron::Error> {
    ron::ser::to_string_pretty(table, PrettyConfig::default())
}

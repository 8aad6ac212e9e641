use crate::domain::Member;
use crate::fetcharg::{fetch_statement, FetchType};
use crate::resolver::Resolution;
use serde::Serialize;
use std::io::Write;

/// JSON view of a resolution
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub chain: String,
    pub base: &'a str,
    pub members: &'a [Member],
    pub offsets: &'a [u64],
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_arg: Option<String>,
    pub final_struct: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

impl<'a> Report<'a> {
    pub fn new(
        resolution: &'a Resolution,
        placeholder: &str,
        fetch_type: Option<FetchType>,
    ) -> Self {
        let expression = resolution.expression(placeholder);
        let chain = std::iter::once(resolution.base.as_str())
            .chain(resolution.members.iter().map(|m| m.name.as_str()))
            .collect::<Vec<_>>()
            .join("->");

        Self {
            chain,
            base: &resolution.base,
            members: &resolution.members,
            offsets: resolution.offsets.as_slice(),
            fetch_arg: fetch_type.map(|t| fetch_statement(&expression, t)),
            expression,
            final_struct: &resolution.final_struct,
            layout: None,
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: Option<String>) -> Self {
        self.layout = layout;
        self
    }

    /// Write the report as pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn write_json<W: Write>(&self, mut writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer).map_err(serde_json::Error::io)
    }
}

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use derive_more::{Display as DeriveDisplay, Error};

/// The layout the diagnosis reports are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text, one line per symptom
    Plain,
    /// A Steam forum post, symptoms in a table
    Bbcode,
    /// A markdown document with a sentence per symptom detail
    #[default]
    Markdown,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Plain,
        OutputFormat::Bbcode,
        OutputFormat::Markdown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Bbcode => "bbcode",
            OutputFormat::Markdown => "markdown",
        }
    }

    /// The extension of the report files.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            _ => "txt",
        }
    }

    /// The name of the template that renders the reports.
    pub fn template(&self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain.txt",
            OutputFormat::Bbcode => "bbcode.txt",
            OutputFormat::Markdown => "markdown.md",
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, DeriveDisplay, Error)]
#[display("{name:?} is not a format, expected plain, bbcode or markdown")]
pub struct UnknownFormat {
    #[error(not(source))]
    pub name: String,
}

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        OutputFormat::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or(UnknownFormat { name: s.to_owned() })
    }
}

use clap_derive::Parser;
use derive_more::Display;
use dialoguer::Select;
use tracing::warn;

use std::{
    error,
    path::{Path, PathBuf},
};

use diagnoses_extractor::{display::OutputFormat, structures::Department};

#[derive(Debug, Display)]
enum InvalidPath {
    #[display("invalid path (does not exist)")]
    InvalidPath,
    #[display("not a file")]
    NotAFile,
    #[display("not a directory")]
    NotADir,
}

impl error::Error for InvalidPath {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

/// A function to parse a path argument that must name a file.
fn parse_file_arg(input: &str) -> Result<PathBuf, InvalidPath> {
    let p = Path::new(input);
    if !p.exists() {
        Err(InvalidPath::InvalidPath)
    } else if !p.is_file() {
        Err(InvalidPath::NotAFile)
    } else {
        Ok(p.to_path_buf())
    }
}

/// A function to parse a path argument that must name a directory.
fn parse_dir_arg(input: &str) -> Result<PathBuf, InvalidPath> {
    let p = Path::new(input);
    if !p.exists() {
        Err(InvalidPath::InvalidPath)
    } else if !p.is_dir() {
        Err(InvalidPath::NotADir)
    } else {
        Ok(p.to_path_buf())
    }
}

/// The arguments to the program.
#[derive(Parser)]
#[command(version, about)]
pub struct Args {
    #[arg(default_value = ".", value_parser = parse_dir_arg)]
    /// The directory holding the Localization, Symptoms and Diagnoses folders.
    pub data_dir: PathBuf,
    #[arg(short, long, default_value = "./Output")]
    /// The output path for the reports.
    pub output: PathBuf,
    #[arg(short, long)]
    /// The report layout: plain, bbcode or markdown.
    pub format: Option<OutputFormat>,
    #[arg(short, long = "department")]
    /// The departments to process, all of them by default.
    pub departments: Vec<Department>,
    #[arg(short, long, value_parser = parse_file_arg)]
    /// A file of `game text=phrase` lines used to phrase examinations and treatments.
    pub phrasing: Option<PathBuf>,
    #[arg(short, long, value_parser = parse_dir_arg)]
    /// A directory to load the report templates from instead of the built-in ones.
    pub templates: Option<PathBuf>,
    #[arg(long)]
    /// A path to a json file to dump the assembled departments to.
    pub dump: Option<PathBuf>,
    #[arg(short, long, default_value_t = false)]
    /// A flag that tells the program not to interact with the user.
    pub no_interaction: bool,
}

impl Args {
    /// The departments to process, in the order given, without repeats.
    pub fn departments(&self) -> Vec<Department> {
        if self.departments.is_empty() {
            return Department::ALL.to_vec();
        }
        let mut res: Vec<Department> = Vec::with_capacity(self.departments.len());
        for department in &self.departments {
            if !res.contains(department) {
                res.push(*department);
            }
        }
        res
    }

    /// The report format, asking the user for it if it was not given and
    /// `interactive` is set.
    pub fn format(&self, interactive: bool) -> OutputFormat {
        match self.format {
            Some(format) => format,
            None if interactive => prompt_format(),
            None => OutputFormat::default(),
        }
    }
}

/// Asks the user to choose a report format.
fn prompt_format() -> OutputFormat {
    let default = OutputFormat::default();
    let start = OutputFormat::ALL
        .iter()
        .position(|f| *f == default)
        .unwrap_or(0);
    match Select::new()
        .with_prompt("Choose the report format")
        .items(&OutputFormat::ALL)
        .default(start)
        .interact()
    {
        Ok(i) => OutputFormat::ALL[i],
        Err(e) => {
            warn!("format prompt failed, using {}: {}", default, e);
            default
        }
    }
}

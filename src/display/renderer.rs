use std::{
    error,
    fmt::{self, Display},
    fs, io,
    path::{Path, PathBuf},
};

use minijinja::{context, Environment};
use serde::Serialize;
use tracing::debug;

use super::{
    super::{
        structures::{Department, DepartmentReport, Disease, Occurrence, Symptom, SymptomCatalog},
        types::GameString,
    },
    jinja_env::{DATA_TEMPLATE_NAME, INDEX_TEMPLATE_NAME},
    OutputFormat,
};

const REPORTS_DIR: &str = "Formatted-Diagnoses";
const DATA_DIR: &str = "Department-Data";
const PREVIOUS_DIR: &str = "Previous";
const INDEX_FILE: &str = "exams-and-treatments.txt";

/// An error that occurred while writing the reports
#[derive(Debug)]
pub enum RenderError {
    Template(minijinja::Error),
    IOError(PathBuf, io::Error),
}

impl From<minijinja::Error> for RenderError {
    fn from(e: minijinja::Error) -> Self {
        RenderError::Template(e)
    }
}

impl Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Template(e) => write!(f, "template error: {}", e),
            RenderError::IOError(path, e) => write!(f, "failed to write {}: {}", path.display(), e),
        }
    }
}

impl error::Error for RenderError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            RenderError::Template(e) => Some(e),
            RenderError::IOError(_, e) => Some(e),
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> RenderError + '_ {
    move |e| RenderError::IOError(path.to_path_buf(), e)
}

/// A diagnosis as the report templates see it, symptoms from the most to
/// the least likely.
#[derive(Serialize)]
struct DiseaseView<'a> {
    name: &'a GameString,
    description: Option<&'a GameString>,
    occurrence: Occurrence,
    payment: Option<&'a GameString>,
    symptoms: Vec<&'a Symptom>,
}

impl<'a> From<&'a Disease> for DiseaseView<'a> {
    fn from(disease: &'a Disease) -> Self {
        DiseaseView {
            name: disease.name(),
            description: disease.description(),
            occurrence: disease.occurrence(),
            payment: disease.payment(),
            symptoms: disease.symptoms_by_probability(),
        }
    }
}

/// What happened to the report of a department compared to the last run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportChange {
    /// There was no report before
    New,
    Unchanged,
    /// The length of the report differs from the previous one
    Changed,
}

/// A struct that renders reports into text files.
/// It holds a reference to the [Environment] that is used to render the
/// templates, the chosen [OutputFormat] and the root path of the output.
pub struct Renderer<'a> {
    env: &'a Environment<'a>,
    format: OutputFormat,
    path: PathBuf,
}

impl<'a> Renderer<'a> {
    /// Create a new Renderer writing under `path`, creating the output
    /// directories as needed.
    pub fn new<P: AsRef<Path>>(
        env: &'a Environment<'a>,
        format: OutputFormat,
        path: P,
    ) -> Result<Self, RenderError> {
        let path = path.as_ref().to_path_buf();
        for dir in [REPORTS_DIR, DATA_DIR, PREVIOUS_DIR] {
            let dir = path.join(dir);
            fs::create_dir_all(&dir).map_err(io_error(&dir))?;
        }
        Ok(Renderer { env, format, path })
    }

    /// Returns the root path of the rendered output
    pub fn get_path(&self) -> &Path {
        &self.path
    }

    pub fn report_path(&self, department: Department) -> PathBuf {
        self.path.join(REPORTS_DIR).join(format!(
            "{}-diagnoses.{}",
            department.slug(),
            self.format.extension()
        ))
    }

    fn previous_path(&self, department: Department) -> PathBuf {
        self.path.join(PREVIOUS_DIR).join(format!(
            "previous-{}-diagnoses.{}",
            department.slug(),
            self.format.extension()
        ))
    }

    pub fn data_path(&self, department: Department) -> PathBuf {
        self.path
            .join(DATA_DIR)
            .join(format!("{}-department-data.txt", department.slug()))
    }

    pub fn index_path(&self) -> PathBuf {
        self.path.join(INDEX_FILE)
    }

    /// Copies the existing report of the department into the previous run
    /// directory and returns its length.
    fn backup(&self, department: Department) -> Result<Option<u64>, RenderError> {
        let report = self.report_path(department);
        if !report.is_file() {
            return Ok(None);
        }
        let previous = self.previous_path(department);
        let len = fs::copy(&report, &previous).map_err(io_error(&previous))?;
        debug!("backed up {} to {}", report.display(), previous.display());
        Ok(Some(len))
    }

    /// Renders the diagnosis report of a department, diagnoses in
    /// alphabetical order, backing up the report of the previous run.
    pub fn render_report(&self, report: &DepartmentReport) -> Result<ReportChange, RenderError> {
        let mut diseases: Vec<&Disease> = report.diseases.iter().collect();
        diseases.sort_by(|a, b| a.name().cmp(b.name()));
        let views: Vec<DiseaseView> = diseases.into_iter().map(DiseaseView::from).collect();
        let contents = self.env.get_template(self.format.template())?.render(context! {
            department => report.department.name(),
            diseases => views,
        })?;
        let previous = self.backup(report.department)?;
        let path = self.report_path(report.department);
        fs::write(&path, &contents).map_err(io_error(&path))?;
        Ok(match previous {
            None => ReportChange::New,
            Some(len) if len == contents.len() as u64 => ReportChange::Unchanged,
            Some(_) => ReportChange::Changed,
        })
    }

    /// Renders the statistics of a department.
    pub fn render_data(&self, report: &DepartmentReport) -> Result<(), RenderError> {
        let stats = &report.statistics;
        let contents = self.env.get_template(DATA_TEMPLATE_NAME)?.render(context! {
            department => report.department.name(),
            total => stats.total_diseases(),
            fatal => stats.total_fatal_diseases(),
            deciding => stats.deciding_exams(),
            urgent => stats.urgent_exams(),
        })?;
        let path = self.data_path(report.department);
        fs::write(&path, contents).map_err(io_error(&path))?;
        Ok(())
    }

    /// Renders the index of every examination and treatment in the catalog.
    pub fn render_index(&self, catalog: &SymptomCatalog) -> Result<(), RenderError> {
        let contents = self.env.get_template(INDEX_TEMPLATE_NAME)?.render(context! {
            examinations => catalog.examinations(),
            treatments => catalog.treatments(),
        })?;
        let path = self.index_path();
        fs::write(&path, contents).map_err(io_error(&path))?;
        Ok(())
    }
}

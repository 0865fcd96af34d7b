use std::{
    error,
    fmt::{self, Display},
};

use indicatif::ProgressBar;

use super::{
    display::{RenderError, Renderer, ReportChange},
    game_data::{GameDataError, GameDataLoader, Localization},
    structures::{assemble_department, AssemblyError, Department, DepartmentReport, SymptomCatalog},
};

/// An error that stops the processing of the remaining departments.
#[derive(Debug)]
pub enum RunError {
    /// The diagnosis file of the department could not be read
    Load(Department, GameDataError),
    /// A record of the department references something that does not exist,
    /// or holds a value that makes no sense
    Assembly(AssemblyError),
    Render(Department, RenderError),
}

impl Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Load(department, e) => write!(f, "failed to load {}: {}", department, e),
            RunError::Assembly(e) => write!(f, "{}", e),
            RunError::Render(department, e) => {
                write!(f, "failed to write the report of {}: {}", department, e)
            }
        }
    }
}

impl error::Error for RunError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            RunError::Load(_, e) => Some(e),
            RunError::Assembly(e) => Some(e),
            RunError::Render(_, e) => Some(e),
        }
    }
}

/// The outcome of processing a set of departments.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// The departments that were written, in processing order
    pub reports: Vec<DepartmentReport>,
    /// The departments whose report differs from the previous run
    pub changed: Vec<Department>,
    /// The departments left without a report because their file is broken
    pub skipped: Vec<AssemblyError>,
}

impl RunSummary {
    pub fn total_diagnoses(&self) -> usize {
        self.reports.iter().map(|r| r.diseases.len()).sum()
    }

    /// Returns true if every department got its report.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Assembles and writes the reports of the given departments, in order.
///
/// A department whose diagnosis file has an unterminated block is skipped
/// and recorded in [RunSummary::skipped], the others are still processed.
/// Any other failure stops the run right away.
pub fn process_departments(
    departments: &[Department],
    loader: &GameDataLoader,
    catalog: &SymptomCatalog,
    localization: &Localization,
    renderer: &Renderer<'_>,
    progress_bar: &ProgressBar,
) -> Result<RunSummary, RunError> {
    let mut summary = RunSummary::default();
    for &department in departments {
        progress_bar.set_message(department.name());
        let result = process_department(department, loader, catalog, localization, renderer);
        progress_bar.inc(1);
        match result {
            Ok((report, change)) => {
                if change == ReportChange::Changed {
                    summary.changed.push(department);
                }
                summary.reports.push(report);
            }
            Err(RunError::Assembly(e)) if e.is_structural() => summary.skipped.push(e),
            Err(e) => {
                progress_bar.abandon();
                return Err(e);
            }
        }
    }
    progress_bar.finish_with_message("Departments processed");
    Ok(summary)
}

fn process_department(
    department: Department,
    loader: &GameDataLoader,
    catalog: &SymptomCatalog,
    localization: &Localization,
    renderer: &Renderer<'_>,
) -> Result<(DepartmentReport, ReportChange), RunError> {
    let lines = loader
        .diagnosis_lines(department)
        .map_err(|e| RunError::Load(department, e))?;
    let report = assemble_department(&lines, department, catalog, localization)
        .map_err(RunError::Assembly)?;
    let change = renderer
        .render_data(&report)
        .and_then(|_| renderer.render_report(&report))
        .map_err(|e| RunError::Render(department, e))?;
    Ok((report, change))
}

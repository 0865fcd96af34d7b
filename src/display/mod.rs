/// A submodule that provides the [OutputFormat] of the reports.
mod format;
pub use format::{OutputFormat, UnknownFormat};

mod normalize;
pub use normalize::normalize;

/// A submodule that provides the [Phrasing] table for examinations and treatments.
mod phrasing;
pub use phrasing::Phrasing;

/// The submodule responsible for creating the [minijinja::Environment] and loading of templates.
mod jinja_env;
pub use jinja_env::create_env;

/// A submodule that writes the reports into the output directory.
mod renderer;
pub use renderer::{RenderError, Renderer, ReportChange};

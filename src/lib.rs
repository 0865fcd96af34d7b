//! Extracts the diagnoses of Project Hospital from its game data files and
//! turns them into reports.
//!
//! ## Getting Started
//!
//! The game data is read through a [game_data::GameDataLoader]. It builds
//! the [localization tables](game_data::Localization) first, then the
//! [symptom catalog](structures::SymptomCatalog), and finally hands out the
//! lines of each department's diagnosis file for
//! [structures::assemble_department].
//!
//! ## Example
//!
//! ```no_run
//! use diagnoses_extractor::{
//!     game_data::GameDataLoader,
//!     structures::{assemble_department, Department},
//! };
//!
//! let loader = GameDataLoader::new("/path/to/game/data");
//! let localization = loader.load_localization().unwrap();
//! let catalog = loader.load_symptoms(&localization).unwrap();
//! let lines = loader.diagnosis_lines(Department::Cardiology).unwrap();
//! let report =
//!     assemble_department(&lines, Department::Cardiology, &catalog, &localization).unwrap();
//! println!("{} diagnoses", report.diseases.len());
//! ```

/// A submodule that provides opaque types commonly used in the project
pub mod types;

/// The line based scanner every game data file is read with, along with
/// the errors it reports.
pub mod parser;

/// A submodule for loading the game data, localization first.
pub mod game_data;

/// The symptoms, diagnoses and statistics extracted from the game data.
pub mod structures;

/// A module for writing the extracted data into reports.
pub mod display;

/// Processing of a set of departments, from diagnosis file to report.
pub mod run;

use super::parser::ParsingError;

/// A submodule that turns localization tables into [LookupTable]s.
mod localizer;
pub use localizer::LookupTable;

/// A submodule that reads the game data files from disk.
mod loader;
pub use loader::{GameDataError, GameDataLoader};

/// The four localization tables the extraction resolves reference keys
/// through. Built once, read only afterwards.
#[derive(Debug)]
pub struct Localization {
    /// Disease names and descriptions
    pub diseases: LookupTable,
    pub examinations: LookupTable,
    pub symptoms: LookupTable,
    pub treatments: LookupTable,
}

impl Localization {
    /// Builds the four tables from the lines of their localization files.
    /// Only the disease table retains descriptions.
    pub fn build<S: AsRef<str>>(
        diseases: &[S],
        examinations: &[S],
        symptoms: &[S],
        treatments: &[S],
    ) -> Result<Self, ParsingError> {
        Ok(Localization {
            diseases: LookupTable::build(DISEASE_TABLE, diseases, true)?,
            examinations: LookupTable::build(EXAMINATION_TABLE, examinations, false)?,
            symptoms: LookupTable::build(SYMPTOM_TABLE, symptoms, false)?,
            treatments: LookupTable::build(TREATMENT_TABLE, treatments, false)?,
        })
    }
}

pub const DISEASE_TABLE: &str = "the disease table";
pub const EXAMINATION_TABLE: &str = "the examination table";
pub const SYMPTOM_TABLE: &str = "the symptom table";
pub const TREATMENT_TABLE: &str = "the treatment table";

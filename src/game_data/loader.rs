use std::{
    error,
    fmt::{self, Display},
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{
    super::{
        parser::ParsingError,
        structures::{Department, SymptomCatalog},
    },
    Localization, LookupTable, DISEASE_TABLE, EXAMINATION_TABLE, SYMPTOM_TABLE, TREATMENT_TABLE,
};

/// An error that occurred while loading game data
#[derive(Debug)]
pub enum GameDataError {
    /// A file is missing at the provided path
    MissingFile(PathBuf),
    IOError(PathBuf, io::Error),
    /// A file could be read but its contents make no sense
    ParsingError(PathBuf, ParsingError),
}

impl Display for GameDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameDataError::MissingFile(path) => {
                write!(f, "a file {} is missing", path.display())
            }
            GameDataError::IOError(path, e) => {
                write!(f, "failed to read {}: {}", path.display(), e)
            }
            GameDataError::ParsingError(path, e) => {
                write!(f, "error in {}, {}", path.display(), e)
            }
        }
    }
}

impl error::Error for GameDataError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            GameDataError::IOError(_, e) => Some(e),
            GameDataError::ParsingError(_, e) => Some(e),
            _ => None,
        }
    }
}

// File system stuff

const LOCALIZATION_DIR: &str = "Localization";
const DISEASE_TABLE_FILE: &str = "DiagnosesTable.txt";
const EXAMINATION_TABLE_FILE: &str = "ExamTable.txt";
const SYMPTOM_TABLE_FILE: &str = "SymptomTable.txt";
const TREATMENT_TABLE_FILE: &str = "TreatmentTable.txt";

const SYMPTOMS_DIR: &str = "Symptoms";
/// The symptom files, in the order they are read
const SYMPTOM_FILES: [&str; 2] = ["Symptoms_main.txt", "Symptoms.txt"];

const DIAGNOSES_DIR: &str = "Diagnoses";
const DIAGNOSES_PREFIX: &str = "Diagnoses";
const DIAGNOSES_SUFFIX: &str = ".txt";

const BOM: char = '\u{feff}';

/// A loader for the game data found under a single root directory
pub struct GameDataLoader {
    root: PathBuf,
}

impl GameDataLoader {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        GameDataLoader {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads a file into lines, dropping the byte order mark if there is one.
    pub fn read_lines(path: &Path) -> Result<Vec<String>, GameDataError> {
        if !path.is_file() {
            return Err(GameDataError::MissingFile(path.to_path_buf()));
        }
        let contents =
            fs::read_to_string(path).map_err(|e| GameDataError::IOError(path.to_path_buf(), e))?;
        let contents = contents.strip_prefix(BOM).unwrap_or(&contents);
        debug!("read {}", path.display());
        Ok(contents.lines().map(|l| l.to_owned()).collect())
    }

    /// Reads a localization file into a [LookupTable].
    fn load_table(
        &self,
        file: &str,
        name: &'static str,
        want_description: bool,
    ) -> Result<LookupTable, GameDataError> {
        let path = self.root.join(LOCALIZATION_DIR).join(file);
        let lines = Self::read_lines(&path)?;
        LookupTable::build(name, &lines, want_description)
            .map_err(|e| GameDataError::ParsingError(path, e))
    }

    /// Builds the four localization tables.
    pub fn load_localization(&self) -> Result<Localization, GameDataError> {
        Ok(Localization {
            diseases: self.load_table(DISEASE_TABLE_FILE, DISEASE_TABLE, true)?,
            examinations: self.load_table(EXAMINATION_TABLE_FILE, EXAMINATION_TABLE, false)?,
            symptoms: self.load_table(SYMPTOM_TABLE_FILE, SYMPTOM_TABLE, false)?,
            treatments: self.load_table(TREATMENT_TABLE_FILE, TREATMENT_TABLE, false)?,
        })
    }

    /// Builds the symptom catalog out of both symptom files.
    pub fn load_symptoms(&self, localization: &Localization) -> Result<SymptomCatalog, GameDataError> {
        let mut catalog = SymptomCatalog::default();
        for file in SYMPTOM_FILES {
            let path = self.root.join(SYMPTOMS_DIR).join(file);
            let lines = Self::read_lines(&path)?;
            catalog
                .add_from_lines(&lines, localization)
                .map_err(|e| GameDataError::ParsingError(path, e))?;
        }
        Ok(catalog)
    }

    /// The path of the diagnosis file of a department.
    pub fn diagnosis_path(&self, department: Department) -> PathBuf {
        self.root.join(DIAGNOSES_DIR).join(format!(
            "{}{}{}",
            DIAGNOSES_PREFIX,
            department.file_code(),
            DIAGNOSES_SUFFIX
        ))
    }

    /// Reads the lines of the diagnosis file of a department.
    pub fn diagnosis_lines(&self, department: Department) -> Result<Vec<String>, GameDataError> {
        Self::read_lines(&self.diagnosis_path(department))
    }
}

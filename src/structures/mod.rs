use std::{
    fmt::{self, Display},
    str::FromStr,
};

use derive_more::{Display as DeriveDisplay, Error};
use serde::Serialize;

/// A submodule that provides the [Symptom] value type.
mod symptom;
pub use symptom::{HourWindow, Symptom};

/// A submodule that builds the [SymptomCatalog] of symptom prototypes.
mod catalog;
pub use catalog::{SymptomCatalog, SYMPTOM_CATALOG};

mod disease;
pub use disease::Disease;

/// A submodule that computes the [DepartmentStatistics] of a department.
mod statistics;
pub use statistics::DepartmentStatistics;

/// A submodule that turns diagnosis files into [DepartmentReport]s.
mod assembler;
pub use assembler::{assemble_department, AssemblyError, DepartmentReport};

/// A hospital department, each one has its own diagnosis file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Department {
    Emergency,
    GeneralSurgery,
    InternalMedicine,
    Orthopedics,
    Cardiology,
    Neurology,
    InfectiousDiseases,
}

impl Department {
    /// Every department, in the order the game lists them.
    pub const ALL: [Department; 7] = [
        Department::Emergency,
        Department::GeneralSurgery,
        Department::InternalMedicine,
        Department::Orthopedics,
        Department::Cardiology,
        Department::Neurology,
        Department::InfectiousDiseases,
    ];

    /// The identifier used in file names and on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Department::Emergency => "emergency",
            Department::GeneralSurgery => "general-surgery",
            Department::InternalMedicine => "internal-medicine",
            Department::Orthopedics => "orthopedics",
            Department::Cardiology => "cardiology",
            Department::Neurology => "neurology",
            Department::InfectiousDiseases => "infectious-diseases",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Department::Emergency => "Emergency",
            Department::GeneralSurgery => "General Surgery",
            Department::InternalMedicine => "Internal Medicine",
            Department::Orthopedics => "Orthopedics",
            Department::Cardiology => "Cardiology",
            Department::Neurology => "Neurology",
            Department::InfectiousDiseases => "Infectious Diseases",
        }
    }

    /// The code the game uses in the name of the diagnosis file.
    pub fn file_code(&self) -> &'static str {
        match self {
            Department::Emergency => "ER",
            Department::GeneralSurgery => "SURG",
            Department::InternalMedicine => "INTERN",
            Department::Orthopedics => "ORTHO",
            Department::Cardiology => "CARDIO",
            Department::Neurology => "NEURO",
            Department::InfectiousDiseases => "INFECT",
        }
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A department slug that matches none of the departments.
#[derive(Debug, DeriveDisplay, Error, PartialEq, Eq)]
#[display("{slug:?} is not a department, expected one of: emergency, general-surgery, internal-medicine, orthopedics, cardiology, neurology, infectious-diseases")]
pub struct UnknownDepartment {
    #[error(not(source))]
    pub slug: String,
}

impl FromStr for Department {
    type Err = UnknownDepartment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim().to_lowercase();
        Department::ALL
            .into_iter()
            .find(|d| d.slug() == slug)
            .ok_or(UnknownDepartment {
                slug: s.to_owned(),
            })
    }
}

/// How often a disease shows up among patients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Occurrence {
    Common,
    Uncommon,
    Rare,
}

impl Occurrence {
    /// Classifies the occurrence line of a diagnosis by its contents.
    /// Text that is neither common nor uncommon counts as rare.
    pub fn classify(line: &str) -> Self {
        // UNCOMMON contains COMMON, so it goes first
        if line.contains("UNCOMMON") {
            Occurrence::Uncommon
        } else if line.contains("COMMON") {
            Occurrence::Common
        } else {
            Occurrence::Rare
        }
    }
}

impl Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occurrence::Common => f.write_str("Common"),
            Occurrence::Uncommon => f.write_str("Uncommon"),
            Occurrence::Rare => f.write_str("Rare"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_slugs() {
        for department in Department::ALL {
            assert_eq!(department.slug().parse::<Department>(), Ok(department));
        }
        assert_eq!(
            " Cardiology ".parse::<Department>(),
            Ok(Department::Cardiology)
        );
        assert!("radiology".parse::<Department>().is_err());
    }

    #[test]
    fn test_department_display() {
        assert_eq!(Department::InfectiousDiseases.to_string(), "Infectious Diseases");
        assert_eq!(Department::GeneralSurgery.file_code(), "SURG");
    }

    #[test]
    fn test_occurrence() {
        assert_eq!(
            Occurrence::classify("<Occurrence>OCCURRENCE_COMMON</Occurrence>"),
            Occurrence::Common
        );
        assert_eq!(
            Occurrence::classify("<Occurrence>OCCURRENCE_UNCOMMON</Occurrence>"),
            Occurrence::Uncommon
        );
        assert_eq!(
            Occurrence::classify("<Occurrence>OCCURRENCE_RARE</Occurrence>"),
            Occurrence::Rare
        );
        assert_eq!(
            Occurrence::classify("<Occurrence>SOMETIMES</Occurrence>"),
            Occurrence::Rare
        );
    }
}

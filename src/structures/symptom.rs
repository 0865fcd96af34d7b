use std::fmt::{self, Display};

use serde::Serialize;

use super::super::types::GameString;

/// A span of in-game hours during which an untreated symptom may escalate.
/// The bounds are kept as the game data spells them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourWindow {
    pub start: GameString,
    pub end: GameString,
}

impl HourWindow {
    /// Commits a window only once both of its bounds are known.
    pub fn from_bounds(start: Option<GameString>, end: Option<GameString>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Some(HourWindow { start, end }),
            _ => None,
        }
    }
}

impl Display for HourWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// A symptom of a disease.
///
/// The catalog holds prototypes, which have no probability. Each diagnosis
/// gets its own [specialized](Symptom::specialize) instance, a new value
/// that shares nothing mutable with the prototype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symptom {
    name: GameString,
    probability: Option<u8>,
    examinations: Vec<GameString>,
    treatment: Option<GameString>,
    collapse: Option<GameString>,
    collapse_window: Option<HourWindow>,
    death_window: Option<HourWindow>,
    hazard: Option<GameString>,
    fatal: bool,
    serious: bool,
}

impl Symptom {
    /// Creates a prototype symptom.
    pub fn new(
        name: GameString,
        examinations: Vec<GameString>,
        treatment: Option<GameString>,
        collapse: Option<GameString>,
        collapse_window: Option<HourWindow>,
        death_window: Option<HourWindow>,
        hazard: Option<GameString>,
    ) -> Self {
        let fatal = death_window.is_some();
        let serious = collapse.is_some();
        Symptom {
            name,
            probability: None,
            examinations,
            treatment,
            collapse,
            collapse_window,
            death_window,
            hazard,
            fatal,
            serious,
        }
    }

    /// Creates the instance of this symptom a single diagnosis presents with
    /// the given probability.
    pub fn specialize(&self, probability: u8) -> Symptom {
        Symptom {
            name: self.name.clone(),
            probability: Some(probability),
            examinations: self.examinations.to_vec(),
            treatment: self.treatment.clone(),
            collapse: self.collapse.clone(),
            collapse_window: self.collapse_window.clone(),
            death_window: self.death_window.clone(),
            hazard: self.hazard.clone(),
            fatal: self.fatal,
            serious: self.serious,
        }
    }

    pub fn name(&self) -> &GameString {
        &self.name
    }

    /// The probability in percent, [None] for catalog prototypes.
    pub fn probability(&self) -> Option<u8> {
        self.probability
    }

    /// The examinations that reveal the symptom, in the order the game data
    /// lists them.
    pub fn examinations(&self) -> &[GameString] {
        &self.examinations
    }

    pub fn treatment(&self) -> Option<&GameString> {
        self.treatment.as_ref()
    }

    /// The display name of the symptom this one collapses into.
    pub fn collapse(&self) -> Option<&GameString> {
        self.collapse.as_ref()
    }

    pub fn collapse_window(&self) -> Option<&HourWindow> {
        self.collapse_window.as_ref()
    }

    pub fn death_window(&self) -> Option<&HourWindow> {
        self.death_window.as_ref()
    }

    pub fn hazard(&self) -> Option<&GameString> {
        self.hazard.as_ref()
    }

    /// A symptom that may kill the patient.
    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    /// A symptom that may collapse into another symptom.
    pub fn is_serious(&self) -> bool {
        self.serious
    }

    /// A symptom the examinations revealing it should be run early for.
    pub fn is_urgent(&self) -> bool {
        self.fatal || self.serious || self.collapse_window.is_some()
    }
}

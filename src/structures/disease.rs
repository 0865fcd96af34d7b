use serde::Serialize;

use super::{super::types::GameString, Department, Occurrence, Symptom};

/// A diagnosis of a department, with its own specialized symptoms.
#[derive(Debug, Clone, Serialize)]
pub struct Disease {
    name: GameString,
    description: Option<GameString>,
    department: Department,
    occurrence: Occurrence,
    /// The base insurance payment, verbatim
    payment: Option<GameString>,
    symptoms: Vec<Symptom>,
}

impl Disease {
    pub fn new(
        name: GameString,
        description: Option<GameString>,
        department: Department,
        occurrence: Occurrence,
        payment: Option<GameString>,
        symptoms: Vec<Symptom>,
    ) -> Self {
        Disease {
            name,
            description,
            department,
            occurrence,
            payment,
            symptoms,
        }
    }

    pub fn name(&self) -> &GameString {
        &self.name
    }

    pub fn description(&self) -> Option<&GameString> {
        self.description.as_ref()
    }

    pub fn department(&self) -> Department {
        self.department
    }

    pub fn occurrence(&self) -> Occurrence {
        self.occurrence
    }

    pub fn payment(&self) -> Option<&GameString> {
        self.payment.as_ref()
    }

    /// The symptoms in the order the diagnosis lists them.
    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    /// The symptoms from the most to the least likely. Symptoms that are
    /// equally likely keep their relative order.
    pub fn symptoms_by_probability(&self) -> Vec<&Symptom> {
        let mut sorted: Vec<&Symptom> = self.symptoms.iter().collect();
        sorted.sort_by(|a, b| b.probability().cmp(&a.probability()));
        sorted
    }
}

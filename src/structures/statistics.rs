use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::{super::types::GameString, Disease, SymptomCatalog};

/// The probability of a symptom that every patient presents with
const CERTAIN: u8 = 100;

/// Frequencies gathered over the diagnoses of a single department.
///
/// An examination is counted at most once per diagnosis, running it once
/// reveals every symptom it can reveal.
#[derive(Debug, Default, Serialize)]
pub struct DepartmentStatistics {
    total_diseases: usize,
    total_fatal_diseases: usize,
    /// Examinations revealing a symptom every patient of a diagnosis has
    deciding_exams: HashMap<GameString, usize>,
    /// Examinations revealing a symptom that may kill or collapse
    urgent_exams: HashMap<GameString, usize>,
}

impl DepartmentStatistics {
    /// Collects the statistics of the fully assembled diagnoses.
    pub fn collect(diseases: &[Disease], catalog: &SymptomCatalog) -> Self {
        let mut stats = DepartmentStatistics {
            total_diseases: diseases.len(),
            ..Default::default()
        };
        for disease in diseases {
            let mut seen_deciding: HashSet<&GameString> = HashSet::new();
            let mut seen_urgent: HashSet<&GameString> = HashSet::new();
            let mut fatal = false;
            for symptom in disease.symptoms() {
                if symptom.is_fatal()
                    || symptom
                        .collapse()
                        .is_some_and(|c| catalog.is_fatal_name(c))
                {
                    fatal = true;
                }
                let deciding = symptom.probability() == Some(CERTAIN);
                let urgent = symptom.is_urgent();
                for exam in symptom.examinations() {
                    if deciding && seen_deciding.insert(exam) {
                        *stats.deciding_exams.entry(exam.clone()).or_default() += 1;
                    }
                    if urgent && seen_urgent.insert(exam) {
                        *stats.urgent_exams.entry(exam.clone()).or_default() += 1;
                    }
                }
            }
            if fatal {
                stats.total_fatal_diseases += 1;
            }
        }
        stats
    }

    pub fn total_diseases(&self) -> usize {
        self.total_diseases
    }

    /// The number of diagnoses that may kill the patient.
    pub fn total_fatal_diseases(&self) -> usize {
        self.total_fatal_diseases
    }

    pub fn deciding_exam_count(&self, exam: &str) -> usize {
        self.deciding_exams.get(exam).copied().unwrap_or(0)
    }

    pub fn urgent_exam_count(&self, exam: &str) -> usize {
        self.urgent_exams.get(exam).copied().unwrap_or(0)
    }

    /// Deciding examinations from the most to the least frequent.
    pub fn deciding_exams(&self) -> Vec<(GameString, usize)> {
        sorted_frequencies(&self.deciding_exams)
    }

    /// Urgent examinations from the most to the least frequent.
    pub fn urgent_exams(&self) -> Vec<(GameString, usize)> {
        sorted_frequencies(&self.urgent_exams)
    }
}

/// Sorts by descending count, ties broken by name.
fn sorted_frequencies(map: &HashMap<GameString, usize>) -> Vec<(GameString, usize)> {
    let mut list: Vec<(GameString, usize)> =
        map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    list.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    list
}

#[cfg(test)]
mod tests {
    use super::{
        super::{catalog::tests::catalog, Department, Occurrence},
        *,
    };

    fn disease(name: &str, symptoms: &[(&str, u8)], catalog: &SymptomCatalog) -> Disease {
        Disease::new(
            name.into(),
            None,
            Department::Cardiology,
            Occurrence::Common,
            None,
            symptoms
                .iter()
                .map(|(id, p)| catalog.get(id).unwrap().specialize(*p))
                .collect(),
        )
    }

    #[test]
    fn test_deciding_once_per_diagnosis() {
        let catalog = catalog();
        // nausea and chest pain are both revealed by the interview
        let diseases = [
            disease("a", &[("sym_07", 100), ("SYM_CHEST_PAIN", 100)], &catalog),
            disease("b", &[("sym_07", 100)], &catalog),
            disease("c", &[("sym_07", 50)], &catalog),
        ];
        let stats = DepartmentStatistics::collect(&diseases, &catalog);
        assert_eq!(stats.total_diseases(), 3);
        assert_eq!(stats.deciding_exam_count("Interview"), 2);
        assert_eq!(stats.deciding_exam_count("ECG"), 1);
        assert_eq!(stats.deciding_exam_count("Blood analysis"), 0);
    }

    #[test]
    fn test_fatal_once_per_diagnosis() {
        let catalog = catalog();
        let diseases = [
            disease("a", &[("SYM_ARREST", 20), ("SYM_ARREST", 40)], &catalog),
            disease("b", &[("sym_07", 100)], &catalog),
        ];
        let stats = DepartmentStatistics::collect(&diseases, &catalog);
        assert_eq!(stats.total_fatal_diseases(), 1);
    }

    #[test]
    fn test_collapse_into_fatal() {
        let catalog = catalog();
        // chest pain has no death window of its own, it collapses into an arrest
        let diseases = [disease("a", &[("SYM_CHEST_PAIN", 30)], &catalog)];
        let stats = DepartmentStatistics::collect(&diseases, &catalog);
        assert_eq!(stats.total_fatal_diseases(), 1);
    }

    #[test]
    fn test_urgent_exams() {
        let catalog = catalog();
        let diseases = [
            disease("a", &[("SYM_CHEST_PAIN", 30), ("SYM_ARREST", 10)], &catalog),
            disease("b", &[("SYM_ARREST", 10), ("SYM_FEVER", 100)], &catalog),
        ];
        let stats = DepartmentStatistics::collect(&diseases, &catalog);
        assert_eq!(stats.urgent_exam_count("ECG"), 2);
        assert_eq!(stats.urgent_exam_count("Interview"), 1);
        assert_eq!(stats.urgent_exam_count("Blood analysis"), 0);
        let urgent = stats.urgent_exams();
        assert_eq!(urgent[0], ("ECG".into(), 2));
        assert_eq!(urgent[1], ("Interview".into(), 1));
    }

    #[test]
    fn test_empty() {
        let stats = DepartmentStatistics::collect(&[], &catalog());
        assert_eq!(stats.total_diseases(), 0);
        assert!(stats.deciding_exams().is_empty());
    }
}

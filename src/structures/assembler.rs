use std::error;

use derive_more::Display;
use serde::Serialize;
use tracing::debug;

use super::{
    super::{
        game_data::Localization,
        parser::{
            tags::{
                CONDITION, CONDITION_END, DESCRIPTION_REF, OCCURRENCE, PAYMENT, PROBABILITY,
                SYMPTOMS, SYMPTOM_REF,
            },
            ParsingError, TagStream,
        },
        types::GameString,
    },
    Department, DepartmentStatistics, Disease, Occurrence, Symptom, SymptomCatalog,
};

/// Everything assembled out of a single department's diagnosis file.
#[derive(Debug, Serialize)]
pub struct DepartmentReport {
    pub department: Department,
    /// The diagnoses in the order the file lists them
    pub diseases: Vec<Disease>,
    pub statistics: DepartmentStatistics,
}

/// An error that occurred while assembling the diagnoses of a department.
#[derive(Debug, Display)]
#[display("error in {department} record #{record}: {source}")]
pub struct AssemblyError {
    department: Department,
    record: usize,
    source: ParsingError,
    partial: Vec<Disease>,
}

impl AssemblyError {
    pub fn department(&self) -> Department {
        self.department
    }

    /// The 0-based index of the diagnosis record that failed.
    pub fn record(&self) -> usize {
        self.record
    }

    pub fn parsing_error(&self) -> &ParsingError {
        &self.source
    }

    /// The diagnoses fully assembled before the failing record.
    pub fn partial(&self) -> &[Disease] {
        &self.partial
    }

    /// Returns true if the file itself is broken, as opposed to a reference
    /// the catalogs cannot resolve. Such an error only dooms the rest of the
    /// department's file.
    pub fn is_structural(&self) -> bool {
        matches!(self.source, ParsingError::UnterminatedBlock { .. })
    }
}

impl error::Error for AssemblyError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Parses the probability of a symptom rule.
fn parse_probability(value: &str, line: usize) -> Result<u8, ParsingError> {
    match value.trim().parse::<u8>() {
        Ok(p) if p <= 100 => Ok(p),
        _ => Err(ParsingError::InvalidValue {
            field: PROBABILITY.open(),
            value: value.to_owned(),
            line,
        }),
    }
}

/// Parses the diagnosis block opening on the line under the cursor.
fn parse_disease<'a, S: AsRef<str>>(
    stream: &mut TagStream<'a, S>,
    opening: &'a str,
    department: Department,
    catalog: &SymptomCatalog,
    localization: &Localization,
) -> Result<Disease, ParsingError> {
    let name = localization
        .diseases
        .localize(stream.field(opening, CONDITION)?)?;
    let mut description: Option<GameString> = None;
    let mut occurrence = Occurrence::Rare;
    let mut payment: Option<GameString> = None;
    let mut symptoms: Vec<Symptom> = Vec::new();
    stream.scan_block(CONDITION.open(), CONDITION_END, |s, line| {
        if CONDITION.opens(line) {
            // the opening line, already handled
        } else if DESCRIPTION_REF.opens(line) {
            let key = s.field(line, DESCRIPTION_REF)?;
            description = Some(localization.diseases.localize(key)?);
        } else if line.contains(OCCURRENCE) {
            occurrence = Occurrence::classify(line);
        } else if PAYMENT.opens(line) {
            payment = Some(s.field(line, PAYMENT)?.into());
        } else if SYMPTOMS.opens(line) {
            let mut probability: Option<u8> = None;
            s.scan_block(SYMPTOMS.open(), SYMPTOMS.close(), |s, line| {
                if PROBABILITY.opens(line) {
                    let value = s.field(line, PROBABILITY)?;
                    probability = Some(parse_probability(value, s.line_number())?);
                } else if SYMPTOM_REF.opens(line) {
                    let id = s.field(line, SYMPTOM_REF)?;
                    let p = probability.take().ok_or(ParsingError::InvalidValue {
                        field: PROBABILITY.open(),
                        value: String::new(),
                        line: s.line_number(),
                    })?;
                    symptoms.push(catalog.get(id)?.specialize(p));
                }
                Ok(())
            })?;
        }
        Ok(())
    })?;
    Ok(Disease::new(
        name,
        description,
        department,
        occurrence,
        payment,
        symptoms,
    ))
}

/// Assembles every diagnosis in the lines of a department's diagnosis file,
/// then collects the statistics of the department.
///
/// On failure nothing past the failing record is assembled, the diagnoses
/// before it are handed back through [AssemblyError::partial].
pub fn assemble_department<S: AsRef<str>>(
    lines: &[S],
    department: Department,
    catalog: &SymptomCatalog,
    localization: &Localization,
) -> Result<DepartmentReport, AssemblyError> {
    let mut stream = TagStream::new(lines);
    let mut diseases = Vec::new();
    while let Some(opening) = stream.seek(CONDITION.open()) {
        match parse_disease(&mut stream, opening, department, catalog, localization) {
            Ok(disease) => diseases.push(disease),
            Err(source) => {
                return Err(AssemblyError {
                    department,
                    record: diseases.len(),
                    source,
                    partial: diseases,
                })
            }
        }
    }
    debug!("assembled {} diagnoses for {}", diseases.len(), department);
    let statistics = DepartmentStatistics::collect(&diseases, catalog);
    Ok(DepartmentReport {
        department,
        diseases,
        statistics,
    })
}

#[cfg(test)]
mod tests {
    use super::{
        super::catalog::tests::{catalog, localization},
        *,
    };

    const DIAGNOSES: [&str; 30] = [
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>",
        "<Database>",
        "<GameDBMedicalCondition ID=\"DIS_FLU\">",
        "<AbbreviationLocID>DIS_FLU_DESCRIPTION</AbbreviationLocID>",
        "<Occurrence>OCCURRENCE_UNCOMMON</Occurrence>",
        "<InsurancePayment>450</InsurancePayment>",
        "<Symptoms>",
        "<GameDBSymptomRules>",
        "<ProbabilityPercent>100</ProbabilityPercent>",
        "<GameDBSymptomRef>sym_07</GameDBSymptomRef>",
        "</GameDBSymptomRules>",
        "<GameDBSymptomRules>",
        "<ProbabilityPercent>40</ProbabilityPercent>",
        "<GameDBSymptomRef>SYM_FEVER</GameDBSymptomRef>",
        "</GameDBSymptomRules>",
        "</Symptoms>",
        "</GameDBMedicalCondition>",
        "<GameDBMedicalCondition ID=\"DIS_MI\">",
        "<AbbreviationLocID>DIS_MI_DESCRIPTION</AbbreviationLocID>",
        "<Occurrence>OCCURRENCE_COMMON</Occurrence>",
        "<InsurancePayment>1200</InsurancePayment>",
        "<Symptoms>",
        "<ProbabilityPercent>100</ProbabilityPercent>",
        "<GameDBSymptomRef>SYM_CHEST_PAIN</GameDBSymptomRef>",
        "<ProbabilityPercent>30</ProbabilityPercent>",
        "<GameDBSymptomRef>sym_07</GameDBSymptomRef>",
        "</Symptoms>",
        "</GameDBMedicalCondition>",
        "</Database>",
        "",
    ];

    #[test]
    fn test_assemble() {
        let report = assemble_department(
            &DIAGNOSES,
            Department::Cardiology,
            &catalog(),
            &localization(),
        )
        .unwrap();
        assert_eq!(report.diseases.len(), 2);
        let flu = &report.diseases[0];
        assert_eq!(flu.name().as_ref(), "influenza");
        assert_eq!(flu.description().unwrap().as_ref(), "A viral infection.");
        assert_eq!(flu.occurrence(), Occurrence::Uncommon);
        assert_eq!(flu.payment().unwrap().as_ref(), "450");
        assert_eq!(flu.department(), Department::Cardiology);
        let probabilities: Vec<Option<u8>> =
            flu.symptoms().iter().map(|s| s.probability()).collect();
        assert_eq!(probabilities, vec![Some(100), Some(40)]);
        assert_eq!(report.diseases[1].occurrence(), Occurrence::Common);
        assert_eq!(report.statistics.total_diseases(), 2);
        assert_eq!(report.statistics.total_fatal_diseases(), 1);
        assert_eq!(report.statistics.deciding_exam_count("Interview"), 2);
    }

    #[test]
    fn test_independent_copies() {
        let catalog = catalog();
        let report = assemble_department(
            &DIAGNOSES,
            Department::Cardiology,
            &catalog,
            &localization(),
        )
        .unwrap();
        let first = &report.diseases[0].symptoms()[0];
        let second = &report.diseases[1].symptoms()[1];
        let prototype = catalog.get("sym_07").unwrap();
        assert_eq!(first.name(), second.name());
        assert_eq!(first.probability(), Some(100));
        assert_eq!(second.probability(), Some(30));
        assert_eq!(prototype.probability(), None);
        assert_eq!(first.examinations(), second.examinations());
        assert_ne!(
            first.examinations().as_ptr(),
            second.examinations().as_ptr()
        );
        assert_ne!(
            first.examinations().as_ptr(),
            prototype.examinations().as_ptr()
        );
    }

    #[test]
    fn test_symptoms_by_probability() {
        let report = assemble_department(
            &DIAGNOSES[..17],
            Department::Emergency,
            &catalog(),
            &localization(),
        )
        .unwrap();
        let names: Vec<&str> = report.diseases[0]
            .symptoms_by_probability()
            .iter()
            .map(|s| s.name().as_ref())
            .collect();
        assert_eq!(names, vec!["Nausea", "fever"]);
    }

    #[test]
    fn test_unterminated_keeps_earlier() {
        let mut lines = DIAGNOSES[..17].to_vec();
        lines.extend_from_slice(&[
            "<GameDBMedicalCondition ID=\"DIS_MI\">",
            "<Occurrence>OCCURRENCE_COMMON</Occurrence>",
            "<Symptoms>",
            "<ProbabilityPercent>100</ProbabilityPercent>",
            "<GameDBSymptomRef>SYM_CHEST_PAIN</GameDBSymptomRef>",
            "</Symptoms>",
        ]);
        let err = assemble_department(
            &lines,
            Department::Cardiology,
            &catalog(),
            &localization(),
        )
        .unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.record(), 1);
        assert_eq!(err.partial().len(), 1);
        assert_eq!(err.partial()[0].name().as_ref(), "influenza");
        assert_eq!(
            err.parsing_error(),
            &ParsingError::UnterminatedBlock {
                close: CONDITION_END,
                line: 18
            }
        );
    }

    #[test]
    fn test_unclosed_symptom_list() {
        let mut lines = DIAGNOSES.to_vec();
        // drop the </Symptoms> of DIS_FLU
        assert_eq!(lines.remove(15), "</Symptoms>");
        let err = assemble_department(
            &lines,
            Department::Cardiology,
            &catalog(),
            &localization(),
        )
        .unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.record(), 0);
        assert!(err.partial().is_empty());
        assert_eq!(
            err.parsing_error(),
            &ParsingError::UnterminatedBlock {
                close: SYMPTOMS.close(),
                line: 7
            }
        );
    }

    #[test]
    fn test_unclosed_diagnosis_before_next() {
        let mut lines = DIAGNOSES.to_vec();
        assert_eq!(lines.remove(16), CONDITION_END);
        let err = assemble_department(
            &lines,
            Department::Cardiology,
            &catalog(),
            &localization(),
        )
        .unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.record(), 0);
        assert_eq!(
            err.parsing_error(),
            &ParsingError::UnterminatedBlock {
                close: CONDITION_END,
                line: 3
            }
        );
    }

    #[test]
    fn test_unknown_symptom() {
        let lines = [
            "<GameDBMedicalCondition ID=\"DIS_FLU\">",
            "<Symptoms>",
            "<ProbabilityPercent>100</ProbabilityPercent>",
            "<GameDBSymptomRef>SYM_MISSING</GameDBSymptomRef>",
            "</Symptoms>",
            "</GameDBMedicalCondition>",
        ];
        let err = assemble_department(
            &lines,
            Department::Neurology,
            &catalog(),
            &localization(),
        )
        .unwrap_err();
        assert!(!err.is_structural());
        assert_eq!(err.record(), 0);
        assert_eq!(
            err.to_string(),
            "error in Neurology record #0: the symptom catalog has no entry for the key SYM_MISSING"
        );
    }

    #[test]
    fn test_invalid_probability() {
        let lines = [
            "<GameDBMedicalCondition ID=\"DIS_FLU\">",
            "<Symptoms>",
            "<ProbabilityPercent>140</ProbabilityPercent>",
            "<GameDBSymptomRef>sym_07</GameDBSymptomRef>",
            "</Symptoms>",
            "</GameDBMedicalCondition>",
        ];
        let err = assemble_department(
            &lines,
            Department::Neurology,
            &catalog(),
            &localization(),
        )
        .unwrap_err();
        assert_eq!(
            err.parsing_error(),
            &ParsingError::InvalidValue {
                field: "<ProbabilityPercent>",
                value: "140".to_owned(),
                line: 3
            }
        );
    }

    #[test]
    fn test_missing_probability() {
        let lines = [
            "<GameDBMedicalCondition ID=\"DIS_FLU\">",
            "<Symptoms>",
            "<ProbabilityPercent>10</ProbabilityPercent>",
            "<GameDBSymptomRef>sym_07</GameDBSymptomRef>",
            "<GameDBSymptomRef>SYM_FEVER</GameDBSymptomRef>",
            "</Symptoms>",
            "</GameDBMedicalCondition>",
        ];
        let err = assemble_department(
            &lines,
            Department::Neurology,
            &catalog(),
            &localization(),
        )
        .unwrap_err();
        assert!(matches!(
            err.parsing_error(),
            ParsingError::InvalidValue { line: 5, .. }
        ));
    }

    #[test]
    fn test_defaults() {
        let lines = [
            "<GameDBMedicalCondition ID=\"DIS_FLU\">",
            "</GameDBMedicalCondition>",
        ];
        let report = assemble_department(
            &lines,
            Department::Orthopedics,
            &catalog(),
            &localization(),
        )
        .unwrap();
        let flu = &report.diseases[0];
        assert_eq!(flu.occurrence(), Occurrence::Rare);
        assert!(flu.description().is_none());
        assert!(flu.payment().is_none());
        assert!(flu.symptoms().is_empty());
    }
}

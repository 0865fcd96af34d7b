//! The markers of the game data format. Every meaningful line carries exactly
//! one of these, either a complete field or the opening or closing of a block.

use super::Tag;

// Localization tables

/// The reference key of a localization record
pub const LOC_ID: Tag = Tag::new("<LocID>", "</LocID>");
/// The display text of a localization record
pub const LOC_TEXT: Tag = Tag::new("<Text>", "</Text>");
/// Marks the key of a description record, as opposed to a name record
pub const DESCRIPTION_KEY: &str = "DESCRIPTION";

// Symptom files

/// Symptom block, the open marker is followed by the symptom reference key
pub const SYMPTOM: Tag = Tag::new("<GameDBSymptom ID=\"", "\">");
/// Closes a [SYMPTOM] block
pub const SYMPTOM_END: &str = "</GameDBSymptom>";
/// List of examinations that reveal the symptom
pub const EXAMINATIONS: Tag = Tag::new("<Examinations>", "</Examinations>");
pub const EXAMINATION_REF: Tag = Tag::new("<ExaminationRef>", "</ExaminationRef>");
pub const TREATMENT_REF: Tag = Tag::new("<TreatmentRef>", "</TreatmentRef>");
pub const COLLAPSE_REF: Tag = Tag::new("<CollapseSymptomRef>", "</CollapseSymptomRef>");
pub const COLLAPSE_START: Tag =
    Tag::new("<RiskOfCollapseStartHours>", "</RiskOfCollapseStartHours>");
pub const COLLAPSE_END: Tag = Tag::new("<RiskOfCollapseEndHours>", "</RiskOfCollapseEndHours>");
pub const DEATH_START: Tag = Tag::new("<RiskOfDeathStartHours>", "</RiskOfDeathStartHours>");
pub const DEATH_END: Tag = Tag::new("<RiskOfDeathEndHours>", "</RiskOfDeathEndHours>");
pub const HAZARD: Tag = Tag::new("<Hazard>", "</Hazard>");

// Diagnosis files

/// Diagnosis block, the open marker is followed by the disease reference key
pub const CONDITION: Tag = Tag::new("<GameDBMedicalCondition ID=\"", "\">");
/// Closes a [CONDITION] block
pub const CONDITION_END: &str = "</GameDBMedicalCondition>";
/// The reference key of the disease description
pub const DESCRIPTION_REF: Tag = Tag::new("<AbbreviationLocID>", "</AbbreviationLocID>");
/// The occurrence line is classified by its contents, it has no fixed value markers
pub const OCCURRENCE: &str = "Occurrence";
pub const PAYMENT: Tag = Tag::new("<InsurancePayment>", "</InsurancePayment>");
/// List of symptom rules, each a probability followed by a symptom reference
pub const SYMPTOMS: Tag = Tag::new("<Symptoms>", "</Symptoms>");
pub const PROBABILITY: Tag = Tag::new("<ProbabilityPercent>", "</ProbabilityPercent>");
pub const SYMPTOM_REF: Tag = Tag::new("<GameDBSymptomRef>", "</GameDBSymptomRef>");

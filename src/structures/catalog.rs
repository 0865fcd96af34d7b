use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::{
    super::{
        game_data::Localization,
        parser::{
            tags::{
                COLLAPSE_END, COLLAPSE_REF, COLLAPSE_START, DEATH_END, DEATH_START, EXAMINATIONS,
                EXAMINATION_REF, HAZARD, SYMPTOM, SYMPTOM_END, TREATMENT_REF,
            },
            ParsingError, TagStream,
        },
        types::GameString,
    },
    HourWindow, Symptom,
};

/// Name used when reporting problems with the catalog
pub const SYMPTOM_CATALOG: &str = "the symptom catalog";

/// The fields of a symptom block as they are collected. Window bounds may
/// show up in any order, a window is only committed once both are in.
#[derive(Default)]
struct SymptomFields {
    examinations: Vec<GameString>,
    treatment: Option<GameString>,
    collapse: Option<GameString>,
    collapse_start: Option<GameString>,
    collapse_end: Option<GameString>,
    death_start: Option<GameString>,
    death_end: Option<GameString>,
    hazard: Option<GameString>,
}

impl SymptomFields {
    fn finish(self, name: GameString) -> Symptom {
        Symptom::new(
            name,
            self.examinations,
            self.treatment,
            self.collapse,
            HourWindow::from_bounds(self.collapse_start, self.collapse_end),
            HourWindow::from_bounds(self.death_start, self.death_end),
            self.hazard,
        )
    }
}

/// Parses the symptom block opening on the line under the cursor.
/// Returns the reference key of the symptom and its prototype.
fn parse_symptom<'a, S: AsRef<str>>(
    stream: &mut TagStream<'a, S>,
    opening: &'a str,
    localization: &Localization,
) -> Result<(&'a str, Symptom), ParsingError> {
    let id = stream.field(opening, SYMPTOM)?;
    let name = localization.symptoms.localize(id)?;
    let mut fields = SymptomFields::default();
    stream.scan_block(SYMPTOM.open(), SYMPTOM_END, |s, line| {
        if SYMPTOM.opens(line) {
            // the opening line, already handled
        } else if EXAMINATIONS.opens(line) {
            s.scan_block(EXAMINATIONS.open(), EXAMINATIONS.close(), |s, line| {
                if EXAMINATION_REF.opens(line) {
                    let key = s.field(line, EXAMINATION_REF)?;
                    fields
                        .examinations
                        .push(localization.examinations.localize(key)?);
                }
                Ok(())
            })?;
        } else if TREATMENT_REF.opens(line) {
            let key = s.field(line, TREATMENT_REF)?;
            fields.treatment = Some(localization.treatments.localize(key)?);
        } else if COLLAPSE_REF.opens(line) {
            // collapse outcomes are symptoms themselves, hence the symptom table
            let key = s.field(line, COLLAPSE_REF)?;
            fields.collapse = Some(localization.symptoms.localize(key)?);
        } else if COLLAPSE_START.opens(line) {
            fields.collapse_start = Some(s.field(line, COLLAPSE_START)?.into());
        } else if COLLAPSE_END.opens(line) {
            fields.collapse_end = Some(s.field(line, COLLAPSE_END)?.into());
        } else if DEATH_START.opens(line) {
            fields.death_start = Some(s.field(line, DEATH_START)?.into());
        } else if DEATH_END.opens(line) {
            fields.death_end = Some(s.field(line, DEATH_END)?.into());
        } else if HAZARD.opens(line) {
            fields.hazard = Some(s.field(line, HAZARD)?.into());
        }
        Ok(())
    })?;
    Ok((id, fields.finish(name)))
}

/// A catalog of symptom prototypes keyed by their reference keys.
/// Built once from the symptom files, read only afterwards.
#[derive(Debug, Default)]
pub struct SymptomCatalog {
    symptoms: HashMap<String, Symptom>,
    /// Display names of the symptoms that may kill
    fatal: HashSet<GameString>,
    /// Every examination name, in the order first referenced
    examinations: Vec<GameString>,
    /// Every treatment name, in the order first referenced
    treatments: Vec<GameString>,
}

impl SymptomCatalog {
    /// Builds a catalog out of the given symptom files, in order.
    pub fn build<S: AsRef<str>>(
        sources: &[&[S]],
        localization: &Localization,
    ) -> Result<Self, ParsingError> {
        let mut catalog = SymptomCatalog::default();
        for lines in sources {
            catalog.add_from_lines(lines, localization)?;
        }
        Ok(catalog)
    }

    /// Adds every symptom block in the lines to the catalog.
    /// Whatever precedes the first block or trails the last is ignored, a
    /// block that never closes is a [ParsingError::UnterminatedBlock].
    pub fn add_from_lines<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        localization: &Localization,
    ) -> Result<(), ParsingError> {
        let mut stream = TagStream::new(lines);
        let mut added = 0;
        while let Some(opening) = stream.seek(SYMPTOM.open()) {
            let (id, symptom) = parse_symptom(&mut stream, opening, localization)?;
            self.insert(id, symptom)?;
            added += 1;
        }
        debug!("added {} symptoms to {}", added, SYMPTOM_CATALOG);
        Ok(())
    }

    fn insert(&mut self, id: &str, symptom: Symptom) -> Result<(), ParsingError> {
        if self.symptoms.contains_key(id) {
            if cfg!(feature = "permissive") {
                warn!("{} redefines {}, keeping the first value", SYMPTOM_CATALOG, id);
                return Ok(());
            }
            return Err(ParsingError::DuplicateKey {
                table: SYMPTOM_CATALOG,
                key: id.to_owned(),
            });
        }
        for exam in symptom.examinations() {
            if !self.examinations.contains(exam) {
                self.examinations.push(exam.clone());
            }
        }
        if let Some(treatment) = symptom.treatment() {
            if !self.treatments.contains(treatment) {
                self.treatments.push(treatment.clone());
            }
        }
        if symptom.is_fatal() {
            self.fatal.insert(symptom.name().clone());
        }
        self.symptoms.insert(id.to_owned(), symptom);
        Ok(())
    }

    /// Returns the prototype with the given reference key.
    /// A missing key is a [ParsingError::UnknownReference].
    pub fn get(&self, id: &str) -> Result<&Symptom, ParsingError> {
        self.symptoms
            .get(id)
            .ok_or_else(|| ParsingError::UnknownReference {
                table: SYMPTOM_CATALOG,
                key: id.to_owned(),
            })
    }

    /// Returns true if a symptom with this display name may kill.
    pub fn is_fatal_name(&self, name: &str) -> bool {
        self.fatal.contains(name)
    }

    /// Every examination the symptoms reference, in the order first seen.
    pub fn examinations(&self) -> &[GameString] {
        &self.examinations
    }

    /// Every treatment the symptoms reference, in the order first seen.
    pub fn treatments(&self) -> &[GameString] {
        &self.treatments
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }
}

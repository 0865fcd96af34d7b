use std::collections::HashMap;

use tracing::warn;

const SEPARATOR: char = '=';
const COMMENT: char = '#';

/// A table turning examination and treatment names into phrases that read
/// well within a sentence, "Blood analysis" into "a blood test" and so on.
/// Names without a phrase are used as they are.
#[derive(Debug, Default, Clone)]
pub struct Phrasing {
    phrases: HashMap<String, String>,
}

impl Phrasing {
    /// Parses `game text=phrase` lines. Blank lines and lines starting with
    /// `#` are skipped.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut phrases = HashMap::new();
        for (i, line) in lines.iter().enumerate() {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with(COMMENT) {
                continue;
            }
            match line.split_once(SEPARATOR) {
                Some((name, phrase)) => {
                    phrases.insert(name.trim().to_owned(), phrase.trim().to_owned());
                }
                None => warn!("phrasing line {} has no {}, skipping it", i + 1, SEPARATOR),
            }
        }
        Phrasing { phrases }
    }

    pub fn phrase<'a>(&'a self, name: &'a str) -> &'a str {
        self.phrases.get(name).map_or(name, |p| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

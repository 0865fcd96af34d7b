use std::collections::HashMap;

use tracing::{debug, warn};

use super::super::{
    parser::{
        tags::{DESCRIPTION_KEY, LOC_ID, LOC_TEXT},
        ParsingError, TagStream,
    },
    types::GameString,
};

/* The localization tables are one record per line:
<LocID>SYM_NAUSEA</LocID> ... <Text>Nausea</Text>
Names and descriptions share the same key scheme, a description record is the
one whose key mentions DESCRIPTION. We take the text exactly as it is between
the markers, casing and grammar are the business of whoever displays it.
*/

/// A read only mapping from reference keys to display text, built from a
/// single localization table.
#[derive(Debug)]
pub struct LookupTable {
    /// What the table holds, used when reporting problems
    name: &'static str,
    data: HashMap<String, GameString>,
}

impl LookupTable {
    /// Builds the table from the lines of a localization file.
    /// Description records are only retained when `want_description` is set.
    ///
    /// A key that shows up twice is a [ParsingError::DuplicateKey], unless the
    /// crate is built with the `permissive` feature, in which case the first
    /// value wins.
    pub fn build<S: AsRef<str>>(
        name: &'static str,
        lines: &[S],
        want_description: bool,
    ) -> Result<Self, ParsingError> {
        let mut table = LookupTable {
            name,
            data: HashMap::new(),
        };
        let mut stream = TagStream::new(lines);
        while let Some(line) = stream.seek(LOC_ID.open()) {
            let key = stream.field(line, LOC_ID)?;
            if want_description || !key.contains(DESCRIPTION_KEY) {
                let text = stream.field(line, LOC_TEXT)?;
                table.insert(key, text)?;
            }
            stream.advance();
        }
        debug!("{} holds {} entries", table.name, table.data.len());
        Ok(table)
    }

    fn insert(&mut self, key: &str, text: &str) -> Result<(), ParsingError> {
        if self.data.contains_key(key) {
            if cfg!(feature = "permissive") {
                warn!("{} redefines {}, keeping the first value", self.name, key);
                return Ok(());
            }
            return Err(ParsingError::DuplicateKey {
                table: self.name,
                key: key.to_owned(),
            });
        }
        self.data.insert(key.to_owned(), GameString::from(text));
        Ok(())
    }

    /// A simple function that looks up the raw text associated with the key.
    pub fn lookup<K: AsRef<str>>(&self, key: K) -> Option<GameString> {
        self.data.get(key.as_ref()).cloned()
    }

    /// Resolves the key, a missing key is a [ParsingError::UnknownReference].
    /// There is no fallback text, a missing key means the data files and the
    /// localization disagree.
    pub fn localize<K: AsRef<str>>(&self, key: K) -> Result<GameString, ParsingError> {
        self.lookup(key.as_ref())
            .ok_or_else(|| ParsingError::UnknownReference {
                table: self.name,
                key: key.as_ref().to_owned(),
            })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Words that stay lowercase unless they open the text
const JOINING_WORDS: [&str; 3] = ["and", "of", "the"];

/// Returns true if the word is written in capitals throughout, like an
/// acronym. Single letters do not count.
fn is_acronym(word: &str) -> bool {
    let letters = || word.chars().filter(|c| c.is_alphabetic());
    letters().count() > 1 && letters().all(|c| c.is_uppercase())
}

/// Capitalizes the first letter of every run of letters, lowercasing the
/// rest. Apostrophes do not start a new run.
fn title_case(word: &str) -> String {
    let mut result = String::with_capacity(word.len());
    let mut start = true;
    for c in word.chars() {
        if c.is_alphabetic() {
            if start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            start = false;
        } else {
            result.push(c);
            start = !(c == '\'' || c == '’');
        }
    }
    result
}

/// Normalizes the casing of a game name for display.
///
/// Every word is title cased, except acronyms which are kept as they are.
/// The joining words "and", "of" and "the" are lowercased unless they come
/// first, a possessive `’S` is lowercased and the misspelled "hearbeat" is
/// repaired.
pub fn normalize(text: &str) -> String {
    text.split(' ')
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i > 0 && JOINING_WORDS.contains(&lower.as_str()) {
                lower
            } else if lower == "hearbeat" {
                "Heartbeat".to_owned()
            } else if is_acronym(word) {
                word.replace("’S", "’s")
            } else {
                title_case(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(normalize("acute appendicitis"), "Acute Appendicitis");
        assert_eq!(normalize("fast hearbeat"), "Fast Heartbeat");
        assert_eq!(normalize("post-traumatic stress"), "Post-Traumatic Stress");
    }

    #[test]
    fn test_joining_words() {
        assert_eq!(
            normalize("fracture of the skull and jaw"),
            "Fracture of the Skull and Jaw"
        );
        assert_eq!(normalize("the flu"), "The Flu");
    }

    #[test]
    fn test_acronyms() {
        assert_eq!(normalize("acute MI"), "Acute MI");
        assert_eq!(normalize("CROHN’S disease"), "CROHN’s Disease");
        assert_eq!(normalize("a"), "A");
    }

    #[test]
    fn test_possessive() {
        assert_eq!(normalize("crohn’s disease"), "Crohn’s Disease");
        assert_eq!(normalize("athlete's foot"), "Athlete's Foot");
    }

    #[test]
    fn test_spacing_kept() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("double  space"), "Double  Space");
    }
}

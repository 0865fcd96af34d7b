use std::{path::Path, sync::Arc};

use minijinja::{path_loader, AutoEscape, Environment, Error, ErrorKind, Value};

use super::{normalize, Phrasing};

pub const PLAIN_TEMPLATE_NAME: &str = "plain.txt";
pub const BBCODE_TEMPLATE_NAME: &str = "bbcode.txt";
pub const MARKDOWN_TEMPLATE_NAME: &str = "markdown.md";
pub const DATA_TEMPLATE_NAME: &str = "department-data.txt";
pub const INDEX_TEMPLATE_NAME: &str = "exams-and-treatments.txt";

static INT_PLAIN_TEMPLATE: &str = include_str!("../../templates/plain.txt");
static INT_BBCODE_TEMPLATE: &str = include_str!("../../templates/bbcode.txt");
static INT_MARKDOWN_TEMPLATE: &str = include_str!("../../templates/markdown.md");
static INT_DATA_TEMPLATE: &str = include_str!("../../templates/department-data.txt");
static INT_INDEX_TEMPLATE: &str = include_str!("../../templates/exams-and-treatments.txt");

/// Create a new [Environment] with the filters and templates needed for the
/// reports. The templates are loaded from `templates` when given, otherwise
/// the ones compiled into the binary are used.
/// The environment will have the following filters:
/// - [normalize] - normalizes the casing of a name
/// - `phrase` - turns an examination or treatment name into a phrase
/// - `phrase_all` - the same for a list of names
/// - [listing] - joins a list with commas
/// - [alternatives] - joins a list as a sentence of alternatives
/// - [hours] - renders an hour window
pub fn create_env(
    templates: Option<&Path>,
    phrasing: Phrasing,
) -> Result<Environment<'static>, Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("normalize", normalize);
    let phrasing = Arc::new(phrasing);
    let single = phrasing.clone();
    env.add_filter("phrase", move |name: String| single.phrase(&name).to_owned());
    env.add_filter("phrase_all", move |names: Vec<String>| {
        names
            .iter()
            .map(|n| phrasing.phrase(n).to_owned())
            .collect::<Vec<_>>()
    });
    env.add_filter("listing", listing);
    env.add_filter("alternatives", alternatives);
    env.add_filter("hours", hours);
    if let Some(dir) = templates {
        env.set_loader(path_loader(dir));
    } else {
        env.add_template(PLAIN_TEMPLATE_NAME, INT_PLAIN_TEMPLATE)?;
        env.add_template(BBCODE_TEMPLATE_NAME, INT_BBCODE_TEMPLATE)?;
        env.add_template(MARKDOWN_TEMPLATE_NAME, INT_MARKDOWN_TEMPLATE)?;
        env.add_template(DATA_TEMPLATE_NAME, INT_DATA_TEMPLATE)?;
        env.add_template(INDEX_TEMPLATE_NAME, INT_INDEX_TEMPLATE)?;
    }
    Ok(env)
}

/// Joins the items with commas, `None` if there are none.
fn listing(items: Vec<String>) -> String {
    if items.is_empty() {
        return "None".to_owned();
    }
    items.join(", ")
}

/// Joins the items into "__a__", "__a__ or __b__" or "__a__, __b__, or __c__".
fn alternatives(items: Vec<String>) -> String {
    let items: Vec<String> = items.iter().map(|i| format!("__{}__", i)).collect();
    match items.len() {
        0 => String::new(),
        1 => items[0].clone(),
        2 => format!("{} or {}", items[0], items[1]),
        n => format!("{}, or {}", items[..n - 1].join(", "), items[n - 1]),
    }
}

/// Renders an hour window, `N/A` for a missing one.
fn hours(window: Value) -> Result<String, Error> {
    if window.is_none() || window.is_undefined() {
        return Ok("N/A".to_owned());
    }
    let start = window.get_attr("start")?;
    let end = window.get_attr("end")?;
    if start.is_undefined() || end.is_undefined() {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            "hours expects a window with a start and an end",
        ));
    }
    Ok(format!("{} to {}", start, end))
}

#[cfg(test)]
mod tests {
    use minijinja::context;

    use super::*;

    #[test]
    fn test_alternatives() {
        assert_eq!(alternatives(vec![]), "");
        assert_eq!(alternatives(vec!["a".into()]), "__a__");
        assert_eq!(alternatives(vec!["a".into(), "b".into()]), "__a__ or __b__");
        assert_eq!(
            alternatives(vec!["a".into(), "b".into(), "c".into()]),
            "__a__, __b__, or __c__"
        );
    }

    #[test]
    fn test_listing() {
        assert_eq!(listing(vec![]), "None");
        assert_eq!(listing(vec!["ECG".into(), "X-ray".into()]), "ECG, X-ray");
    }

    #[test]
    fn test_filters() {
        let phrasing = Phrasing::from_lines(&["ECG=an ECG"]);
        let env = create_env(None, phrasing).unwrap();
        let out = env
            .render_str(
                "{{ name | normalize }}|{{ exams | phrase_all | alternatives }}|{{ missing | hours }}|{{ window | hours }}",
                context! {
                    name => "fracture of the skull",
                    exams => vec!["ECG", "Interview"],
                    missing => (),
                    window => context! { start => "2", end => "6" },
                },
            )
            .unwrap();
        assert_eq!(
            out,
            "Fracture of the Skull|__an ECG__ or __Interview__|N/A|2 to 6"
        );
    }

    #[test]
    fn test_builtin_templates() {
        let env = create_env(None, Phrasing::default()).unwrap();
        for name in [
            PLAIN_TEMPLATE_NAME,
            BBCODE_TEMPLATE_NAME,
            MARKDOWN_TEMPLATE_NAME,
            DATA_TEMPLATE_NAME,
            INDEX_TEMPLATE_NAME,
        ] {
            assert!(env.get_template(name).is_ok());
        }
    }
}

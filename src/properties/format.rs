use std::collections::HashMap;

use serde::Deserialize;
use toml::Value;

use super::parse::parse_properties;
use super::PropertiesError;

/// Text format of a property source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Line-oriented `key=value` text.
    #[default]
    Properties,
    /// A flat TOML document; only top-level scalars become properties.
    Toml,
}

impl SourceFormat {
    /// Guesses the format from a resource name's extension.
    pub fn from_name(name: &str) -> Self {
        if name.to_ascii_lowercase().ends_with(".toml") {
            Self::Toml
        } else {
            Self::Properties
        }
    }

    pub(super) fn parse(self, name: &str, text: &str) -> Result<Parsed, PropertiesError> {
        match self {
            Self::Properties => Ok(Parsed {
                map: parse_properties(text)?,
                skipped: Vec::new(),
            }),
            Self::Toml => {
                let table: toml::Table =
                    toml::from_str(text).map_err(|source| PropertiesError::Toml {
                        name: name.to_string(),
                        source,
                    })?;
                Ok(flatten_toml(table))
            }
        }
    }
}

/// Result of parsing a source: the flat map plus any keys that had to be
/// left out because their value was not a scalar.
#[derive(Debug, Default)]
pub(super) struct Parsed {
    pub map: HashMap<String, String>,
    pub skipped: Vec<String>,
}

fn flatten_toml(table: toml::Table) -> Parsed {
    let mut parsed = Parsed::default();

    for (key, value) in table {
        let text = match value {
            Value::String(s) => s,
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Datetime(d) => d.to_string(),
            Value::Array(_) | Value::Table(_) => {
                parsed.skipped.push(key);
                continue;
            }
        };
        parsed.map.insert(key, text);
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_name() {
        assert_eq!(SourceFormat::from_name("app.toml"), SourceFormat::Toml);
        assert_eq!(SourceFormat::from_name("conf/APP.TOML"), SourceFormat::Toml);
        assert_eq!(SourceFormat::from_name("app.properties"), SourceFormat::Properties);
        assert_eq!(SourceFormat::from_name("toml"), SourceFormat::Properties);
    }

    #[test]
    fn test_toml_scalars_are_stringified() {
        let text = r#"
name = "stowage"
port = 8080
ratio = 0.5
enabled = false
when = 1979-05-27
"#;
        let parsed = SourceFormat::Toml.parse("app.toml", text).unwrap();

        assert_eq!(parsed.map["name"], "stowage");
        assert_eq!(parsed.map["port"], "8080");
        assert_eq!(parsed.map["ratio"], "0.5");
        assert_eq!(parsed.map["enabled"], "false");
        assert_eq!(parsed.map["when"], "1979-05-27");
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_toml_skips_nested_values() {
        let text = "top = 1\nlist = [1, 2]\n[section]\ninner = 2\n";
        let parsed = SourceFormat::Toml.parse("app.toml", text).unwrap();

        assert_eq!(parsed.map.len(), 1);
        let mut skipped = parsed.skipped;
        skipped.sort();
        assert_eq!(skipped, vec!["list".to_string(), "section".to_string()]);
    }

    #[test]
    fn test_toml_syntax_error() {
        let result = SourceFormat::Toml.parse("bad.toml", "key = ");

        assert!(matches!(result, Err(PropertiesError::Toml { name, .. }) if name == "bad.toml"));
    }

    #[test]
    fn test_format_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: SourceFormat,
        }

        let wrapper: Wrapper = toml::from_str("format = \"toml\"").unwrap();
        assert_eq!(wrapper.format, SourceFormat::Toml);
    }
}

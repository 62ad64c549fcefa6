use std::collections::HashMap;
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde::Deserialize;

use super::format::{Parsed, SourceFormat};
use super::value::PropertyValue;
use super::{ConversionError, PropertiesError};
use crate::resource::ResourceResolver;

/// How a [`PropertyStore`] is loaded.
///
/// Can be read from TOML:
///
/// ```
/// use stowage::properties::{SourceFormat, StoreOptions};
///
/// let options = StoreOptions::from_toml_str("diagnostics = true\nformat = \"toml\"")?;
/// assert!(options.diagnostics);
/// assert_eq!(options.format, Some(SourceFormat::Toml));
/// # Ok::<(), stowage::properties::PropertiesError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Initial diagnostic mode. Also decides whether a load failure is logged.
    pub diagnostics: bool,
    /// Source format; guessed from the resource name when unset.
    pub format: Option<SourceFormat>,
}

impl StoreOptions {
    pub fn from_toml_str(text: &str) -> Result<Self, PropertiesError> {
        toml::from_str(text).map_err(PropertiesError::Options)
    }
}

/// A read-only view of a flat property source with typed, defaulting getters.
///
/// No getter ever fails: a missing key or a value that doesn't convert
/// yields the default. With diagnostics enabled, each such fallback is
/// logged through [`log`].
///
/// ## Example
///
/// ```no_run
/// use stowage::{PropertyStore, ResourceResolver};
///
/// let resolver = ResourceResolver::new("resources");
/// let props = PropertyStore::load(&resolver, "app.properties");
///
/// let port = props.get_integer_or("server.port", 8080);
/// let verbose = props.get_bool("verbose");
/// ```
#[derive(Debug, Default)]
pub struct PropertyStore {
    properties: HashMap<String, String>,
    diagnostics: AtomicBool,
}

impl PropertyStore {
    /// Loads the property resource `name`.
    ///
    /// If the resource is missing or malformed the store is empty; nothing is
    /// logged since diagnostics start out disabled.
    pub fn load(resolver: &ResourceResolver, name: &str) -> Self {
        Self::with_options(resolver, name, StoreOptions::default())
    }

    /// Loads `name` with explicit options; a load failure leaves the store empty.
    pub fn with_options(resolver: &ResourceResolver, name: &str, options: StoreOptions) -> Self {
        let format = options
            .format
            .unwrap_or_else(|| SourceFormat::from_name(name));

        match read_source(resolver, name, format) {
            Ok(parsed) => Self::from_parsed(parsed, options.diagnostics),
            Err(err) => {
                if options.diagnostics {
                    log::warn!("PropertyStore: {}", err);
                }
                Self {
                    properties: HashMap::new(),
                    diagnostics: AtomicBool::new(options.diagnostics),
                }
            }
        }
    }

    /// Loads `name`, failing instead of falling back to an empty store.
    pub fn try_load(resolver: &ResourceResolver, name: &str) -> Result<Self, PropertiesError> {
        let parsed = read_source(resolver, name, SourceFormat::from_name(name))?;
        Ok(Self::from_parsed(parsed, false))
    }

    /// Parses properties from any byte source.
    pub fn from_reader(reader: impl Read, format: SourceFormat) -> Result<Self, PropertiesError> {
        let parsed = parse_reader(reader, "<reader>", format)?;
        Ok(Self::from_parsed(parsed, false))
    }

    fn from_parsed(parsed: Parsed, diagnostics: bool) -> Self {
        if diagnostics {
            for key in &parsed.skipped {
                log::warn!("PropertyStore: skipped non-scalar key '{}'", key);
            }
        }
        Self {
            properties: parsed.map,
            diagnostics: AtomicBool::new(diagnostics),
        }
    }

    /// Whether conversion failures are currently logged.
    pub fn diagnostics_enabled(&self) -> bool {
        self.diagnostics.load(Ordering::Relaxed)
    }

    /// Turns logging of conversion failures on or off. Return values are unaffected.
    pub fn set_diagnostics(&self, enabled: bool) {
        self.diagnostics.store(enabled, Ordering::Relaxed);
    }

    /// Returns the raw value for `key`, or `""` if it isn't set.
    pub fn get_string(&self, key: &str) -> &str {
        self.properties.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Converts `key` to `T`, reporting why it couldn't be.
    pub fn convert<T: PropertyValue>(&self, key: &str) -> Result<T, ConversionError> {
        let raw = self
            .properties
            .get(key)
            .ok_or_else(|| ConversionError::Missing {
                key: key.to_string(),
                target: T::TYPE_NAME,
            })?;

        T::parse_property(raw).map_err(|reason| ConversionError::Invalid {
            key: key.to_string(),
            target: T::TYPE_NAME,
            raw: raw.clone(),
            reason,
        })
    }

    /// Returns `key` as `T`, or `default` if it is missing or doesn't convert.
    pub fn get_or<T: PropertyValue>(&self, key: &str, default: T) -> T {
        match self.convert(key) {
            Ok(value) => value,
            Err(err) => {
                if self.diagnostics_enabled() {
                    log::warn!("PropertyStore: {}", err);
                }
                default
            }
        }
    }

    /// Returns `key` as `T`, or `T::default()`.
    pub fn get<T: PropertyValue + Default>(&self, key: &str) -> T {
        self.get_or(key, T::default())
    }

    /// Reads `key` as a boolean; see [`TRUTHY`](super::TRUTHY) and
    /// [`FALSY`](super::FALSY). Anything else yields `false`.
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_or(key, default)
    }

    pub fn get_integer(&self, key: &str) -> i64 {
        self.get(key)
    }

    pub fn get_integer_or(&self, key: &str, default: i64) -> i64 {
        self.get_or(key, default)
    }

    pub fn get_big_integer(&self, key: &str) -> BigInt {
        self.get(key)
    }

    pub fn get_big_integer_or(&self, key: &str, default: BigInt) -> BigInt {
        self.get_or(key, default)
    }

    pub fn get_decimal(&self, key: &str) -> f64 {
        self.get(key)
    }

    pub fn get_decimal_or(&self, key: &str, default: f64) -> f64 {
        self.get_or(key, default)
    }

    pub fn get_big_decimal(&self, key: &str) -> BigDecimal {
        self.get(key)
    }

    pub fn get_big_decimal_or(&self, key: &str, default: BigDecimal) -> BigDecimal {
        self.get_or(key, default)
    }
}

fn read_source(
    resolver: &ResourceResolver,
    name: &str,
    format: SourceFormat,
) -> Result<Parsed, PropertiesError> {
    let stream = resolver
        .try_open_stream(name)?
        .ok_or_else(|| PropertiesError::NotFound(name.to_string()))?;
    parse_reader(stream, name, format)
}

fn parse_reader(
    mut reader: impl Read,
    name: &str,
    format: SourceFormat,
) -> Result<Parsed, PropertiesError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| PropertiesError::Read {
            name: name.to_string(),
            source,
        })?;
    format.parse(name, &decode(bytes))
}

/// Decodes UTF-8, falling back to ISO-8859-1 where every byte is a char.
fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|err| err.into_bytes().iter().map(|&b| char::from(b)).collect())
}

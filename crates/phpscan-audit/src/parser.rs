//! php.ini parser
//!
//! One `key = value` per line. Blank lines, `;` comments and lines without
//! `=` are skipped; there are no sections, quoting or includes. Lines end at
//! `\n`, `\r\n` or a lone `\r`.

use crate::normalize::normalize_text;
use phpscan_core::{Error, Result};
use std::collections::HashMap;
use std::io::{BufRead, Read};
use std::path::Path;
use tracing::{debug, trace};

/// Parsed configuration: key to normalized value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    values: HashMap<String, String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration text held in memory
    pub fn parse_str(text: &str) -> Self {
        let mut config = Self::new();
        for line in text.split(['\r', '\n']) {
            config.apply_line(line);
        }
        config
    }

    /// Parse configuration from any line source
    ///
    /// Fails only if the source cannot be read.
    pub fn parse_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::parse_str(&text))
    }

    /// Read and parse a php.ini file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = std::fs::File::open(path)?;
        let config = Self::parse_reader(std::io::BufReader::new(file))?;
        debug!("Parsed {} settings from {}", config.len(), path.display());
        Ok(config)
    }

    fn apply_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            return;
        }

        match line.split_once('=') {
            Some((key, value)) => self.insert(key.trim(), value),
            None => trace!("Skipping line without '=': {}", line),
        }
    }

    /// Store a value under a key, replacing any earlier one
    pub fn insert(&mut self, key: impl Into<String>, value: &str) {
        self.values.insert(key.into(), normalize_text(value));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

//! Optional sweep configuration file.
//!
//! Any field left out falls back to the standard catalog and default options,
//! so an empty file describes the stock sweep.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::catalog::{Catalog, PersistenceVariant, Structure};
use crate::invocation::SweepOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }
}

/// Guess the format of an extension-less file from its content.
pub fn detect_format(input: &str) -> Format {
    let trimmed = input.trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Format::Json;
    }

    if has_toml_indicators(trimmed) {
        return Format::Toml;
    }

    if has_yaml_indicators(trimmed) {
        return Format::Yaml;
    }

    Format::Toml
}

fn has_toml_indicators(input: &str) -> bool {
    for line in input.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() > 2 {
            return true;
        }

        if let Some(eq_pos) = trimmed.find('=') {
            let key = trimmed[..eq_pos].trim();
            if !key.is_empty() && key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.') {
                return true;
            }
        }
    }
    false
}

fn has_yaml_indicators(input: &str) -> bool {
    for line in input.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed == "---" || trimmed.starts_with("- ") {
            return true;
        }
        if let Some(colon_pos) = trimmed.find(':') {
            let key = &trimmed[..colon_pos];
            if !key.starts_with('"') && !key.starts_with('\'') && !key.starts_with('{') {
                return true;
            }
        }
    }
    false
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    pub bin_dir: Option<PathBuf>,
    pub list_iterations: Option<u32>,
    pub structures: Option<Vec<StructureConfig>>,
    pub persistence: Option<Vec<PersistenceVariant>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructureConfig {
    pub name: String,
    /// Defaults to whether the name contains "list".
    #[serde(default)]
    pub list_family: Option<bool>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default = "default_persistent")]
    pub persistent: bool,
}

fn default_persistent() -> bool {
    true
}

impl StructureConfig {
    fn to_structure(&self) -> Structure {
        let structure = Structure::new(self.name.clone())
            .with_read_only(self.read_only)
            .with_persistent(self.persistent);
        match self.list_family {
            Some(list_family) => structure.with_list_family(list_family),
            None => structure,
        }
    }
}

impl SweepConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        let format = Format::from_path(path).unwrap_or_else(|| detect_format(&src));
        Self::parse(&src, format).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn parse(input: &str, format: Format) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        match format {
            Format::Json => serde_json::from_str(input).map_err(|e| anyhow!(e)),
            Format::Yaml => serde_yaml::from_str(input).map_err(|e| anyhow!(e)),
            Format::Toml => toml::from_str(input).map_err(|e| anyhow!(e)),
        }
    }

    pub fn catalog(&self) -> Result<Catalog> {
        let standard = Catalog::standard();
        let structures = match &self.structures {
            Some(entries) => entries.iter().map(StructureConfig::to_structure).collect(),
            None => standard.structures().to_vec(),
        };
        let persistence = match &self.persistence {
            Some(variants) => variants.clone(),
            None => standard.persistence().to_vec(),
        };
        Catalog::new(structures, persistence).context("invalid catalog in config")
    }

    pub fn options(&self) -> SweepOptions {
        let defaults = SweepOptions::default();
        SweepOptions {
            // An empty directory would leave bare names for PATH lookup.
            bin_dir: self
                .bin_dir
                .clone()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(defaults.bin_dir),
            list_iterations: self.list_iterations.unwrap_or(defaults.list_iterations),
        }
    }
}

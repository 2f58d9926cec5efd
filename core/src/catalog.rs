//! Static description of what a sweep covers: the benchmarked data structures
//! and the persistence builds each of them is compiled into.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

/// Build configuration of a benchmark executable, encoded as a file-name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersistenceVariant {
    #[serde(rename = "_noshortcut")]
    NoShortcut,
    #[serde(rename = "_indirect")]
    Indirect,
    #[serde(rename = "_per")]
    Persistent,
    #[serde(rename = "_per_lock")]
    PersistentLock,
    #[serde(rename = "_per_rs")]
    PersistentReadShortcut,
    #[serde(rename = "_per_ws")]
    PersistentWriteShortcut,
}

impl PersistenceVariant {
    /// Every variant, in sweep order.
    pub const ALL: [PersistenceVariant; 6] = [
        PersistenceVariant::NoShortcut,
        PersistenceVariant::Indirect,
        PersistenceVariant::Persistent,
        PersistenceVariant::PersistentLock,
        PersistenceVariant::PersistentReadShortcut,
        PersistenceVariant::PersistentWriteShortcut,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            PersistenceVariant::NoShortcut => "_noshortcut",
            PersistenceVariant::Indirect => "_indirect",
            PersistenceVariant::Persistent => "_per",
            PersistenceVariant::PersistentLock => "_per_lock",
            PersistenceVariant::PersistentReadShortcut => "_per_rs",
            PersistenceVariant::PersistentWriteShortcut => "_per_ws",
        }
    }
}

impl fmt::Display for PersistenceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for PersistenceVariant {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        PersistenceVariant::ALL
            .into_iter()
            .find(|variant| variant.suffix() == raw.trim())
            .ok_or_else(|| anyhow!("unknown persistence variant '{}'", raw))
    }
}

/// One benchmarked data structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    pub name: String,
    /// List-like structures get an iteration bound on their main run.
    pub list_family: bool,
    /// A `<name>_ro` executable exists alongside the persistence builds.
    pub read_only: bool,
    /// Crossed with every persistence variant.
    pub persistent: bool,
}

impl Structure {
    /// Descriptor for a persistence-swept structure without a read-only build.
    /// List-family membership is decided here, once, from the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let list_family = name.contains("list");
        Self {
            name,
            list_family,
            read_only: false,
            persistent: true,
        }
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_list_family(mut self, list_family: bool) -> Self {
        self.list_family = list_family;
        self
    }

    pub fn with_persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    pub fn read_only_executable(&self) -> String {
        format!("{}_ro", self.name)
    }

    pub fn variant_executable(&self, variant: PersistenceVariant) -> String {
        format!("{}{}", self.name, variant.suffix())
    }
}

/// Ordered, validated set of structures and persistence variants.
///
/// Built once before a sweep starts and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    structures: Vec<Structure>,
    persistence: Vec<PersistenceVariant>,
}

impl Catalog {
    pub fn new(structures: Vec<Structure>, persistence: Vec<PersistenceVariant>) -> Result<Self> {
        if structures.is_empty() {
            bail!("catalog must contain at least one data structure");
        }

        let mut seen = HashSet::new();
        for structure in &structures {
            validate_name(&structure.name).with_context(|| format!("invalid structure name '{}'", structure.name))?;
            if !seen.insert(structure.name.as_str()) {
                bail!("data structure '{}' is listed more than once", structure.name);
            }
        }

        let mut seen_variants = HashSet::new();
        for variant in &persistence {
            if !seen_variants.insert(*variant) {
                bail!("persistence variant '{}' is listed more than once", variant);
            }
        }

        Ok(Self {
            structures,
            persistence,
        })
    }

    /// The catalog the persistent data-structure suite ships with.
    pub fn standard() -> Self {
        let structures = vec![
            Structure::new("arttree"),
            Structure::new("btree").with_read_only(true),
            Structure::new("list"),
            Structure::new("list_ro").with_read_only(true),
            Structure::new("dlist"),
            Structure::new("hash_block"),
            Structure::new("hash_block_lf"),
            Structure::new("augmentedtree"),
        ];
        Self {
            structures,
            persistence: PersistenceVariant::ALL.to_vec(),
        }
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub fn persistence(&self) -> &[PersistenceVariant] {
        &self.persistence
    }

    /// Structures that have a read-only executable, in catalog order.
    pub fn read_only(&self) -> impl Iterator<Item = &Structure> + '_ {
        self.structures.iter().filter(|s| s.read_only)
    }

    /// Structures crossed with the persistence variants, in catalog order.
    pub fn persistent(&self) -> impl Iterator<Item = &Structure> + '_ {
        self.structures.iter().filter(|s| s.persistent)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

// Names end up as file names next to the sweep binary.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("name must not be empty");
    }
    if name.chars().any(char::is_whitespace) {
        bail!("name must not contain whitespace");
    }
    if name.contains('/') || name.contains('\\') {
        bail!("name must not contain path separators");
    }
    Ok(())
}

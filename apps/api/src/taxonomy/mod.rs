//! Skill taxonomy, skill metadata, and role-requirement tables.
//!
//! These tables are configuration, not code. The built-in document ships inside the
//! binary and can be replaced at startup with `TAXONOMY_PATH`. Once loaded a `Taxonomy`
//! is read-only and shared across every analysis.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

const BUILTIN_TAXONOMY: &str = include_str!("../../data/taxonomy.json");

/// Impact text used for skills that have no entry in `skill_details`.
pub const DEFAULT_IMPACT: &str =
    "Skill adds value to specific roles and may improve ATS matching for relevant positions.";

/// Importance tier attached to a skill for gap prioritization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Importance {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDetail {
    pub importance: Importance,
    pub impact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRequirement {
    pub role: String,
    pub skills: Vec<String>,
}

/// On-disk shape of the taxonomy document. Categories and roles are arrays so that
/// their order survives deserialization.
#[derive(Debug, Deserialize)]
struct TaxonomyDocument {
    categories: Vec<SkillCategory>,
    #[serde(default)]
    skill_details: HashMap<String, SkillDetail>,
    #[serde(default)]
    roles: Vec<RoleRequirement>,
}

#[derive(Debug, Clone)]
pub struct Taxonomy {
    pub categories: Vec<SkillCategory>,
    pub skill_details: HashMap<String, SkillDetail>,
    pub roles: Vec<RoleRequirement>,
}

impl Taxonomy {
    /// Parses the document compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_TAXONOMY).context("Built-in taxonomy is invalid")
    }

    /// Loads from `path` when given, otherwise falls back to the built-in document.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read taxonomy file '{}'", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("Invalid taxonomy file '{}'", path.display()))
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let doc: TaxonomyDocument =
            serde_json::from_str(raw).context("Taxonomy is not valid JSON")?;
        Self::from_parts(doc.categories, doc.skill_details, doc.roles)
    }

    /// Validates and normalizes the three tables.
    ///
    /// Skill strings are trimmed; a skill listed twice inside one category keeps its first
    /// spelling only. The same skill in two different categories is kept in both.
    pub fn from_parts(
        categories: Vec<SkillCategory>,
        skill_details: HashMap<String, SkillDetail>,
        roles: Vec<RoleRequirement>,
    ) -> Result<Self> {
        if categories.is_empty() {
            bail!("Taxonomy must define at least one category");
        }

        let mut seen_names = HashSet::new();
        let mut normalized = Vec::with_capacity(categories.len());
        for category in categories {
            let name = category.name.trim().to_string();
            if name.is_empty() {
                bail!("Taxonomy category names cannot be empty");
            }
            if !seen_names.insert(name.clone()) {
                bail!("Taxonomy category '{name}' is defined twice");
            }

            let mut seen_skills = HashSet::new();
            let mut skills = Vec::with_capacity(category.skills.len());
            for skill in category.skills {
                let skill = skill.trim().to_string();
                if skill.is_empty() {
                    bail!("Category '{name}' contains an empty skill");
                }
                if seen_skills.insert(skill.to_lowercase()) {
                    skills.push(skill);
                }
            }
            normalized.push(SkillCategory { name, skills });
        }

        let roles = roles
            .into_iter()
            .map(|r| RoleRequirement {
                role: r.role.trim().to_string(),
                skills: r.skills.into_iter().map(|s| s.trim().to_lowercase()).collect(),
            })
            .collect();

        Ok(Self {
            categories: normalized,
            skill_details,
            roles,
        })
    }

    /// Importance and impact for `skill`, keyed by its exact taxonomy spelling.
    /// Unknown skills default to `Medium` with a generic impact text.
    pub fn detail_for(&self, skill: &str) -> (Importance, &str) {
        match self.skill_details.get(skill) {
            Some(detail) => (detail.importance, detail.impact.as_str()),
            None => (Importance::Medium, DEFAULT_IMPACT),
        }
    }

    /// Number of (category, skill) pairs, counting a skill once per category it appears in.
    pub fn skill_count(&self) -> usize {
        self.categories.iter().map(|c| c.skills.len()).sum()
    }
}

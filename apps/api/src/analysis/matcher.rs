//! Whole-token phrase matching and the skill taxonomy matcher.

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::taxonomy::Taxonomy;

/// A literal phrase that matches only as a whole token, case-insensitively.
///
/// The phrase is escaped, so `c++` and `node.js` match only their literal spelling. The
/// characters on either side of a hit must be non-word characters or the text edge, which
/// is the same as `\b` for phrases that begin and end with word characters.
#[derive(Debug, Clone)]
pub struct TokenPattern {
    phrase: String,
    regex: Regex,
}

impl TokenPattern {
    pub fn new(phrase: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(phrase)))?;
        Ok(Self {
            phrase: phrase.to_string(),
            regex,
        })
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Compiles a fixed keyword list. Only used for the hard-coded lists in this crate.
pub fn token_patterns(phrases: &[&str]) -> Vec<TokenPattern> {
    phrases
        .iter()
        .map(|p| TokenPattern::new(p).expect("escaped literal is always a valid pattern"))
        .collect()
}

/// True if any of `patterns` hits `text`.
pub fn any_token(patterns: &[TokenPattern], text: &str) -> bool {
    patterns.iter().any(|p| p.is_match(text))
}

// ────────────────────────────────────────────────────────────────────────────
// Skill match result
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMatch {
    pub category: String,
    pub skills: Vec<String>,
}

/// Matched skills per taxonomy category, in taxonomy order.
///
/// Every category is present, empty when nothing matched. Within a category the skills
/// appear once each, in taxonomy order. A skill listed in two categories can appear in both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillMatchResult {
    categories: Vec<CategoryMatch>,
}

impl SkillMatchResult {
    pub fn categories(&self) -> &[CategoryMatch] {
        &self.categories
    }

    pub fn skills_in(&self, category: &str) -> &[String] {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.skills.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, category: &str, skill: &str) -> bool {
        self.skills_in(category).iter().any(|s| s == skill)
    }

    /// Total matched skills, counting a skill once per category it was recorded under.
    pub fn total(&self) -> usize {
        self.categories.iter().map(|c| c.skills.len()).sum()
    }

    pub fn all_skills(&self) -> impl Iterator<Item = &str> {
        self.categories()
            .iter()
            .flat_map(|c| c.skills.iter().map(String::as_str))
    }
}

impl Serialize for SkillMatchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.category, &category.skills)?;
        }
        map.end()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Matcher
// ────────────────────────────────────────────────────────────────────────────

/// Pre-compiled token patterns for every skill in the taxonomy.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    categories: Vec<(String, Vec<TokenPattern>)>,
}

impl SkillMatcher {
    pub fn new(taxonomy: &Taxonomy) -> Result<Self, regex::Error> {
        let categories = taxonomy
            .categories
            .iter()
            .map(|category| {
                let patterns = category
                    .skills
                    .iter()
                    .map(|skill| TokenPattern::new(skill))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((category.name.clone(), patterns))
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { categories })
    }

    /// Matches every taxonomy skill against `text`. No stemming, no fuzzy matching.
    pub fn match_skills(&self, text: &str) -> SkillMatchResult {
        let categories = self
            .categories
            .iter()
            .map(|(name, patterns)| {
                let mut skills: Vec<String> = Vec::new();
                for pattern in patterns {
                    if pattern.is_match(text) && !skills.iter().any(|s| s == pattern.phrase()) {
                        skills.push(pattern.phrase().to_string());
                    }
                }
                CategoryMatch {
                    category: name.clone(),
                    skills,
                }
            })
            .collect();
        SkillMatchResult { categories }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::SkillCategory;
    use std::collections::HashMap;

    fn taxonomy(categories: &[(&str, &[&str])]) -> Taxonomy {
        Taxonomy::from_parts(
            categories
                .iter()
                .map(|(name, skills)| SkillCategory {
                    name: name.to_string(),
                    skills: skills.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
            HashMap::new(),
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_token_pattern_whole_word_only() {
        let java = TokenPattern::new("java").unwrap();
        assert!(java.is_match("java and python"));
        assert!(java.is_match("skills: java"));
        assert!(!java.is_match("javascript"));
        assert!(!java.is_match("rxjava"));
    }

    #[test]
    fn test_token_pattern_escapes_plus() {
        let cpp = TokenPattern::new("c++").unwrap();
        assert!(cpp.is_match("proficient in c++ and rust"));
        assert!(cpp.is_match("c++"));
        assert!(!cpp.is_match("c and cxx"));
        assert!(!cpp.is_match("c+"));
    }

    #[test]
    fn test_token_pattern_escapes_dot() {
        let node = TokenPattern::new("node.js").unwrap();
        assert!(node.is_match("built with node.js."));
        assert!(!node.is_match("built with nodexjs"));
    }

    #[test]
    fn test_token_pattern_case_insensitive() {
        assert!(TokenPattern::new("Spring Boot").unwrap().is_match("spring boot apps"));
    }

    #[test]
    fn test_single_letter_skills() {
        let c = TokenPattern::new("c").unwrap();
        assert!(c.is_match("languages: c, c++"));
        assert!(!c.is_match("cloud"));
        let r = TokenPattern::new("r").unwrap();
        assert!(!r.is_match("rust"));
    }

    #[test]
    fn test_match_records_skill_once_per_category() {
        let tax = taxonomy(&[("Lang", &["python", "rust"])]);
        let matcher = SkillMatcher::new(&tax).unwrap();
        let result = matcher.match_skills("python python python");
        assert_eq!(result.skills_in("Lang"), &["python".to_string()]);
        assert_eq!(result.total(), 1);
    }

    #[test]
    fn test_same_skill_in_two_categories_recorded_in_both() {
        let tax = taxonomy(&[("Programming", &["sql"]), ("Databases", &["sql", "redis"])]);
        let matcher = SkillMatcher::new(&tax).unwrap();
        let result = matcher.match_skills("sql");
        assert!(result.contains("Programming", "sql"));
        assert!(result.contains("Databases", "sql"));
        assert_eq!(result.total(), 2);
    }

    #[test]
    fn test_every_category_present_even_if_empty() {
        let tax = taxonomy(&[("A", &["x1"]), ("B", &["y1"])]);
        let result = SkillMatcher::new(&tax).unwrap().match_skills("");
        assert_eq!(result.categories().len(), 2);
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn test_matching_is_idempotent() {
        let tax = Taxonomy::builtin().unwrap();
        let matcher = SkillMatcher::new(&tax).unwrap();
        let text = "python, sql, docker, react, node.js, c++, aws, git and github";
        let first = matcher.match_skills(text);
        let second = matcher.match_skills(text);
        assert_eq!(first, second);
        for category in first.categories() {
            let mut deduped = category.skills.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), category.skills.len(), "{}", category.category);
        }
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let tax = taxonomy(&[("Zeta", &["go"]), ("Alpha", &["rust"])]);
        let result = SkillMatcher::new(&tax).unwrap().match_skills("go and rust");
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"Zeta":["go"],"Alpha":["rust"]}"#);
    }
}

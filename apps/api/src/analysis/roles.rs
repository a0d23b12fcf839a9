//! Role suggestions from the matched skills and the role-requirement table.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::matcher::SkillMatchResult;
use crate::taxonomy::RoleRequirement;

const MIN_MATCH_PERCENTAGE: f64 = 30.0;
const MAX_SUGGESTIONS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSuggestion {
    pub role: String,
    /// Share of the role's skills found in the resume, rounded to one decimal.
    pub match_percentage: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

pub fn suggest_roles(matched: &SkillMatchResult, roles: &[RoleRequirement]) -> Vec<RoleSuggestion> {
    let found: BTreeSet<String> = matched.all_skills().map(str::to_lowercase).collect();

    let mut suggestions: Vec<RoleSuggestion> = roles
        .iter()
        .filter_map(|role| {
            let required: BTreeSet<&str> = role.skills.iter().map(String::as_str).collect();
            if required.is_empty() {
                return None;
            }
            let matched_skills: Vec<String> = required
                .iter()
                .filter(|s| found.contains(**s))
                .map(|s| s.to_string())
                .collect();
            let pct = matched_skills.len() as f64 / role.skills.len() as f64 * 100.0;
            if pct < MIN_MATCH_PERCENTAGE {
                return None;
            }
            let missing_skills = required
                .iter()
                .filter(|s| !found.contains(**s))
                .map(|s| s.to_string())
                .collect();
            Some(RoleSuggestion {
                role: role.role.clone(),
                match_percentage: (pct * 10.0).round() / 10.0,
                matched_skills,
                missing_skills,
            })
        })
        .collect();

    // stable: ties keep table order
    suggestions.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::matcher::SkillMatcher;
    use crate::taxonomy::Taxonomy;

    fn suggest(text: &str) -> Vec<RoleSuggestion> {
        let taxonomy = Taxonomy::builtin().unwrap();
        let matched = SkillMatcher::new(&taxonomy).unwrap().match_skills(text);
        suggest_roles(&matched, &taxonomy.roles)
    }

    fn role(name: &str, skills: &[&str]) -> RoleRequirement {
        RoleRequirement {
            role: name.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_no_skills_no_roles() {
        assert!(suggest("").is_empty());
    }

    #[test]
    fn test_devops_profile_suggests_devops_first() {
        let roles = suggest("docker kubernetes jenkins terraform ansible aws linux ci/cd git");
        assert_eq!(roles[0].role, "DevOps Engineer");
        assert_eq!(roles[0].match_percentage, 100.0);
        assert!(roles[0].missing_skills.is_empty());
    }

    #[test]
    fn test_percentage_rounded_and_lists_sorted() {
        let matched = SkillMatcher::new(&Taxonomy::builtin().unwrap())
            .unwrap()
            .match_skills("sql python");
        let roles = vec![role("Analyst", &["sql", "python", "excel"])];
        let result = suggest_roles(&matched, &roles);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].match_percentage, 66.7);
        assert_eq!(result[0].matched_skills, vec!["python", "sql"]);
        assert_eq!(result[0].missing_skills, vec!["excel"]);
    }

    #[test]
    fn test_below_threshold_dropped_and_ties_keep_order() {
        let matched = SkillMatcher::new(&Taxonomy::builtin().unwrap())
            .unwrap()
            .match_skills("rust go");
        let roles = vec![
            role("First", &["rust", "java"]),
            role("Second", &["go", "java"]),
            role("Weak", &["rust", "a", "b", "c"]),
            role("Empty", &[]),
        ];
        let result = suggest_roles(&matched, &roles);
        let names: Vec<&str> = result.iter().map(|r| r.role.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_at_most_eight_suggestions() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let every_skill: Vec<&str> = taxonomy
            .categories
            .iter()
            .flat_map(|c| c.skills.iter().map(String::as_str))
            .collect();
        let roles = suggest(&every_skill.join(" ; "));
        assert_eq!(roles.len(), 8);
    }
}

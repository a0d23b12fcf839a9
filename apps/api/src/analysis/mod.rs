//! Resume analysis engine.
//!
//! `AnalysisEngine` owns the taxonomy and the compiled skill patterns. `analyze` runs the
//! detectors over one document and assembles an `AnalysisResult`:
//!
//! - Skill matching, section detection, and segmentation read the text independently.
//! - Scoring consumes the skill and section results; gap analysis consumes the skill result.
//! - The advice report formats the scoring and gap outputs.
//!
//! The engine holds no mutable state, so one instance serves any number of concurrent calls.

pub mod advice;
pub mod extract;
pub mod gaps;
pub mod handlers;
pub mod matcher;
pub mod roles;
pub mod scoring;
pub mod sections;
pub mod segmentation;

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::analysis::advice::render_advice;
use crate::analysis::gaps::{analyze_gaps, GapReport};
use crate::analysis::matcher::{SkillMatchResult, SkillMatcher};
use crate::analysis::roles::{suggest_roles, RoleSuggestion};
use crate::analysis::scoring::{
    score_resume, ScoreBreakdown, ScoreSignals, Strength, StrengthSummary, Weakness,
};
use crate::analysis::sections::{detect_sections, SectionPresence};
use crate::analysis::segmentation::{clean_lines, segment_experience, segment_projects, Entry};
use crate::taxonomy::Taxonomy;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No text could be extracted from the document")]
    EmptyText,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    pub skills_found: SkillMatchResult,
    pub total_skills_found: usize,
    pub sections_detected: SectionPresence,
    pub skill_gaps: GapReport,
    pub strengths: Vec<Strength>,
    pub strength_summary: StrengthSummary,
    pub weaknesses: Vec<Weakness>,
    pub advice: Vec<String>,
    pub suggested_roles: Vec<RoleSuggestion>,
    pub experience: Vec<Entry>,
    pub projects: Vec<Entry>,
    pub word_count: usize,
    /// Raw measurements behind the breakdown.
    pub signals: ScoreSignals,
}

pub struct AnalysisEngine {
    taxonomy: Taxonomy,
    matcher: SkillMatcher,
}

impl AnalysisEngine {
    /// Compiles every skill pattern up front. Fails only if a skill cannot be turned into
    /// a pattern, which escaping makes unlikely outside of pathological input.
    pub fn new(taxonomy: Taxonomy) -> Result<Self> {
        let matcher = SkillMatcher::new(&taxonomy).context("Failed to compile skill patterns")?;
        Ok(Self { taxonomy, matcher })
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyText);
        }

        let lowered = text.to_lowercase();
        let skills_found = self.matcher.match_skills(&lowered);
        let sections_detected = detect_sections(&lowered);

        let report = score_resume(&lowered, &sections_detected, &skills_found);
        let skill_gaps = analyze_gaps(&self.taxonomy, &skills_found);
        let suggested_roles = suggest_roles(&skills_found, &self.taxonomy.roles);
        let strength_summary = StrengthSummary::new(&report.strengths, report.score);
        let advice = render_advice(
            report.score,
            &strength_summary,
            &report.strengths,
            &report.weaknesses,
            &skill_gaps,
        );

        // Segmentation needs the source casing: all-caps lines count as headers.
        let lines = clean_lines(text);
        let experience = segment_experience(&lines);
        let projects = segment_projects(&lines);

        debug!(
            words = report.signals.word_count,
            skills = skills_found.total(),
            score = report.score,
            experience_entries = experience.len(),
            project_entries = projects.len(),
            "Resume analyzed"
        );

        Ok(AnalysisResult {
            score: report.score,
            breakdown: report.breakdown,
            total_skills_found: skills_found.total(),
            skills_found,
            sections_detected,
            skill_gaps,
            strengths: report.strengths,
            strength_summary,
            weaknesses: report.weaknesses,
            advice,
            suggested_roles,
            experience,
            projects,
            word_count: report.signals.word_count,
            signals: report.signals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::gaps::ImpactLevel;

    const SHORT_RESUME: &str = "Skills\n\
        Python, SQL, Docker\n\
        Experience\n\
        Software Engineer Intern, Jan 2022 – Present\n\
        • Built internal tooling";

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(Taxonomy::builtin().unwrap()).unwrap()
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let engine = engine();
        assert_eq!(engine.analyze("").unwrap_err(), AnalysisError::EmptyText);
        assert_eq!(
            engine.analyze("  \n\t \n").unwrap_err(),
            AnalysisError::EmptyText
        );
    }

    #[test]
    fn test_short_resume_end_to_end() {
        let result = engine().analyze(SHORT_RESUME).unwrap();

        let sections = result.sections_detected;
        assert!(sections.skills);
        assert!(sections.experience);
        assert!(!sections.education);
        assert!(!sections.projects);
        assert!(!sections.certification);

        for skill in ["python", "sql", "docker"] {
            assert!(
                result.skills_found.all_skills().any(|s| s == skill),
                "expected {skill} to be matched"
            );
        }

        assert_eq!(result.experience.len(), 1);
        assert_eq!(
            result.experience[0].title,
            "Software Engineer Intern, Jan 2022 – Present"
        );
        assert_eq!(result.experience[0].details, vec!["Built internal tooling"]);
        assert!(result.projects.is_empty());
    }

    #[test]
    fn test_plain_continuation_joins_title() {
        let text = SHORT_RESUME.replace("• Built", "Built");
        let result = engine().analyze(&text).unwrap();
        assert_eq!(result.experience.len(), 1);
        assert_eq!(
            result.experience[0].title,
            "Software Engineer Intern, Jan 2022 – Present | Built internal tooling"
        );
        assert!(result.experience[0].details.is_empty());
    }

    #[test]
    fn test_result_fields_are_consistent() {
        let result = engine().analyze(SHORT_RESUME).unwrap();
        assert_eq!(result.score, result.breakdown.total());
        assert!(result.score <= 100);
        assert_eq!(result.total_skills_found, result.skills_found.total());
        assert_eq!(result.word_count, 16);
        assert_eq!(result.signals.word_count, result.word_count);
        assert_eq!(result.signals.action_verb_hits, 2);
        assert_eq!(result.strength_summary.strength_count, result.strengths.len());
        assert_eq!(result.advice[1], "ATS RESUME ANALYSIS REPORT");
    }

    #[test]
    fn test_no_skills_no_sections() {
        let engine = engine();
        let result = engine
            .analyze("hello there, this line mentions nothing of interest")
            .unwrap();
        assert_eq!(result.breakdown.skills, 5);
        assert!(result.breakdown.formatting <= 5);
        assert_eq!(result.total_skills_found, 0);
        assert_eq!(
            result.skill_gaps.missing_skills_count,
            engine.taxonomy().skill_count()
        );
        assert!(result.experience.is_empty());
        assert!(result.projects.is_empty());
    }

    #[test]
    fn test_critical_impact_with_high_tier_heavy_taxonomy() {
        let taxonomy = Taxonomy::from_json_str(
            r#"{
                "categories": [{"name": "Core", "skills": ["rust", "go", "java", "c++", "sql", "bash"]}],
                "skill_details": {
                    "rust": {"importance": "High", "impact": "x"},
                    "go": {"importance": "High", "impact": "x"},
                    "java": {"importance": "High", "impact": "x"},
                    "c++": {"importance": "High", "impact": "x"},
                    "sql": {"importance": "High", "impact": "x"}
                }
            }"#,
        )
        .unwrap();
        let engine = AnalysisEngine::new(taxonomy).unwrap();
        let result = engine.analyze("nothing relevant here").unwrap();
        assert_eq!(result.skill_gaps.missing_skills_count, 6);
        assert_eq!(result.skill_gaps.impact_level, ImpactLevel::Critical);
        assert!(result.suggested_roles.is_empty());
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let engine = engine();
        let first = serde_json::to_value(engine.analyze(SHORT_RESUME).unwrap()).unwrap();
        let second = serde_json::to_value(engine.analyze(SHORT_RESUME).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_serializes_expected_keys() {
        let value = serde_json::to_value(engine().analyze(SHORT_RESUME).unwrap()).unwrap();
        for key in [
            "score",
            "breakdown",
            "skills_found",
            "total_skills_found",
            "sections_detected",
            "skill_gaps",
            "strengths",
            "strength_summary",
            "weaknesses",
            "advice",
            "suggested_roles",
            "experience",
            "projects",
            "word_count",
            "signals",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["sections_detected"]["skills"], true);
    }
}

//! Scoring engine: five sub-scores of at most 20 points each, plus strengths and weaknesses.
//!
//! | Category   | Signal                                   |
//! |------------|------------------------------------------|
//! | formatting | sections present × 3, plus length bonus  |
//! | skills     | matched skill count                      |
//! | experience | distinct action verbs used               |
//! | keywords   | unique tokens / total tokens             |
//! | education  | any degree or credential keyword         |
//!
//! Strengths and weaknesses are emitted in a fixed order: section checks, length, skills,
//! action verbs, keyword diversity, education, then the score-neutral contact and metrics
//! checks.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::matcher::{any_token, token_patterns, SkillMatchResult, TokenPattern};
use crate::analysis::sections::{Section, SectionPresence};

pub const MAX_SUB_SCORE: u32 = 20;
pub const MAX_SCORE: u32 = 100;

const POINTS_PER_SECTION: u32 = 3;

const ACTION_VERBS: &[&str] = &[
    "intern",
    "internship",
    "worked",
    "developed",
    "implemented",
    "built",
    "created",
    "designed",
    "managed",
    "led",
    "achieved",
    "improved",
    "delivered",
    "launched",
    "optimized",
    "automated",
    "reduced",
    "increased",
    "established",
    "coordinated",
    "collaborated",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "b.tech",
    "btech",
    "be",
    "b.e",
    "b.e.",
    "bca",
    "mca",
    "degree",
    "bachelor",
    "master",
    "diploma",
    "ph.d",
    "phd",
    "m.tech",
    "mtech",
    "m.s",
    "m.s.",
    "ms",
    "b.s",
    "b.s.",
    "bs",
    "mba",
    "undergraduate",
    "graduate",
    "postgraduate",
    "college",
    "university",
];

static ACTION_VERB_PATTERNS: Lazy<Vec<TokenPattern>> = Lazy::new(|| token_patterns(ACTION_VERBS));
static EDUCATION_PATTERNS: Lazy<Vec<TokenPattern>> =
    Lazy::new(|| token_patterns(EDUCATION_KEYWORDS));

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern is valid")
});
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{10}\b|\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b|\+\d{1,3}[-.\s]?\d{10}\b")
        .expect("phone pattern is valid")
});
static METRICS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d+%|\b\d+x|\b\d+\+|\b\d+ (?:percent|users|customers|million|thousand|projects|applications)\b",
    )
    .expect("metrics pattern is valid")
});

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub formatting: u32,
    pub skills: u32,
    pub experience: u32,
    pub keywords: u32,
    pub education: u32,
}

impl ScoreBreakdown {
    /// Sum of the sub-scores, clamped to 100.
    pub fn total(&self) -> u32 {
        (self.formatting + self.skills + self.experience + self.keywords + self.education)
            .min(MAX_SCORE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strength {
    #[serde(rename = "strength")]
    pub label: String,
    pub tip: String,
}

impl Strength {
    fn new(label: impl Into<String>, tip: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tip: tip.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weakness {
    #[serde(rename = "weakness")]
    pub label: String,
    pub impact: String,
    pub fix: String,
}

impl Weakness {
    fn new(label: impl Into<String>, impact: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            impact: impact.into(),
            fix: fix.into(),
        }
    }
}

/// Raw measurements behind the sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSignals {
    pub word_count: usize,
    pub unique_words: usize,
    pub lexical_diversity: f64,
    pub action_verb_hits: usize,
    pub education_found: bool,
    pub contact_methods: usize,
    pub has_metrics: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthSummary {
    pub summary: String,
    pub strength_count: usize,
    pub score: u32,
}

impl StrengthSummary {
    pub fn new(strengths: &[Strength], score: u32) -> Self {
        Self {
            summary: format!(
                "Your resume demonstrates {} key strengths that contribute to your ATS score of {}/100. These strengths show good alignment with ATS requirements.",
                strengths.len(),
                score
            ),
            strength_count: strengths.len(),
            score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    pub strengths: Vec<Strength>,
    pub weaknesses: Vec<Weakness>,
    pub signals: ScoreSignals,
}

// ────────────────────────────────────────────────────────────────────────────
// Tier tables
// ────────────────────────────────────────────────────────────────────────────

fn length_points(word_count: usize) -> u32 {
    match word_count {
        400..=700 => 5,
        300..=900 => 4,
        _ => 0,
    }
}

fn skills_points(total_skills: usize) -> u32 {
    match total_skills {
        n if n >= 20 => 20,
        n if n >= 15 => 18,
        n if n >= 10 => 15,
        n if n >= 6 => 10,
        _ => 5,
    }
}

fn experience_points(verb_hits: usize) -> u32 {
    match verb_hits {
        n if n >= 8 => 20,
        n if n >= 5 => 16,
        n if n >= 3 => 12,
        n if n >= 1 => 8,
        _ => 0,
    }
}

fn keyword_points(diversity: f64) -> u32 {
    if diversity > 0.50 {
        20
    } else if diversity > 0.45 {
        16
    } else if diversity > 0.35 {
        12
    } else {
        0
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Scores lower-cased resume text given the section and skill detector outputs.
pub fn score_resume(
    text: &str,
    sections: &SectionPresence,
    skills: &SkillMatchResult,
) -> ScoreReport {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    let mut breakdown = ScoreBreakdown::default();

    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len();

    // formatting: sections
    for section in Section::ALL {
        let key = section.key();
        let label = section.label();
        if sections.get(section) {
            breakdown.formatting += POINTS_PER_SECTION;
            strengths.push(Strength::new(
                format!("{label} section present"),
                format!("Your {key} section is well-structured and clearly identifiable, which helps ATS systems parse your resume correctly."),
            ));
        } else {
            weaknesses.push(Weakness::new(
                format!("{label} section missing"),
                format!("Missing {key} section reduces ATS compatibility and may cause your resume to be filtered out early."),
                format!("Add a clearly labeled '{label}' section with relevant information to improve structure and ATS score."),
            ));
        }
    }

    // formatting: length
    breakdown.formatting += length_points(word_count);
    match word_count {
        400..=700 => strengths.push(Strength::new(
            "Perfect resume length",
            format!("Excellent! Your resume has {word_count} words, which is ideal for ATS parsing and recruiter readability."),
        )),
        300..=900 => strengths.push(Strength::new(
            "Good resume length",
            format!("Your resume has {word_count} words, which is acceptable. Aim for 400-700 words for optimal impact."),
        )),
        n if n < 300 => weaknesses.push(Weakness::new(
            "Resume too short",
            format!("With only {word_count} words, your resume lacks sufficient detail for ATS to properly evaluate your qualifications."),
            "Expand on your experiences, achievements, and skills. Add quantifiable metrics and specific project details to reach 400-600 words.",
        )),
        _ => weaknesses.push(Weakness::new(
            "Resume too long",
            format!("With {word_count} words, your resume may be overwhelming for ATS and recruiters. Verbosity can reduce match scores."),
            "Condense your resume to 400-700 words. Focus on most recent and relevant experiences. Remove redundant information.",
        )),
    }

    // skills
    let total_skills = skills.total();
    breakdown.skills = skills_points(total_skills);
    match total_skills {
        n if n >= 20 => strengths.push(Strength::new(
            "Outstanding technical skill coverage",
            format!("Excellent! You've listed {n} technical skills, demonstrating comprehensive expertise across multiple domains."),
        )),
        n if n >= 15 => strengths.push(Strength::new(
            "Excellent technical skill coverage",
            format!("Great! You have {n} skills listed, showing strong technical breadth."),
        )),
        n if n >= 10 => strengths.push(Strength::new(
            "Strong technical skills",
            format!("You have {n} skills listed, which is competitive for most roles."),
        )),
        n if n >= 6 => strengths.push(Strength::new(
            "Moderate technical skills",
            format!("You have {n} skills. Consider expanding your skill set to be more competitive."),
        )),
        n => weaknesses.push(Weakness::new(
            "Limited technical skills listed",
            format!("Only {n} skills detected. Low skill count significantly reduces ATS matching and may filter out your resume."),
            "Add more relevant technical skills to your resume. Target 15-25 skills across different categories for optimal ATS performance.",
        )),
    }

    // experience
    let verb_hits = ACTION_VERB_PATTERNS
        .iter()
        .filter(|p| p.is_match(text))
        .count();
    breakdown.experience = experience_points(verb_hits);
    match verb_hits {
        n if n >= 8 => strengths.push(Strength::new(
            "Excellent experience indicators",
            format!("Outstanding! Your resume uses {n} action verbs, clearly demonstrating impactful contributions and achievements."),
        )),
        n if n >= 5 => strengths.push(Strength::new(
            "Strong experience indicators",
            format!("Good! You use {n} action verbs, showing meaningful work contributions."),
        )),
        n if n >= 3 => strengths.push(Strength::new(
            "Good experience indicators",
            format!("You demonstrate experience with {n} action-oriented words. Consider adding more to strengthen impact."),
        )),
        n if n >= 1 => weaknesses.push(Weakness::new(
            "Limited experience keywords",
            format!("Only {n} action verbs found. This makes your achievements less impactful and harder for ATS to identify."),
            "Rewrite your experience descriptions using strong action verbs like 'developed', 'implemented', 'achieved', 'optimized' to show impact.",
        )),
        _ => weaknesses.push(Weakness::new(
            "No experience keywords found",
            "Lack of action verbs significantly weakens your experience section and reduces ATS matching.",
            "Completely rewrite experiences using strong action verbs. Start each bullet point with words like 'Developed', 'Implemented', 'Led', 'Achieved'.",
        )),
    }

    // keywords
    let unique_words = words.iter().collect::<HashSet<_>>().len();
    let diversity = unique_words as f64 / word_count.max(1) as f64;
    breakdown.keywords = keyword_points(diversity);
    let shown = percent(diversity);
    if diversity > 0.50 {
        strengths.push(Strength::new(
            "Excellent keyword diversity",
            format!("Outstanding! Your resume uses {unique_words} unique words ({shown} diversity), which maximizes ATS keyword matching opportunities."),
        ));
    } else if diversity > 0.45 {
        strengths.push(Strength::new(
            "Very good keyword diversity",
            format!("Your resume has {unique_words} unique words ({shown} diversity), showing strong vocabulary variety."),
        ));
    } else if diversity > 0.35 {
        strengths.push(Strength::new(
            "Good keyword diversity",
            format!("Your keyword usage is solid with {shown} diversity. You could further improve by using more varied terminology."),
        ));
    } else {
        weaknesses.push(Weakness::new(
            "Low keyword diversity",
            format!("Only {shown} unique words. Repetitive wording limits ATS matching opportunities and reduces your chances of being selected."),
            "Use varied terminology and synonyms. For example, use 'developed', 'built', 'created', 'engineered' instead of repeating the same verb. Expand your technical vocabulary.",
        ));
    }

    // education
    let education_found = any_token(&EDUCATION_PATTERNS, text);
    if education_found {
        breakdown.education = MAX_SUB_SCORE;
        strengths.push(Strength::new(
            "Education credentials clearly stated",
            "Your educational background is well-documented and easy for ATS to identify.",
        ));
    } else {
        weaknesses.push(Weakness::new(
            "Education details unclear or missing",
            "Missing or unclear education information is often an automatic disqualifier. ATS looks for specific degree keywords.",
            "Clearly state your degree (e.g., 'Bachelor of Technology in Computer Science'), institution name, and graduation year in a dedicated Education section.",
        ));
    }

    // contact (score-neutral, no weakness below 2)
    let contact_methods = [
        EMAIL.is_match(text),
        PHONE.is_match(text),
        text.contains("linkedin.com"),
        text.contains("github.com"),
    ]
    .iter()
    .filter(|found| **found)
    .count();
    if contact_methods >= 3 {
        strengths.push(Strength::new(
            "Complete professional contact information",
            format!("Excellent! You have {contact_methods} contact methods including email, phone, LinkedIn, and/or GitHub. This makes it easy for recruiters to reach you."),
        ));
    } else if contact_methods >= 2 {
        strengths.push(Strength::new(
            "Good contact information",
            format!("You have {contact_methods} contact methods. Consider adding LinkedIn and GitHub profiles to strengthen your professional presence."),
        ));
    }

    // quantifiable achievements (score-neutral)
    let has_metrics = METRICS.is_match(text);
    if has_metrics {
        strengths.push(Strength::new(
            "Quantifiable achievements present",
            "Great! You include metrics and numbers in your resume, which strengthens your impact statements and is highly valued by ATS.",
        ));
    } else {
        weaknesses.push(Weakness::new(
            "No quantifiable achievements",
            "Lack of metrics makes it harder to demonstrate impact. ATS and recruiters value measurable results.",
            "Add specific numbers: 'Improved performance by 40%', 'Managed team of 5 developers', 'Processed 10K+ transactions daily', 'Reduced costs by $50K'.",
        ));
    }

    ScoreReport {
        score: breakdown.total(),
        breakdown,
        strengths,
        weaknesses,
        signals: ScoreSignals {
            word_count,
            unique_words,
            lexical_diversity: diversity,
            action_verb_hits: verb_hits,
            education_found,
            contact_methods,
            has_metrics,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::matcher::SkillMatcher;
    use crate::analysis::sections::detect_sections;
    use crate::taxonomy::Taxonomy;

    fn score(text: &str) -> ScoreReport {
        let lower = text.to_lowercase();
        let taxonomy = Taxonomy::builtin().unwrap();
        let skills = SkillMatcher::new(&taxonomy).unwrap().match_skills(&lower);
        score_resume(&lower, &detect_sections(&lower), &skills)
    }

    /// `n` distinct filler tokens that hit no keyword list.
    fn filler(n: usize) -> String {
        (0..n).map(|i| format!("zq{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_tier_tables() {
        assert_eq!(skills_points(22), 20);
        assert_eq!(skills_points(15), 18);
        assert_eq!(skills_points(10), 15);
        assert_eq!(skills_points(6), 10);
        assert_eq!(skills_points(0), 5);

        assert_eq!(experience_points(9), 20);
        assert_eq!(experience_points(5), 16);
        assert_eq!(experience_points(3), 12);
        assert_eq!(experience_points(1), 8);
        assert_eq!(experience_points(0), 0);

        assert_eq!(keyword_points(0.55), 20);
        assert_eq!(keyword_points(0.50), 16);
        assert_eq!(keyword_points(0.45), 12);
        assert_eq!(keyword_points(0.35), 0);

        assert_eq!(length_points(400), 5);
        assert_eq!(length_points(700), 5);
        assert_eq!(length_points(300), 4);
        assert_eq!(length_points(900), 4);
        assert_eq!(length_points(299), 0);
        assert_eq!(length_points(901), 0);
    }

    #[test]
    fn test_total_is_clamped_sum() {
        let breakdown = ScoreBreakdown {
            formatting: 20,
            skills: 20,
            experience: 20,
            keywords: 20,
            education: 20,
        };
        assert_eq!(breakdown.total(), 100);
        let partial = ScoreBreakdown {
            formatting: 3,
            skills: 5,
            ..Default::default()
        };
        assert_eq!(partial.total(), 8);
    }

    #[test]
    fn test_empty_text_scores_skills_floor_only() {
        let report = score("");
        assert_eq!(report.breakdown.skills, 5);
        assert_eq!(report.breakdown.formatting, 0);
        assert_eq!(report.breakdown.experience, 0);
        assert_eq!(report.breakdown.keywords, 0);
        assert_eq!(report.breakdown.education, 0);
        assert_eq!(report.score, 5);
        assert!(report.strengths.is_empty());
    }

    #[test]
    fn test_perfect_resume_scores_100() {
        let skills = "python java sql javascript typescript react angular django flask docker \
                      kubernetes git linux aws azure pandas numpy tensorflow pytorch redis mongodb jenkins";
        let verbs = "developed implemented built created designed managed led achieved improved";
        let headers = "education skills experience projects certification";
        let body = format!("{headers} bachelor {skills} {verbs} {}", filler(420));
        let report = score(&body);

        assert_eq!(report.breakdown.formatting, 20, "{:?}", report.signals);
        assert_eq!(report.breakdown.skills, 20);
        assert_eq!(report.breakdown.experience, 20);
        assert_eq!(report.breakdown.keywords, 20);
        assert_eq!(report.breakdown.education, 20);
        assert_eq!(report.score, 100);
        assert!(report.signals.lexical_diversity > 0.5);
    }

    #[test]
    fn test_sub_scores_bounded() {
        let long = filler(2000);
        for text in ["", "a", "python python python", long.as_str()] {
            let report = score(text);
            let b = report.breakdown;
            for sub in [b.formatting, b.skills, b.experience, b.keywords, b.education] {
                assert!(sub <= MAX_SUB_SCORE);
            }
            assert!(report.score <= MAX_SCORE);
            assert_eq!(report.score, b.total());
        }
    }

    #[test]
    fn test_low_diversity_is_weakness() {
        let report = score(&"word ".repeat(50));
        assert_eq!(report.breakdown.keywords, 0);
        assert!(report
            .weaknesses
            .iter()
            .any(|w| w.label == "Low keyword diversity" && w.impact.contains("2.0%")));
    }

    #[test]
    fn test_strength_order_follows_check_order() {
        let text = format!(
            "Skills\nExperience\nbachelor\njane@example.com 555-123-4567 linkedin.com/in/jane\n\
             developed built led improved python rust sql aws react java\nGrew revenue 40%\n{}",
            filler(300)
        );
        let report = score(&text);
        let labels: Vec<&str> = report.strengths.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Skills section present",
                "Experience section present",
                "Good resume length",
                "Moderate technical skills",
                "Good experience indicators",
                "Excellent keyword diversity",
                "Education credentials clearly stated",
                "Complete professional contact information",
                "Quantifiable achievements present",
            ]
        );
        let weak: Vec<&str> = report.weaknesses.iter().map(|w| w.label.as_str()).collect();
        assert_eq!(
            weak,
            vec![
                "Education section missing",
                "Projects section missing",
                "Certification section missing",
            ]
        );
    }

    #[test]
    fn test_single_contact_method_is_not_weakness() {
        let report = score("reach me at jane@example.com");
        assert_eq!(report.signals.contact_methods, 1);
        assert!(!report.weaknesses.iter().any(|w| w.label.contains("contact")));
        assert!(!report.strengths.iter().any(|s| s.label.contains("contact")));
    }

    #[test]
    fn test_metrics_patterns() {
        for text in ["cut costs 30%", "3x faster", "50+ services", "served 200 users"] {
            assert!(score(text).signals.has_metrics, "{text}");
        }
        assert!(!score("cut costs a lot").signals.has_metrics);
    }

    #[test]
    fn test_one_action_verb_is_weakness() {
        let report = score("developed");
        assert_eq!(report.breakdown.experience, 8);
        assert!(report
            .weaknesses
            .iter()
            .any(|w| w.label == "Limited experience keywords"));
    }

    #[test]
    fn test_strength_summary_text() {
        let strengths = vec![Strength::new("a", "b"), Strength::new("c", "d")];
        let summary = StrengthSummary::new(&strengths, 72);
        assert_eq!(summary.strength_count, 2);
        assert!(summary.summary.starts_with("Your resume demonstrates 2 key strengths"));
        assert!(summary.summary.contains("72/100"));
    }

    #[test]
    fn test_strength_serialized_field_names() {
        let json = serde_json::to_value(Strength::new("x", "y")).unwrap();
        assert_eq!(json["strength"], "x");
        assert_eq!(json["tip"], "y");
    }
}

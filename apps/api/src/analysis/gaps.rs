//! Skill gap analyzer: the taxonomy complement of the matched skills, ranked by importance.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::analysis::matcher::SkillMatchResult;
use crate::taxonomy::{Importance, Taxonomy};

/// Priority buckets are truncated to this many skills for display.
const BUCKET_DISPLAY_CAP: usize = 10;
/// Skills named in the summary and recommendation.
const REPRESENTATIVE_SKILLS: usize = 5;
/// High-tier skills named in the impact statement.
const IMPACT_EXAMPLES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactLevel {
    #[serde(rename = "CRITICAL")]
    Critical,
    #[serde(rename = "MODERATE")]
    Moderate,
    #[serde(rename = "LOW TO MODERATE")]
    LowToModerate,
    #[serde(rename = "LOW")]
    Low,
}

impl ImpactLevel {
    /// CRITICAL needs at least 5 high-tier gaps making up half of all gaps or more.
    pub fn classify(high: usize, medium: usize, total: usize) -> Self {
        if high * 2 >= total && high >= 5 {
            ImpactLevel::Critical
        } else if high >= 3 {
            ImpactLevel::Moderate
        } else if medium >= 10 {
            ImpactLevel::LowToModerate
        } else {
            ImpactLevel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingSkill {
    pub skill: String,
    pub category: String,
    pub importance: Importance,
    pub impact: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGap {
    pub skill: String,
    pub importance: Importance,
    pub impact: String,
}

/// Missing skills grouped by category, in taxonomy order. Categories without gaps are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingByCategory(Vec<(String, Vec<CategoryGap>)>);

impl Serialize for MissingByCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, gaps) in &self.0 {
            map.serialize_entry(category, gaps)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GapReport {
    pub summary: String,
    pub overall_impact: String,
    pub impact_level: ImpactLevel,
    pub recommendation: String,
    pub missing_skills_count: usize,
    pub high_priority_gaps: Vec<String>,
    pub medium_priority_gaps: Vec<String>,
    pub low_priority_gaps: Vec<String>,
    pub missing_by_category: MissingByCategory,
    pub priority_breakdown: PriorityBreakdown,
    /// Every missing skill, uncapped, in taxonomy order.
    pub missing_skills: Vec<MissingSkill>,
}

impl GapReport {
    fn excellent_coverage() -> Self {
        Self {
            summary: "Excellent! No significant skill gaps identified across all tracked categories.".to_string(),
            overall_impact: "Your resume demonstrates comprehensive technical skill coverage, which is highly beneficial for ATS matching across a wide range of positions.".to_string(),
            impact_level: ImpactLevel::Low,
            recommendation: "Continue to keep your skills updated with emerging technologies. Align your skillset with specific job descriptions when applying to maximize match scores.".to_string(),
            missing_skills_count: 0,
            high_priority_gaps: vec![],
            medium_priority_gaps: vec![],
            low_priority_gaps: vec![],
            missing_by_category: MissingByCategory::default(),
            priority_breakdown: PriorityBreakdown::default(),
            missing_skills: vec![],
        }
    }
}

/// Missing skills of one tier, uncapped, in taxonomy order.
pub fn in_tier(
    skills: &[MissingSkill],
    importance: Importance,
) -> impl Iterator<Item = &MissingSkill> {
    skills.iter().filter(move |m| m.importance == importance)
}

fn names<'a>(skills: impl Iterator<Item = &'a MissingSkill>, limit: usize) -> Vec<String> {
    skills.take(limit).map(|m| m.skill.clone()).collect()
}

/// Computes the per-category complement of `matched` and ranks it by importance tier.
pub fn analyze_gaps(taxonomy: &Taxonomy, matched: &SkillMatchResult) -> GapReport {
    let mut missing_skills = Vec::new();
    let mut by_category = Vec::new();

    for category in &taxonomy.categories {
        let mut category_gaps = Vec::new();
        for skill in &category.skills {
            if matched.contains(&category.name, skill) {
                continue;
            }
            let (importance, impact) = taxonomy.detail_for(skill);
            missing_skills.push(MissingSkill {
                skill: skill.clone(),
                category: category.name.clone(),
                importance,
                impact: impact.to_string(),
            });
            category_gaps.push(CategoryGap {
                skill: skill.clone(),
                importance,
                impact: impact.to_string(),
            });
        }
        if !category_gaps.is_empty() {
            by_category.push((category.name.clone(), category_gaps));
        }
    }

    if missing_skills.is_empty() {
        return GapReport::excellent_coverage();
    }

    let tier = |importance: Importance| in_tier(&missing_skills, importance);
    let breakdown = PriorityBreakdown {
        high: tier(Importance::High).count(),
        medium: tier(Importance::Medium).count(),
        low: tier(Importance::Low).count(),
    };
    let total = missing_skills.len();

    let top_high = names(tier(Importance::High), REPRESENTATIVE_SKILLS);
    let top_medium = names(tier(Importance::Medium), REPRESENTATIVE_SKILLS);
    let impact_examples = names(tier(Importance::High), IMPACT_EXAMPLES).join(", ");

    let preview = if !top_high.is_empty() {
        top_high.join(", ")
    } else if !top_medium.is_empty() {
        top_medium.join(", ")
    } else {
        let mut distinct: Vec<&str> = missing_skills.iter().map(|m| m.skill.as_str()).collect();
        distinct.sort_unstable();
        distinct.dedup();
        distinct.truncate(BUCKET_DISPLAY_CAP);
        distinct.join(", ")
    };

    let summary = format!(
        "Analysis identified {total} skill gaps across various categories. Priority breakdown: {} high-importance, {} medium-importance, {} low-importance. Key missing skills include: {preview}.",
        breakdown.high, breakdown.medium, breakdown.low
    );

    let impact_level = ImpactLevel::classify(breakdown.high, breakdown.medium, total);
    let overall_impact = match impact_level {
        ImpactLevel::Critical => format!(
            "⚠️ CRITICAL CONCERN: {} high-importance skills are missing. These gaps could severely limit your resume's visibility in ATS systems and may lead to automatic disqualification for many relevant positions. High-priority skills like {impact_examples} are frequently used as filter criteria by ATS.",
            breakdown.high
        ),
        ImpactLevel::Moderate => format!(
            "⚠ MODERATE CONCERN: {} high-importance skills and {} medium-importance skills are missing. This could moderately impact your ATS ranking and limit shortlisting opportunities for positions requiring these core competencies. Focus on acquiring: {impact_examples}.",
            breakdown.high, breakdown.medium
        ),
        ImpactLevel::LowToModerate => format!(
            "● LOW TO MODERATE CONCERN: The missing skills are mainly medium-importance ({} skills). While not critical, adding these skills could broaden your appeal and improve ATS matching for a wider range of positions.",
            breakdown.medium
        ),
        ImpactLevel::Low => "✓ LOW CONCERN: The identified gaps are primarily in lower-priority or specialized skills. These have minimal direct impact on ATS matching for general positions, but may be important for specific niche roles.".to_string(),
    };

    let recommendation = if breakdown.high > 0 {
        format!(
            "🎯 IMMEDIATE ACTIONS NEEDED:\n\
             1. PRIORITIZE HIGH-IMPORTANCE SKILLS: Focus on acquiring these {} critical skills first: {}. These are often mandatory requirements in job descriptions.\n\
             2. LEARN AND DEMONSTRATE: Take online courses (Coursera, Udemy, edX), complete hands-on projects, or contribute to open-source to gain practical experience.\n\
             3. UPDATE RESUME: Once proficient, add these skills to your resume with specific examples of usage in your projects or experience.\n\
             4. USE PRECISE KEYWORDS: Mirror the exact terminology from job descriptions. For example, if a job mentions 'React.js', include 'React.js' or 'React' rather than just 'frontend frameworks'.\n\
             5. VALIDATE WITH PROJECTS: Build portfolio projects showcasing new skills to strengthen credibility.",
            breakdown.high,
            top_high.join(", ")
        )
    } else if breakdown.medium > 0 {
        format!(
            "📈 RECOMMENDED IMPROVEMENTS:\n\
             1. Expand your skillset gradually by learning medium-priority skills like: {}.\n\
             2. Integrate new skills into your existing projects and update your resume accordingly.\n\
             3. Focus on skills relevant to your target role and industry.\n\
             4. Use online resources, certifications, or personal projects to demonstrate competency.",
            top_medium.join(", ")
        )
    } else {
        "✓ MAINTAIN AND REFINE:\n\
         1. Your skill coverage is strong. Continue to keep current skills updated.\n\
         2. Stay informed about emerging technologies in your field.\n\
         3. Tailor your resume for specific job applications by emphasizing relevant skills from your existing skillset."
            .to_string()
    };

    GapReport {
        summary,
        overall_impact,
        impact_level,
        recommendation,
        missing_skills_count: total,
        high_priority_gaps: names(tier(Importance::High), BUCKET_DISPLAY_CAP),
        medium_priority_gaps: names(tier(Importance::Medium), BUCKET_DISPLAY_CAP),
        low_priority_gaps: names(tier(Importance::Low), BUCKET_DISPLAY_CAP),
        missing_by_category: MissingByCategory(by_category),
        priority_breakdown: breakdown,
        missing_skills,
    }
}

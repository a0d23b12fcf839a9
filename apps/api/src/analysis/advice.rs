//! Renders the score, strengths, weaknesses and gap report as ordered report lines.
//! Formatting only: every value shown here is computed elsewhere.

use crate::analysis::gaps::GapReport;
use crate::analysis::scoring::{Strength, StrengthSummary, Weakness};

const MAX_STRENGTH_TIPS: usize = 8;
const MAX_WEAKNESSES: usize = 10;
const MAX_HIGH_GAPS_SHOWN: usize = 8;
const MAX_MEDIUM_GAPS_SHOWN: usize = 5;

const GENERAL_TIPS: &[&str] = &[
    "1. TAILOR FOR EACH JOB:",
    "   • Customize your resume for each application",
    "   • Mirror keywords from the job description",
    "   • Highlight most relevant experiences first",
    "",
    "2. USE STANDARD FORMATTING:",
    "   • Use standard section headers (Experience, Education, Skills)",
    "   • Avoid tables, text boxes, headers/footers",
    "   • Use standard fonts (Arial, Calibri, Times New Roman)",
    "   • Save as PDF for consistency",
    "",
    "3. OPTIMIZE KEYWORD USAGE:",
    "   • Include both acronyms and full terms (AI and Artificial Intelligence)",
    "   • Use industry-standard terminology",
    "   • Add relevant synonyms naturally",
    "",
    "4. QUANTIFY ACHIEVEMENTS:",
    "   • Use specific metrics (increased by 40%, managed team of 5)",
    "   • Include numbers, percentages, timeframes",
    "   • Show tangible impact of your work",
    "",
    "5. PROOFREAD CAREFULLY:",
    "   • Check for spelling and grammar errors",
    "   • Ensure consistent formatting",
    "   • Verify all dates and information are accurate",
    "",
];

/// Score band shown in the report banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Strong,
    Good,
    NeedsImprovement,
    Critical,
}

impl ScoreBand {
    pub fn for_score(score: u32) -> Self {
        match score {
            s if s >= 85 => ScoreBand::Excellent,
            s if s >= 70 => ScoreBand::Strong,
            s if s >= 55 => ScoreBand::Good,
            s if s >= 40 => ScoreBand::NeedsImprovement,
            _ => ScoreBand::Critical,
        }
    }

    fn headline(self, score: u32) -> String {
        match self {
            ScoreBand::Excellent => format!("✓✓✓ EXCELLENT! Your resume scored {score}/100"),
            ScoreBand::Strong => format!("✓✓ STRONG! Your resume scored {score}/100"),
            ScoreBand::Good => format!("● GOOD! Your resume scored {score}/100"),
            ScoreBand::NeedsImprovement => {
                format!("⚠ NEEDS IMPROVEMENT! Your resume scored {score}/100")
            }
            ScoreBand::Critical => format!("⚠⚠ CRITICAL! Your resume scored {score}/100"),
        }
    }

    fn body(self) -> &'static [&'static str] {
        match self {
            ScoreBand::Excellent => &[
                "Your resume is highly optimized for ATS systems. You're in the top tier",
                "and should pass most automated screenings. Focus on tailoring for specific",
                "roles to maximize your success rate.",
            ],
            ScoreBand::Strong => &[
                "Your resume is well-optimized and likely to pass most ATS screenings.",
                "With some targeted improvements, you can reach the excellent tier.",
            ],
            ScoreBand::Good => &[
                "Your resume will pass many ATS screenings but has significant room for",
                "improvement. Focus on the high-priority items below to boost your score.",
            ],
            ScoreBand::NeedsImprovement => &[
                "Your resume may struggle with many ATS systems. Immediate optimization",
                "is recommended to improve your chances of getting past automated screening.",
            ],
            ScoreBand::Critical => &[
                "Your resume is at high risk of being filtered out by ATS systems.",
                "Urgent optimization needed. Follow the recommendations below carefully.",
            ],
        }
    }
}

fn next_steps(score: u32) -> &'static [&'static str] {
    if score < 60 {
        &[
            "IMMEDIATE PRIORITY:",
            "1. Fix all critical weaknesses listed above",
            "2. Add missing sections (if any)",
            "3. Expand your skills section significantly",
            "4. Add quantifiable achievements with metrics",
            "5. Reanalyze your resume after changes",
        ]
    } else if score < 80 {
        &[
            "RECOMMENDED ACTIONS:",
            "1. Address high-impact weaknesses first",
            "2. Add 5-10 more relevant technical skills",
            "3. Incorporate more action verbs in experience descriptions",
            "4. Add specific metrics to demonstrate impact",
            "5. Review and update based on target job descriptions",
        ]
    } else {
        &[
            "OPTIMIZATION ACTIONS:",
            "1. Fine-tune for specific job applications",
            "2. Keep skills updated with latest technologies",
            "3. Continuously add quantifiable achievements",
            "4. Maintain consistent formatting and structure",
            "5. Consider adding certifications or recent projects",
        ]
    }
}

struct Report {
    lines: Vec<String>,
}

impl Report {
    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn rule(&mut self) {
        self.lines.push("=".repeat(70));
    }

    fn heading(&mut self, title: &str) {
        self.rule();
        self.line(title);
        self.rule();
        self.blank();
    }

    fn extend(&mut self, lines: &[&str]) {
        self.lines.extend(lines.iter().map(|l| l.to_string()));
    }
}

/// Builds the full human-readable report, one entry per line.
pub fn render_advice(
    score: u32,
    summary: &StrengthSummary,
    strengths: &[Strength],
    weaknesses: &[Weakness],
    gaps: &GapReport,
) -> Vec<String> {
    let mut report = Report { lines: Vec::new() };

    report.heading("ATS RESUME ANALYSIS REPORT");
    let band = ScoreBand::for_score(score);
    report.line(band.headline(score));
    report.blank();
    report.extend(band.body());
    report.blank();

    if !strengths.is_empty() {
        report.heading("✓ YOUR STRENGTHS");
        report.line(summary.summary.as_str());
        report.blank();
        report.line("KEY STRENGTHS:");
        for (i, strength) in strengths.iter().take(MAX_STRENGTH_TIPS).enumerate() {
            report.line(format!("  {}. {}", i + 1, strength.tip));
        }
        report.blank();
    }

    if !weaknesses.is_empty() {
        report.heading("⚠ AREAS FOR IMMEDIATE IMPROVEMENT");
        report.line(format!(
            "Identified {} issues that need attention:",
            weaknesses.len()
        ));
        report.blank();
        for (i, weakness) in weaknesses.iter().take(MAX_WEAKNESSES).enumerate() {
            report.line(format!("{}. ISSUE: {}", i + 1, weakness.label));
            report.line(format!("   IMPACT: {}", weakness.impact));
            report.line(format!("   FIX: {}", weakness.fix));
            report.blank();
        }
    }

    report.heading("📊 SKILL GAP ANALYSIS");
    report.line(format!("SUMMARY: {}", gaps.summary));
    report.blank();
    report.line(format!("ATS IMPACT: {}", gaps.overall_impact));
    report.blank();
    if !gaps.high_priority_gaps.is_empty() {
        report.line("🎯 HIGH-PRIORITY MISSING SKILLS (Learn These First):");
        for skill in gaps.high_priority_gaps.iter().take(MAX_HIGH_GAPS_SHOWN) {
            report.line(format!("  • {skill}"));
        }
        report.blank();
    }
    if !gaps.medium_priority_gaps.is_empty() && gaps.high_priority_gaps.len() < 5 {
        report.line("📈 MEDIUM-PRIORITY MISSING SKILLS (Consider Learning):");
        for skill in gaps.medium_priority_gaps.iter().take(MAX_MEDIUM_GAPS_SHOWN) {
            report.line(format!("  • {skill}"));
        }
        report.blank();
    }
    report.line("RECOMMENDATION:");
    report.line(gaps.recommendation.as_str());
    report.blank();

    report.heading("💡 GENERAL ATS OPTIMIZATION TIPS");
    report.extend(GENERAL_TIPS);

    report.heading("🎯 NEXT STEPS");
    report.extend(next_steps(score));
    report.blank();
    report.rule();
    report.line("End of ATS Analysis Report");
    report.rule();

    report.lines
}

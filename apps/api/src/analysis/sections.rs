//! Section detector: which of the five canonical resume sections appear anywhere in the text.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::analysis::matcher::{any_token, token_patterns, TokenPattern};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Education,
    Skills,
    Experience,
    Projects,
    Certification,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Education,
        Section::Skills,
        Section::Experience,
        Section::Projects,
        Section::Certification,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Projects => "projects",
            Section::Certification => "certification",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::Experience => "Experience",
            Section::Projects => "Projects",
            Section::Certification => "Certification",
        }
    }

    /// Keyword patterns for the section, also used as its heading vocabulary.
    pub fn patterns(self) -> &'static [TokenPattern] {
        match self {
            Section::Education => EDUCATION_PATTERNS.as_slice(),
            Section::Skills => SKILLS_PATTERNS.as_slice(),
            Section::Experience => EXPERIENCE_PATTERNS.as_slice(),
            Section::Projects => PROJECTS_PATTERNS.as_slice(),
            Section::Certification => CERTIFICATION_PATTERNS.as_slice(),
        }
    }
}

static EDUCATION_PATTERNS: Lazy<Vec<TokenPattern>> = Lazy::new(|| {
    token_patterns(&[
        "education",
        "academic",
        "degree",
        "university",
        "college",
        "school",
        "educational background",
        "academic qualifications",
    ])
});

static SKILLS_PATTERNS: Lazy<Vec<TokenPattern>> = Lazy::new(|| {
    token_patterns(&[
        "skills",
        "technical skills",
        "competencies",
        "expertise",
        "proficiencies",
        "core competencies",
        "technologies",
        "tools",
    ])
});

static EXPERIENCE_PATTERNS: Lazy<Vec<TokenPattern>> = Lazy::new(|| {
    token_patterns(&[
        "experience",
        "work history",
        "employment",
        "professional experience",
        "work experience",
        "career history",
        "professional background",
    ])
});

static PROJECTS_PATTERNS: Lazy<Vec<TokenPattern>> = Lazy::new(|| {
    token_patterns(&[
        "projects",
        "portfolio",
        "work samples",
        "personal projects",
        "academic projects",
        "key projects",
    ])
});

static CERTIFICATION_PATTERNS: Lazy<Vec<TokenPattern>> = Lazy::new(|| {
    token_patterns(&[
        "certification",
        "certificate",
        "license",
        "accreditation",
        "certified",
        "certifications",
        "professional certifications",
    ])
});

/// Presence flag for each canonical section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPresence {
    pub education: bool,
    pub skills: bool,
    pub experience: bool,
    pub projects: bool,
    pub certification: bool,
}

impl SectionPresence {
    pub fn get(&self, section: Section) -> bool {
        match section {
            Section::Education => self.education,
            Section::Skills => self.skills,
            Section::Experience => self.experience,
            Section::Projects => self.projects,
            Section::Certification => self.certification,
        }
    }

    fn set(&mut self, section: Section, present: bool) {
        match section {
            Section::Education => self.education = present,
            Section::Skills => self.skills = present,
            Section::Experience => self.experience = present,
            Section::Projects => self.projects = present,
            Section::Certification => self.certification = present,
        }
    }

    pub fn count(&self) -> usize {
        Section::ALL.iter().filter(|s| self.get(**s)).count()
    }
}

/// Marks a section present on the first of its patterns that hits the text.
pub fn detect_sections(text: &str) -> SectionPresence {
    let mut presence = SectionPresence::default();
    for section in Section::ALL {
        presence.set(section, any_token(section.patterns(), text));
    }
    presence
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_headers_case_insensitively() {
        let presence = detect_sections("EDUCATION\nB.Tech\nSkills\nRust\nProjects\nfoo");
        assert!(presence.education);
        assert!(presence.skills);
        assert!(presence.projects);
        assert!(!presence.experience);
        assert!(!presence.certification);
        assert_eq!(presence.count(), 3);
    }

    #[test]
    fn test_alternate_keywords() {
        let presence = detect_sections("Employment\nPortfolio\nAWS Certified\nUniversity of X\nTools");
        assert_eq!(presence.count(), 5);
    }

    #[test]
    fn test_partial_word_does_not_count() {
        let presence = detect_sections("inexperienced skillset schooling");
        assert_eq!(presence, SectionPresence::default());
    }

    #[test]
    fn test_empty_text_has_no_sections() {
        assert_eq!(detect_sections("").count(), 0);
    }

    #[test]
    fn test_serializes_in_canonical_order() {
        let json = serde_json::to_string(&SectionPresence::default()).unwrap();
        assert_eq!(
            json,
            r#"{"education":false,"skills":false,"experience":false,"projects":false,"certification":false}"#
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(Section::Certification.label(), "Certification");
        assert_eq!(Section::Projects.key(), "projects");
    }
}

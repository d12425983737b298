use std::fmt;

use serde::Serialize;

use crate::view::escape_html;

/// Proficiency shown on a skill card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkillLevel {
    Expert,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Expert => "Expert",
            SkillLevel::Advanced => "Advanced",
        }
    }

    /// Width of the progress bar fill
    pub fn progress_percent(&self) -> u8 {
        match self {
            SkillLevel::Expert => 90,
            SkillLevel::Advanced => 70,
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub level: SkillLevel,
    pub description: &'static str,
}

/// Skill identifier -> card data, in constellation order
pub const SKILLS: &[(&str, Skill)] = &[
    ("Python", skill(SkillLevel::Expert, "Advanced Python for AI and ML pipelines.")),
    ("PyTorch", skill(SkillLevel::Expert, "Deep learning frameworks mastery.")),
    ("Django", skill(SkillLevel::Advanced, "Backend web development.")),
    ("Kotlin", skill(SkillLevel::Advanced, "Android app development.")),
    ("Java", skill(SkillLevel::Advanced, "Core programming and OOP.")),
    ("React Native", skill(SkillLevel::Advanced, "Cross-platform mobile apps.")),
    ("Expo", skill(SkillLevel::Advanced, "React Native tooling.")),
    ("JS", skill(SkillLevel::Expert, "JavaScript for web interactivity.")),
    ("C/C++", skill(SkillLevel::Advanced, "System-level programming.")),
    ("HTML/CSS", skill(SkillLevel::Expert, "Frontend foundations.")),
    ("MySQL", skill(SkillLevel::Advanced, "Relational databases.")),
    ("MongoDB", skill(SkillLevel::Advanced, "NoSQL databases.")),
    ("Firebase", skill(SkillLevel::Advanced, "Cloud services and auth.")),
];

const fn skill(level: SkillLevel, description: &'static str) -> Skill {
    Skill { level, description }
}

/// Exact, case-sensitive lookup by skill identifier
pub fn lookup(id: &str) -> Option<&'static Skill> {
    SKILLS
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, skill)| skill)
}

pub fn render_card(id: &str, skill: &Skill) -> String {
    format!(
        "<div class=\"card\" data-skill=\"{id}\">\
<h4>{name}</h4>\
<p><strong>{level}</strong> - {description}</p>\
<div class=\"progress-bar\">\
<div class=\"progress-fill\" style=\"width: {percent}%\"></div>\
</div>\
</div>\n",
        id = escape_html(id),
        name = escape_html(id),
        level = skill.level,
        description = escape_html(skill.description),
        percent = skill.level.progress_percent(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_unique_ids() {
        assert_eq!(SKILLS.len(), 13);
        for (i, (id, _)) in SKILLS.iter().enumerate() {
            assert!(
                SKILLS[i + 1..].iter().all(|(other, _)| other != id),
                "duplicate skill {}",
                id
            );
        }
    }

    #[test]
    fn test_lookup() {
        let python = lookup("Python").unwrap();
        assert_eq!(python.level, SkillLevel::Expert);

        assert_eq!(lookup("C/C++").unwrap().level, SkillLevel::Advanced);
        assert!(lookup("python").is_none());
        assert!(lookup("COBOL").is_none());
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(SkillLevel::Expert.progress_percent(), 90);
        assert_eq!(SkillLevel::Advanced.progress_percent(), 70);
    }

    #[test]
    fn test_render_card() {
        let html = render_card("HTML/CSS", lookup("HTML/CSS").unwrap());
        assert!(html.contains("data-skill=\"HTML/CSS\""));
        assert!(html.contains("<h4>HTML/CSS</h4>"));
        assert!(html.contains("<strong>Expert</strong> - Frontend foundations."));
        assert!(html.contains("width: 90%"));

        let html = render_card("Expo", lookup("Expo").unwrap());
        assert!(html.contains("width: 70%"));
    }
}

use std::fmt;
use std::str::FromStr;

/// Identifies one resume section or utility app. Every window, taskbar entry
/// and renderer is keyed by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentKey {
    PersonalInfo,
    Contact,
    Summary,
    Highlights,
    Experience,
    Projects,
    Skills,
    Education,
    Publications,
    Photography,
    Interests,
    Notepad,
    Calculator,
    Paint,
}

impl ContentKey {
    pub const ALL: [ContentKey; 14] = [
        ContentKey::PersonalInfo,
        ContentKey::Contact,
        ContentKey::Summary,
        ContentKey::Highlights,
        ContentKey::Experience,
        ContentKey::Projects,
        ContentKey::Skills,
        ContentKey::Education,
        ContentKey::Publications,
        ContentKey::Photography,
        ContentKey::Interests,
        ContentKey::Notepad,
        ContentKey::Calculator,
        ContentKey::Paint,
    ];

    pub const APPS: [ContentKey; 3] = [
        ContentKey::Notepad,
        ContentKey::Calculator,
        ContentKey::Paint,
    ];

    /// Key as written in the resume document.
    pub fn name(self) -> &'static str {
        match self {
            ContentKey::PersonalInfo => "personal_info",
            ContentKey::Contact => "contact",
            ContentKey::Summary => "summary",
            ContentKey::Highlights => "highlights",
            ContentKey::Experience => "experience",
            ContentKey::Projects => "projects",
            ContentKey::Skills => "skills",
            ContentKey::Education => "education",
            ContentKey::Publications => "publications",
            ContentKey::Photography => "photography",
            ContentKey::Interests => "interests",
            ContentKey::Notepad => "notepad",
            ContentKey::Calculator => "calculator",
            ContentKey::Paint => "paint",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ContentKey::PersonalInfo => "About Me",
            ContentKey::Contact => "Contact",
            ContentKey::Summary => "Summary",
            ContentKey::Highlights => "Highlights",
            ContentKey::Experience => "Experience",
            ContentKey::Projects => "Projects",
            ContentKey::Skills => "Skills",
            ContentKey::Education => "Education",
            ContentKey::Publications => "Publications",
            ContentKey::Photography => "Photography",
            ContentKey::Interests => "Interests",
            ContentKey::Notepad => "Notepad",
            ContentKey::Calculator => "Calculator",
            ContentKey::Paint => "Paint",
        }
    }

    /// Single glyph used for desktop icons and taskbar entries.
    pub fn glyph(self) -> &'static str {
        match self {
            ContentKey::PersonalInfo => "☺",
            ContentKey::Contact => "✉",
            ContentKey::Summary => "≡",
            ContentKey::Highlights => "✦",
            ContentKey::Experience => "⚒",
            ContentKey::Projects => "⚙",
            ContentKey::Skills => "★",
            ContentKey::Education => "✎",
            ContentKey::Publications => "❐",
            ContentKey::Photography => "◉",
            ContentKey::Interests => "♥",
            ContentKey::Notepad => "✍",
            ContentKey::Calculator => "±",
            ContentKey::Paint => "▨",
        }
    }

    /// Whether the key names a resume section rather than a utility app.
    pub fn is_section(self) -> bool {
        !Self::APPS.contains(&self)
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown content key `{0}`")]
pub struct UnknownContentKey(pub String);

impl FromStr for ContentKey {
    type Err = UnknownContentKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| UnknownContentKey(s.to_string()))
    }
}

/// Title-case a document key: `work_history` becomes `Work History`.
pub fn format_title(value: &str) -> String {
    value
        .split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for key in ContentKey::ALL {
            assert_eq!(key.name().parse::<ContentKey>(), Ok(key));
        }
        assert!("guestbook".parse::<ContentKey>().is_err());
    }

    #[test]
    fn apps_are_not_sections() {
        assert!(ContentKey::Experience.is_section());
        assert!(!ContentKey::Calculator.is_section());
    }

    #[test]
    fn format_title_capitalizes_words() {
        assert_eq!(format_title("personal_info"), "Personal Info");
        assert_eq!(format_title("email"), "Email");
        assert_eq!(format_title("soft_skills"), "Soft Skills");
    }
}

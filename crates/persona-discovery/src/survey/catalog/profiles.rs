use serde::Serialize;

use super::super::domain::ClassificationType;
use super::CatalogError;

/// Narrative record rendered on the results page and handed to notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub animal_glyph: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub traits: &'static [&'static str],
    pub strengths: &'static [&'static str],
    pub weaknesses: &'static [&'static str],
    pub career_fit: &'static [&'static str],
    pub recommendations: &'static [&'static str],
    pub reasoning: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileEntry {
    pub kind: ClassificationType,
    pub profile: Profile,
}

/// Read-only lookup from classification type to profile.
#[derive(Debug, Clone, Copy)]
pub struct ProfileCatalog {
    entries: &'static [ProfileEntry],
}

impl Default for ProfileCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ProfileCatalog {
    pub const fn standard() -> Self {
        Self::from_static(&STANDARD_PROFILES)
    }

    pub const fn from_static(entries: &'static [ProfileEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [ProfileEntry] {
        self.entries
    }

    pub fn get(&self, kind: ClassificationType) -> Result<&'static Profile, CatalogError> {
        self.entries
            .iter()
            .find(|entry| entry.kind == kind)
            .map(|entry| &entry.profile)
            .ok_or(CatalogError::UnknownProfile(kind))
    }

    /// Every classification type must resolve to exactly one profile.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for kind in ClassificationType::ALL {
            match self.entries.iter().filter(|entry| entry.kind == kind).count() {
                0 => return Err(CatalogError::UnknownProfile(kind)),
                1 => {}
                _ => return Err(CatalogError::DuplicateProfile(kind)),
            }
        }
        Ok(())
    }

    /// Validates the catalog and returns profiles indexed by [`ClassificationType::index`].
    pub fn resolve_all(&self) -> Result<Vec<Profile>, CatalogError> {
        self.validate()?;
        ClassificationType::ALL
            .iter()
            .map(|kind| self.get(*kind).copied())
            .collect()
    }
}

pub static STANDARD_PROFILES: [ProfileEntry; 6] = [
    ProfileEntry {
        kind: ClassificationType::SilentSentinel,
        profile: Profile {
            animal_glyph: "🦉",
            name: "The Silent Sentinel",
            description: "Solitary observer, handles challenges independently. You process \
                          experiences internally and rarely let others see what you feel.",
            traits: &[
                "Self-reliant",
                "Private",
                "Observant",
                "Calm under pressure",
            ],
            strengths: &[
                "Steady in a crisis",
                "Independent problem solver",
                "Keeps confidences",
                "Thinks before reacting",
            ],
            weaknesses: &[
                "Struggles to ask for help",
                "Can seem distant or unapproachable",
                "Bottles up stress until it spills over",
            ],
            career_fit: &[
                "Research and analysis",
                "Software engineering",
                "Archival and library science",
                "Forensic accounting",
            ],
            recommendations: &[
                "Share one small personal update with someone you trust each week",
                "Practice naming emotions out loud before solving the problem",
                "Schedule regular check-ins instead of waiting for a crisis",
            ],
            reasoning: "Most of your answers chose to handle difficult moments privately, \
                        which points to an emotionally reserved style.",
        },
    },
    ProfileEntry {
        kind: ClassificationType::WatchfulGardener,
        profile: Profile {
            animal_glyph: "🦊",
            name: "The Watchful Gardener",
            description: "Intelligent and cautious, wisely selective. You let people in gradually, \
                          tending trust like a garden and opening up once it has had time to grow.",
            traits: &["Cautious", "Thoughtful", "Loyal", "Measured"],
            strengths: &[
                "Builds deep, lasting relationships",
                "Considers consequences before acting",
                "Reliable once committed",
            ],
            weaknesses: &[
                "Slow to reconnect after conflict",
                "May miss opportunities while waiting",
                "Can leave others unsure where they stand",
            ],
            career_fit: &[
                "Project management",
                "Financial planning",
                "Healthcare administration",
                "Quality assurance",
            ],
            recommendations: &[
                "Take the first step to reconnect once in a while",
                "Set a time limit on \"thinking it over\" before responding",
                "Tell people when you need time so silence is not misread",
            ],
            reasoning: "Your answers leaned toward careful, delayed engagement: open, \
                        but only after reflection and on your own terms.",
        },
    },
    ProfileEntry {
        kind: ClassificationType::EmpathicAnchor,
        profile: Profile {
            animal_glyph: "🐬",
            name: "The Empathic Anchor",
            description: "Thrives in connection and cooperation. You engage directly, share what \
                          you feel, and give others a steady place to land when things get hard.",
            traits: &["Warm", "Expressive", "Supportive", "Collaborative"],
            strengths: &[
                "Resolves conflict early and openly",
                "Makes people feel heard",
                "Comfortable asking for and offering help",
                "Builds trust quickly in teams",
            ],
            weaknesses: &[
                "Can absorb other people's stress",
                "May over-extend to keep everyone comfortable",
                "Finds distant or guarded people draining",
            ],
            career_fit: &[
                "Counseling and social work",
                "Teaching",
                "Human resources",
                "Nursing",
                "Team leadership",
            ],
            recommendations: &[
                "Protect recovery time after emotionally heavy conversations",
                "Practice saying no without over-explaining",
                "Notice when supporting others crowds out your own needs",
            ],
            reasoning: "You consistently chose open, direct engagement, which is the \
                        clearest marker of emotional openness in this assessment.",
        },
    },
    ProfileEntry {
        kind: ClassificationType::MaskedJester,
        profile: Profile {
            animal_glyph: "🦎",
            name: "The Masked Jester",
            description: "Masks feelings with humor, adapts expression. Deflection or coolness \
                          keep difficult feelings at arm's length, yours and other people's.",
            traits: &["Quick-witted", "Guarded", "Independent", "Deflecting"],
            strengths: &[
                "Lightens tense situations",
                "Resilient on the surface",
                "Hard to rattle in public",
            ],
            weaknesses: &[
                "Uses jokes or coldness to avoid vulnerability",
                "Can come across as dismissive",
                "Feedback and conflict trigger defensiveness",
            ],
            career_fit: &[
                "Sales",
                "Entertainment and media",
                "Event hosting",
                "Entrepreneurship",
            ],
            recommendations: &[
                "Pause before the joke and ask what you are actually feeling",
                "Treat critical feedback as information, not an attack",
                "Let one trusted person see the unguarded version of you",
            ],
            reasoning: "Your answers often reached for deflection or distance when emotions \
                        came up, the signature of defensive detachment.",
        },
    },
    ProfileEntry {
        kind: ClassificationType::AdaptiveHybrid,
        profile: Profile {
            animal_glyph: "🔥",
            name: "The Adaptive Hybrid",
            description: "Flexible blend of openness and caution. You adjust how much you share \
                          to the person and the moment in front of you.",
            traits: &["Flexible", "Perceptive", "Balanced", "Context-aware"],
            strengths: &[
                "Reads the room well",
                "Comfortable in both close and formal settings",
                "Knows when to lean in and when to hold back",
            ],
            weaknesses: &[
                "Can second-guess which mode to use",
                "Others may find you hard to predict",
            ],
            career_fit: &[
                "Consulting",
                "Product management",
                "Mediation",
                "User research",
            ],
            recommendations: &[
                "Notice which situations pull you toward caution and why",
                "Let people know when you are still deciding how open to be",
                "Lean into openness with people who have earned your trust",
            ],
            reasoning: "Your answers split evenly between selective openness and full \
                        openness, so neither style dominates.",
        },
    },
    ProfileEntry {
        kind: ClassificationType::AmbivalentType,
        profile: Profile {
            animal_glyph: "🦋",
            name: "The Ambivalent Type",
            description: "Craves closeness yet fears rejection. No single style dominates, and your \
                          approach shifts strongly with circumstances.",
            traits: &["Situational", "Complex", "Multi-faceted"],
            strengths: &[
                "Draws on several emotional strategies",
                "Adapts to very different environments",
            ],
            weaknesses: &[
                "Inner conflict between opening up and pulling away",
                "May feel inconsistent to yourself and others",
            ],
            career_fit: &[
                "Creative arts",
                "Journalism",
                "Generalist roles with varied responsibilities",
            ],
            recommendations: &[
                "Keep a short journal of when you open up and when you withdraw",
                "Retake the assessment in a calmer period and compare results",
                "Talk through mixed feelings with a mentor or counselor",
            ],
            reasoning: "Your top answer styles were tied, and the combination does not point \
                        to one consistent pattern.",
        },
    },
];

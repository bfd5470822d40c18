use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
///
/// Each variant has one canonical string and any number of legacy aliases.
/// Aliases are accepted by `from_str` only; `as_str` and serde output always
/// use the canonical form.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal $(| $alias:literal)*),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(into = "&'static str", try_from = "String")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            pub fn all() -> &'static [$name] {
                &[$(Self::$variant),+]
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($s $(| $alias)* => Ok(Self::$variant)),+,
                    other => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: other.into(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = ModelError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(v: $name) -> Self {
                v.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// Older records and some API responses still carry the secondary vocabulary.
// Everything past this parse sees only the five canonical variants.
str_enum!(ConsultationStatus {
    EnAttente => "en_attente" | "reporte",
    EnAnalyse => "en_analyse" | "en_cours",
    AnalyseTerminee => "analyse_terminee",
    ValideMedecin => "valide_medecin" | "validee" | "validee_medecin" | "termine" | "terminee",
    RejeteMedecin => "rejete_medecin" | "rejetee",
});

str_enum!(Urgency {
    Faible => "faible",
    Normale => "normale",
    Elevee => "elevee",
    Critique => "critique",
});

str_enum!(Role {
    Medecin => "medecin",
    Infirmier => "infirmier",
    Secretariat => "secretariat",
});

impl ConsultationStatus {
    /// Workflow sinks: no engine transition leaves these states.
    pub fn is_sink(&self) -> bool {
        matches!(self, Self::ValideMedecin | Self::RejeteMedecin)
    }
}

impl Default for Urgency {
    fn default() -> Self {
        Self::Normale
    }
}

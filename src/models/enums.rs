use serde::{Deserialize, Serialize};

use super::validate::ValidationError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ValidationError::invalid_enum(stringify!($name), s)),
                }
            }
        }
    };
}

str_enum!(UseCaseType {
    Entity => "entity",
    Api => "api",
    Service => "service",
});

str_enum!(FieldType {
    Text => "text",
    Number => "number",
    Decimal => "decimal",
    Date => "date",
    Datetime => "datetime",
    Boolean => "boolean",
    Email => "email",
});

str_enum!(TestStatus {
    Pending => "pending",
    Pass => "pass",
    Fail => "fail",
});

/// What a generation task is for. Drives prompt selection, token budget,
/// and the offline provider's canned output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    Document,
    FieldImprovement,
    TestGeneration,
    Extraction,
    Expansion,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::FieldImprovement => "field-improvement",
            Self::TestGeneration => "test-generation",
            Self::Extraction => "extraction",
            Self::Expansion => "expansion",
        }
    }
}

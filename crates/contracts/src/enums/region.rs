use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Macro-regions understood by the sales API
///
/// `Brasil` is the whole country and means "no restriction".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    #[default]
    Brasil,
    CentroOeste,
    Nordeste,
    Norte,
    Sudeste,
    Sul,
}

impl Region {
    /// Human-readable name used in the region selector
    pub fn display_name(&self) -> &'static str {
        match self {
            Region::Brasil => "Brasil",
            Region::CentroOeste => "Centro-Oeste",
            Region::Nordeste => "Nordeste",
            Region::Norte => "Norte",
            Region::Sudeste => "Sudeste",
            Region::Sul => "Sul",
        }
    }

    /// Value sent as the `regiao` query parameter; empty for the whole country
    pub fn query_value(&self) -> &'static str {
        match self {
            Region::Brasil => "",
            Region::CentroOeste => "centro-oeste",
            Region::Nordeste => "nordeste",
            Region::Norte => "norte",
            Region::Sudeste => "sudeste",
            Region::Sul => "sul",
        }
    }

    /// All regions in selector order
    pub fn all() -> Vec<Region> {
        vec![
            Region::Brasil,
            Region::CentroOeste,
            Region::Nordeste,
            Region::Norte,
            Region::Sudeste,
            Region::Sul,
        ]
    }

    /// Parses either the query value or the display name, ignoring case
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::all().into_iter().find(|region| {
            region.query_value().eq_ignore_ascii_case(code)
                || region.display_name().eq_ignore_ascii_case(code)
        })
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.query_value())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Region::from_code(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown region: {raw}")))
    }
}

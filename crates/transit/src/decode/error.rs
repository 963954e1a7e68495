use std::fmt;

/// The five entity lists carried in a `references` block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Agencies,
    Routes,
    Situations,
    Stops,
    Trips,
}

impl EntityKind {
    /// JSON key of the list.
    pub fn key(self) -> &'static str {
        match self {
            Self::Agencies => "agencies",
            Self::Routes => "routes",
            Self::Situations => "situations",
            Self::Stops => "stops",
            Self::Trips => "trips",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("expected a JSON object")]
    NotAnObject,

    #[error("missing key `{kind}`")]
    MissingKey { kind: EntityKind },

    #[error("`{kind}` is not an array")]
    NotAnArray { kind: EntityKind },

    #[error("error decoding {kind}[{index}]: {source}")]
    Entity {
        kind: EntityKind,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("error decoding {model} #{index}: {source}")]
    Model {
        model: &'static str,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed response envelope: {0}")]
    Envelope(String),

    #[error("API returned status {code}: {text}")]
    Status { code: u16, text: String },
}

impl DecodeError {
    /// The references list that failed, if the error came from one.
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Self::MissingKey { kind } | Self::NotAnArray { kind } | Self::Entity { kind, .. } => {
                Some(*kind)
            }
            _ => None,
        }
    }
}

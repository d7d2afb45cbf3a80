use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Shopping,
    Greeting,
    Chat,
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shopping => "shopping",
            Self::Greeting => "greeting",
            Self::Chat => "chat",
            Self::Unknown => "unknown",
        }
    }

    /// Maps a free-form classifier label onto an intent. Anything unrecognised is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        let normalized = label
            .trim()
            .trim_matches(|character: char| !character.is_ascii_alphanumeric())
            .to_ascii_lowercase();

        match normalized.as_str() {
            "shopping" => Self::Shopping,
            "greeting" => Self::Greeting,
            "chat" => Self::Chat,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

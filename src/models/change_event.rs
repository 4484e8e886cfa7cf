use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::location::EventLocation;

/// Kind of change reported by the notification API.
///
/// Only the three tags the router acts on get their own variant; anything
/// else is carried through verbatim so it can still be matched against the
/// watch list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeEventType {
    /// A file was created under the watched tree
    FileAdded,
    /// Data was written to (or appended to) an existing file
    DataWritten,
    /// A directory was created under the watched tree
    DirAdded,
    /// Any other tag, passed through unrecognized
    Other(String),
}

impl ChangeEventType {
    /// Wire tag for this event type.
    pub fn as_str(&self) -> &str {
        match self {
            ChangeEventType::FileAdded => "child_file_added",
            ChangeEventType::DataWritten => "child_data_written",
            ChangeEventType::DirAdded => "child_dir_added",
            ChangeEventType::Other(tag) => tag,
        }
    }

    /// True for the events whose file content is worth fetching.
    pub fn is_file_content(&self) -> bool {
        matches!(
            self,
            ChangeEventType::FileAdded | ChangeEventType::DataWritten
        )
    }
}

impl From<&str> for ChangeEventType {
    fn from(tag: &str) -> Self {
        match tag {
            "child_file_added" => ChangeEventType::FileAdded,
            "child_data_written" => ChangeEventType::DataWritten,
            "child_dir_added" => ChangeEventType::DirAdded,
            other => ChangeEventType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ChangeEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChangeEventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChangeEventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(ChangeEventType::from(tag.as_str()))
    }
}

/// One filesystem change notice from the notification stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    #[serde(rename = "type")]
    pub event_type: ChangeEventType,
    /// Slash-separated path relative to the watched root
    pub path: String,
    /// Ancestry chain of file ids; the last one names the changed file
    #[serde(default, deserialize_with = "deserialize_spine")]
    pub spine: Vec<String>,
}

impl ChangeEvent {
    pub fn new(
        event_type: impl Into<ChangeEventType>,
        path: impl Into<String>,
        spine: Vec<String>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            path: path.into(),
            spine,
        }
    }

    /// Id of the file this event refers to, if the spine is non-empty.
    pub fn file_id(&self) -> Option<&str> {
        self.spine.last().map(String::as_str)
    }

    /// Directory, basename and extension of the event path.
    pub fn location(&self) -> EventLocation {
        EventLocation::from_relative(&self.path)
    }
}

/// Spine entries arrive as strings or bare integers depending on the
/// cluster version; both are kept as strings.
struct SpineId(String);

impl<'de> Deserialize<'de> for SpineId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::{self, Visitor};

        struct IdVisitor;

        impl<'v> Visitor<'v> for IdVisitor {
            type Value = String;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer file id")
            }

            fn visit_str<E>(self, value: &str) -> Result<String, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_string<E>(self, value: String) -> Result<String, E>
            where
                E: de::Error,
            {
                Ok(value)
            }

            fn visit_i64<E>(self, value: i64) -> Result<String, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_u64<E>(self, value: u64) -> Result<String, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }
        }

        deserializer.deserialize_any(IdVisitor).map(SpineId)
    }
}

fn deserialize_spine<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids: Option<Vec<SpineId>> = Option::deserialize(deserializer)?;
    Ok(ids
        .unwrap_or_default()
        .into_iter()
        .map(|SpineId(id)| id)
        .collect())
}

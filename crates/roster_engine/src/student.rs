/* 📖 # Why are student fields stored as raw JSON values?

Creation and replacement take whatever `name`, `age`, `email` and `course` the
client sent and store it without validation: a string age stays a string, a
number name stays a number, and the API echoes it back unchanged. A field the
client left out is stored as absent and omitted from the JSON the API returns.
*/

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Identifier of a student record.
///
/// Ids are handed out by the store, starting at 1, and never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StudentId(u64);

impl StudentId {
    /// The id given to the first student created in a registry.
    pub const FIRST: StudentId = StudentId(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /* 📖 # Why parse ids "loosely"?
    Path identifiers are compared numerically, the way a dynamically typed
    client would compare `1 == "1"`: surrounding whitespace is ignored and any
    decimal spelling of an integral value ("01", "1.0", "1e0") names the same
    id. Doing the coercion here, once, keeps lookups a plain integer compare.
    */

    /// Parse a path identifier, returning None if it cannot name any student.
    ///
    /// ```
    /// use roster_engine::StudentId;
    ///
    /// assert_eq!(StudentId::parse_loose(" 01 "), Some(StudentId::new(1)));
    /// assert_eq!(StudentId::parse_loose("1.0"), Some(StudentId::new(1)));
    /// assert_eq!(StudentId::parse_loose("1.5"), None);
    /// assert_eq!(StudentId::parse_loose("abc"), None);
    /// ```
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(value) = trimmed.parse::<u64>() {
            return Some(Self(value));
        }
        let number: f64 = trimmed.parse().ok()?;
        if !number.is_finite() || number < 0.0 || number.fract() != 0.0 || number >= u64::MAX as f64
        {
            return None;
        }
        Some(Self(number as u64))
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The client-supplied part of a student record.
///
/// Each field holds whatever JSON value the client sent, unchanged. `None`
/// means the key was not sent; an explicit `null` is kept as `Value::Null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFields {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub course: Option<Value>,
}

impl StudentFields {
    /// Fields with every value present.
    pub fn new(
        name: impl Into<String>,
        age: i64,
        email: impl Into<String>,
        course: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            age: Some(Value::from(age)),
            email: Some(Value::String(email.into())),
            course: Some(Value::String(course.into())),
        }
    }

    /// Pick the student fields out of a JSON object, ignoring any other keys.
    pub fn from_object(mut object: Map<String, Value>) -> Self {
        Self {
            name: object.remove("name"),
            age: object.remove("age"),
            email: object.remove("email"),
            course: object.remove("course"),
        }
    }
}

/// A stored student record.
///
/// Serializes as `{"id":1,"name":...,"age":...,"email":...,"course":...}`,
/// leaving out absent fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    #[serde(flatten)]
    pub fields: StudentFields,
}

impl Student {
    pub fn new(id: StudentId, fields: StudentFields) -> Self {
        Self { id, fields }
    }
}

/// A key that is present maps to `Some`, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

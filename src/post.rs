//! The post record and its client-supplied half.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a post: the hex form of a MongoDB ObjectId.
///
/// Opaque to everything but the store that minted it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored blog post.
///
/// `title` and `content` may be absent; an absent field is omitted from the
/// JSON object rather than written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Post {
    /// Attaches a store-assigned id to a new post.
    pub fn from_new(id: PostId, new: NewPost) -> Self {
        Self { id, title: new.title, content: new.content }
    }
}

/// The fields a client supplies when creating a post.
///
/// Deserialization coerces loosely: strings pass through, numbers and
/// booleans become text, `null` and missing fields become absent. Arrays and
/// objects are rejected. Numbers print the way a browser would, so `1.0`
/// becomes `"1"` and `1e21` becomes `"1e+21"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    #[serde(default, deserialize_with = "coerce::text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "coerce::text", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { title: Some(title.into()), content: Some(content.into()) }
    }
}

pub(crate) mod coerce {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;
    use serde_json::{Number, Value};

    /// Strict form for client input: structured values are an error.
    pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(_) => Err(D::Error::custom("expected text, found an array")),
            Value::Object(_) => Err(D::Error::custom("expected text, found an object")),
            scalar => Ok(scalar_text(scalar)),
        }
    }

    /// Lenient form for stored documents: a structured value reads as absent
    /// instead of failing the whole read.
    pub(crate) fn stored_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(scalar_text(Value::deserialize(deserializer)?))
    }

    fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(number_text(&n)),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn number_text(n: &Number) -> String {
        match n.as_f64() {
            Some(f) if n.is_f64() => float_text(f),
            _ => n.to_string(),
        }
    }

    // Integral values print without a fraction below 1e21; exponent form
    // outside [1e-6, 1e21) carries an explicit sign.
    fn float_text(f: f64) -> String {
        if f == 0.0 {
            return "0".to_owned();
        }
        let magnitude = f.abs();
        if magnitude >= 1e21 || magnitude < 1e-6 {
            let exp = format!("{f:e}");
            return match exp.split_once('e') {
                Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
                _ => exp,
            };
        }
        if f.fract() == 0.0 {
            format!("{f:.0}")
        } else {
            f.to_string()
        }
    }
}

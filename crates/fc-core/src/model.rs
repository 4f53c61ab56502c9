//! Embedded page model reader
//!
//! The host page serializes its view model as JSON into the text of a
//! `#TheModel` element. Only the `Circles` array is of interest. Each circle
//! is decoded on its own so one malformed entry never hides the rest.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::page::Page;

/// Id of the element holding the model JSON.
pub const MODEL_ELEMENT_ID: &str = "TheModel";

/// Error type for model parsing.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model element #{0} not found")]
    Missing(&'static str),
    #[error("Malformed model JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

// =============================================================================
// Model Types
// =============================================================================

/// A scalar that the host emits as either a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Render the way the host's own scripts would stringify the value.
    pub fn to_id_string(&self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => match integral(*f) {
                Some(n) => n.to_string(),
                None => format!("{f}"),
            },
            Scalar::Text(s) => s.clone(),
        }
    }

    /// Integer value, for id comparisons. Strings never compare equal to
    /// numbers.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            Scalar::Float(f) => integral(*f),
            Scalar::Text(_) => None,
        }
    }
}

/// `f` as an integer, if it is integral and fits an `i64` without saturating.
fn integral(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    (f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then(|| f as i64)
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Favorite {
    #[serde(rename = "Color", default, deserialize_with = "lenient")]
    pub color: Option<Scalar>,
}

/// One catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Circle {
    #[serde(rename = "Favorite", default, deserialize_with = "lenient")]
    pub favorite: Option<Favorite>,
    #[serde(rename = "Id", default, deserialize_with = "lenient")]
    pub id: Option<Scalar>,
    #[serde(rename = "CircleId", default, deserialize_with = "lenient")]
    pub circle_id: Option<Scalar>,
    #[serde(rename = "PixivUrl", default, deserialize_with = "lenient")]
    pub pixiv_url: Option<String>,
    #[serde(rename = "TwitterUrl", default, deserialize_with = "lenient")]
    pub twitter_url: Option<String>,
    #[serde(rename = "WebSite", default, deserialize_with = "lenient")]
    pub web_site: Option<String>,
    #[serde(rename = "NiconicoUrl", default, deserialize_with = "lenient")]
    pub niconico_url: Option<String>,
    #[serde(rename = "ClipstudioUrl", default, deserialize_with = "lenient")]
    pub clipstudio_url: Option<String>,
}

impl Circle {
    /// Stringified `Favorite.Color`, if set.
    pub fn favorite_color(&self) -> Option<String> {
        self.favorite
            .as_ref()
            .and_then(|f| f.color.as_ref())
            .map(Scalar::to_id_string)
    }

    /// True if either `Id` or `CircleId` equals `id`.
    pub fn matches_id(&self, id: i64) -> bool {
        self.id.as_ref().and_then(Scalar::as_int) == Some(id)
            || self.circle_id.as_ref().and_then(Scalar::as_int) == Some(id)
    }

    /// Look up a URL field by its model name.
    pub fn url_field(&self, field: &str) -> Option<&str> {
        let value = match field {
            "PixivUrl" => &self.pixiv_url,
            "TwitterUrl" => &self.twitter_url,
            "WebSite" => &self.web_site,
            "NiconicoUrl" => &self.niconico_url,
            "ClipstudioUrl" => &self.clipstudio_url,
            _ => return None,
        };
        value.as_deref()
    }
}

/// Parsed page model.
///
/// `circles[i]` is `None` when the i-th entry could not be decoded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Model {
    #[serde(rename = "Circles", default, deserialize_with = "lenient_circles")]
    pub circles: Vec<Option<Circle>>,
}

impl Model {
    /// Parse model text. Empty text is an empty model.
    pub fn parse(text: &str) -> Result<Self, ModelError> {
        let text = if text.trim().is_empty() { "{}" } else { text };
        let value: Value = serde_json::from_str(text)?;
        // A non-object root carries no circles.
        Ok(match value {
            Value::Object(_) => serde_json::from_value(value)?,
            _ => Model::default(),
        })
    }

    /// Circle at `index`, if present and well formed.
    pub fn circle(&self, index: usize) -> Option<&Circle> {
        self.circles.get(index).and_then(Option::as_ref)
    }

    /// First circle whose `Id` or `CircleId` equals `id`.
    pub fn circle_by_id(&self, id: i64) -> Option<&Circle> {
        self.circles.iter().flatten().find(|c| c.matches_id(id))
    }

    /// Authoritative favorite color for the item at `index`.
    pub fn favorite_color(&self, index: usize) -> Option<String> {
        self.circle(index).and_then(Circle::favorite_color)
    }
}

/// Read and parse the page's model element.
pub fn try_read_model<P: Page>(page: &P) -> Result<Model, ModelError> {
    let text = page
        .text_by_id(MODEL_ELEMENT_ID)
        .ok_or(ModelError::Missing(MODEL_ELEMENT_ID))?;
    Model::parse(&text)
}

/// Read the page model, degrading to `None` on any failure.
pub fn read_model<P: Page>(page: &P) -> Option<Model> {
    match try_read_model(page) {
        Ok(model) => Some(model),
        Err(e) => {
            log::debug!("model unavailable: {e}");
            None
        }
    }
}

// =============================================================================
// Lenient Deserializers
// =============================================================================

/// Decode a field, mapping any shape mismatch to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_circles<'de, D>(deserializer: D) -> Result<Vec<Option<Circle>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(_) => serde_json::from_value(item).ok(),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePage;

    #[test]
    fn test_parse_colors() {
        let model = Model::parse(
            r#"{"Circles":[{"Favorite":{"Color":5}},{"Favorite":{"Color":null}},{"Favorite":{"Color":"3"}},{}]}"#,
        )
        .unwrap();
        assert_eq!(model.circles.len(), 4);
        assert_eq!(model.favorite_color(0).as_deref(), Some("5"));
        assert_eq!(model.favorite_color(1), None);
        assert_eq!(model.favorite_color(2).as_deref(), Some("3"));
        assert_eq!(model.favorite_color(3), None);
        assert_eq!(model.favorite_color(99), None);
    }

    #[test]
    fn test_integral_float_prints_as_integer() {
        let model = Model::parse(r#"{"Circles":[{"Favorite":{"Color":7.0}}]}"#).unwrap();
        assert_eq!(model.favorite_color(0).as_deref(), Some("7"));
    }

    #[test]
    fn test_out_of_range_float_does_not_saturate() {
        let model = Model::parse(r#"{"Circles":[{"Id":1e20,"Favorite":{"Color":-1e19}}]}"#).unwrap();
        let circle = model.circle(0).unwrap();
        let id = circle.id.as_ref().unwrap();
        assert_eq!(id.as_int(), None);
        assert_eq!(id.to_id_string(), "100000000000000000000");
        assert_eq!(model.favorite_color(0).as_deref(), Some("-10000000000000000000"));
        assert!(!circle.matches_id(i64::MAX));
    }

    #[test]
    fn test_malformed_entry_is_isolated() {
        let model = Model::parse(
            r#"{"Circles":[42,{"Favorite":"oops"},{"Favorite":{"Color":true}},{"Favorite":{"Color":2}}]}"#,
        )
        .unwrap();
        assert!(model.circle(0).is_none());
        assert_eq!(model.favorite_color(1), None);
        assert_eq!(model.favorite_color(2), None);
        assert_eq!(model.favorite_color(3).as_deref(), Some("2"));
    }

    #[test]
    fn test_missing_or_odd_circles() {
        assert!(Model::parse("{}").unwrap().circles.is_empty());
        assert!(Model::parse(r#"{"Circles":"nope"}"#).unwrap().circles.is_empty());
        assert!(Model::parse("").unwrap().circles.is_empty());
        assert!(Model::parse("[1,2]").unwrap().circles.is_empty());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(Model::parse("{not json"), Err(ModelError::Malformed(_))));
    }

    #[test]
    fn test_circle_by_id() {
        let model = Model::parse(
            r#"{"Circles":[{"Id":10,"PixivUrl":"https://p/1"},{"CircleId":20,"TwitterUrl":"https://t/2"},{"Id":"30"}]}"#,
        )
        .unwrap();
        assert_eq!(model.circle_by_id(10).and_then(|c| c.url_field("PixivUrl")), Some("https://p/1"));
        assert_eq!(model.circle_by_id(20).and_then(|c| c.url_field("TwitterUrl")), Some("https://t/2"));
        assert!(model.circle_by_id(30).is_none());
        assert!(model.circle_by_id(40).is_none());
    }

    #[test]
    fn test_read_model_from_page() {
        let page = FakePage::new();
        assert!(read_model(&page).is_none());
        assert!(matches!(try_read_model(&page), Err(ModelError::Missing(_))));

        page.set_text(MODEL_ELEMENT_ID, "garbage");
        assert!(read_model(&page).is_none());

        page.set_text(MODEL_ELEMENT_ID, r#"{"Circles":[{"Favorite":{"Color":1}}]}"#);
        let model = read_model(&page).unwrap();
        assert_eq!(model.favorite_color(0).as_deref(), Some("1"));
    }
}

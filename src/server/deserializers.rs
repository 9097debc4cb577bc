use serde::{Deserialize, Deserializer};

// web client sends ids either as JSON numbers or as strings taken from object keys
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "NumberOrString")]
pub struct LenientId(pub i64);

impl TryFrom<NumberOrString> for LenientId {
    type Error = String;

    fn try_from(value: NumberOrString) -> Result<Self, Self::Error> {
        match value {
            NumberOrString::Number(v) => Ok(LenientId(v)),
            NumberOrString::Text(text) => match text.trim().parse::<i64>() {
                Ok(v) => Ok(LenientId(v)),
                Err(_) => Err(format!("Wrong value {text}, can not parse to i64")),
            },
        }
    }
}

// category column is text, so numbers are stored by their decimal form
pub fn deserialize_option_string_from_number<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::Text(text) => text,
    }))
}

pub fn first_page() -> i64 {
    1
}

// unparsable page numbers fall back to the first page instead of rejecting the request
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or_else(first_page))
}

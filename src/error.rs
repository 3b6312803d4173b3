use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while wiring the card into the page. Nothing past startup
/// produces an error; per-frame canvas failures are dropped.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("element #{0} is not a {1}")]
    WrongElement(String, &'static str),
    #[error("canvas #{0} has no 2d context")]
    NoContext(String),
    #[error("javascript error: {0}")]
    Js(String),
    #[cfg(feature = "serde_json")]
    #[error("invalid card config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for CardError {
    fn from(value: JsValue) -> Self {
        CardError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<CardError> for JsValue {
    fn from(err: CardError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type CardResult<T> = Result<T, CardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_element() {
        let e = CardError::MissingElement("cake-canvas".into());
        assert_eq!(e.to_string(), "element #cake-canvas not found");
        let e = CardError::WrongElement("card".into(), "canvas");
        assert_eq!(e.to_string(), "element #card is not a canvas");
    }
}

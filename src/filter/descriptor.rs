use serde::{Deserialize, Serialize};

/// A filter as submitted by the rendering layer: a method plus raw values.
///
/// Absent and empty values both denote the null sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub method: String,
    #[serde(default)]
    pub values: Vec<Option<String>>,
}

impl FilterDescriptor {
    pub fn new<I, V>(method: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            method: method.into(),
            values: values.into_iter().map(|v| Some(v.into())).collect(),
        }
    }

    /// Append the null sentinel
    pub fn with_null(mut self) -> Self {
        self.values.push(None);
        self
    }

    pub fn raw_values(&self) -> Vec<Option<&str>> {
        self.values.iter().map(|v| v.as_deref()).collect()
    }
}

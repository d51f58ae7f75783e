use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Complex {
    pub name: String,
    pub strands: Vec<String>,
    #[serde(default)]
    pub structure: String,
}

impl Complex {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        strands: impl IntoIterator<Item = S>,
        structure: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            strands: strands.into_iter().map(Into::into).collect(),
            structure: structure.into(),
        }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

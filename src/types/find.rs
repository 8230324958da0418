use serde::{Deserialize, Serialize};

/// Direction of an in-page text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindDirection {
    #[default]
    Forward,
    Backward,
}

/// A single request handed to the page view's text search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindQuery {
    pub text: String,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub direction: FindDirection,
}

/// What a key press inside the find input means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindKeyAction {
    Search(FindDirection),
    Close,
}

/// Find bar state as rendered by the chrome.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FindState {
    pub visible: bool,
    pub query: String,
    pub case_sensitive: bool,
    pub whole_word: bool,
}

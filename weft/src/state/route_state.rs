//! Route state record and the route label.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::channels::Merge;

/// Processing branch chosen by the router node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Answer straight from the question.
    #[default]
    Direct,
    /// Answer from retrieved context.
    Rag,
    /// Build a quiz with hints and grading criteria.
    Quiz,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Direct, Route::Rag, Route::Quiz];

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Direct => "direct",
            Route::Rag => "rag",
            Route::Quiz => "quiz",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized route label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route: {0}")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(Route::Direct),
            "rag" => Ok(Route::Rag),
            "quiz" => Ok(Route::Quiz),
            other => Err(UnknownRoute(other.to_string())),
        }
    }
}

/// State for the route graph: router → one answer node → END.
///
/// All fields are optional. `question` is set once at entry; the router adds
/// `route`; the chosen answer node adds `answer`; `meta` is carried untouched.
/// Nodes return a `RouteState` holding only their outputs, and
/// [`Merge`] folds it over the running state, so no field is ever removed.
///
/// **Interaction**: `StateGraph<RouteState>` with `MergeUpdater`; built by
/// `RouteRunner`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// Unknown labels deserialize to `None`, which the edge selector treats as direct.
    #[serde(
        default,
        deserialize_with = "lenient_route",
        skip_serializing_if = "Option::is_none"
    )]
    pub route: Option<Route>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

fn lenient_route<'de, D>(deserializer: D) -> Result<Option<Route>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

impl RouteState {
    /// Schema version of this record.
    pub const VERSION: u32 = 1;

    /// Fresh state seeded with the question only.
    pub fn with_question(question: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            ..Default::default()
        }
    }

    /// The question, or `""` when not set.
    pub fn question(&self) -> &str {
        self.question.as_deref().unwrap_or_default()
    }

    /// The answer, or `""` when not set.
    pub fn answer(&self) -> &str {
        self.answer.as_deref().unwrap_or_default()
    }

    /// Update carrying only a route.
    pub fn route_update(route: Route) -> Self {
        Self {
            route: Some(route),
            ..Default::default()
        }
    }

    /// Update carrying only an answer.
    pub fn answer_update(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            ..Default::default()
        }
    }
}

impl Merge for RouteState {
    fn merge(&mut self, update: &Self) {
        if update.question.is_some() {
            self.question = update.question.clone();
        }
        if update.route.is_some() {
            self.route = update.route;
        }
        if update.answer.is_some() {
            self.answer = update.answer.clone();
        }
        self.meta
            .extend(update.meta.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

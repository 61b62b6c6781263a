use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, EnumVariantNames};

use super::{Course, CourseField};
use crate::errors::MenuError;

/// Monotonic identity of one generator invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvocationId(pub u64);

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Controller phases of a single invocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Fetching,
    Rendering,
    Rejected,
    Failed,
}

/// How the recipe and playlist requests are issued.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Display,
    EnumString,
    EnumVariantNames,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum FetchStrategy {
    /// Recipes first; the playlist is requested only once they have arrived.
    #[default]
    Sequential,
    /// Both requests in flight at once, joined before rendering.
    Concurrent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDiagnostic {
    UnknownCourse(String),
    MissingCourse(Course),
    MissingField(Course, CourseField),
}

impl fmt::Display for RenderDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderDiagnostic::UnknownCourse(raw) => write!(f, "Unknown course '{raw}'"),
            RenderDiagnostic::MissingCourse(course) => {
                write!(f, "{} could not be found", course.container_id())
            }
            RenderDiagnostic::MissingField(course, field) => {
                write!(f, "{} was not found", course.region_id(*field))
            }
        }
    }
}

/// What a render pass did. Diagnostics are non-fatal lookup misses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub rendered: Vec<Course>,
    pub diagnostics: Vec<RenderDiagnostic>,
}

impl RenderReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Rendered(RenderReport),
    Rejected,
    Failed(MenuError),
    /// A newer invocation started before this one could render.
    Superseded,
}

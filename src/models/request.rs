//! Request and response bodies for the analyst backend API.

use serde::{Deserialize, Serialize};

use super::chart::ChartSpec;

/// Step label shown when the backend generated a SQL query.
pub const STEP_SQL_GENERATED: &str = "SQL Generated";
/// Step label shown when the backend fetched data for the query.
pub const STEP_DATA_FETCHED: &str = "Data Fetched";
/// Step label shown when the backend produced a chart specification.
pub const STEP_CHART_RENDERED: &str = "Chart Rendered";
/// Step label shown when the backend drafted an email.
pub const STEP_DRAFT_CREATED: &str = "Draft Created";

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// The user's natural-language message
    pub message: String,
    /// Thread the message belongs to
    pub thread_id: String,
}

/// Body of `POST /approve`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApprovalRequest {
    /// Thread whose pending action is being decided
    pub thread_id: String,
    /// `true` to approve the action, `false` to reject it
    pub approved: bool,
}

/// Response body of `POST /chat`.
///
/// All structured fields are optional; the backend populates whichever of
/// its agents fired. Unknown extra fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    /// SQL query generated for the request, if any
    #[serde(default)]
    pub sql_query: Option<String>,
    /// Chart specification, if the chart agent produced one
    #[serde(default)]
    pub visualization_spec: Option<ChartSpec>,
    /// Draft email text, if the marketing agent produced one
    #[serde(default)]
    pub email_draft: Option<String>,
    /// Whether the backend paused awaiting human approval
    #[serde(default)]
    pub needs_approval: bool,
    /// Backend run status ("completed" or "paused"), informational only
    #[serde(default)]
    pub status: Option<String>,
    /// Whether data was actually fetched for the query.
    ///
    /// Older backends do not report this separately; when absent it is
    /// inferred from `sql_query` being present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_fetched: Option<bool>,
}

impl ChatResponse {
    /// Whether the SQL agent produced a query.
    pub fn sql_generated(&self) -> bool {
        self.sql_query.as_deref().is_some_and(|q| !q.is_empty())
    }

    /// Whether data was fetched from the warehouse.
    ///
    /// Honors the explicit `data_fetched` flag when the backend sends one;
    /// otherwise a generated query implies a fetch.
    pub fn data_fetched(&self) -> bool {
        self.data_fetched.unwrap_or_else(|| self.sql_generated())
    }

    /// Whether a chart specification is present.
    pub fn chart_rendered(&self) -> bool {
        self.visualization_spec.is_some()
    }

    /// Whether an email draft was created.
    pub fn draft_created(&self) -> bool {
        self.email_draft.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Step labels for the capabilities that fired, in fixed priority order.
    pub fn steps(&self) -> Vec<String> {
        let mut steps = Vec::new();
        if self.sql_generated() {
            steps.push(STEP_SQL_GENERATED.to_string());
        }
        if self.data_fetched() {
            steps.push(STEP_DATA_FETCHED.to_string());
        }
        if self.chart_rendered() {
            steps.push(STEP_CHART_RENDERED.to_string());
        }
        if self.draft_created() {
            steps.push(STEP_DRAFT_CREATED.to_string());
        }
        steps
    }
}

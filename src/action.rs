//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::state::WeatherSnapshot;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Search category =====
    /// City input text changed
    SearchQueryChange(String),

    /// Submit the city input (validates, then triggers the fetch task)
    SearchSubmit(String),

    // ===== Weather category =====
    /// Result: snapshot received for the given submission
    WeatherDidLoad {
        request_id: u64,
        snapshot: WeatherSnapshot,
    },

    /// Result: the given submission failed
    WeatherDidError { request_id: u64, error: QueryError },

    // ===== Uncategorized (global) =====
    /// Force a re-render (cursor movement)
    Render,

    /// Periodic tick for title and star animations
    Tick,

    /// Exit the application
    Quit,
}

//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::error::QueryError;
use crate::state::AppState;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Search actions =====
        Action::SearchQueryChange(query) => {
            if state.city_input == query {
                return DispatchResult::unchanged();
            }
            state.city_input = query;
            DispatchResult::changed()
        }

        Action::SearchSubmit(query) => {
            state.city_input = query;
            // Every submission supersedes whatever is still in flight
            state.request_id = state.request_id.wrapping_add(1);
            let city = state.city_input.trim().to_string();
            if city.is_empty() {
                fail(state, QueryError::EmptyInput);
                return DispatchResult::changed();
            }

            state.weather = DataResource::Loading;
            state.error_kind = None;
            state.tick_count = 0;
            DispatchResult::changed_with(Effect::FetchWeather {
                request_id: state.request_id,
                city,
            })
        }

        // ===== Weather actions =====
        Action::WeatherDidLoad {
            request_id,
            snapshot,
        } => {
            if request_id != state.request_id {
                tracing::debug!(request_id, latest = state.request_id, "dropping stale response");
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Loaded(snapshot);
            state.error_kind = None;
            DispatchResult::changed()
        }

        Action::WeatherDidError { request_id, error } => {
            if request_id != state.request_id {
                tracing::debug!(request_id, latest = state.request_id, "dropping stale response");
                return DispatchResult::unchanged();
            }
            fail(state, error);
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.anim_active() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Errors always replace any previous result
fn fail(state: &mut AppState, error: QueryError) {
    state.error_kind = Some(error.kind());
    state.weather = DataResource::Failed(error.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::state::{QueryStatus, WeatherSnapshot};

    fn snapshot(condition: &str) -> WeatherSnapshot {
        let mut snapshot = WeatherSnapshot::default();
        snapshot.location.name = "Oslo".into();
        snapshot.current.condition.text = condition.into();
        snapshot
    }

    #[test]
    fn test_blank_submit_fails_without_effect() {
        for input in ["", "   ", "\t\n"] {
            let mut state = AppState::default();
            let result = reducer(&mut state, Action::SearchSubmit(input.into()));

            assert!(result.changed);
            assert!(result.effects.is_empty());
            assert_eq!(state.status(), QueryStatus::Error);
            assert_eq!(state.error_message(), Some("Please enter a city name"));
            assert_eq!(state.error_kind, Some(ErrorKind::EmptyInput));
            assert_eq!(state.request_id, 1);
        }
    }

    #[test]
    fn test_blank_submit_supersedes_in_flight_request() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit("London".into()));
        reducer(&mut state, Action::SearchSubmit("  ".into()));
        assert_eq!(state.status(), QueryStatus::Error);

        let late = reducer(
            &mut state,
            Action::WeatherDidLoad {
                request_id: 1,
                snapshot: snapshot("Partly cloudy"),
            },
        );

        assert!(!late.changed);
        assert_eq!(state.status(), QueryStatus::Error);
        assert_eq!(state.error_message(), Some("Please enter a city name"));
        assert!(state.result().is_none());
    }

    #[test]
    fn test_submit_sets_loading_and_emits_trimmed_city() {
        let mut state = AppState {
            tick_count: 9,
            ..Default::default()
        };

        let result = reducer(&mut state, Action::SearchSubmit("  New York ".into()));

        assert!(result.changed);
        assert!(state.weather.is_loading());
        assert_eq!(state.city_input, "  New York ");
        assert_eq!(state.tick_count, 0);
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                request_id: 1,
                city: "New York".into(),
            }]
        );
    }

    #[test]
    fn test_submit_clears_previous_error() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit(String::new()));
        assert!(state.weather.is_failed());

        reducer(&mut state, Action::SearchSubmit("Paris".into()));
        assert!(state.weather.is_loading());
        assert_eq!(state.error_kind, None);
        assert!(state.error_message().is_none());
    }

    #[test]
    fn test_did_load_stores_snapshot() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit("Oslo".into()));

        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                request_id: 1,
                snapshot: snapshot("Sunny"),
            },
        );

        assert!(result.changed);
        assert_eq!(state.status(), QueryStatus::Success);
        assert_eq!(state.result(), Some(&snapshot("Sunny")));
    }

    #[test]
    fn test_did_error_clears_result() {
        let mut state = AppState {
            weather: DataResource::Loaded(snapshot("Sunny")),
            request_id: 3,
            ..Default::default()
        };

        reducer(
            &mut state,
            Action::WeatherDidError {
                request_id: 3,
                error: QueryError::NotFound,
            },
        );

        assert_eq!(state.status(), QueryStatus::Error);
        assert!(state.result().is_none());
        assert_eq!(state.error_message(), Some("City not found"));
        assert_eq!(state.error_kind, Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit("Rome".into()));
        reducer(&mut state, Action::SearchSubmit("Lima".into()));
        assert_eq!(state.request_id, 2);

        let stale = reducer(
            &mut state,
            Action::WeatherDidLoad {
                request_id: 1,
                snapshot: snapshot("Clear"),
            },
        );
        assert!(!stale.changed);
        assert!(state.weather.is_loading());

        let stale_error = reducer(
            &mut state,
            Action::WeatherDidError {
                request_id: 1,
                error: QueryError::NotFound,
            },
        );
        assert!(!stale_error.changed);
        assert!(state.weather.is_loading());

        reducer(
            &mut state,
            Action::WeatherDidLoad {
                request_id: 2,
                snapshot: snapshot("Mist"),
            },
        );
        assert_eq!(state.result().map(|s| s.current.condition.text.as_str()), Some("Mist"));
    }

    #[test]
    fn test_query_change_tracks_input() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::SearchQueryChange("Lo".into()));
        assert!(result.changed);
        assert_eq!(state.city_input, "Lo");

        let result = reducer(&mut state, Action::SearchQueryChange("Lo".into()));
        assert!(!result.changed);
    }

    #[test]
    fn test_tick_only_rerenders_while_animating() {
        let mut state = AppState::default();

        // Idle: stars twinkle
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 1);

        state.weather = DataResource::Loaded(snapshot("Overcast"));
        assert!(!reducer(&mut state, Action::Tick).changed);

        state.weather = DataResource::Loading;
        assert!(reducer(&mut state, Action::Tick).changed);
    }
}

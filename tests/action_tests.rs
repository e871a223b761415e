//! Action and reducer tests using EffectStore

mod common;

use tui_dispatch::{EffectStore, assert_emitted, assert_not_emitted};
use weather_watch::{
    action::Action,
    effect::Effect,
    error::{ErrorKind, QueryError},
    reducer::reducer,
    state::{AppState, QueryStatus},
};

#[test]
fn test_submit_emits_single_fetch() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    assert_eq!(store.state().status(), QueryStatus::Idle);

    let result = store.dispatch(Action::SearchSubmit("London".into()));
    assert!(result.changed, "State should change");
    assert_eq!(store.state().status(), QueryStatus::Loading);
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(
        &result.effects[0],
        Effect::FetchWeather { request_id: 1, city } if city == "London"
    ));
}

#[test]
fn test_blank_submits_never_fetch() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    for input in ["", "   "] {
        let result = store.dispatch(Action::SearchSubmit(input.into()));
        assert!(result.effects.is_empty());
        assert_eq!(store.state().status(), QueryStatus::Error);
        assert_eq!(
            store.state().error_message(),
            Some("Please enter a city name")
        );
    }
}

#[test]
fn test_load_then_not_found() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::SearchSubmit("London".into()));
    store.dispatch(Action::WeatherDidLoad {
        request_id: 1,
        snapshot: common::london(),
    });
    assert_eq!(store.state().result(), Some(&common::london()));

    store.dispatch(Action::SearchSubmit("Atlantis".into()));
    assert!(store.state().result().is_none());
    store.dispatch(Action::WeatherDidError {
        request_id: 2,
        error: QueryError::NotFound,
    });

    assert_eq!(store.state().status(), QueryStatus::Error);
    assert_eq!(store.state().error_message(), Some("City not found"));
    assert_eq!(store.state().error_kind, Some(ErrorKind::NotFound));
    assert!(store.state().result().is_none());
}

#[test]
fn test_transport_error_keeps_description() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::SearchSubmit("Quito".into()));
    store.dispatch(Action::WeatherDidError {
        request_id: 1,
        error: QueryError::transport("error sending request"),
    });

    assert_eq!(store.state().error_message(), Some("error sending request"));
    assert_eq!(store.state().error_kind, Some(ErrorKind::Transport));
}

#[test]
fn test_action_categories() {
    let did_load = Action::WeatherDidLoad {
        request_id: 1,
        snapshot: common::london(),
    };
    let tick = Action::Tick;

    assert_eq!(did_load.category(), Some("weather_did"));
    assert!(did_load.is_weather_did());
    assert_eq!(tick.category(), None);
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::SearchSubmit("Oslo".into()),
        Action::WeatherDidError {
            request_id: 1,
            error: QueryError::NotFound,
        },
    ];

    assert_emitted!(actions, Action::SearchSubmit(_));
    assert_emitted!(actions, Action::WeatherDidError { .. });
    assert_not_emitted!(actions, Action::WeatherDidLoad { .. });
    assert_not_emitted!(actions, Action::Quit);
}

//! Weather Watch - terminal dashboard binary

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_watch::action::Action;
use weather_watch::api::WeatherClient;
use weather_watch::components::{Component, Dashboard, DashboardProps};
use weather_watch::config::{Config, ConfigArgs};
use weather_watch::effect::Effect;
use weather_watch::logging;
use weather_watch::reducer::reducer;
use weather_watch::state::{ANIM_TICK_MS, AppState};

/// Weather Watch - current conditions for any city
#[derive(Parser, Debug)]
#[command(name = "weather-watch")]
#[command(about = "Get real-time weather information for any city")]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum WatchComponentId {
    Dashboard,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum WatchContext {
    Main,
}

impl EventRoutingState<WatchComponentId, WatchContext> for AppState {
    fn focused(&self) -> Option<WatchComponentId> {
        Some(WatchComponentId::Dashboard)
    }

    fn modal(&self) -> Option<WatchComponentId> {
        None
    }

    fn binding_context(&self, _id: WatchComponentId) -> WatchContext {
        WatchContext::Main
    }

    fn default_context(&self) -> WatchContext {
        WatchContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        config: config_args,
        debug: debug_args,
    } = Args::parse();

    let config = Config::load(config_args).map_err(io::Error::other)?;
    if let Some(path) = &config.log_file {
        logging::init_file_logging(path, &config.log_level)?;
    }
    tracing::info!(base_url = %config.base_url, clock = ?config.clock, "starting weather-watch");

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let clock = config.clock;
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(clock))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let client = WeatherClient::new(config.base_url.clone(), config.api_key.clone());
    let initial_action = config.default_city.clone().map(Action::SearchSubmit);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        client,
        initial_action,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("weather-watch exited");
    Ok(())
}

struct WatchUi {
    dashboard: Dashboard,
}

impl WatchUi {
    fn new() -> Self {
        Self {
            dashboard: Dashboard::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<WatchComponentId>,
    ) {
        event_ctx.set_component_area(WatchComponentId::Dashboard, area);

        let props = DashboardProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.dashboard.render(frame, area, props);
    }

    fn handle_dashboard_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .dashboard
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: WeatherClient,
    initial_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(WatchUi::new()));
    let mut bus: EventBus<AppState, Action, WatchComponentId, WatchContext> = EventBus::new();
    let keybindings: Keybindings<WatchContext> = Keybindings::new();

    let ui_dashboard = Rc::clone(&ui);
    bus.register(WatchComponentId::Dashboard, move |event, state| {
        ui_dashboard
            .borrow_mut()
            .handle_dashboard_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            initial_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: &WeatherClient) {
    match effect {
        Effect::FetchWeather { request_id, city } => {
            let client = client.clone();
            // Reusing the key replaces any request still in flight
            ctx.tasks().spawn("weather", async move {
                match client.fetch_current(&city).await {
                    Ok(snapshot) => {
                        tracing::info!(request_id, city = %city, "weather loaded");
                        Action::WeatherDidLoad {
                            request_id,
                            snapshot,
                        }
                    }
                    Err(error) => {
                        tracing::info!(request_id, city = %city, %error, "weather query failed");
                        Action::WeatherDidError { request_id, error }
                    }
                }
            });
        }
    }
}

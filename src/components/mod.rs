pub mod dashboard;
pub mod search_bar;
pub mod theme;
pub mod weather_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use dashboard::{Dashboard, DashboardProps, ERROR_ICON};
pub use search_bar::{SearchBar, SearchBarProps};
pub use weather_panel::{WeatherPanel, WeatherPanelProps};

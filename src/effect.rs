//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current conditions for `city`, tagged with the submission id
    FetchWeather { request_id: u64, city: String },
}

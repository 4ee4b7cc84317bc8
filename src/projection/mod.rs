// src/projection/mod.rs
//! Pure functions from the stored result to the view model of each screen.
//! None of them fail: a missing section degrades the view, a missing result
//! yields [`Projection::NoData`].
pub mod bounds;
pub mod comparison;
pub mod costs;
pub mod dashboard;
pub mod validation;

pub const NO_DATA_MESSAGE: &str =
    "Ejecuta el análisis primero: escribe o carga tu pseudocódigo en el Validador y pulsa ANALIZAR.";

#[derive(Debug, Clone, PartialEq)]
pub enum Projection<T> {
    /// No analysis has been run in this session.
    NoData,
    Ready(T),
}

impl<T> Projection<T> {
    #[cfg(test)]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Projection::NoData)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Projection::NoData => None,
            Projection::Ready(view) => Some(view),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Projection<U> {
        match self {
            Projection::NoData => Projection::NoData,
            Projection::Ready(view) => Projection::Ready(f(view)),
        }
    }
}

impl<T> From<Option<T>> for Projection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Projection::NoData, Projection::Ready)
    }
}

/// Colour family a value should be shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Danger,
    Neutral,
}

impl Tone {
    /// Thresholds used for confidence badges.
    pub fn for_confidence(confidence: f64) -> Tone {
        if confidence >= 0.9 {
            Tone::Success
        } else if confidence >= 0.7 {
            Tone::Warning
        } else {
            Tone::Danger
        }
    }

    /// Looser thresholds for classifier probabilities.
    pub fn for_probability(probability: f64) -> Tone {
        if probability >= 0.7 {
            Tone::Success
        } else if probability >= 0.4 {
            Tone::Warning
        } else {
            Tone::Danger
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::session::SessionStore;

    #[test]
    fn test_option_conversion() {
        assert_eq!(Projection::<u8>::from(None), Projection::NoData);
        assert_eq!(Projection::from(Some(3)).map(|n| n * 2), Projection::Ready(6));
    }

    #[test]
    fn test_tones() {
        assert_eq!(Tone::for_confidence(0.95), Tone::Success);
        assert_eq!(Tone::for_confidence(0.7), Tone::Warning);
        assert_eq!(Tone::for_confidence(0.69), Tone::Danger);
        assert_eq!(Tone::for_probability(0.87), Tone::Success);
        assert_eq!(Tone::for_probability(0.4), Tone::Warning);
        assert_eq!(Tone::for_probability(0.05), Tone::Danger);
    }

    #[test]
    fn test_clear_sends_every_screen_back_to_no_data() {
        let store = SessionStore::new();
        let result = serde_json::from_value(crate::api::mock::linear_search_result()).unwrap();
        store.set_result(Some(result));

        let snapshot = store.result();
        assert!(!validation::project(snapshot.as_deref()).is_no_data());
        assert!(!costs::project(snapshot.as_deref()).is_no_data());
        assert!(!bounds::project(snapshot.as_deref()).is_no_data());
        assert!(!dashboard::project(snapshot.as_deref()).is_no_data());

        store.clear();

        let snapshot = store.result();
        assert!(validation::project(snapshot.as_deref()).is_no_data());
        assert!(costs::project(snapshot.as_deref()).is_no_data());
        assert!(bounds::project(snapshot.as_deref()).is_no_data());
        assert!(dashboard::project(snapshot.as_deref()).is_no_data());
    }
}

// src/utils.rs

/// `busqueda_lineal` -> `busqueda lineal`
pub fn humanize(key: &str) -> String {
    key.replace('_', " ")
}

/// Probability in [0, 1] as a percentage with one decimal, e.g. `87.0%`.
pub fn format_percentage(probability: f64) -> String {
    let clamped = if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    };
    format!("{:.1}%", clamped * 100.0)
}

/// `O(n log n)` -> `nlogn`, used to compare bounds written with different
/// notations.
pub fn strip_notation(class: &str) -> String {
    class
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, 'O' | 'Ω' | 'Θ'))
        .collect()
}

//! Metric specs - label patterns and numeric coercion per metric

use regex::Regex;

use crate::experiment::{Metric, NumericKind};
use crate::Result;

/// Numeric literal as printed by C++ stream output: optional sign, digits
/// with optional fraction, optional exponent.
const NUMBER: &str = r"([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)";

/// Label pattern of a metric.
///
/// Accepts the accented spelling printed by the batch simulators and the
/// accent-stripped one printed by the single-run NB-IoT simulator
/// (`Atraso Medio(s)`, `Distancia: 3000m`).
#[must_use]
pub const fn label_pattern(metric: Metric) -> &'static str {
    match metric {
        Metric::Execucao => r"Execu(?:ç|c)(?:ã|a)o",
        Metric::Distancia => r"Dist(?:â|a)ncia(?:\s*\(m\))?",
        Metric::Dispositivos => r"Dispositivos",
        Metric::PacotesEnviados => r"Pacotes\s+Enviados",
        Metric::PacotesRecebidos => r"Pacotes\s+Recebidos",
        Metric::PacotesDuplicados => r"Pacotes\s+Duplicados",
        Metric::Pdr => r"PDR\s*\(%\)",
        Metric::Plr => r"PLR\s*\(%\)",
        Metric::Retransmissao => r"Retransmiss(?:ã|a)o\s*\(%\)",
        Metric::Vazao => r"Vaz(?:ã|a)o\s*\(bps\)",
        Metric::Utilizacao => r"Utiliza(?:ç|c)(?:ã|a)o\s+do\s+Canal\s*\(%\)",
        Metric::Atraso => r"Atraso\s+M(?:é|e)dio\s*\(s\)",
        Metric::Banda => r"Banda\s+Utilizada\s*\(kHz\)",
        Metric::Energia => r"Consumo\s+(?:de\s+)?Energia\s*\(J\)",
    }
}

/// A named field with its extraction pattern and coercion rule.
#[derive(Debug, Clone)]
pub struct MetricSpec {
    metric: Metric,
    pattern: Regex,
}

impl MetricSpec {
    /// Build the spec for `metric` from its default label pattern.
    ///
    /// # Errors
    ///
    /// Returns error if the pattern fails to compile
    pub fn new(metric: Metric) -> Result<Self> {
        Self::with_label(metric, label_pattern(metric))
    }

    /// Build a spec from a custom label pattern (a regex matching the label
    /// text before the `:`).
    ///
    /// # Errors
    ///
    /// Returns error if the pattern fails to compile
    pub fn with_label(metric: Metric, label: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(r"\b{label}[ \t]*:[ \t]*{NUMBER}"))?;
        Ok(Self { metric, pattern })
    }

    /// The full default table, in column order.
    ///
    /// # Errors
    ///
    /// Returns error if a pattern fails to compile
    pub fn default_table() -> Result<Vec<Self>> {
        Metric::ALL.into_iter().map(Self::new).collect()
    }

    /// Metric this spec extracts.
    #[must_use]
    pub const fn metric(&self) -> Metric {
        self.metric
    }

    /// Text of the first capture group of the first match, if any.
    #[must_use]
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    }

    /// Coerce captured text according to the metric's numeric kind.
    ///
    /// `None` means coercion failed; the caller applies the zero default.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coerce(&self, raw: &str) -> Option<Coerced> {
        let raw = raw.trim();
        match self.metric.kind() {
            NumericKind::Integer => raw.parse::<u64>().ok().map(Coerced::Count),
            NumericKind::Float => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Coerced::Real),
        }
    }
}

/// A successfully coerced value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    /// Integer metric value
    Count(u64),
    /// Real metric value
    Real(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_covers_every_metric() {
        let table = MetricSpec::default_table().unwrap();
        let metrics: Vec<Metric> = table.iter().map(MetricSpec::metric).collect();
        assert_eq!(metrics, Metric::ALL.to_vec());
    }

    #[test]
    fn test_capture_accented_and_plain_labels() {
        let spec = MetricSpec::new(Metric::Atraso).unwrap();
        assert_eq!(spec.capture("Atraso Médio (s): 0.125"), Some("0.125"));
        assert_eq!(spec.capture("Atraso Medio(s): 2.5e-03"), Some("2.5e-03"));
        assert_eq!(spec.capture("Vazão (bps): 12"), None);
    }

    #[test]
    fn test_coerce_integer_rejects_fraction() {
        let spec = MetricSpec::new(Metric::PacotesEnviados).unwrap();
        assert_eq!(spec.coerce(" 42 "), Some(Coerced::Count(42)));
        assert_eq!(spec.coerce("42.5"), None);
        assert_eq!(spec.coerce("-1"), None);
    }

    #[test]
    fn test_coerce_float_keeps_precision() {
        let spec = MetricSpec::new(Metric::Pdr).unwrap();
        assert_eq!(spec.coerce("87.123456789"), Some(Coerced::Real(87.123_456_789)));
        assert_eq!(spec.coerce("1e999"), None);
    }

    #[test]
    fn test_distance_unit_suffix() {
        let spec = MetricSpec::new(Metric::Distancia).unwrap();
        assert_eq!(spec.capture("Distancia: 3000m"), Some("3000"));
        assert_eq!(spec.capture("Distância (m): 10000"), Some("10000"));
    }
}

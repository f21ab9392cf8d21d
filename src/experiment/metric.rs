//! Metric - the fixed set of labelled fields printed by the simulators

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric coercion rule of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericKind {
    /// Base-10 integer (counters, indices)
    Integer,
    /// Floating point (percentages, rates, physical quantities)
    Float,
}

/// Whether larger or smaller values of a metric are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Higher is better (PDR, throughput)
    Maximize,
    /// Lower is better (energy, delay)
    Minimize,
}

impl Direction {
    /// Natural direction of a metric.
    #[must_use]
    pub const fn for_metric(metric: Metric) -> Self {
        match metric {
            Metric::Plr | Metric::Retransmissao | Metric::Atraso | Metric::Energia => {
                Self::Minimize
            }
            _ => Self::Maximize,
        }
    }
}

/// One of the 14 labelled fields of a trial result.
///
/// The declaration order is the column order of every exported table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Execution index of the trial
    Execucao,
    /// Gateway distance (m)
    Distancia,
    /// Device count
    Dispositivos,
    /// Packets sent
    PacotesEnviados,
    /// Packets received
    PacotesRecebidos,
    /// Packets duplicated
    PacotesDuplicados,
    /// Packet delivery ratio (%)
    Pdr,
    /// Packet loss ratio (%)
    Plr,
    /// Retransmission rate (%)
    Retransmissao,
    /// Throughput (bps)
    Vazao,
    /// Channel utilization (%)
    Utilizacao,
    /// Mean delay (s)
    Atraso,
    /// Bandwidth used (kHz)
    Banda,
    /// Energy consumption (J)
    Energia,
}

impl Metric {
    /// All metrics in column order.
    pub const ALL: [Self; 14] = [
        Self::Execucao,
        Self::Distancia,
        Self::Dispositivos,
        Self::PacotesEnviados,
        Self::PacotesRecebidos,
        Self::PacotesDuplicados,
        Self::Pdr,
        Self::Plr,
        Self::Retransmissao,
        Self::Vazao,
        Self::Utilizacao,
        Self::Atraso,
        Self::Banda,
        Self::Energia,
    ];

    /// Short snake-case key (`pdr`, `vazao`, ...), used on the CLI and in JSON.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Execucao => "execucao",
            Self::Distancia => "distancia",
            Self::Dispositivos => "dispositivos",
            Self::PacotesEnviados => "pacotes_enviados",
            Self::PacotesRecebidos => "pacotes_recebidos",
            Self::PacotesDuplicados => "pacotes_duplicados",
            Self::Pdr => "pdr",
            Self::Plr => "plr",
            Self::Retransmissao => "retransmissao",
            Self::Vazao => "vazao",
            Self::Utilizacao => "utilizacao",
            Self::Atraso => "atraso",
            Self::Banda => "banda",
            Self::Energia => "energia",
        }
    }

    /// Label as printed by the simulators and used as table header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Execucao => "Execução",
            Self::Distancia => "Distância (m)",
            Self::Dispositivos => "Dispositivos",
            Self::PacotesEnviados => "Pacotes Enviados",
            Self::PacotesRecebidos => "Pacotes Recebidos",
            Self::PacotesDuplicados => "Pacotes Duplicados",
            Self::Pdr => "PDR (%)",
            Self::Plr => "PLR (%)",
            Self::Retransmissao => "Retransmissão (%)",
            Self::Vazao => "Vazão (bps)",
            Self::Utilizacao => "Utilização do Canal (%)",
            Self::Atraso => "Atraso Médio (s)",
            Self::Banda => "Banda Utilizada (kHz)",
            Self::Energia => "Consumo Energia (J)",
        }
    }

    /// Coercion rule for the captured text.
    #[must_use]
    pub const fn kind(self) -> NumericKind {
        match self {
            Self::Execucao
            | Self::Dispositivos
            | Self::PacotesEnviados
            | Self::PacotesRecebidos
            | Self::PacotesDuplicados => NumericKind::Integer,
            _ => NumericKind::Float,
        }
    }

    /// Look up a metric by its key or label.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(key) || m.label() == key)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_table_is_complete_and_ordered() {
        assert_eq!(Metric::ALL.len(), 14);
        for pair in Metric::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Metric::PacotesEnviados.kind(), NumericKind::Integer);
        assert_eq!(Metric::Distancia.kind(), NumericKind::Float);
        assert_eq!(Metric::Pdr.kind(), NumericKind::Float);
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Metric::from_key("vazao"), Some(Metric::Vazao));
        assert_eq!(Metric::from_key("PDR"), Some(Metric::Pdr));
        assert_eq!(Metric::from_key("Consumo Energia (J)"), Some(Metric::Energia));
        assert_eq!(Metric::from_key("rssi"), None);
    }

    #[test]
    fn test_direction() {
        assert_eq!(Direction::for_metric(Metric::Pdr), Direction::Maximize);
        assert_eq!(Direction::for_metric(Metric::Vazao), Direction::Maximize);
        assert_eq!(Direction::for_metric(Metric::Energia), Direction::Minimize);
        assert_eq!(Direction::for_metric(Metric::Atraso), Direction::Minimize);
    }
}

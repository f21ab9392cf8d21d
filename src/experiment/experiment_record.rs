//! Experiment Record - one executed trial

use serde::{Deserialize, Serialize};

use super::{Metric, NumericKind, Technology};

/// Experiment Record represents one executed trial.
///
/// Every metric of [`Metric::ALL`] is a named field, so a record can never
/// be missing a column. Fields the extractor could not parse hold zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ExperimentRecord {
    /// Technology the trial was run with
    pub technology: Technology,
    /// Execution index
    pub execucao: u64,
    /// Distance to the gateway (m)
    pub distancia: f64,
    /// Device count
    pub dispositivos: u64,
    /// Packets sent
    pub pacotes_enviados: u64,
    /// Packets received
    pub pacotes_recebidos: u64,
    /// Packets duplicated
    pub pacotes_duplicados: u64,
    /// Packet delivery ratio (%)
    pub pdr: f64,
    /// Packet loss ratio (%)
    pub plr: f64,
    /// Retransmission rate (%)
    pub retransmissao: f64,
    /// Throughput (bps)
    pub vazao: f64,
    /// Channel utilization (%)
    pub utilizacao: f64,
    /// Mean delay (s)
    pub atraso: f64,
    /// Bandwidth used (kHz)
    pub banda: f64,
    /// Energy consumption (J)
    pub energia: f64,
}

impl ExperimentRecord {
    /// Create a record with every metric at its zero default.
    #[must_use]
    pub const fn zeroed(technology: Technology) -> Self {
        Self {
            technology,
            execucao: 0,
            distancia: 0.0,
            dispositivos: 0,
            pacotes_enviados: 0,
            pacotes_recebidos: 0,
            pacotes_duplicados: 0,
            pdr: 0.0,
            plr: 0.0,
            retransmissao: 0.0,
            vazao: 0.0,
            utilizacao: 0.0,
            atraso: 0.0,
            banda: 0.0,
            energia: 0.0,
        }
    }

    /// Create a builder starting from a zeroed record.
    #[must_use]
    pub const fn builder(technology: Technology) -> ExperimentRecordBuilder {
        ExperimentRecordBuilder::new(technology)
    }

    /// Read any metric as `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Execucao => self.execucao as f64,
            Metric::Distancia => self.distancia,
            Metric::Dispositivos => self.dispositivos as f64,
            Metric::PacotesEnviados => self.pacotes_enviados as f64,
            Metric::PacotesRecebidos => self.pacotes_recebidos as f64,
            Metric::PacotesDuplicados => self.pacotes_duplicados as f64,
            Metric::Pdr => self.pdr,
            Metric::Plr => self.plr,
            Metric::Retransmissao => self.retransmissao,
            Metric::Vazao => self.vazao,
            Metric::Utilizacao => self.utilizacao,
            Metric::Atraso => self.atraso,
            Metric::Banda => self.banda,
            Metric::Energia => self.energia,
        }
    }

    /// Set an integer-valued metric. Float metrics store the count as `f64`.
    #[allow(clippy::cast_precision_loss)]
    pub fn set_count(&mut self, metric: Metric, count: u64) {
        match metric {
            Metric::Execucao => self.execucao = count,
            Metric::Dispositivos => self.dispositivos = count,
            Metric::PacotesEnviados => self.pacotes_enviados = count,
            Metric::PacotesRecebidos => self.pacotes_recebidos = count,
            Metric::PacotesDuplicados => self.pacotes_duplicados = count,
            other => self.set_real(other, count as f64),
        }
    }

    /// Set a real-valued metric.
    ///
    /// Integer metrics accept only non-negative whole numbers; anything else
    /// resolves to the zero default.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_real(&mut self, metric: Metric, value: f64) {
        if metric.kind() == NumericKind::Integer {
            let count = if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
                value as u64
            } else {
                0
            };
            self.set_count(metric, count);
            return;
        }
        match metric {
            Metric::Distancia => self.distancia = value,
            Metric::Pdr => self.pdr = value,
            Metric::Plr => self.plr = value,
            Metric::Retransmissao => self.retransmissao = value,
            Metric::Vazao => self.vazao = value,
            Metric::Utilizacao => self.utilizacao = value,
            Metric::Atraso => self.atraso = value,
            Metric::Banda => self.banda = value,
            Metric::Energia => self.energia = value,
            // Integer metrics handled above
            _ => {}
        }
    }

    /// Whether every metric still holds its zero default.
    #[must_use]
    pub fn is_zero_filled(&self) -> bool {
        Metric::ALL.iter().all(|&m| self.value(m) == 0.0)
    }
}

/// Builder for `ExperimentRecord`.
#[derive(Debug)]
pub struct ExperimentRecordBuilder {
    record: ExperimentRecord,
}

impl ExperimentRecordBuilder {
    /// Create a new builder with every metric at zero.
    #[must_use]
    pub const fn new(technology: Technology) -> Self {
        Self {
            record: ExperimentRecord::zeroed(technology),
        }
    }

    /// Set the execution index.
    #[must_use]
    pub const fn execution(mut self, execucao: u64) -> Self {
        self.record.execucao = execucao;
        self
    }

    /// Set the distance (m).
    #[must_use]
    pub const fn distance(mut self, distancia: f64) -> Self {
        self.record.distancia = distancia;
        self
    }

    /// Set the device count.
    #[must_use]
    pub const fn devices(mut self, dispositivos: u64) -> Self {
        self.record.dispositivos = dispositivos;
        self
    }

    /// Set any metric from an `f64`.
    #[must_use]
    pub fn metric(mut self, metric: Metric, value: f64) -> Self {
        self.record.set_real(metric, value);
        self
    }

    /// Build the `ExperimentRecord`.
    #[must_use]
    pub const fn build(self) -> ExperimentRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_has_every_metric_at_zero() {
        let record = ExperimentRecord::zeroed(Technology::Sigfox);
        assert!(record.is_zero_filled());
        for metric in Metric::ALL {
            assert!(record.value(metric).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_builder() {
        let record = ExperimentRecord::builder(Technology::Lorawan)
            .execution(3)
            .distance(10_000.0)
            .devices(50)
            .metric(Metric::Pdr, 92.5)
            .metric(Metric::PacotesEnviados, 120.0)
            .build();

        assert_eq!(record.technology, Technology::Lorawan);
        assert_eq!(record.execucao, 3);
        assert_eq!(record.dispositivos, 50);
        assert_eq!(record.pacotes_enviados, 120);
        assert!((record.value(Metric::Pdr) - 92.5).abs() < f64::EPSILON);
        assert!(!record.is_zero_filled());
    }

    #[test]
    fn test_fractional_count_resolves_to_zero() {
        let mut record = ExperimentRecord::zeroed(Technology::Nbiot);
        record.set_real(Metric::Dispositivos, 12.5);
        assert_eq!(record.dispositivos, 0);
        record.set_real(Metric::Dispositivos, 12.0);
        assert_eq!(record.dispositivos, 12);
    }
}

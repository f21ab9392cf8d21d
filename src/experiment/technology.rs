//! Technology - the LPWAN technology a trial was run with

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// LPWAN technology of a trial.
///
/// Declaration order is the priority order used for every tie-break
/// (NBIOT, then LORAWAN, then SIGFOX), and the derived `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Technology {
    /// NB-IoT (cellular, licensed spectrum)
    Nbiot,
    /// LoRaWAN (chirp spread spectrum, unlicensed)
    Lorawan,
    /// Sigfox (ultra narrow band, unlicensed)
    Sigfox,
}

impl Technology {
    /// All technologies in priority order.
    pub const ALL: [Self; 3] = [Self::Nbiot, Self::Lorawan, Self::Sigfox];

    /// Canonical upper-case label (`NBIOT`, `LORAWAN`, `SIGFOX`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nbiot => "NBIOT",
            Self::Lorawan => "LORAWAN",
            Self::Sigfox => "SIGFOX",
        }
    }

    /// Position in the tie-break order (0 wins).
    #[must_use]
    pub const fn priority(self) -> usize {
        self as usize
    }

    /// Parse a label as printed in a `=== RESULTADOS <TECH> ===` marker.
    ///
    /// Case-insensitive; `-`, `_` and spaces are ignored, so `NB-IOT`,
    /// `nb_iot` and `NBIoT` all resolve to [`Technology::Nbiot`].
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_uppercase)
            .collect();
        Self::ALL.into_iter().find(|t| t.label() == normalized)
    }

    /// Infer the technology from an input file name, e.g.
    /// `resultados_lorawan_3000m_100dev_exec2.txt`.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        if lower.contains("nbiot") || lower.contains("nb-iot") || lower.contains("nb_iot") {
            Some(Self::Nbiot)
        } else if lower.contains("lorawan") {
            Some(Self::Lorawan)
        } else if lower.contains("sigfox") {
            Some(Self::Sigfox)
        } else {
            None
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Technology {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| Error::UnknownTechnology(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_follows_declaration_order() {
        assert!(Technology::Nbiot < Technology::Lorawan);
        assert!(Technology::Lorawan < Technology::Sigfox);
        assert_eq!(Technology::Sigfox.priority(), 2);
    }

    #[test]
    fn test_from_label_variants() {
        assert_eq!(Technology::from_label("NB-IOT"), Some(Technology::Nbiot));
        assert_eq!(Technology::from_label("nbiot"), Some(Technology::Nbiot));
        assert_eq!(Technology::from_label("LoRaWAN"), Some(Technology::Lorawan));
        assert_eq!(Technology::from_label("SIGFOX"), Some(Technology::Sigfox));
        assert_eq!(Technology::from_label("ZIGBEE"), None);
    }

    #[test]
    fn test_from_file_name() {
        assert_eq!(
            Technology::from_file_name("resultados_SIGFOX_3000m.txt"),
            Some(Technology::Sigfox)
        );
        assert_eq!(Technology::from_file_name("nb-iot-run1.txt"), Some(Technology::Nbiot));
        assert_eq!(Technology::from_file_name("run1.txt"), None);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "wifi".parse::<Technology>().unwrap_err();
        assert!(format!("{err}").contains("Unknown technology"));
    }

    #[test]
    fn test_serde_uses_upper_case_labels() {
        let json = serde_json::to_string(&Technology::Lorawan).unwrap();
        assert_eq!(json, "\"LORAWAN\"");
    }
}

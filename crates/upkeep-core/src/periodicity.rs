//! Periodicity catalog: maps the human recurrence labels used on plans to the
//! frequency descriptor written into preventive planned work.

use std::{fmt, str::FromStr};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UpkeepError};

/// Recurrence unit of a planned-work entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl FromStr for Frequency {
    type Err = UpkeepError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(UpkeepError::invalid_input("frequency")
                .with_reason(format!("'{other}' is not one of daily, weekly, monthly"))),
        }
    }
}

/// A `(frequency, occurs-every)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencySpec {
    pub frequency: Frequency,
    pub occurs_every: u32,
}

impl FrequencySpec {
    pub const fn new(frequency: Frequency, occurs_every: u32) -> Self {
        Self {
            frequency,
            occurs_every,
        }
    }
}

/// Fallback used for labels the catalog does not know.
pub const FALLBACK: FrequencySpec = FrequencySpec::new(Frequency::Monthly, 1);

/// Human-facing periodicity label of a maintenance plan.
///
/// Labels outside the catalog are preserved verbatim in [`Periodicity::Other`]
/// so a snapshot written by a newer version round-trips untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Periodicity {
    Diario,
    Semanal,
    Quincenal,
    Mensual,
    Bimestral,
    Trimestral,
    Semestral,
    Anual,
    Other(String),
}

impl Periodicity {
    /// Every label known to the catalog, in ascending interval order.
    pub const KNOWN: [Periodicity; 8] = [
        Periodicity::Diario,
        Periodicity::Semanal,
        Periodicity::Quincenal,
        Periodicity::Mensual,
        Periodicity::Bimestral,
        Periodicity::Trimestral,
        Periodicity::Semestral,
        Periodicity::Anual,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Periodicity::Diario => "Diario",
            Periodicity::Semanal => "Semanal",
            Periodicity::Quincenal => "Quincenal",
            Periodicity::Mensual => "Mensual",
            Periodicity::Bimestral => "Bimestral",
            Periodicity::Trimestral => "Trimestral",
            Periodicity::Semestral => "Semestral",
            Periodicity::Anual => "Anual",
            Periodicity::Other(label) => label,
        }
    }

    /// Frequency descriptor for this label, or `None` when the label is
    /// outside the catalog.
    pub fn frequency_spec(&self) -> Option<FrequencySpec> {
        use Frequency::*;
        let spec = match self {
            Periodicity::Diario => FrequencySpec::new(Daily, 1),
            Periodicity::Semanal => FrequencySpec::new(Weekly, 1),
            Periodicity::Quincenal => FrequencySpec::new(Weekly, 2),
            Periodicity::Mensual => FrequencySpec::new(Monthly, 1),
            Periodicity::Bimestral => FrequencySpec::new(Monthly, 2),
            Periodicity::Trimestral => FrequencySpec::new(Monthly, 3),
            Periodicity::Semestral => FrequencySpec::new(Monthly, 6),
            Periodicity::Anual => FrequencySpec::new(Monthly, 12),
            Periodicity::Other(_) => return None,
        };
        Some(spec)
    }
}

impl From<&str> for Periodicity {
    fn from(label: &str) -> Self {
        let label = label.trim();
        Periodicity::KNOWN
            .into_iter()
            .find(|known| known.as_str().eq_ignore_ascii_case(label))
            .unwrap_or_else(|| Periodicity::Other(label.to_string()))
    }
}

impl From<String> for Periodicity {
    fn from(label: String) -> Self {
        Periodicity::from(label.as_str())
    }
}

impl From<Periodicity> for String {
    fn from(periodicity: Periodicity) -> Self {
        periodicity.as_str().to_string()
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves a periodicity label to its frequency descriptor.
///
/// Unknown labels are not an error: they resolve to monthly/1 and a warning
/// is logged.
pub fn resolve(periodicity: &Periodicity) -> FrequencySpec {
    periodicity.frequency_spec().unwrap_or_else(|| {
        warn!(
            "Unknown periodicity '{}', falling back to {} every {}",
            periodicity,
            FALLBACK.frequency.as_str(),
            FALLBACK.occurs_every
        );
        FALLBACK
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_labels() {
        let expected = [
            ("Diario", Frequency::Daily, 1),
            ("Semanal", Frequency::Weekly, 1),
            ("Quincenal", Frequency::Weekly, 2),
            ("Bimestral", Frequency::Monthly, 2),
            ("Mensual", Frequency::Monthly, 1),
            ("Trimestral", Frequency::Monthly, 3),
            ("Semestral", Frequency::Monthly, 6),
            ("Anual", Frequency::Monthly, 12),
        ];
        for (label, frequency, every) in expected {
            let spec = resolve(&Periodicity::from(label));
            assert_eq!(spec, FrequencySpec::new(frequency, every), "label {label}");
        }
    }

    #[test]
    fn test_resolve_unknown_label_falls_back() {
        let periodicity = Periodicity::from("Cada luna llena");
        assert_eq!(periodicity, Periodicity::Other("Cada luna llena".to_string()));
        assert_eq!(resolve(&periodicity), FALLBACK);
    }

    #[test]
    fn test_label_parsing_is_case_insensitive() {
        assert_eq!(Periodicity::from("mensual"), Periodicity::Mensual);
        assert_eq!(Periodicity::from(" ANUAL "), Periodicity::Anual);
    }

    #[test]
    fn test_periodicity_serde_uses_label() {
        let json = serde_json::to_string(&Periodicity::Quincenal).unwrap();
        assert_eq!(json, "\"Quincenal\"");
        let other: Periodicity = serde_json::from_str("\"Bienal\"").unwrap();
        assert_eq!(other.as_str(), "Bienal");
    }

    #[test]
    fn test_frequency_from_str() {
        assert_eq!("weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!(" Monthly ".parse::<Frequency>().unwrap(), Frequency::Monthly);
        let err = "hourly".parse::<Frequency>().unwrap_err();
        assert!(matches!(err, UpkeepError::InvalidInput { ref field, .. } if field == "frequency"));
    }
}

//! String predicates and line parsers shared by the registries.

use crate::{
    error::{Result, UpkeepError},
    models::Task,
};

/// Maximum length, in characters, of any stored description.
pub const DESCRIPTION_MAX: usize = 100;

/// Truncates `text` to at most `max_chars` characters.
///
/// Truncation happens on character boundaries so multi-byte descriptions
/// (accents are common in equipment names) never split a code point.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Returns true when `duration` has the `H:MM:SS` shape.
///
/// Hours take one or more digits; minutes and seconds are exactly two digits
/// in `00..=59`.
pub fn validate_duration(duration: &str) -> bool {
    let mut parts = duration.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    let sexagesimal = |part: &str| {
        let bytes = part.as_bytes();
        bytes.len() == 2 && (b'0'..=b'5').contains(&bytes[0]) && bytes[1].is_ascii_digit()
    };

    !hours.is_empty()
        && hours.bytes().all(|b| b.is_ascii_digit())
        && sexagesimal(minutes)
        && sexagesimal(seconds)
}

/// Splits tab-separated text into trimmed columns, one row per non-blank line.
fn tab_separated_rows(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.trim()
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line.split('\t').map(str::trim).collect()))
}

/// Parses `taskKey<TAB>description<TAB>duration` lines into tasks.
///
/// The whole input is rejected on the first malformed line.
pub fn parse_task_lines(text: &str) -> Result<Vec<Task>> {
    let mut tasks = Vec::new();
    for (line_no, columns) in tab_separated_rows(text) {
        let [task_key, description, duration, ..] = columns.as_slice() else {
            return Err(UpkeepError::invalid_input("tasks").with_reason(format!(
                "line {line_no}: expected task key, description and duration"
            )));
        };
        tasks.push(Task::new(task_key, description, duration)?);
    }
    Ok(tasks)
}

/// One parsed row of an equipment bulk import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentLine {
    pub prefix: String,
    pub code: String,
    pub description: String,
}

/// Parses `prefix<TAB>code<TAB>description` lines.
pub fn parse_equipment_lines(text: &str) -> Result<Vec<EquipmentLine>> {
    tab_separated_rows(text)
        .map(|(line_no, columns)| match columns.as_slice() {
            [prefix, code, description, ..]
                if !prefix.is_empty() && !code.is_empty() && !description.is_empty() =>
            {
                Ok(EquipmentLine {
                    prefix: (*prefix).to_string(),
                    code: (*code).to_string(),
                    description: truncate_text(description, DESCRIPTION_MAX),
                })
            }
            _ => Err(UpkeepError::invalid_input("equipments").with_reason(format!(
                "line {line_no}: expected prefix, code and description"
            ))),
        })
        .collect()
}

/// Rejects blank values for required fields.
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(UpkeepError::invalid_input(field).with_reason("value is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 100), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc");
        assert_eq!(truncate_text("", 3), "");
        // Multi-byte characters count as one
        assert_eq!(truncate_text("bomba hidráulica", 15), "bomba hidráulic");
        assert_eq!(truncate_text(&"x".repeat(150), DESCRIPTION_MAX).len(), 100);
    }

    #[test]
    fn test_validate_duration_accepts() {
        for ok in ["0:30:00", "1:00:00", "12:59:59", "100:05:09"] {
            assert!(validate_duration(ok), "{ok} should be valid");
        }
    }

    #[test]
    fn test_validate_duration_rejects() {
        for bad in [
            "", "30:00", "0:60:00", "0:00:60", "0:5:00", "a:00:00", "0:00:00:00", ":00:00",
            "1:00:0x",
        ] {
            assert!(!validate_duration(bad), "{bad:?} should be invalid");
        }
    }

    #[test]
    fn test_parse_task_lines() {
        let tasks = parse_task_lines("T1\tLubricate\t0:30:00\nT2\t Inspect seals \t1:15:00\n")
            .expect("valid tasks");
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].task_key, "T2");
        assert_eq!(tasks[1].description, "Inspect seals");
        assert_eq!(tasks[1].duration, "1:15:00");
    }

    #[test]
    fn test_parse_task_lines_rejects_bad_rows() {
        let err = parse_task_lines("T1\tLubricate").unwrap_err();
        assert!(matches!(err, UpkeepError::InvalidInput { ref field, .. } if field == "tasks"));

        let err = parse_task_lines("T1\tLubricate\t30 min").unwrap_err();
        assert!(matches!(err, UpkeepError::InvalidInput { ref field, .. } if field == "duration"));
    }

    #[test]
    fn test_parse_equipment_lines() {
        let rows = parse_equipment_lines("PUMP\t01\tMain Pump\n\nFAN\t07\tExhaust fan").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].prefix, "FAN");
        assert_eq!(rows[1].code, "07");

        assert!(parse_equipment_lines("PUMP\t\tMain Pump").is_err());
    }
}

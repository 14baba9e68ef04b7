//! VitaTrack Status Tool
//!
//! Provides runtime status information about the VitaTrack service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Intake logging instructions for AI assistants
pub const INTAKE_INSTRUCTIONS: &str = r#"
# VitaTrack Intake Logging Instructions

This guide explains how to record supplement intake and read the analysis
tools of VitaTrack.

## Overview

1. **Profile** - who the intake is evaluated for (male, female or child)
2. **Supplements** - products with per-serving nutrient amounts
3. **Intake log** - what was taken on which date
4. **Analysis** - recommendations, daily reports and trends

---

## Getting the Current Date

Dates are always ISO format: `YYYY-MM-DD`. When the user says "today" or
"yesterday", get the real date from a calendar tool rather than guessing.

---

## Step 1: Set the Profile

**Tool:** `set_profile`

| kind | birth_date | Reference values used |
|------|------------|-----------------------|
| `male` | - | adult male |
| `female` | - | adult female |
| `child` | required | age bracket for the child's age on the analysed date |

A child's age is computed from the birth date for each date analysed, so a
report for last year uses last year's age. Children are covered from age 0
to 18; outside that range nutrients are reported as unresolved.

---

## Step 2: Register Supplements

**Tool:** `add_supplement`

Enter the amounts from the label **per serving**. Each nutrient takes an
optional `unit`:

| Unit | Accepted spellings |
|------|--------------------|
| milligram | `mg` |
| microgram | `mcg`, `µg`, `ug` |
| gram | `g` |
| international unit | `iu`, `IE` (vitamins A, D and E only) |

Without a unit the amount is taken in the nutrient's own unit (see
`list_nutrients`). Conversions used for IU:

- Vitamin D: 1 IU = 0.025 µg (1000 IU = 25 µg)
- Vitamin A: 1 IU = 0.3 µg retinol
- Vitamin E: 1 IU = 0.67 mg

Nutrient keys are the snake_case names from `list_nutrients`, for example
`vitamin_d`, `vitamin_b12`, `folate`, `magnesium`. Common aliases such as
"vitamin d3", "b12" or "folic acid" are accepted.

---

## Step 3: Log Intake

**Tool:** `log_intake`

- From a supplement: `supplement_id` plus `servings` (default 1)
- Direct amounts: `nutrients` list, e.g. a fortified food
- Both can be combined in one entry

Amounts are copied into the log when it is written. Editing or deleting
the supplement later does not change intake already logged.

Use `list_intake` to review a day and `delete_intake` to correct mistakes.

---

## Step 4: Analyse

| Tool | Use |
|------|-----|
| `get_recommendation` | Reference value for one nutrient |
| `get_daily_report` | Every nutrient taken on a date, classified |
| `get_trend` | Daily totals for one nutrient over a window (default 7 days) |

### Classification

| Status | Rule |
|--------|------|
| insufficient | below 80% of the recommendation |
| normal | 80% or more, and not above the upper limit |
| excessive | above the tolerable upper limit |

The upper limit always wins: an intake above it is excessive no matter the
percentage. Reaching the upper limit exactly is still normal. Nutrients
without an upper limit are never excessive.

Reports include advisory tips for every insufficient or excessive nutrient
and a breakdown by supplement. Pass `all_nutrients: true` to include
nutrients with no intake at all.

## Notes

- Reference values are D-A-CH recommendations with EFSA upper limits; the
  dataset version is shown by `vitatrack_status`
- The tips are general guidance, not medical advice
"#;

/// Runtime status of the VitaTrack service
#[derive(Debug, Clone, Serialize)]
pub struct VitaTrackStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Reference dataset
    pub reference_version: String,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    reference_version: String,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(database_path: PathBuf, reference_version: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
            reference_version: reference_version.into(),
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> VitaTrackStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        VitaTrackStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            reference_version: self.reference_version.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_reference_version_and_missing_db() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/vitatrack.db"), "test-1");
        let status = tracker.get_status();
        assert_eq!(status.reference_version, "test-1");
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.process_id, std::process::id());
    }
}

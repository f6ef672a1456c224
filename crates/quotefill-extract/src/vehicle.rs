//! Per-vehicle records keyed by VIN.
//!
//! Each VIN anchors a ±20 line block; the physical-damage options printed in
//! that block belong to the vehicle. The model is read from the closest
//! vehicle-looking line above the VIN.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use quotefill_core::money::{digits_only, find_limit_ratio, find_plain_integer, has_figure};
use quotefill_core::{
    DeductibleCoverage, LimitCoverage, Lines, PresenceCoverage, UNKNOWN_MODEL, VehicleRecord,
};
use regex::Regex;
use tracing::debug;

use crate::coverage::DEDUCTIBLE_PHRASE;
use crate::keywords::{
    COLLISION, COMPREHENSIVE, RENTAL, ROADSIDE, ROADSIDE_COVERAGE_PHRASE, contains_ci,
    has_address_token,
};

/// 17-character VIN (no I, O, Q), optionally labelled `VIN`, `VIN:` or `VIN#`.
static VIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\b(?i:VIN)[:#\s]*|\b)([A-HJ-NPR-Z0-9]{17})\b").unwrap());

/// `2020 TOYOTA CAMRY`-style line.
static YEAR_LEAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:19|20)\d{2}\s+[A-Z0-9][A-Z0-9\- ]+").unwrap());

/// `2020 TOYOTA` with the model on the following line.
static YEAR_MAKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:19|20)\d{2}\s+[A-Z]{2,}$").unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Lines searched above a VIN for the model.
const MODEL_LOOKBACK: usize = 5;

/// Lines either side of a VIN that belong to its vehicle.
const BLOCK_RADIUS: usize = 20;

/// Lines scanned either side of a coverage keyword.
const WINDOW: usize = 3;

/// Every distinct vehicle in transcript order; repeated VINs keep the first.
pub fn vehicles(lines: &Lines<'_>, transcript: &str) -> Vec<VehicleRecord> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(caps) = VIN.captures(line) else {
            continue;
        };
        let (Some(label), Some(vin)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if !seen.insert(vin.as_str()) {
            continue;
        }

        let model = model_above(lines, i)
            .or_else(|| {
                let left = line[..label.start()].trim();
                looks_like_model(left).then(|| collapse_spaces(left))
            })
            .unwrap_or_else(|| UNKNOWN_MODEL.to_string());

        let block = lines.block(i, BLOCK_RADIUS);
        let vehicle = VehicleRecord {
            model,
            vin: vin.as_str().to_string(),
            collision: deductible(&block, COLLISION),
            comprehensive: deductible(&block, COMPREHENSIVE),
            rental: limit(&block, RENTAL),
            roadside: presence(&block, ROADSIDE, transcript),
        };
        debug!(vin = %vehicle.vin, model = %vehicle.model, "Vehicle");
        out.push(vehicle);
    }

    out
}

/// Closest model line within [`MODEL_LOOKBACK`] lines above `vin_idx`.
///
/// The search stops at a previous vehicle's VIN line; anything above it
/// describes that vehicle.
fn model_above(lines: &Lines<'_>, vin_idx: usize) -> Option<String> {
    let hit = (vin_idx.saturating_sub(MODEL_LOOKBACK)..vin_idx)
        .rev()
        .take_while(|&j| lines.get(j).is_some_and(|l| !VIN.is_match(l)))
        .find(|&j| lines.get(j).is_some_and(|l| looks_like_model(l.trim())))?;
    let line = lines.get(hit)?.trim();

    // "2020 TOYOTA" / "CAMRY SE" split across two lines.
    if YEAR_MAKE.is_match(line) && hit + 1 < vin_idx {
        let next = lines.get(hit + 1).map(str::trim).unwrap_or_default();
        if is_uppercase(next) && next.chars().count() >= 3 {
            return Some(format!("{line} {next}"));
        }
    }

    Some(collapse_spaces(line))
}

fn looks_like_model(line: &str) -> bool {
    if line.is_empty() {
        return false;
    }
    if YEAR_LEAD.is_match(line) && !has_address_token(line) {
        return true;
    }
    if is_uppercase(line) && line.split_whitespace().count() >= 2 && !has_address_token(line) {
        return true;
    }
    YEAR_MAKE.is_match(line)
}

/// Model-year or VIN line, never a coverage figure.
fn is_vehicle_line(line: &str) -> bool {
    let line = line.trim();
    YEAR_LEAD.is_match(line) || YEAR_MAKE.is_match(line) || VIN.is_match(line)
}

/// At least one cased character and no lowercase ones.
fn is_uppercase(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

fn collapse_spaces(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, " ").into_owned()
}

/// Deductible for a coverage keyword: a bare integer, else `Deductible $N`.
fn deductible(block: &Lines<'_>, keyword: &str) -> DeductibleCoverage {
    block
        .positions(|line| contains_ci(line, keyword))
        .find_map(|i| {
            block.scan_near(i, WINDOW, WINDOW, |line| {
                if is_vehicle_line(line) {
                    return None;
                }
                find_plain_integer(line).map(digits_only).or_else(|| {
                    DEDUCTIBLE_PHRASE
                        .captures(line)
                        .and_then(|caps| caps.get(1))
                        .map(|m| digits_only(m.as_str()))
                })
            })
        })
        .map(|deductible| DeductibleCoverage {
            selected: true,
            deductible,
        })
        .unwrap_or_default()
}

/// `A/B` limit for a coverage keyword, e.g. rental `30/900`.
fn limit(block: &Lines<'_>, keyword: &str) -> LimitCoverage {
    block
        .positions(|line| contains_ci(line, keyword))
        .find_map(|i| block.scan_near(i, WINDOW, WINDOW, find_limit_ratio))
        .map(|limit| LimitCoverage {
            selected: true,
            limit,
        })
        .unwrap_or_default()
}

/// Checkbox-style coverage: the keyword next to any figure, or the fuller
/// "... coverage" phrase anywhere in the transcript.
fn presence(block: &Lines<'_>, keyword: &str, transcript: &str) -> PresenceCoverage {
    let near_figure = block
        .positions(|line| contains_ci(line, keyword))
        .any(|i| {
            block
                .window(i, WINDOW, WINDOW)
                .lines()
                .iter()
                .any(|line| !is_vehicle_line(line) && has_figure(line))
        });

    PresenceCoverage {
        selected: near_figure || contains_ci(transcript, ROADSIDE_COVERAGE_PHRASE),
    }
}

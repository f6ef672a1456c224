//! Label tables for the carrier-specific phrasings of each field.
//!
//! Every table maps one canonical field to the label variants seen across
//! carriers. Lookups are case-insensitive substring checks, so adding a new
//! carrier's wording is a one-line change here.

/// Carriers recognised by name anywhere in the transcript, in priority order:
/// `(lowercase needle, display name)`.
pub const KNOWN_CARRIERS: &[(&str, &str)] = &[
    ("progressive", "Progressive"),
    ("travelers", "Travelers"),
    ("allstate", "Allstate"),
    ("geico", "Geico"),
    ("liberty mutual", "Liberty Mutual"),
    ("safeco", "Safeco"),
    ("state farm", "State Farm"),
    ("nationwide", "Nationwide"),
];

/// Uninsured / underinsured motorist bodily-injury labels.
pub const UMBI_KEYS: &[&str] = &[
    "Uninsured/Underinsured Motorist Bodily Injury",
    "Uninsured Motorist Bodily Injury",
    "Underinsured Motorist Bodily Injury",
    "UMBI",
    "Uninsd/Underinsd Motorists",
    "Uninsd Motorists",
    "Underinsd Motorists",
];

/// Uninsured / underinsured motorist property-damage labels.
pub const UMPD_KEYS: &[&str] = &[
    "Uninsured/Underinsured Motorist Property Damage",
    "Uninsured Motorist Property Damage",
    "Underinsured Motorist Property Damage",
    "UMPD",
    "Uninsd/Underinsd Motorists PD",
    "Uninsd Motorists PD",
    "Underinsd Motorists PD",
];

/// Address tokens that disqualify a line from being a vehicle description.
pub const ADDRESS_STOP_WORDS: &[&str] = &[
    "street", "st", "road", "rd", "ave", "avenue", "boulevard", "blvd", "lane", "ln", "drive",
    "dr", "suite", "ste", "apt", "unit",
];

/// Per-vehicle coverage labels.
pub const COLLISION: &str = "Collision";
pub const COMPREHENSIVE: &str = "Comprehensive";
pub const RENTAL: &str = "Rental";
pub const ROADSIDE: &str = "Roadside Assistance";

/// Roadside phrasing that selects the coverage anywhere in the transcript.
pub const ROADSIDE_COVERAGE_PHRASE: &str = "roadside assistance coverage";

/// Case-insensitive substring test.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether `line` carries any of `keys`, ignoring case.
pub fn contains_any(line: &str, keys: &[&str]) -> bool {
    let lowered = line.to_lowercase();
    keys.iter().any(|k| lowered.contains(&k.to_lowercase()))
}

/// Whether `line` carries an address token such as `St` or `Suite`.
///
/// Compared as whole tokens: `"DR"` disqualifies `"12 OAK DR"` but not
/// `"HYDRA"`.
pub fn has_address_token(line: &str) -> bool {
    line.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| ADDRESS_STOP_WORDS.contains(&token))
}

//! Vocabularies checked during validation.

/// Values accepted for an indicator's `pattern_type`.
pub const PATTERN_TYPES: &[&str] = &["stix", "snort", "yara"];

/// Values accepted for an opinion's `opinion`.
pub const OPINIONS: &[&str] = &[
    "strongly-disagree",
    "disagree",
    "neutral",
    "agree",
    "strongly-agree",
];

/// Values accepted for `spec_version`.
pub const SPEC_VERSIONS: &[&str] = &["2.0", "2.1"];

/// The `spec_version` given to newly constructed objects.
pub const SPEC_VERSION: &str = "2.1";

/// Whether `value` is a member of `list`.
pub fn is_member(list: &[&str], value: &str) -> bool {
    list.contains(&value)
}

/// Values accepted for an identity's `identity_class`.
pub const IDENTITY_CLASSES: &[&str] = &[
    "individual",
    "group",
    "system",
    "organization",
    "class",
    "unknown",
];

// src/extract/phone.rs
use crate::models::Country;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneRule {
    pub prefix: &'static str,
    pub total_digits: usize,
}

// +595 followed by 9 digits, +598 followed by 8
const PARAGUAY_RULE: PhoneRule = PhoneRule {
    prefix: "+595",
    total_digits: 12,
};

const URUGUAY_RULE: PhoneRule = PhoneRule {
    prefix: "+598",
    total_digits: 11,
};

impl PhoneRule {
    pub fn for_country(country: Country) -> &'static PhoneRule {
        match country {
            Country::Paraguay => &PARAGUAY_RULE,
            Country::Uruguay => &URUGUAY_RULE,
        }
    }

    // Country code without the leading '+'
    pub fn code(&self) -> &'static str {
        &self.prefix[1..]
    }

    pub fn local_digits(&self) -> usize {
        self.total_digits - self.code().len()
    }
}

pub fn strip_candidate(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

// Prefix rules are mutually exclusive and checked most-specific first
pub fn normalize(candidate: &str, rule: &PhoneRule) -> String {
    let code = rule.code();

    if candidate.starts_with(rule.prefix) {
        return candidate.to_string();
    }
    if let Some(rest) = candidate.strip_prefix('0') {
        if rest.starts_with(code) {
            return format!("+{}", rest);
        }
        return format!("{}{}", rule.prefix, rest);
    }
    if candidate.starts_with(code) {
        return format!("+{}", candidate);
    }
    format!("{}{}", rule.prefix, candidate)
}

pub fn is_valid(canonical: &str, rule: &PhoneRule) -> bool {
    match canonical.strip_prefix(rule.prefix) {
        Some(rest) => rest.len() == rule.local_digits() && rest.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

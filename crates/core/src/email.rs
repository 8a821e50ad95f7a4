//! Email address value object.
//!
//! Syntax accepted (a pragmatic subset of RFC 5322 `addr-spec`):
//! - exactly one `@`, total length at most 254
//! - local part: 1..=64 bytes of atext characters or `.`, no
//!   leading/trailing/double dot
//! - domain: at least two labels, each 1..=63 bytes of letters, digits and
//!   `-` without leading/trailing `-`; the last label is not all digits
//!
//! Non-ASCII letters and digits are allowed in both parts (internationalized
//! addresses). Quoted local parts and IP-literal domains are rejected.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

const MAX_TOTAL_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// A syntactically valid email address.
///
/// Surrounding whitespace is trimmed and the domain is lowercased; the local
/// part is kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl ValueObject for EmailAddress {}

impl EmailAddress {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(invalid("value is empty"));
        }
        if s.len() > MAX_TOTAL_LEN {
            return Err(invalid("address is too long"));
        }

        let (local, domain) = match s.split_once('@') {
            Some(parts) => parts,
            None => return Err(invalid("the address must contain an @-sign")),
        };
        if domain.contains('@') {
            return Err(invalid("the address must contain exactly one @-sign"));
        }

        check_local(local)?;
        check_domain(domain)?;

        Ok(Self(format!("{local}@{}", domain.to_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map(|(l, _)| l).unwrap_or_default()
    }

    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or_default()
    }
}

fn invalid(reason: &str) -> DomainError {
    DomainError::validation(
        "email",
        format!("value is not a valid email address: {reason}"),
    )
}

fn is_letter_or_digit(c: char) -> bool {
    c.is_ascii_alphanumeric() || (!c.is_ascii() && c.is_alphanumeric())
}

fn is_atext(c: char) -> bool {
    is_letter_or_digit(c) || "!#$%&'*+-/=?^_`{|}~".contains(c)
}

fn check_local(local: &str) -> DomainResult<()> {
    if local.is_empty() {
        return Err(invalid("there must be something before the @-sign"));
    }
    if local.len() > MAX_LOCAL_LEN {
        return Err(invalid("the part before the @-sign is too long"));
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err(invalid("the part before the @-sign has a misplaced period"));
    }
    if let Some(c) = local.chars().find(|&c| c != '.' && !is_atext(c)) {
        return Err(invalid(&format!(
            "the part before the @-sign contains an invalid character {c:?}"
        )));
    }
    Ok(())
}

fn check_domain(domain: &str) -> DomainResult<()> {
    if domain.is_empty() {
        return Err(invalid("there must be something after the @-sign"));
    }
    if domain.len() > MAX_DOMAIN_LEN {
        return Err(invalid("the part after the @-sign is too long"));
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(invalid("the part after the @-sign is not a domain name"));
    }

    for label in &labels {
        if label.is_empty() {
            return Err(invalid("the part after the @-sign has a misplaced period"));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(invalid("a domain label is too long"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(invalid("a domain label starts or ends with a hyphen"));
        }
        if let Some(c) = label
            .chars()
            .find(|&c| !(is_letter_or_digit(c) || c == '-'))
        {
            return Err(invalid(&format!(
                "the part after the @-sign contains an invalid character {c:?}"
            )));
        }
    }

    // Checked above: labels.len() >= 2.
    let tld = labels[labels.len() - 1];
    if tld.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("the part after the @-sign is not a domain name"));
    }

    Ok(())
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl core::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::str::FromStr for EmailAddress {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

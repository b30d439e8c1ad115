use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::SkyltError;

// An atomic hazard token is "H" + 3 digits + optional modifier letters
// (i/f/d, any case, e.g. H360FD, H361fd). Atomic precaution tokens are
// "P" + 3 digits. Either kind may be joined into a combined code with '+'.
const H_ATOM: &str = r"H[0-9]{3}[ifdIFD]*";
const P_ATOM: &str = r"P[0-9]{3}";

static H_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{H_ATOM}(?:\+{H_ATOM})*")).expect("hazard token pattern is valid")
});

static H_FULL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{H_ATOM}(?:\+{H_ATOM})*$")).expect("hazard code pattern is valid")
});

static P_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{P_ATOM}(?:\+{P_ATOM})*")).expect("precaution token pattern is valid")
});

static P_FULL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{P_ATOM}(?:\+{P_ATOM})*$")).expect("precaution code pattern is valid")
});

/// A GHS hazard statement code.
///
/// Combined hazard codes (e.g. `H302+H312`) are kept as a single lookup key;
/// unlike precaution codes they are never resolved constituent by
/// constituent. The statement tables list combined hazards under the full
/// combined string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HazardCode {
    Atomic(String),
    Combined { text: String, parts: Vec<String> },
}

/// A GHS precautionary statement code.
///
/// Combined precaution codes (e.g. `P301+P310`) resolve to the
/// space-joined texts of their atomic constituents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrecautionCode {
    Atomic(String),
    Combined { text: String, parts: Vec<String> },
}

/// Regulatory category of a precautionary statement, determined by the
/// digit immediately following the 'P'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecautionClass {
    Prevention,
    Response,
    Storage,
    Disposal,
}

impl PrecautionClass {
    /// Map a leading digit to its category. Digits outside 2-5 carry no
    /// category (general statements like P101 are valid but unclassified).
    pub fn from_digit(digit: char) -> Option<PrecautionClass> {
        match digit {
            '2' => Some(PrecautionClass::Prevention),
            '3' => Some(PrecautionClass::Response),
            '4' => Some(PrecautionClass::Storage),
            '5' => Some(PrecautionClass::Disposal),
            _ => None,
        }
    }
}

impl fmt::Display for PrecautionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrecautionClass::Prevention => write!(f, "Prevention"),
            PrecautionClass::Response => write!(f, "Response"),
            PrecautionClass::Storage => write!(f, "Storage"),
            PrecautionClass::Disposal => write!(f, "Disposal"),
        }
    }
}

fn split_parts(text: &str) -> Vec<String> {
    text.split('+').map(str::to_string).collect()
}

impl HazardCode {
    /// Parse a complete hazard code token. The whole input must match.
    pub fn parse(s: &str) -> Result<HazardCode, SkyltError> {
        let s = s.trim();
        if !H_FULL.is_match(s) {
            return Err(SkyltError::InvalidCode(s.to_string()));
        }
        if s.contains('+') {
            Ok(HazardCode::Combined {
                text: s.to_string(),
                parts: split_parts(s),
            })
        } else {
            Ok(HazardCode::Atomic(s.to_string()))
        }
    }

    /// Match a hazard code at the start of a line, returning the code and
    /// the remainder of the line.
    pub fn match_prefix(line: &str) -> Option<(HazardCode, &str)> {
        let m = H_TOKEN.find(line)?;
        if m.start() != 0 {
            return None;
        }
        let code = HazardCode::parse(m.as_str()).ok()?;
        Some((code, &line[m.end()..]))
    }

    /// The canonical code text.
    pub fn as_str(&self) -> &str {
        match self {
            HazardCode::Atomic(s) => s,
            HazardCode::Combined { text, .. } => text,
        }
    }

    /// Atomic constituents, in written order. An atomic code is its own
    /// single constituent.
    pub fn parts(&self) -> &[String] {
        match self {
            HazardCode::Atomic(s) => std::slice::from_ref(s),
            HazardCode::Combined { parts, .. } => parts,
        }
    }

    /// The bare "H###" base of this code: first constituent, modifier
    /// letters stripped. This is the join key into the H→P association
    /// table ("H360FD" and "H360+H361" both associate via "H360").
    ///
    /// A code shorter than four characters is its own base. Parsed codes
    /// are never that short, but the variants are public and a hand-built
    /// value must not panic here.
    pub fn base(&self) -> HazardCode {
        let first = self.as_str().split('+').next().unwrap_or_default();
        let base = match first.char_indices().nth(4) {
            Some((idx, _)) => &first[..idx],
            None => first,
        };
        HazardCode::Atomic(base.to_string())
    }
}

impl PrecautionCode {
    /// Parse a complete precaution code token. The whole input must match.
    pub fn parse(s: &str) -> Result<PrecautionCode, SkyltError> {
        let s = s.trim();
        if !P_FULL.is_match(s) {
            return Err(SkyltError::InvalidCode(s.to_string()));
        }
        if s.contains('+') {
            Ok(PrecautionCode::Combined {
                text: s.to_string(),
                parts: split_parts(s),
            })
        } else {
            Ok(PrecautionCode::Atomic(s.to_string()))
        }
    }

    /// Match a precaution code at the start of a line, returning the code
    /// and the remainder of the line.
    pub fn match_prefix(line: &str) -> Option<(PrecautionCode, &str)> {
        let m = P_TOKEN.find(line)?;
        if m.start() != 0 {
            return None;
        }
        let code = PrecautionCode::parse(m.as_str()).ok()?;
        Some((code, &line[m.end()..]))
    }

    /// Scan free text for every precaution code token (combined codes
    /// match as single tokens).
    pub fn find_all(text: &str) -> Vec<PrecautionCode> {
        P_TOKEN
            .find_iter(text)
            .filter_map(|m| PrecautionCode::parse(m.as_str()).ok())
            .collect()
    }

    /// The canonical code text.
    pub fn as_str(&self) -> &str {
        match self {
            PrecautionCode::Atomic(s) => s,
            PrecautionCode::Combined { text, .. } => text,
        }
    }

    /// Atomic constituents, in written order.
    pub fn parts(&self) -> &[String] {
        match self {
            PrecautionCode::Atomic(s) => std::slice::from_ref(s),
            PrecautionCode::Combined { parts, .. } => parts,
        }
    }

    /// Regulatory category, from the leading digit of the first
    /// constituent.
    pub fn class(&self) -> Option<PrecautionClass> {
        let digit = self.as_str().chars().nth(1)?;
        PrecautionClass::from_digit(digit)
    }
}

macro_rules! code_text_impls {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        // Ordered by canonical text so BTreeMap iteration over codes is
        // deterministic and reads naturally (H300 < H301 < H310).
        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> Ordering {
                self.as_str().cmp(other.as_str())
            }
        }

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl FromStr for $ty {
            type Err = SkyltError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::parse(s)
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                $ty::parse(&s).map_err(D::Error::custom)
            }
        }
    };
}

code_text_impls!(HazardCode);
code_text_impls!(PrecautionCode);

//! Attack label → 5-class mapping
//!
//! Collapses the specific NSL-KDD attack names into the five coarse
//! categories used for training. The table is immutable process-wide data.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackClass {
    Normal,
    DoS,
    Probe,
    R2L,
    U2R,
    /// Sentinel for labels missing from the table
    Unknown,
}

impl AttackClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttackClass::Normal => "Normal",
            AttackClass::DoS => "DoS",
            AttackClass::Probe => "Probe",
            AttackClass::R2L => "R2L",
            AttackClass::U2R => "U2R",
            AttackClass::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AttackClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw label → class, grouped by class
const LABEL_GROUPS: &[(AttackClass, &[&str])] = &[
    (AttackClass::Normal, &["normal"]),
    (
        AttackClass::DoS,
        &[
            "back", "land", "neptune", "pod", "smurf", "teardrop",
            "apache2", "udpstorm", "processtable", "worm",
        ],
    ),
    (
        AttackClass::Probe,
        &["satan", "ipsweep", "nmap", "portsweep", "mscan", "saint"],
    ),
    (
        AttackClass::R2L,
        &[
            "guess_passwd", "ftp_write", "imap", "phf", "multihop", "warezmaster",
            "warezclient", "spy", "xlock", "xsnoop", "snmpguess", "snmpgetattack",
            "httptunnel", "sendmail", "named",
        ],
    ),
    (
        AttackClass::U2R,
        &["buffer_overflow", "loadmodule", "rootkit", "perl", "sqlattack", "xterm", "ps"],
    ),
];

pub static LABEL_TO_5CLASS: Lazy<HashMap<&'static str, AttackClass>> = Lazy::new(|| {
    LABEL_GROUPS
        .iter()
        .flat_map(|(class, labels)| labels.iter().map(move |label| (*label, *class)))
        .collect()
});

/// Exact, case-sensitive lookup; anything unmapped is `Unknown`
pub fn map_label(label: &str) -> AttackClass {
    LABEL_TO_5CLASS
        .get(label)
        .copied()
        .unwrap_or(AttackClass::Unknown)
}

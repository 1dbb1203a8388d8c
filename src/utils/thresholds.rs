// Reference values for CS2 FACEIT stats
// Used to tag displayed numbers as above / around / below the norm

/// Stat families with known thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Kd,
    Headshot,
    WinRate,
    Elo,
    Adr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Good,
    Average,
    Bad,
}

impl Indicator {
    pub fn emoji(&self) -> &'static str {
        match self {
            Indicator::Good => "🟢",
            Indicator::Average => "🟡",
            Indicator::Bad => "🔴",
        }
    }
}

struct Thresholds {
    good: f64,
    average: f64,
}

fn thresholds(kind: StatKind) -> Thresholds {
    match kind {
        StatKind::Kd => Thresholds { good: 1.1, average: 0.95 },
        StatKind::Headshot => Thresholds { good: 50.0, average: 40.0 },
        StatKind::WinRate => Thresholds { good: 55.0, average: 50.0 },
        StatKind::Elo => Thresholds { good: 2000.0, average: 1500.0 },
        StatKind::Adr => Thresholds { good: 85.0, average: 75.0 },
    }
}

/// Classify a value against the thresholds for its kind
pub fn indicator(value: f64, kind: StatKind) -> Indicator {
    let t = thresholds(kind);

    if value >= t.good {
        Indicator::Good
    } else if value >= t.average {
        Indicator::Average
    } else {
        Indicator::Bad
    }
}

/// Lenient display-value parser; accepts "," as the decimal separator
pub fn format_stat_value(value: &str) -> f64 {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let cleaned = cleaned.replacen(',', ".", 1);

    // Longest parseable prefix, e.g. "1.05.2" -> 1.05
    (1..=cleaned.len())
        .rev()
        .find_map(|end| cleaned.get(..end).and_then(|s| s.parse::<f64>().ok()))
        .unwrap_or(0.0)
}

/// Hourly precipitation severity tiers.
///
/// Bands follow the JMA rainfall intensity terms (雨の強さと降り方) with an
/// extra two lower bands for light rain. Lower bounds are inclusive and the
/// table is ordered from the heaviest tier down, so the first match wins.

/// Reportable severity, in descending order of intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Torrential,
    VeryHeavy,
    Heavy,
    Strong,
    ModeratelyStrong,
    Steady,
    UmbrellaAdvised,
    Drizzle,
}

/// (inclusive lower bound in mm/h, tier), heaviest first.
pub const SEVERITY_TABLE: [(f64, Severity); 8] = [
    (80.0, Severity::Torrential),
    (50.0, Severity::VeryHeavy),
    (30.0, Severity::Heavy),
    (20.0, Severity::Strong),
    (10.0, Severity::ModeratelyStrong),
    (5.0, Severity::Steady),
    (2.0, Severity::UmbrellaAdvised),
    (1.0, Severity::Drizzle),
];

impl Severity {
    /// Maps an hourly amount to its tier.
    ///
    /// Returns `None` below 1 mm/h: nothing worth reporting.
    pub fn classify(amount_mm: f64) -> Option<Severity> {
        SEVERITY_TABLE
            .iter()
            .find(|(lower_bound, _)| amount_mm >= *lower_bound)
            .map(|(_, severity)| *severity)
    }

    /// Inclusive lower bound of this tier in mm/h.
    pub fn lower_bound_mm(self) -> f64 {
        match self {
            Severity::Torrential => 80.0,
            Severity::VeryHeavy => 50.0,
            Severity::Heavy => 30.0,
            Severity::Strong => 20.0,
            Severity::ModeratelyStrong => 10.0,
            Severity::Steady => 5.0,
            Severity::UmbrellaAdvised => 2.0,
            Severity::Drizzle => 1.0,
        }
    }

    /// Phrase appended to the notification.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Torrential => "猛烈な雨です!",
            Severity::VeryHeavy => "非常に激しい雨が降ります",
            Severity::Heavy => "激しい雨が降ります",
            Severity::Strong => "強い雨が降ります",
            Severity::ModeratelyStrong => "やや強い雨が降ります",
            Severity::Steady => "やや本降りと言えます",
            Severity::UmbrellaAdvised => "傘が必要になるかもしれません",
            Severity::Drizzle => "シトシトとした雨が降ります",
        }
    }

    /// English description, used in log lines.
    pub fn description(self) -> &'static str {
        match self {
            Severity::Torrential => "torrential rain",
            Severity::VeryHeavy => "very heavy rain",
            Severity::Heavy => "heavy rain",
            Severity::Strong => "strong rain",
            Severity::ModeratelyStrong => "moderately strong rain",
            Severity::Steady => "steady rain",
            Severity::UmbrellaAdvised => "umbrella may be needed",
            Severity::Drizzle => "light drizzle",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

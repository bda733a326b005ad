//! Pure water-quality computations: quality classification from (pH, TDS)
//! and mineral composition estimates from (TDS, region).

/// Estimated mineral concentrations in mg/L, derived from TDS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MineralEstimate {
    pub calcium: f64,
    pub magnesium: f64,
    pub sodium: f64,
    pub potassium: f64,
    pub sulphate: f64,
    pub chloride: f64,
}

/// Per-region TDS fractions in the order (ca, mg, na, k, so4, cl).
/// Each fraction is applied to TDS independently; they are not
/// constrained to sum to 1.
fn region_fractions(region: &str) -> [f64; 6] {
    match region {
        "groundwater" => [0.25, 0.08, 0.12, 0.03, 0.20, 0.15],
        "urban" => [0.20, 0.06, 0.18, 0.02, 0.22, 0.20],
        "industrial" => [0.15, 0.05, 0.25, 0.03, 0.25, 0.22],
        "coastal" => [0.10, 0.05, 0.30, 0.02, 0.20, 0.25],
        _ => [0.20, 0.07, 0.15, 0.03, 0.22, 0.18],
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Classifies water quality into one of three fixed labels, with a
/// human-readable message. Total over all real inputs. pH 6.5 and 8.5
/// are inside the excellent band; TDS 500 falls to moderate and
/// TDS 1000 to poor.
pub fn analyze_water(ph: f64, tds: f64) -> (&'static str, &'static str) {
    if (6.5..=8.5).contains(&ph) && tds < 500.0 {
        (
            "Excellent - Safe for Drinking",
            "Water meets WHO standards.",
        )
    } else if tds < 1000.0 {
        (
            "Moderate - Suitable for Domestic Use",
            "Safe for domestic use but not ideal for drinking.",
        )
    } else {
        (
            "Poor - Unsafe",
            "High dissolved solids detected; purification required.",
        )
    }
}

/// Estimates mineral composition by scaling TDS with the region's
/// fraction table, rounding each value to 2 decimal places. Unknown
/// regions fall back to a default fraction set.
pub fn estimate_minerals(tds: f64, region: &str) -> MineralEstimate {
    let [ca, mg, na, k, so4, cl] = region_fractions(region);

    MineralEstimate {
        calcium: round2(tds * ca),
        magnesium: round2(tds * mg),
        sodium: round2(tds * na),
        potassium: round2(tds * k),
        sulphate: round2(tds * so4),
        chloride: round2(tds * cl),
    }
}

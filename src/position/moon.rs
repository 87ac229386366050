// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunar coordinates and phase.
//!
//! Truncated ELP-2000/82 series as tabulated in Meeus ch. 47: the twenty
//! largest terms of tables 47.A and 47.B plus the additive A1–A3 terms. The
//! omitted terms are each below 8″, giving a few arc-minutes overall.

use super::coords::{Ecliptic, Nutation};
use crate::math::{atan2_deg, cos_deg, normalize_degrees, sin_deg};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Multipliers of (D, M, M′, F) with the Σl (1e-6 deg) and Σr (1e-3 km) coefficients.
#[rustfmt::skip]
const TERMS_LR: [(i8, i8, i8, i8, f64, f64); 20] = [
    (0,  0,  1,  0, 6_288_774.0, -20_905_355.0),
    (2,  0, -1,  0, 1_274_027.0,  -3_699_111.0),
    (2,  0,  0,  0,   658_314.0,  -2_955_968.0),
    (0,  0,  2,  0,   213_618.0,    -569_925.0),
    (0,  1,  0,  0,  -185_116.0,      48_888.0),
    (0,  0,  0,  2,  -114_332.0,      -3_149.0),
    (2,  0, -2,  0,    58_793.0,     246_158.0),
    (2, -1, -1,  0,    57_066.0,    -152_138.0),
    (2,  0,  1,  0,    53_322.0,    -170_733.0),
    (2, -1,  0,  0,    45_758.0,    -204_586.0),
    (0,  1, -1,  0,   -40_923.0,    -129_620.0),
    (1,  0,  0,  0,   -34_720.0,     108_743.0),
    (0,  1,  1,  0,   -30_383.0,     104_755.0),
    (2,  0,  0, -2,    15_327.0,      10_321.0),
    (0,  0,  1,  2,   -12_528.0,           0.0),
    (0,  0,  1, -2,    10_980.0,      79_661.0),
    (4,  0, -1,  0,    10_675.0,     -34_782.0),
    (0,  0,  3,  0,    10_034.0,     -23_210.0),
    (4,  0, -2,  0,     8_548.0,     -21_636.0),
    (2,  1, -1,  0,    -7_888.0,      24_208.0),
];

/// Multipliers of (D, M, M′, F) with the Σb coefficient (1e-6 deg).
#[rustfmt::skip]
const TERMS_B: [(i8, i8, i8, i8, f64); 20] = [
    (0,  0,  0,  1, 5_128_122.0),
    (0,  0,  1,  1,   280_602.0),
    (0,  0,  1, -1,   277_693.0),
    (2,  0,  0, -1,   173_237.0),
    (2,  0, -1,  1,    55_413.0),
    (2,  0, -1, -1,    46_271.0),
    (2,  0,  0,  1,    32_573.0),
    (0,  0,  2,  1,    17_198.0),
    (2,  0,  1, -1,     9_266.0),
    (0,  0,  2, -1,     8_822.0),
    (2, -1,  0, -1,     8_216.0),
    (2,  0, -2, -1,     4_324.0),
    (2,  0,  1,  1,     4_200.0),
    (2,  1,  0, -1,    -3_359.0),
    (2, -1, -1,  1,     2_463.0),
    (2, -1,  0,  1,     2_211.0),
    (2, -1, -1, -1,     2_065.0),
    (0,  1, -1, -1,    -1_870.0),
    (4,  0, -1, -1,     1_828.0),
    (0,  1,  0,  1,    -1_794.0),
];

/// Fundamental arguments, degrees.
struct Arguments {
    /// Mean longitude L′.
    l: f64,
    /// Mean elongation D.
    d: f64,
    /// Sun's mean anomaly M.
    m: f64,
    /// Moon's mean anomaly M′.
    mp: f64,
    /// Argument of latitude F.
    f: f64,
    /// Eccentricity factor E.
    e: f64,
}

impl Arguments {
    fn at(t: f64) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;
        Self {
            l: normalize_degrees(
                218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
                    - t4 / 65_194_000.0,
            ),
            d: normalize_degrees(
                297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
                    - t4 / 113_065_000.0,
            ),
            m: normalize_degrees(
                357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0,
            ),
            mp: normalize_degrees(
                134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
                    - t4 / 14_712_000.0,
            ),
            f: normalize_degrees(
                93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
                    + t4 / 863_310_000.0,
            ),
            e: 1.0 - 0.002_516 * t - 0.000_007_4 * t2,
        }
    }

    /// Argument and eccentricity weight of one periodic term.
    #[inline]
    fn term(&self, d: i8, m: i8, mp: i8, f: i8) -> (f64, f64) {
        let arg = f64::from(d) * self.d + f64::from(m) * self.m + f64::from(mp) * self.mp
            + f64::from(f) * self.f;
        let weight = match m.abs() {
            1 => self.e,
            2 => self.e * self.e,
            _ => 1.0,
        };
        (arg, weight)
    }
}

/// Apparent geocentric ecliptic coordinates of the Moon.
///
/// `t` is Julian centuries (TT) since J2000.0.
pub(crate) fn moon_ecliptic(t: f64, nutation: &Nutation) -> Ecliptic {
    let a = Arguments::at(t);

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &(d, m, mp, f, cl, cr) in &TERMS_LR {
        let (arg, w) = a.term(d, m, mp, f);
        sum_l += cl * w * sin_deg(arg);
        sum_r += cr * w * cos_deg(arg);
    }

    let mut sum_b = 0.0;
    for &(d, m, mp, f, cb) in &TERMS_B {
        let (arg, w) = a.term(d, m, mp, f);
        sum_b += cb * w * sin_deg(arg);
    }

    // Venus, Jupiter and flattening terms.
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let a3 = 313.45 + 481_266.484 * t;
    sum_l += 3_958.0 * sin_deg(a1) + 1_962.0 * sin_deg(a.l - a.f) + 318.0 * sin_deg(a2);
    sum_b += -2_235.0 * sin_deg(a.l)
        + 382.0 * sin_deg(a3)
        + 175.0 * sin_deg(a1 - a.f)
        + 175.0 * sin_deg(a1 + a.f)
        + 127.0 * sin_deg(a.l - a.mp)
        - 115.0 * sin_deg(a.l + a.mp);

    Ecliptic {
        longitude_deg: normalize_degrees(a.l + sum_l / 1_000_000.0 + nutation.longitude_deg),
        latitude_deg: sum_b / 1_000_000.0,
        distance_km: 385_000.56 + sum_r / 1_000.0,
    }
}

/// Named lunar phase, by elongation from the Sun in 45° sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Sector containing an elongation in degrees.
    pub fn from_elongation(elongation_deg: f64) -> Self {
        const ORDER: [MoonPhase; 8] = [
            MoonPhase::New,
            MoonPhase::WaxingCrescent,
            MoonPhase::FirstQuarter,
            MoonPhase::WaxingGibbous,
            MoonPhase::Full,
            MoonPhase::WaningGibbous,
            MoonPhase::LastQuarter,
            MoonPhase::WaningCrescent,
        ];
        let sector = (normalize_degrees(elongation_deg + 22.5) / 45.0) as usize;
        ORDER[sector.min(7)]
    }

    pub fn is_waxing(self) -> bool {
        matches!(
            self,
            Self::WaxingCrescent | Self::FirstQuarter | Self::WaxingGibbous
        )
    }
}

/// Illumination state of the Moon.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunarPhase {
    /// Sun–Moon–Earth angle; 0 at full, 180 at new.
    pub phase_angle_deg: f64,
    /// Fraction of the disc lit, `[0, 1]`.
    pub illuminated_fraction: f64,
    /// Moon minus Sun ecliptic longitude, `[0, 360)`; < 180 while waxing.
    pub elongation_deg: f64,
    pub name: MoonPhase,
}

/// Phase from the two bodies' apparent ecliptic coordinates (Meeus ch. 48).
pub(crate) fn lunar_phase(moon: &Ecliptic, sun: &Ecliptic) -> LunarPhase {
    let elongation = normalize_degrees(moon.longitude_deg - sun.longitude_deg);
    let cos_psi = cos_deg(moon.latitude_deg) * cos_deg(elongation);
    let psi = cos_psi.clamp(-1.0, 1.0).acos().to_degrees();

    let phase_angle = atan2_deg(
        sun.distance_km * sin_deg(psi),
        moon.distance_km - sun.distance_km * cos_psi,
    );
    let illuminated_fraction = ((1.0 + cos_deg(phase_angle)) / 2.0).clamp(0.0, 1.0);

    LunarPhase {
        phase_angle_deg: phase_angle,
        illuminated_fraction,
        elongation_deg: elongation,
        name: MoonPhase::from_elongation(elongation),
    }
}

#[cfg(test)]
mod tests {
    use super::super::coords::nutation;
    use super::super::sun::sun_ecliptic;
    use super::*;

    fn centuries(jd: f64) -> f64 {
        (jd - 2_451_545.0) / 36_525.0
    }

    #[test]
    fn meeus_example_47a() {
        // 1992-04-12 0h TD: λ = 133.162655°, β = −3.229126°, Δ = 368409.7 km.
        let t = centuries(2_448_724.5);
        let moon = moon_ecliptic(t, &nutation(t));
        assert!((moon.longitude_deg - 133.162_655).abs() < 0.1, "λ = {}", moon.longitude_deg);
        assert!((moon.latitude_deg + 3.229_126).abs() < 0.06, "β = {}", moon.latitude_deg);
        assert!((moon.distance_km - 368_409.7).abs() < 1_000.0, "Δ = {}", moon.distance_km);
    }

    #[test]
    fn full_moon_is_fully_lit() {
        // 2024-04-23 23:49 UT full moon.
        let t = centuries(2_460_424.492);
        let n = nutation(t);
        let phase = lunar_phase(&moon_ecliptic(t, &n), &sun_ecliptic(t, &n));
        assert!(phase.illuminated_fraction > 0.98, "k = {}", phase.illuminated_fraction);
        assert_eq!(phase.name, MoonPhase::Full);
    }

    #[test]
    fn new_moon_is_dark() {
        // 2024-04-08 18:21 UT new moon (total solar eclipse).
        let t = centuries(2_460_409.264);
        let n = nutation(t);
        let phase = lunar_phase(&moon_ecliptic(t, &n), &sun_ecliptic(t, &n));
        assert!(phase.illuminated_fraction < 0.01, "k = {}", phase.illuminated_fraction);
        assert_eq!(phase.name, MoonPhase::New);
    }

    #[test]
    fn first_quarter_is_half_lit_and_waxing() {
        // 2024-04-15 19:13 UT first quarter.
        let t = centuries(2_460_416.301);
        let n = nutation(t);
        let phase = lunar_phase(&moon_ecliptic(t, &n), &sun_ecliptic(t, &n));
        assert!((phase.illuminated_fraction - 0.5).abs() < 0.05);
        assert_eq!(phase.name, MoonPhase::FirstQuarter);
        assert!(phase.name.is_waxing());
    }

    #[test]
    fn phase_sectors() {
        assert_eq!(MoonPhase::from_elongation(0.0), MoonPhase::New);
        assert_eq!(MoonPhase::from_elongation(350.0), MoonPhase::New);
        assert_eq!(MoonPhase::from_elongation(45.0), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::from_elongation(180.0), MoonPhase::Full);
        assert_eq!(MoonPhase::from_elongation(270.0), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::from_elongation(320.0), MoonPhase::WaningCrescent);
        assert!(!MoonPhase::WaningGibbous.is_waxing());
    }
}

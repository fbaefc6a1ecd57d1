//! Market maturity classification and the technology risk premium.
//!
//! A technology's premium in a country depends on how far its deployment has
//! progressed there: immature markets carry the full premium, mature markets
//! the floor premium, and in between the premium is linearly interpolated
//! across the intermediate band.

use crate::types::{MaturityTier, Pct, Technology};
use crate::FincoreResult;

use super::Calculator;

impl Calculator {
    /// Classify a market and derive the technology premium.
    ///
    /// Missing penetration is treated as zero deployment. An explicit
    /// maturity override from the caller takes precedence over the
    /// penetration-derived tier; the interpolated intermediate premium is
    /// still computed from the penetration value.
    ///
    /// Technologies outside the solar/wind baseline additionally carry their
    /// flat relative premium vs. solar.
    pub fn maturity_and_premium(
        &self,
        technology: &Technology,
        penetration: Option<Pct>,
        maturity_override: Option<MaturityTier>,
    ) -> FincoreResult<(MaturityTier, Pct)> {
        let profile = if self.is_strict() {
            self.profiles().get_strict(technology)?
        } else {
            self.profiles().get(technology)
        };

        let penetration = penetration.unwrap_or(Pct::ZERO);

        let tier = if penetration > profile.mature_threshold {
            MaturityTier::Mature
        } else if penetration > profile.intermediate_threshold {
            MaturityTier::Intermediate
        } else {
            MaturityTier::Immature
        };
        let tier = maturity_override.unwrap_or(tier);

        let mut premium = match tier {
            MaturityTier::Mature => profile.mature_premium,
            MaturityTier::Immature => profile.immature_premium,
            MaturityTier::Intermediate => {
                profile.immature_premium
                    + (profile.mature_premium - profile.immature_premium)
                        * (penetration - profile.intermediate_threshold)
                        / (profile.mature_threshold - profile.intermediate_threshold)
            }
        };

        if technology.carries_relative_premium() {
            premium += profile.relative_premium;
        }

        Ok((tier, premium))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{TechnologyProfile, TechnologyProfiles};
    use rust_decimal_macros::dec;

    fn calculator() -> Calculator {
        let solar = TechnologyProfile {
            intermediate_threshold: dec!(5),
            mature_threshold: dec!(20),
            immature_premium: dec!(3),
            intermediate_premium: dec!(2),
            mature_premium: dec!(1),
            relative_premium: dec!(0),
        };
        let fallback = TechnologyProfile {
            intermediate_threshold: dec!(2),
            mature_threshold: dec!(10),
            immature_premium: dec!(4),
            intermediate_premium: dec!(3),
            mature_premium: dec!(2),
            relative_premium: dec!(1.5),
        };
        let profiles =
            TechnologyProfiles::new(vec![(Technology::SolarPv, solar)], fallback).unwrap();
        Calculator::new(profiles)
    }

    #[test]
    fn test_classification_boundaries() {
        let calc = calculator();

        // At the threshold is not above it
        let (tier, _) = calc
            .maturity_and_premium(&Technology::SolarPv, Some(dec!(5)), None)
            .unwrap();
        assert_eq!(tier, MaturityTier::Immature);

        let (tier, _) = calc
            .maturity_and_premium(&Technology::SolarPv, Some(dec!(5.01)), None)
            .unwrap();
        assert_eq!(tier, MaturityTier::Intermediate);

        let (tier, _) = calc
            .maturity_and_premium(&Technology::SolarPv, Some(dec!(20)), None)
            .unwrap();
        assert_eq!(tier, MaturityTier::Intermediate);

        let (tier, _) = calc
            .maturity_and_premium(&Technology::SolarPv, Some(dec!(20.5)), None)
            .unwrap();
        assert_eq!(tier, MaturityTier::Mature);
    }

    #[test]
    fn test_tier_premiums() {
        let calc = calculator();

        let (_, premium) = calc
            .maturity_and_premium(&Technology::SolarPv, Some(dec!(1)), None)
            .unwrap();
        assert_eq!(premium, dec!(3));

        let (_, premium) = calc
            .maturity_and_premium(&Technology::SolarPv, Some(dec!(25)), None)
            .unwrap();
        assert_eq!(premium, dec!(1));

        // Midpoint of the band: 3 + (1-3)*(12.5-5)/(20-5) = 3 - 1 = 2
        let (_, premium) = calc
            .maturity_and_premium(&Technology::SolarPv, Some(dec!(12.5)), None)
            .unwrap();
        assert_eq!(premium, dec!(2));
    }

    #[test]
    fn test_premium_non_increasing_in_penetration() {
        let calc = calculator();
        let mut last = None;
        for pen in 0..40 {
            let (_, premium) = calc
                .maturity_and_premium(&Technology::SolarPv, Some(Pct::from(pen)), None)
                .unwrap();
            if let Some(prev) = last {
                assert!(
                    premium <= prev,
                    "premium rose from {prev} to {premium} at penetration {pen}"
                );
            }
            last = Some(premium);
        }
    }

    #[test]
    fn test_missing_penetration_is_immature() {
        let calc = calculator();
        let (tier, premium) = calc
            .maturity_and_premium(&Technology::SolarPv, None, None)
            .unwrap();
        assert_eq!(tier, MaturityTier::Immature);
        assert_eq!(premium, dec!(3));
    }

    #[test]
    fn test_override_takes_precedence() {
        let calc = calculator();
        let (tier, premium) = calc
            .maturity_and_premium(
                &Technology::SolarPv,
                Some(dec!(1)),
                Some(MaturityTier::Mature),
            )
            .unwrap();
        assert_eq!(tier, MaturityTier::Mature);
        assert_eq!(premium, dec!(1));
    }

    #[test]
    fn test_relative_premium_added_outside_baseline() {
        let calc = calculator();

        // Wave falls back to the generic profile: immature 4 + relative 1.5
        let (_, premium) = calc
            .maturity_and_premium(&Technology::Wave, Some(dec!(0)), None)
            .unwrap();
        assert_eq!(premium, dec!(5.5));
    }

    #[test]
    fn test_strict_mode_rejects_unknown_technology() {
        let calc = calculator().strict();
        let result = calc.maturity_and_premium(&Technology::Wave, Some(dec!(0)), None);
        assert!(matches!(
            result,
            Err(crate::FincoreError::UnknownTechnology(_))
        ));
    }
}

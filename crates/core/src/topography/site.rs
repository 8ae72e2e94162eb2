//! Shared capability for anything that can go under water

use super::landmarks::Landmark;
use super::structures::Structure;
use crate::core_types::{LonLat, Meters};

/// Elevation-bearing, riskable location
pub trait Submersible {
    /// Display name
    fn name(&self) -> &str;

    /// Ground, deck or floor elevation above mean sea level
    fn elevation_msl(&self) -> Meters;

    /// Intrinsic vulnerability multiplier in [0, 1]
    fn risk_factor(&self) -> f64;

    /// Location as (longitude, latitude)
    fn coordinates(&self) -> LonLat;

    /// Depth of water above this location, floored at zero
    fn submergence(&self, wse: Meters) -> Meters {
        (wse - self.elevation_msl()).non_negative()
    }
}

impl Submersible for Landmark {
    fn name(&self) -> &str {
        self.name
    }

    fn elevation_msl(&self) -> Meters {
        self.elevation_msl
    }

    fn risk_factor(&self) -> f64 {
        self.risk_factor
    }

    fn coordinates(&self) -> LonLat {
        self.coordinates
    }
}

impl Submersible for Structure {
    fn name(&self) -> &str {
        self.name
    }

    fn elevation_msl(&self) -> Meters {
        self.elevation_msl
    }

    /// Structures carry no surveyed vulnerability; treat them as fully exposed
    fn risk_factor(&self) -> f64 {
        1.0
    }

    fn coordinates(&self) -> LonLat {
        self.coordinates
    }
}

/// Closed set of tracked locations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Site<'a> {
    /// Registry landmark with category and risk factor
    Landmark(&'a Landmark),
    /// Bridge or shelter
    Structure(&'a Structure),
}

impl Site<'_> {
    fn inner(&self) -> &dyn Submersible {
        match self {
            Site::Landmark(l) => *l,
            Site::Structure(s) => *s,
        }
    }
}

impl Submersible for Site<'_> {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn elevation_msl(&self) -> Meters {
        self.inner().elevation_msl()
    }

    fn risk_factor(&self) -> f64 {
        self.inner().risk_factor()
    }

    fn coordinates(&self) -> LonLat {
        self.inner().coordinates()
    }
}

/// Lowest elevation among `sites` that is still dry at `wse`
///
/// Returns `None` when every site is already under water.
pub fn lowest_dry_elevation<'a, I>(sites: I, wse: Meters) -> Option<Meters>
where
    I: IntoIterator<Item = Site<'a>>,
{
    sites
        .into_iter()
        .map(|s| s.elevation_msl())
        .filter(|&e| e >= wse)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topography::{BRIDGES, NASHIK_TOPOGRAPHY};

    #[test]
    fn test_submergence_floors_at_zero() {
        let ram_kund = &NASHIK_TOPOGRAPHY[0];
        assert_eq!(ram_kund.submergence(Meters::new(590.0)), Meters::ZERO);
        assert!((*ram_kund.submergence(Meters::new(593.5)) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_site_dispatch() {
        let site = Site::Structure(&BRIDGES[1]);
        assert_eq!(site.name(), "Victoria Bridge");
        assert_eq!(site.risk_factor(), 1.0);

        let site = Site::Landmark(&NASHIK_TOPOGRAPHY[8]);
        assert_eq!(site.risk_factor(), 0.0);
    }

    #[test]
    fn test_lowest_dry_elevation() {
        let sites = NASHIK_TOPOGRAPHY
            .iter()
            .map(Site::Landmark)
            .chain(BRIDGES.iter().map(Site::Structure));
        // Tapovan (590.1) is the lowest location above the base level
        assert_eq!(lowest_dry_elevation(sites, Meters::new(590.0)), Some(Meters::new(590.1)));

        let sites = NASHIK_TOPOGRAPHY.iter().map(Site::Landmark);
        assert_eq!(lowest_dry_elevation(sites, Meters::new(700.0)), None);
    }
}

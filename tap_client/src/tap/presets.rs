//! Public TAP services with known endpoints.

use std::ops::Deref;

use super::service::TapService;

pub const VIZIER_HOST: &str = "tapvizier.u-strasbg.fr";
pub const VIZIER_PATH: &str = "/TAPVizieR/tap";
pub const GAIA_HOST: &str = "gea.esac.esa.int";
pub const GAIA_PATH: &str = "/tap-server/tap";

/// TAPVizieR, the CDS TAP service.
pub fn tap_vizier() -> TapService {
    TapService::new(VIZIER_HOST, VIZIER_PATH).with_port(80)
}

/// ESA Gaia archive TAP service.
pub fn gaia_archive() -> TapService {
    TapService::new(GAIA_HOST, GAIA_PATH).with_port(80)
}

/// [`tap_vizier`] as a type of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct TapVizieR(TapService);

impl TapVizieR {
    pub fn new() -> Self {
        Self(tap_vizier())
    }

    pub fn into_service(self) -> TapService {
        self.0
    }
}

impl Default for TapVizieR {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for TapVizieR {
    type Target = TapService;

    fn deref(&self) -> &TapService {
        &self.0
    }
}

/// [`gaia_archive`] as a type of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct GaiaArchive(TapService);

impl GaiaArchive {
    pub fn new() -> Self {
        Self(gaia_archive())
    }

    pub fn into_service(self) -> TapService {
        self.0
    }
}

impl Default for GaiaArchive {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for GaiaArchive {
    type Target = TapService;

    fn deref(&self) -> &TapService {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vizier() {
        let vizier = TapVizieR::new();
        assert_eq!(vizier.host(), "tapvizier.u-strasbg.fr");
        assert_eq!(vizier.path(), "/TAPVizieR/tap");
        assert_eq!(vizier.port(), 80);
        assert_eq!(
            vizier.tap_endpoint(),
            "http://tapvizier.u-strasbg.fr/TAPVizieR/tap"
        );
    }

    #[test]
    fn test_gaia() {
        let gaia = GaiaArchive::default();
        assert_eq!(gaia.tap_endpoint(), "http://gea.esac.esa.int/tap-server/tap");
        assert_eq!(gaia.into_service(), gaia_archive());
    }
}

//! Object name resolution through the CDS Sesame service.
//!
//! Sesame queries several name resolvers (Simbad, NED, VizieR) and answers
//! with an XML document holding one `Resolver` entry per resolver that knew
//! the name. The coordinates of the first entry are used.

use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::{TapError, TapResult};
use crate::http::{build_client, get_text};

/// ICRS position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyPosition {
    pub ra_deg: f64,
    pub dec_deg: f64,
}

/// Client for the Sesame name resolver.
#[derive(Debug, Clone)]
pub struct SesameResolver {
    config: ClientConfig,
}

impl SesameResolver {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Request URL for `object_name`, percent-encoded into the query string.
    pub fn url_for(&self, object_name: &str) -> TapResult<Url> {
        let mut url = Url::parse(&self.config.services.sesame_url).map_err(|e| {
            TapError::Configuration(format!(
                "Invalid Sesame URL '{}': {}",
                self.config.services.sesame_url, e
            ))
        })?;
        url.set_query(Some(object_name));
        Ok(url)
    }

    /// Resolve an object name to coordinates.
    ///
    /// # Returns
    /// * `Ok(Some(position))` - first resolver's J2000 coordinates
    /// * `Ok(None)` - no resolver knows the name
    ///
    /// # Errors
    /// Transport failures and malformed answers are returned as is; there
    /// is no retry.
    pub fn resolve(&self, object_name: &str) -> TapResult<Option<SkyPosition>> {
        let url = self.url_for(object_name)?;
        let client = build_client(&self.config)?;
        let body = get_text(&client, url.as_str())?;

        let position = parse_sesame(&body)?;
        match &position {
            Some(p) => debug!("Resolved '{}' to ({}, {})", object_name, p.ra_deg, p.dec_deg),
            None => debug!("Sesame could not resolve '{}'", object_name),
        }
        Ok(position)
    }
}

impl Default for SesameResolver {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

/// Resolve an object name with the default Sesame endpoint.
///
/// # Example
/// ```no_run
/// let m31 = tap_client::resolve("M31")?;
/// assert!(m31.is_some());
/// # Ok::<(), tap_client::TapError>(())
/// ```
pub fn resolve(object_name: &str) -> TapResult<Option<SkyPosition>> {
    SesameResolver::default().resolve(object_name)
}

/// Extract `/Sesame/Target/Resolver[1]/{jradeg,jdedeg}` from a Sesame answer.
pub fn parse_sesame(xml: &str) -> TapResult<Option<SkyPosition>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut in_resolver = false;
    let mut found_resolver = false;
    let mut ra: Option<String> = None;
    let mut dec: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if name == "Resolver" && !found_resolver && path == ["Sesame", "Target"] {
                    in_resolver = true;
                    found_resolver = true;
                }
                path.push(name);
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"Resolver"
                    && !found_resolver
                    && path == ["Sesame", "Target"]
                {
                    found_resolver = true;
                }
            }
            Event::Text(e) if in_resolver && path.len() == 4 => {
                let text = e.unescape()?.trim().to_string();
                match path[3].as_str() {
                    "jradeg" if ra.is_none() => ra = Some(text),
                    "jdedeg" if dec.is_none() => dec = Some(text),
                    _ => {}
                }
            }
            Event::End(_) => {
                if path.pop().as_deref() == Some("Resolver") && in_resolver {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let Some(ra) = ra else {
        return Ok(None);
    };
    let dec = dec.ok_or_else(|| TapError::Xml("Sesame resolver has jradeg but no jdedeg".to_string()))?;

    let parse = |field: &str, value: &str| {
        value
            .parse::<f64>()
            .map_err(|_| TapError::Xml(format!("Invalid {} value '{}'", field, value)))
    };

    Ok(Some(SkyPosition {
        ra_deg: parse("jradeg", &ra)?,
        dec_deg: parse("jdedeg", &dec)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const M31: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Sesame xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<Target option="SNV">
  <name>M31</name>
  <!-- Q1 -->
  <Resolver name="S=Simbad (via url)">
    <INFO>from cache</INFO>
    <otype>AGN</otype>
    <jpos>00:42:44.33 +41:16:07.5</jpos>
    <jradeg>10.68470833</jradeg>
    <jdedeg>41.26875000</jdedeg>
    <oname>M  31</oname>
  </Resolver>
  <Resolver name="N=NED">
    <jradeg>10.68479</jradeg>
    <jdedeg>41.26906</jdedeg>
  </Resolver>
</Target>
</Sesame>"#;

    #[test]
    fn test_first_resolver_wins() {
        let position = parse_sesame(M31).unwrap().unwrap();
        assert_eq!(position.ra_deg, 10.68470833);
        assert_eq!(position.dec_deg, 41.26875);
    }

    #[test]
    fn test_no_resolver() {
        let xml = r#"<Sesame><Target option="SNV"><name>nothing-here</name>
  <INFO>*** Nothing found *** </INFO></Target></Sesame>"#;
        assert_eq!(parse_sesame(xml).unwrap(), None);
    }

    #[test]
    fn test_first_resolver_without_coordinates() {
        let xml = r#"<Sesame><Target><Resolver name="S=Simbad"><INFO>*** Nothing found ***</INFO></Resolver>
  <Resolver name="N=NED"><jradeg>1.0</jradeg><jdedeg>2.0</jdedeg></Resolver></Target></Sesame>"#;
        assert_eq!(parse_sesame(xml).unwrap(), None);
    }

    #[test]
    fn test_malformed_coordinates() {
        let xml = "<Sesame><Target><Resolver><jradeg>ten</jradeg><jdedeg>1</jdedeg></Resolver></Target></Sesame>";
        assert!(matches!(parse_sesame(xml), Err(TapError::Xml(_))));

        let xml = "<Sesame><Target><Resolver><jradeg>10</jradeg></Resolver></Target></Sesame>";
        assert!(matches!(parse_sesame(xml), Err(TapError::Xml(_))));
    }

    #[test]
    fn test_name_is_encoded() {
        let resolver = SesameResolver::default();
        let url = resolver.url_for("NGC 1976").unwrap();
        assert_eq!(
            url.as_str(),
            "http://cdsweb.u-strasbg.fr/cgi-bin/nph-sesame/-ox?NGC%201976"
        );
    }
}

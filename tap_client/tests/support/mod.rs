//! Shared fixtures for the mock-server integration tests.

#![allow(dead_code)]

use tap_client::{ClientConfig, TapService};

pub const HIPPARCOS_VOTABLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<VOTABLE version="1.3" xmlns="http://www.ivoa.net/xml/VOTable/v1.3">
  <RESOURCE type="results">
    <INFO name="QUERY_STATUS" value="OK"/>
    <TABLE>
      <FIELD name="HIP" datatype="int" ucd="meta.id;meta.main"/>
      <FIELD name="RAICRS" datatype="double" unit="deg" ucd="pos.eq.ra;meta.main"/>
      <FIELD name="DEICRS" datatype="double" unit="deg" ucd="pos.eq.dec;meta.main"/>
      <FIELD name="Vmag" datatype="float" unit="mag" ucd="phot.mag;em.opt.V"/>
      <DATA>
        <TABLEDATA>
          <TR><TD>1</TD><TD>0.00091185</TD><TD>1.08901332</TD><TD>9.10</TD></TR>
          <TR><TD>2</TD><TD>0.00379737</TD><TD>-19.49883745</TD><TD>9.27</TD></TR>
          <TR><TD>3</TD><TD>0.00500795</TD><TD>38.85928608</TD><TD>6.61</TD></TR>
        </TABLEDATA>
      </DATA>
    </TABLE>
  </RESOURCE>
</VOTABLE>"#;

pub const QUERY_ERROR_VOTABLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<VOTABLE version="1.3">
  <RESOURCE type="results">
    <INFO name="QUERY_STATUS" value="ERROR">Unknown table "I/239/nope"</INFO>
  </RESOURCE>
</VOTABLE>"#;

pub const ADQL: &str = "SELECT TOP 3 HIP, RAICRS, DEICRS, Vmag FROM \"I/239/hip_main\"";

/// UWS job document in the given phase.
pub fn job_document(job_id: &str, phase: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<uws:job xmlns:uws="http://www.ivoa.net/xml/UWS/v1.0">
  <uws:jobId>{}</uws:jobId>
  <uws:ownerId xsi:nil="true" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"/>
  <uws:phase>{}</uws:phase>
</uws:job>"#,
        job_id, phase
    )
}

/// TAP service at `{mock server}/tap`.
pub fn service_for(server: &mockito::Server) -> TapService {
    let host_with_port = server.host_with_port();
    let (host, port) = host_with_port
        .rsplit_once(':')
        .expect("mock server address has a port");
    TapService::new(host, "/tap")
        .with_port(port.parse().expect("numeric port"))
        .with_config(fast_config())
}

/// Configuration with a short polling interval for tests.
pub fn fast_config() -> ClientConfig {
    let mut config = ClientConfig::default();
    config.http.timeout_secs = 5;
    config.polling.interval_secs = 0.01;
    config
}

#[cfg(test)]
mod tests {
    use crate::votable::parser::{convert_cell, parse_votable};
    use crate::votable::table::{DataType, Field, Value};

    const GAIA_RESULT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<VOTABLE version="1.4" xmlns="http://www.ivoa.net/xml/VOTable/v1.3">
  <RESOURCE type="results">
    <INFO name="QUERY_STATUS" value="OK"/>
    <TABLE name="results">
      <FIELD name="source_id" datatype="long" ucd="meta.id;meta.main">
        <DESCRIPTION>Unique source identifier</DESCRIPTION>
      </FIELD>
      <FIELD name="ra" datatype="double" unit="deg" ucd="pos.eq.ra;meta.main"/>
      <FIELD name="dec" datatype="double" unit="deg" ucd="pos.eq.dec;meta.main"/>
      <FIELD name="phot_g_mean_mag" datatype="float" unit="mag"/>
      <FIELD name="designation" datatype="char" arraysize="*"/>
      <DATA>
        <TABLEDATA>
          <TR><TD>4295806720</TD><TD>44.99615</TD><TD>0.00524</TD><TD>17.64</TD><TD>Gaia DR3 4295806720</TD></TR>
          <TR><TD>34361129088</TD><TD>45.00432</TD><TD>0.02112</TD><TD/><TD>Gaia DR3 34361129088</TD></TR>
          <TR><TD>38655544960</TD><TD>45.00476</TD><TD>0.01988</TD><TD>NaN</TD><TD><![CDATA[Gaia DR3 <38655544960>]]></TD></TR>
        </TABLEDATA>
      </DATA>
    </TABLE>
  </RESOURCE>
</VOTABLE>"#;

    fn field(datatype: DataType, arraysize: Option<&str>) -> Field {
        Field {
            name: "col".to_string(),
            datatype,
            arraysize: arraysize.map(str::to_string),
            unit: None,
            ucd: None,
        }
    }

    /// Test parsing a typical TAP result document
    #[test]
    fn test_parse_gaia_result() {
        let table = parse_votable(GAIA_RESULT).expect("Should parse VOTable");

        assert_eq!(table.name.as_deref(), Some("results"));
        assert_eq!(
            table.column_names(),
            vec!["source_id", "ra", "dec", "phot_g_mean_mag", "designation"]
        );
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.fields[1].unit.as_deref(), Some("deg"));
        assert_eq!(table.fields[0].ucd.as_deref(), Some("meta.id;meta.main"));
        assert_eq!(table.query_status().map(|s| s.value.as_str()), Some("OK"));

        assert_eq!(table.rows[0][0], Value::Int(4295806720));
        assert_eq!(table.value(0, "ra").and_then(Value::as_f64), Some(44.99615));
        assert!(table.value(1, "phot_g_mean_mag").unwrap().is_null());
        assert!(table.value(2, "phot_g_mean_mag").unwrap().as_f64().unwrap().is_nan());
        assert_eq!(
            table.value(2, "designation").and_then(Value::as_str),
            Some("Gaia DR3 <38655544960>")
        );
    }

    /// Test that a service error document still parses and exposes the message
    #[test]
    fn test_parse_error_document() {
        let xml = r#"<VOTABLE version="1.3">
  <RESOURCE type="results">
    <INFO name="QUERY_STATUS" value="ERROR">Cannot parse query: unknown table &quot;foo&quot;</INFO>
  </RESOURCE>
</VOTABLE>"#;

        let table = parse_votable(xml).expect("Error documents are valid VOTables");
        assert_eq!(table.num_columns(), 0);
        assert_eq!(
            table.query_error().as_deref(),
            Some("Cannot parse query: unknown table \"foo\"")
        );
    }

    /// Test that HTML error pages are rejected
    #[test]
    fn test_reject_non_votable() {
        let err = parse_votable("<html><body>Service unavailable</body></html>").unwrap_err();
        assert!(err.contains("Not a VOTable"), "unexpected error: {}", err);

        assert!(parse_votable("").is_err());
    }

    /// Test that binary serialisations are reported as unsupported
    #[test]
    fn test_reject_binary_serialization() {
        let xml = r#"<VOTABLE><RESOURCE><TABLE>
  <FIELD name="x" datatype="int"/>
  <DATA><BINARY><STREAM encoding="base64">AAAAAQ==</STREAM></BINARY></DATA>
</TABLE></RESOURCE></VOTABLE>"#;

        let err = parse_votable(xml).unwrap_err();
        assert!(err.contains("BINARY"), "unexpected error: {}", err);
    }

    /// Test that extra cells are an error and missing cells become nulls
    #[test]
    fn test_row_width() {
        let short_row = r#"<VOTABLE><RESOURCE><TABLE>
  <FIELD name="a" datatype="int"/><FIELD name="b" datatype="int"/>
  <DATA><TABLEDATA><TR><TD>1</TD></TR></TABLEDATA></DATA>
</TABLE></RESOURCE></VOTABLE>"#;
        let table = parse_votable(short_row).unwrap();
        assert_eq!(table.rows[0], vec![Value::Int(1), Value::Null]);

        let long_row = r#"<VOTABLE><RESOURCE><TABLE>
  <FIELD name="a" datatype="int"/>
  <DATA><TABLEDATA><TR><TD>1</TD><TD>2</TD></TR></TABLEDATA></DATA>
</TABLE></RESOURCE></VOTABLE>"#;
        assert!(parse_votable(long_row).is_err());
    }

    /// Test that only the first table is read
    #[test]
    fn test_first_table_only() {
        let xml = r#"<VOTABLE>
  <RESOURCE><TABLE name="first"><FIELD name="a" datatype="short"/>
    <DATA><TABLEDATA><TR><TD>7</TD></TR></TABLEDATA></DATA></TABLE></RESOURCE>
  <RESOURCE><TABLE name="second"><FIELD name="b" datatype="short"/>
    <DATA><TABLEDATA><TR><TD>8</TD></TR><TR><TD>9</TD></TR></TABLEDATA></DATA></TABLE></RESOURCE>
</VOTABLE>"#;

        let table = parse_votable(xml).unwrap();
        assert_eq!(table.name.as_deref(), Some("first"));
        assert_eq!(table.column_names(), vec!["a"]);
        assert_eq!(table.rows, vec![vec![Value::Int(7)]]);
    }

    #[test]
    fn test_convert_cell_by_datatype() {
        let boolean = field(DataType::Boolean, None);
        assert_eq!(convert_cell(&boolean, "T"), Ok(Value::Bool(true)));
        assert_eq!(convert_cell(&boolean, "false"), Ok(Value::Bool(false)));
        assert_eq!(convert_cell(&boolean, "?"), Ok(Value::Null));
        assert!(convert_cell(&boolean, "maybe").is_err());

        let int = field(DataType::Int, None);
        assert_eq!(convert_cell(&int, " -42 "), Ok(Value::Int(-42)));
        assert_eq!(convert_cell(&int, ""), Ok(Value::Null));
        assert!(convert_cell(&int, "4.2").is_err());

        let double = field(DataType::Double, None);
        assert_eq!(convert_cell(&double, "1.5e3"), Ok(Value::Float(1500.0)));

        let vector = field(DataType::Double, Some("2"));
        assert_eq!(convert_cell(&vector, "1.0 2.0"), Ok(Value::Text("1.0 2.0".to_string())));

        let text = field(DataType::Char, Some("*"));
        assert_eq!(convert_cell(&text, "M 31"), Ok(Value::Text("M 31".to_string())));
    }

    /// Test that char cells keep their blanks and integers accept hex
    #[test]
    fn test_cell_text_preserved() {
        let xml = r#"<VOTABLE><RESOURCE><TABLE>
  <FIELD name="label" datatype="char" arraysize="*"/>
  <FIELD name="flags" datatype="int"/>
  <DATA><TABLEDATA>
    <TR><TD>  padded  </TD><TD>0x1F</TD></TR>
    <TR><TD>   </TD><TD> 12 </TD></TR>
  </TABLEDATA></DATA>
</TABLE></RESOURCE></VOTABLE>"#;

        let table = parse_votable(xml).unwrap();
        assert_eq!(
            table.rows[0],
            vec![Value::Text("  padded  ".to_string()), Value::Int(31)]
        );
        assert_eq!(
            table.rows[1],
            vec![Value::Text("   ".to_string()), Value::Int(12)]
        );
    }

    #[test]
    fn test_convert_hex_integers() {
        let long = field(DataType::Long, None);
        assert_eq!(convert_cell(&long, "0xff"), Ok(Value::Int(255)));
        assert_eq!(convert_cell(&long, "0X10"), Ok(Value::Int(16)));
        assert_eq!(convert_cell(&long, "0xFFFFFFFFFFFFFFFF"), Ok(Value::Int(-1)));
        assert!(convert_cell(&long, "0xZZ").is_err());
    }
}

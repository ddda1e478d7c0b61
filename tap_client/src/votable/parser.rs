use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

use super::table::{DataType, Field, Info, Value, VoTable};

/// Parse a VOTable document with TABLEDATA serialisation.
///
/// Only the first `TABLE` is read. `INFO` elements anywhere in the document
/// are collected so that a service error (`QUERY_STATUS=ERROR`) can be
/// reported even when no table is present.
///
/// Cell text is kept as written: `char` cells keep their surrounding
/// blanks, numeric cells are trimmed before conversion.
///
/// # Arguments
/// * `xml` - VOTable document text
///
/// # Returns
/// * `Ok(VoTable)` - Parsed table
/// * `Err(String)` - Description of what made the document unreadable
pub fn parse_votable(xml: &str) -> Result<VoTable, String> {
    let mut reader = Reader::from_str(xml);

    let mut table = VoTable::default();
    let mut seen_root = false;
    let mut tables_seen = 0usize;
    let mut in_first_table = false;

    let mut current_row: Option<Vec<Value>> = None;
    let mut cell: Option<String> = None;
    let mut info_content: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                let name = name.as_ref();
                if !seen_root {
                    check_root(name)?;
                    seen_root = true;
                    continue;
                }
                match name {
                    b"TABLE" => {
                        tables_seen += 1;
                        in_first_table = tables_seen == 1;
                        if in_first_table {
                            table.name = attributes(&e)?.remove("name");
                        }
                    }
                    b"FIELD" if in_first_table => table.fields.push(parse_field(&e)?),
                    b"INFO" => {
                        table.infos.push(parse_info(&e)?);
                        info_content = Some(String::new());
                    }
                    b"BINARY" | b"BINARY2" | b"FITS" if in_first_table => {
                        return Err(format!(
                            "Unsupported VOTable serialization: {}",
                            String::from_utf8_lossy(name)
                        ));
                    }
                    b"TR" if in_first_table => current_row = Some(Vec::with_capacity(table.fields.len())),
                    b"TD" if current_row.is_some() => cell = Some(String::new()),
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                let name = e.local_name();
                let name = name.as_ref();
                if !seen_root {
                    check_root(name)?;
                    seen_root = true;
                    continue;
                }
                match name {
                    b"FIELD" if in_first_table => table.fields.push(parse_field(&e)?),
                    b"INFO" => table.infos.push(parse_info(&e)?),
                    b"TD" => {
                        if let Some(row) = current_row.as_mut() {
                            row.push(Value::Null);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|e| format!("XML parse error: {}", e))?;
                if let Some(cell) = cell.as_mut() {
                    cell.push_str(&text);
                } else if let Some(content) = info_content.as_mut() {
                    content.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                let bytes = e.into_inner();
                let text = String::from_utf8_lossy(&bytes);
                if let Some(cell) = cell.as_mut() {
                    cell.push_str(&text);
                } else if let Some(content) = info_content.as_mut() {
                    content.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"TABLE" => in_first_table = false,
                b"INFO" => {
                    let content = info_content
                        .take()
                        .map(|c| c.trim().to_string())
                        .filter(|c| !c.is_empty());
                    if let Some(info) = table.infos.last_mut() {
                        info.content = content;
                    }
                }
                b"TD" => {
                    if let (Some(text), Some(row)) = (cell.take(), current_row.as_mut()) {
                        let field = table.fields.get(row.len()).ok_or_else(|| {
                            format!(
                                "Row {} has more cells than the {} declared fields",
                                table.rows.len(),
                                table.fields.len()
                            )
                        })?;
                        row.push(convert_cell(field, &text)?);
                    }
                }
                b"TR" => {
                    if let Some(mut row) = current_row.take() {
                        if row.len() > table.fields.len() {
                            return Err(format!(
                                "Row {} has {} cells for {} fields",
                                table.rows.len(),
                                row.len(),
                                table.fields.len()
                            ));
                        }
                        row.resize(table.fields.len(), Value::Null);
                        table.rows.push(row);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("XML parse error: {}", e)),
            _ => {}
        }
    }

    if !seen_root {
        return Err("Empty document".to_string());
    }

    if tables_seen > 1 {
        debug!("VOTable holds {} tables, only the first was read", tables_seen);
    }
    if table.is_overflow() {
        warn!("Service truncated the result at {} rows (QUERY_STATUS=OVERFLOW)", table.num_rows());
    }

    Ok(table)
}

fn check_root(name: &[u8]) -> Result<(), String> {
    if name == b"VOTABLE" {
        Ok(())
    } else {
        Err(format!(
            "Not a VOTable document (root element <{}>)",
            String::from_utf8_lossy(name)
        ))
    }
}

fn attributes(element: &BytesStart<'_>) -> Result<HashMap<String, String>, String> {
    let mut attrs = HashMap::new();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| format!("XML attribute error: {}", e))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| format!("XML attribute error: {}", e))?
            .to_string();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

fn parse_field(element: &BytesStart<'_>) -> Result<Field, String> {
    let mut attrs = attributes(element)?;
    let name = attrs
        .remove("name")
        .or_else(|| attrs.remove("ID"))
        .ok_or_else(|| "FIELD without name".to_string())?;
    let datatype = attrs
        .remove("datatype")
        .ok_or_else(|| format!("FIELD {} has no datatype", name))?
        .parse::<DataType>()?;

    Ok(Field {
        name,
        datatype,
        arraysize: attrs.remove("arraysize"),
        unit: attrs.remove("unit"),
        ucd: attrs.remove("ucd"),
    })
}

fn parse_info(element: &BytesStart<'_>) -> Result<Info, String> {
    let mut attrs = attributes(element)?;
    Ok(Info {
        name: attrs.remove("name").unwrap_or_default(),
        value: attrs.remove("value").unwrap_or_default(),
        content: None,
    })
}

/// Convert the text of a `TD` according to its field's datatype.
pub(crate) fn convert_cell(field: &Field, text: &str) -> Result<Value, String> {
    if field.datatype.is_text() {
        return Ok(if text.is_empty() {
            Value::Null
        } else {
            Value::Text(text.to_string())
        });
    }

    let text = text.trim();
    if text.is_empty() {
        return Ok(Value::Null);
    }
    if field.is_array() {
        return Ok(Value::Text(text.to_string()));
    }

    let invalid = |kind: &str| format!("Invalid {} value '{}' in column {}", kind, text, field.name);

    match field.datatype {
        DataType::Boolean => match text {
            "T" | "t" | "true" | "TRUE" | "1" => Ok(Value::Bool(true)),
            "F" | "f" | "false" | "FALSE" | "0" => Ok(Value::Bool(false)),
            "?" => Ok(Value::Null),
            _ => Err(invalid("boolean")),
        },
        DataType::Bit | DataType::UnsignedByte | DataType::Short | DataType::Int | DataType::Long => {
            parse_integer(text).map(Value::Int).ok_or_else(|| invalid("integer"))
        }
        DataType::Float | DataType::Double => {
            text.parse::<f64>().map(Value::Float).map_err(|_| invalid("floating-point"))
        }
        DataType::FloatComplex | DataType::DoubleComplex => Ok(Value::Text(text.to_string())),
        DataType::Char | DataType::UnicodeChar => Ok(Value::Text(text.to_string())),
    }
}

/// Decimal or `0x` hexadecimal integer. Hex digits give the bit pattern,
/// so `0xFFFFFFFFFFFFFFFF` is -1.
fn parse_integer(text: &str) -> Option<i64> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok().map(|bits| bits as i64),
        None => text.parse().ok(),
    }
}

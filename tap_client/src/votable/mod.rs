//! VOTable result tables.
//!
//! TAP services answer ADQL queries with VOTable documents. This module turns
//! the TABLEDATA serialisation of such a document into a [`VoTable`]: column
//! descriptions from the `FIELD` elements, typed cells from the `TD` elements
//! and the `INFO` elements carrying the query status.
//!
//! # Example
//!
//! ```
//! use tap_client::votable::parse_votable;
//!
//! let xml = r#"<VOTABLE><RESOURCE><TABLE>
//!   <FIELD name="ra" datatype="double" unit="deg"/>
//!   <DATA><TABLEDATA><TR><TD>10.68</TD></TR></TABLEDATA></DATA>
//! </TABLE></RESOURCE></VOTABLE>"#;
//!
//! let table = parse_votable(xml).unwrap();
//! assert_eq!(table.column_names(), vec!["ra"]);
//! assert_eq!(table.num_rows(), 1);
//! ```

pub mod parser;
pub mod table;

#[cfg(test)]
mod parser_tests;

pub use parser::parse_votable;
pub use table::{DataType, Field, Info, Value, VoTable};

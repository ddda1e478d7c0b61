//! ADQL text pretty-printed by the sqlformat.org service.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{NotebookDisplay, ToMarkdown};
use crate::config::ClientConfig;
use crate::error::{TapError, TapResult};
use crate::http::build_client;

/// Letter case applied by the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCase {
    Upper,
    Lower,
    Capitalize,
}

impl KeywordCase {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordCase::Upper => "upper",
            KeywordCase::Lower => "lower",
            KeywordCase::Capitalize => "capitalize",
        }
    }
}

/// Options sent along with the query text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatOptions {
    pub reindent: bool,
    pub keyword_case: Option<KeywordCase>,
    pub identifier_case: Option<KeywordCase>,
    pub strip_comments: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            reindent: false,
            keyword_case: Some(KeywordCase::Upper),
            identifier_case: None,
            strip_comments: false,
        }
    }
}

impl FormatOptions {
    fn form<'a>(&self, sql: &'a str) -> Vec<(&'static str, &'a str)> {
        let flag = |on: bool| if on { "1" } else { "0" };
        let mut form = vec![("sql", sql), ("reindent", flag(self.reindent))];
        if let Some(case) = self.keyword_case {
            form.push(("keyword_case", case.as_str()));
        }
        if let Some(case) = self.identifier_case {
            form.push(("identifier_case", case.as_str()));
        }
        if self.strip_comments {
            form.push(("strip_comments", "1"));
        }
        form
    }
}

#[derive(Debug, Deserialize)]
struct FormatResponse {
    result: String,
}

/// A query string that also renders well in a notebook.
///
/// The text is replaced by the formatter's output on construction and on
/// every [`QueryStr::parse_sql`]; formatting always starts from the text
/// the value was created with.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryStr {
    original: String,
    text: String,
    options: FormatOptions,
    config: ClientConfig,
}

impl QueryStr {
    /// Format `adql` with the default options and show it on `display`.
    pub fn new(adql: impl Into<String>, display: &dyn NotebookDisplay) -> TapResult<Self> {
        let query = Self::format_with(adql, ClientConfig::default(), FormatOptions::default())?;
        display.show(&query);
        Ok(query)
    }

    /// Format `adql` with the default options without showing it.
    pub fn quiet(adql: impl Into<String>) -> TapResult<Self> {
        Self::format_with(adql, ClientConfig::default(), FormatOptions::default())
    }

    /// Format `adql` against the configured formatter endpoint.
    pub fn format_with(
        adql: impl Into<String>,
        config: ClientConfig,
        options: FormatOptions,
    ) -> TapResult<Self> {
        let original = adql.into();
        let mut query = Self {
            text: original.clone(),
            original,
            options,
            config,
        };
        query.reformat()?;
        Ok(query)
    }

    /// Replace the options wholesale and reformat the original text in place.
    pub fn parse_sql(&mut self, options: FormatOptions) -> TapResult<&mut Self> {
        self.options = options;
        self.reformat()?;
        Ok(self)
    }

    fn reformat(&mut self) -> TapResult<()> {
        let url = &self.config.services.sqlformat_url;
        let client = build_client(&self.config)?;

        debug!("POST {}", url);
        let response = client.post(url).form(&self.options.form(&self.original)).send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(TapError::Formatter(format!(
                "formatter answered HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let reply: FormatResponse = serde_json::from_str(&body).map_err(|e| {
            TapError::Formatter(format!("unexpected formatter reply: {} ({})", e, body.trim()))
        })?;

        self.text = reply.result;
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Query text as originally given.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }
}

impl fmt::Display for QueryStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for QueryStr {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl ToMarkdown for QueryStr {
    fn to_markdown(&self) -> String {
        format!("*ADQL query*\n```mysql\n{}\n```", self.text)
    }
}

//! Locators: the `spooledfile:` URIs handed to the host
//!
//! A locator is the flat, externally visible form of a [`SpooledFileIdentity`]
//! plus transient [`OpenOptions`]:
//!
//! ```text
//! spooledfile:/owner/queue/name~jobName~jobUser~jobNumber~number.splf?readonly=true
//! ```
//!
//! Options live only in the query string. They are read back on every access
//! and never cached.
//!
//! Besides values containing `/`, `~` or `?`, a path segment that is exactly
//! `.` or `..` does not survive the URI text form: URI parsing resolves dot
//! segments, so the parsed path loses a segment and fails to decode.

use super::identity::{QualifiedJobName, SpooledFileIdentity, SEGMENT_SEPARATOR};
use crate::config::ConnectionConfig;
use crate::error::{FsError, Result};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::fmt;
use std::str::FromStr;
use url::{form_urlencoded, Url};

/// URI scheme the host routes to the spooled file provider
pub const SCHEME: &str = "spooledfile";

const READONLY_PARAM: &str = "readonly";
const FILTER_PARAM: &str = "filter";

/// Characters escaped when rendering the path part of a locator
const PATH_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Options chosen when a spooled file is opened
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OpenOptions {
    /// Open without write permission
    pub readonly: bool,
    /// Name of the object filter the file was opened from
    pub filter: Option<String>,
}

impl OpenOptions {
    pub fn readonly() -> Self {
        Self {
            readonly: true,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Serialize as a query string. `None` when there is nothing to carry.
    fn to_query(&self) -> Option<String> {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if self.readonly {
            serializer.append_pair(READONLY_PARAM, "true");
        }
        if let Some(filter) = &self.filter {
            serializer.append_pair(FILTER_PARAM, filter);
        }
        let query = serializer.finish();
        (!query.is_empty()).then_some(query)
    }

    /// Parse options out of a query string.
    ///
    /// `readonly` is set only for the exact value `true`; anything else,
    /// including a missing parameter, reads as `false`.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut options = Self::default();
        let Some(query) = query else {
            return options;
        };
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                READONLY_PARAM => options.readonly = value == "true",
                FILTER_PARAM if !value.is_empty() => options.filter = Some(value.into_owned()),
                _ => {}
            }
        }
        options
    }
}

/// Fields needed to fetch a spooled file's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedIdentity {
    pub name: String,
    pub qualified_job_name: QualifiedJobName,
    pub number: String,
}

/// A `spooledfile:` URI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    /// Decoded absolute path, always starting with `/`
    path: String,
    /// Raw (still form-encoded) query string
    query: Option<String>,
}

impl Locator {
    /// Build the locator for a spooled file identity
    pub fn encode(identity: &SpooledFileIdentity, options: Option<&OpenOptions>) -> Self {
        // An empty owner makes `to_path` start with `/`; that separator is data
        Self {
            path: format!("{SEGMENT_SEPARATOR}{}", identity.to_path()),
            query: options.and_then(OpenOptions::to_query),
        }
    }

    /// Build a locator from an already joined `owner/queue/key` path
    pub fn from_path(path: &str, options: Option<&OpenOptions>) -> Self {
        let path = path.strip_prefix(SEGMENT_SEPARATOR).unwrap_or(path);
        Self {
            path: format!("{SEGMENT_SEPARATOR}{path}"),
            query: options.and_then(OpenOptions::to_query),
        }
    }

    /// Parse a locator from its URI text
    pub fn parse(uri: &str) -> Result<Self> {
        let url = Url::parse(uri)?;
        Self::from_url(&url)
    }

    pub fn from_url(url: &Url) -> Result<Self> {
        if url.scheme() != SCHEME {
            return Err(FsError::InvalidScheme {
                found: url.scheme().to_string(),
            });
        }
        let path = percent_decode_str(url.path())
            .decode_utf8()
            .map_err(|e| FsError::malformed(url.path(), e.to_string()))?
            .into_owned();
        Ok(Self {
            path,
            query: url.query().filter(|q| !q.is_empty()).map(str::to_string),
        })
    }

    pub fn to_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.to_string())?)
    }

    /// Decoded path, starting with `/`
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The composite key segment (`name~jobName~...~number.splf`), if present
    pub fn key_segment(&self) -> Option<&str> {
        self.path.split(SEGMENT_SEPARATOR).nth(3)
    }

    /// Full identity encoded in the path
    pub fn identity(&self) -> Result<SpooledFileIdentity> {
        SpooledFileIdentity::from_path(&self.path)
    }

    /// Decode the fields the remote content API needs
    pub fn decode_identity(&self) -> Result<DecodedIdentity> {
        let identity = self.identity()?;
        Ok(DecodedIdentity {
            qualified_job_name: identity.qualified_job_name(),
            name: identity.name,
            number: identity.number,
        })
    }

    pub fn decode_options(&self) -> OpenOptions {
        OpenOptions::from_query(self.query())
    }

    /// Whether the host must treat this resource as read-only.
    ///
    /// Any one of these is enough: the connection's global read-only mode, the
    /// locator's own `readonly` option, or a protected originating filter.
    pub fn is_read_only(&self, config: Option<&ConnectionConfig>) -> bool {
        let options = self.decode_options();
        let Some(config) = config else {
            return options.readonly;
        };
        config.read_only_mode
            || options.readonly
            || config.is_protected_filter(options.filter.as_deref())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `scheme://` would read the next segment as an authority; an explicit
        // empty one keeps a path starting with `//` intact
        let authority = if self.path.starts_with("//") { "//" } else { "" };
        write!(
            f,
            "{SCHEME}:{authority}{}",
            utf8_percent_encode(&self.path, PATH_ESCAPES)
        )?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}

impl FromStr for Locator {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

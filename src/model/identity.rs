//! Spooled file identity and its flat path encoding
//!
//! A spooled file is addressed by a path of exactly four `/`-delimited segments
//! (the first one empty when the path is absolute):
//!
//! ```text
//! owner/queue/name~jobName~jobUser~jobNumber~number.splf
//! ```
//!
//! The last segment is a composite key of five `~`-delimited fields, the last
//! of which carries the file extension. Fields are not escaped: values that
//! contain `/`, `~` or `?` cannot be represented and fail to decode.

use crate::error::{FsError, Result};
use std::fmt;

/// Separator between the fields of the composite key segment
pub const FIELD_SEPARATOR: char = '~';

/// Separator between path segments
pub const SEGMENT_SEPARATOR: char = '/';

/// Extension appended to the spooled file number when encoding
pub const SPOOLED_FILE_EXTENSION: &str = "splf";

const KEY_FIELDS: usize = 5;

/// Identity of one spooled file on the remote system
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpooledFileIdentity {
    /// User profile owning the spooled file
    pub owner: String,
    /// Output queue holding the spooled file
    pub queue: String,
    /// Spooled file base name
    pub name: String,
    pub job_name: String,
    pub job_user: String,
    pub job_number: String,
    /// Sequence number among same-named spooled files of the job
    pub number: String,
}

impl SpooledFileIdentity {
    /// The producing job, in the order the remote content API expects
    pub fn qualified_job_name(&self) -> QualifiedJobName {
        QualifiedJobName {
            number: self.job_number.clone(),
            user: self.job_user.clone(),
            name: self.job_name.clone(),
        }
    }

    /// The composite key segment for this identity
    pub fn key(&self) -> SplfKey {
        SplfKey {
            name: self.name.clone(),
            job_name: self.job_name.clone(),
            job_user: self.job_user.clone(),
            job_number: self.job_number.clone(),
            number: self.number.clone(),
            extension: Some(SPOOLED_FILE_EXTENSION.to_string()),
        }
    }

    /// Relative path `owner/queue/key`, without the leading separator
    pub fn to_path(&self) -> String {
        format!(
            "{}{SEGMENT_SEPARATOR}{}{SEGMENT_SEPARATOR}{}",
            self.owner,
            self.queue,
            self.key()
        )
    }

    /// Parse an absolute locator path (`/owner/queue/key`) back into an identity
    pub fn from_path(path: &str) -> Result<Self> {
        let segments: Vec<&str> = path.split(SEGMENT_SEPARATOR).collect();
        if segments.len() != 4 {
            return Err(FsError::malformed(
                path,
                format!("expected 4 path segments, found {}", segments.len()),
            ));
        }
        if !segments[0].is_empty() {
            return Err(FsError::malformed(path, "path must start with `/`"));
        }

        let key = SplfKey::parse(segments[3]).map_err(|e| match e {
            FsError::MalformedLocator { reason, .. } => FsError::malformed(path, reason),
            other => other,
        })?;

        Ok(Self {
            owner: segments[1].to_string(),
            queue: segments[2].to_string(),
            name: key.name,
            job_name: key.job_name,
            job_user: key.job_user,
            job_number: key.job_number,
            number: key.number,
        })
    }
}

/// Three-part job identifier, rendered as `number/user/name`
///
/// The order is the one the remote content API takes; it is deliberately not
/// the `name/user/number` order used elsewhere on the remote system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedJobName {
    pub number: String,
    pub user: String,
    pub name: String,
}

impl fmt::Display for QualifiedJobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.number, self.user, self.name)
    }
}

/// The `~`-joined last path segment: `name~jobName~jobUser~jobNumber~number.ext`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SplfKey {
    pub name: String,
    pub job_name: String,
    pub job_user: String,
    pub job_number: String,
    pub number: String,
    /// Extension carried by the number field, without the dot
    pub extension: Option<String>,
}

impl SplfKey {
    /// Parse a key segment. Exactly five fields are required.
    pub fn parse(segment: &str) -> Result<Self> {
        let fields: Vec<&str> = segment.split(FIELD_SEPARATOR).collect();
        if fields.len() != KEY_FIELDS {
            return Err(FsError::malformed(
                segment,
                format!(
                    "expected {KEY_FIELDS} `{FIELD_SEPARATOR}`-separated fields, found {}",
                    fields.len()
                ),
            ));
        }

        let (number, extension) = match fields[4].rsplit_once('.') {
            Some((number, ext)) => (number, Some(ext.to_string())),
            None => (fields[4], None),
        };

        Ok(Self {
            name: fields[0].to_string(),
            job_name: fields[1].to_string(),
            job_user: fields[2].to_string(),
            job_number: fields[3].to_string(),
            number: number.to_string(),
            extension,
        })
    }

    pub fn qualified_job_name(&self) -> QualifiedJobName {
        QualifiedJobName {
            number: self.job_number.clone(),
            user: self.job_user.clone(),
            name: self.job_name.clone(),
        }
    }
}

impl fmt::Display for SplfKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            self.name, self.job_name, self.job_user, self.job_number, self.number
        )?;
        if let Some(ext) = &self.extension {
            write!(f, ".{ext}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rpt01() -> SpooledFileIdentity {
        SpooledFileIdentity {
            owner: "QPGMR".to_string(),
            queue: "QPRINT".to_string(),
            name: "RPT01".to_string(),
            job_name: "BATCHJOB".to_string(),
            job_user: "QPGMR".to_string(),
            job_number: "123456".to_string(),
            number: "0001".to_string(),
        }
    }

    #[test]
    fn test_path_encoding() {
        assert_eq!(
            rpt01().to_path(),
            "QPGMR/QPRINT/RPT01~BATCHJOB~QPGMR~123456~0001.splf"
        );
    }

    #[test]
    fn test_qualified_job_name_is_number_user_name() {
        let key = SplfKey::parse("RPT01~BATCHJOB~QPGMR~123456~0001.splf").unwrap();
        assert_eq!(key.qualified_job_name().to_string(), "123456/QPGMR/BATCHJOB");
        assert_eq!(key.name, "RPT01");
        assert_eq!(key.number, "0001");
        assert_eq!(key.extension.as_deref(), Some("splf"));
    }

    #[test]
    fn test_from_path_restores_every_field() {
        let identity = rpt01();
        let parsed = SpooledFileIdentity::from_path(&format!("/{}", identity.to_path())).unwrap();
        assert_eq!(parsed, identity);
    }

    #[test]
    fn test_other_extensions_are_stripped() {
        let key = SplfKey::parse("RPT01~J~U~000001~0002.txt").unwrap();
        assert_eq!(key.number, "0002");
        assert_eq!(key.extension.as_deref(), Some("txt"));

        let key = SplfKey::parse("RPT01~J~U~000001~0002").unwrap();
        assert_eq!(key.number, "0002");
        assert_eq!(key.extension, None);
        assert_eq!(key.to_string(), "RPT01~J~U~000001~0002");
    }

    #[test]
    fn test_empty_fields_survive() {
        let mut identity = rpt01();
        identity.job_user = String::new();
        identity.number = String::new();

        let path = format!("/{}", identity.to_path());
        assert_eq!(path, "/QPGMR/QPRINT/RPT01~BATCHJOB~~123456~.splf");
        assert_eq!(SpooledFileIdentity::from_path(&path).unwrap(), identity);
    }

    #[test]
    fn test_field_containing_separator_is_rejected() {
        let mut identity = rpt01();
        identity.name = "RPT~01".to_string();

        let err = SpooledFileIdentity::from_path(&format!("/{}", identity.to_path())).unwrap_err();
        assert!(matches!(err, FsError::MalformedLocator { .. }), "{err}");
    }

    #[test]
    fn test_wrong_segment_count_is_rejected() {
        for path in [
            "/QPRINT/RPT01~BATCHJOB~QPGMR~123456~0001.splf",
            "/QPGMR/QPRINT/extra/RPT01~BATCHJOB~QPGMR~123456~0001.splf",
            "QPGMR/QPRINT/RPT01~BATCHJOB~QPGMR~123456~0001.splf",
            "",
        ] {
            assert!(SpooledFileIdentity::from_path(path).is_err(), "{path:?}");
        }
    }

    #[test]
    fn test_too_few_key_fields_is_rejected() {
        let err = SpooledFileIdentity::from_path("/QPGMR/QPRINT/RPT01~BATCHJOB~0001.splf").unwrap_err();
        match err {
            FsError::MalformedLocator { path, reason } => {
                assert_eq!(path, "/QPGMR/QPRINT/RPT01~BATCHJOB~0001.splf");
                assert!(reason.contains("found 3"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    fn field() -> impl Strategy<Value = String> {
        "[A-Z0-9#@$_ ]{0,10}"
    }

    fn number_field() -> impl Strategy<Value = String> {
        "[0-9]{0,6}"
    }

    proptest! {
        /// Property: any identity free of delimiters decodes back to itself
        #[test]
        fn prop_identity_roundtrip(
            owner in field(),
            queue in field(),
            name in field(),
            job_name in field(),
            job_user in field(),
            job_number in number_field(),
            number in number_field(),
        ) {
            let identity = SpooledFileIdentity {
                owner, queue, name, job_name, job_user, job_number, number,
            };
            let parsed = SpooledFileIdentity::from_path(&format!("/{}", identity.to_path())).unwrap();
            prop_assert_eq!(
                parsed.qualified_job_name().to_string(),
                format!("{}/{}/{}", identity.job_number, identity.job_user, identity.job_name)
            );
            prop_assert_eq!(parsed, identity);
        }
    }
}

// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository, or online at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Redaction of credentials embedded in statements.
//!
//! Statements that can carry secrets implement [`SensitiveStmt`]; which kinds
//! do is fixed by [`Statement::as_sensitive`](crate::ast::Statement::as_sensitive).
//! Their secure text is their restored text with
//! [`RestoreFlags::FOR_REDACTION`] set, under which passwords and password
//! hashes are replaced by [`REDACTED`] and external storage URLs are passed
//! through [`redact_storage_url`].

use std::borrow::Cow;

use itertools::Itertools;
use tracing::{debug, trace};
use url::{form_urlencoded, Url};

use crate::ast::display::{AstDisplay, RestoreFlags, REDACTED};
use crate::ast::{AlterUserStmt, BrieStmt, CreateUserStmt, GrantStmt, RestoreError, SetPwdStmt};

/// A statement that can embed credentials.
pub trait SensitiveStmt {
    /// Restores the statement with its credentials redacted.
    fn secure_text(&self) -> Result<String, RestoreError>;
}

macro_rules! impl_sensitive {
    ($($ty:ty),*) => {
        $(
            impl SensitiveStmt for $ty {
                fn secure_text(&self) -> Result<String, RestoreError> {
                    self.to_ast_string_with(RestoreFlags::DEFAULT | RestoreFlags::FOR_REDACTION)
                }
            }
        )*
    };
}

impl_sensitive!(SetPwdStmt, CreateUserStmt, AlterUserStmt, GrantStmt, BrieStmt);

/// The query parameters that hold credentials, by storage URL scheme.
///
/// Schemes that are not listed have nothing redacted.
pub const SENSITIVE_STORAGE_KEYS: &[(&str, &[&str])] = &[
    ("s3", &["access-key", "secret-access-key"]),
    // GCS credentials are passed as a path to a credentials file.
    ("gcs", &[]),
    ("local", &[]),
];

/// Returns the sensitive query parameter keys of storage URLs with `scheme`.
pub fn sensitive_keys(scheme: &str) -> &'static [&'static str] {
    SENSITIVE_STORAGE_KEYS
        .iter()
        .find(|(s, _)| s.eq_ignore_ascii_case(scheme))
        .map(|(_, keys)| *keys)
        .unwrap_or(&[])
}

/// Normalizes a query parameter key so that `Access_Key` and `access-key`
/// name the same parameter.
fn normalize_key(raw: &str) -> String {
    let decoded = form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(k, _)| k.into_owned())
        .unwrap_or_default();
    decoded.to_lowercase().replace('_', "-")
}

/// Replaces the values of the sensitive query parameters of a storage URL
/// with [`REDACTED`].
///
/// Everything but the redacted values is kept byte for byte, including the
/// order of the parameters. A string that does not parse as a URL is
/// returned unchanged.
pub fn redact_storage_url(storage: &str) -> Cow<'_, str> {
    let url = match Url::parse(storage) {
        Ok(url) => url,
        Err(e) => {
            debug!(error = %e, "storage location is not a URL; leaving it unredacted");
            return Cow::Borrowed(storage);
        }
    };
    let keys = sensitive_keys(url.scheme());
    if keys.is_empty() || url.query().is_none() {
        return Cow::Borrowed(storage);
    }
    let Some((base, rest)) = storage.split_once('?') else {
        return Cow::Borrowed(storage);
    };
    let (query, fragment) = match rest.split_once('#') {
        Some((query, fragment)) => (query, Some(fragment)),
        None => (rest, None),
    };

    let mut redacted = 0;
    let params = query
        .split('&')
        .map(|param| {
            let key = param.split_once('=').map_or(param, |(key, _)| key);
            if keys.contains(&normalize_key(key).as_str()) {
                redacted += 1;
                Cow::Owned(format!("{}={}", key, REDACTED))
            } else {
                Cow::Borrowed(param)
            }
        })
        .join("&");
    if redacted == 0 {
        return Cow::Borrowed(storage);
    }
    trace!(scheme = url.scheme(), redacted, "redacted storage URL credentials");

    let mut out = format!("{}?{}", base, params);
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s3_credentials() {
        assert_eq!(
            redact_storage_url(
                "s3://bucket/prefix?access-key=abc&secret-access-key=123&force-path-style=true"
            ),
            "s3://bucket/prefix?access-key=xxxxxx&secret-access-key=xxxxxx&force-path-style=true"
        );
    }

    #[test]
    fn test_key_normalization() {
        assert_eq!(
            redact_storage_url("S3://b/p?Access_Key=abc&region=us-west-2#frag"),
            "S3://b/p?Access_Key=xxxxxx&region=us-west-2#frag"
        );
        assert_eq!(
            redact_storage_url("s3://b/p?secret%2Daccess%2Dkey=abc"),
            "s3://b/p?secret%2Daccess%2Dkey=xxxxxx"
        );
    }

    #[test]
    fn test_unredacted() {
        for storage in [
            "local:///tmp/br01",
            "gcs://bucket/prefix?access-key=irrelevant&credentials-file=/home/user/secrets.txt",
            "s3://bucket/prefix?region=us-west-2",
            "hdfs://host/path?access-key=abc",
            "not a url",
        ] {
            assert!(matches!(redact_storage_url(storage), Cow::Borrowed(s) if s == storage));
        }
    }

    #[test]
    fn test_policy_table() {
        assert_eq!(sensitive_keys("s3"), &["access-key", "secret-access-key"]);
        assert!(sensitive_keys("gcs").is_empty());
        assert!(sensitive_keys("azure").is_empty());
    }
}

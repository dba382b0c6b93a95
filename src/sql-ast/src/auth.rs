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

//! The MySQL native password hash.
//!
//! A hash is written as `*` followed by the upper-case hexadecimal encoding
//! of `SHA1(SHA1(password))`, 41 characters in all.

use sha1::{Digest, Sha1};
use tracing::debug;

use crate::ast::UserSpec;

/// The length of an encoded password hash, including the leading `*`.
pub const PASSWORD_HASH_LEN: usize = 41;

/// Hashes a plaintext password.
///
/// The empty password hashes to the empty string.
pub fn encode_password(password: &str) -> String {
    if password.is_empty() {
        return String::new();
    }
    let stage1 = Sha1::digest(password.as_bytes());
    let stage2 = Sha1::digest(stage1);
    format!("*{}", hex::encode_upper(stage2))
}

/// Reports whether `hash` is a well-formed encoded password hash.
pub fn is_valid_password_hash(hash: &str) -> bool {
    match hash.strip_prefix('*') {
        Some(digest) => {
            hash.len() == PASSWORD_HASH_LEN && digest.bytes().all(|b| b.is_ascii_hexdigit())
        }
        None => false,
    }
}

impl UserSpec {
    /// Returns the password hash to store for this account.
    ///
    /// A plaintext password is hashed with [`encode_password`]. A supplied
    /// hash is returned as is if it is well formed, and `None` otherwise. An
    /// account without an authentication clause has the empty password.
    pub fn encoded_password(&self) -> Option<String> {
        let Some(auth) = &self.auth_opt else {
            return Some(String::new());
        };
        if auth.by_auth_string {
            return Some(encode_password(&auth.auth_string));
        }
        if is_valid_password_hash(&auth.hash_string) {
            Some(auth.hash_string.clone())
        } else {
            debug!(user = %self.user.username, "rejecting malformed password hash");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_password() {
        assert_eq!(
            encode_password("xxx"),
            "*3D56A309CD04FA2EEF181462E59011F075C89548"
        );
        assert_eq!(encode_password(""), "");
    }

    #[test]
    fn test_hash_validation() {
        assert!(is_valid_password_hash(
            "*3D56A309CD04FA2EEF181462E59011F075C89548"
        ));
        assert!(is_valid_password_hash(
            "*3d56a309cd04fa2eef181462e59011f075c89548"
        ));
        for bad in [
            "",
            "*",
            "not-good-password-format",
            "3D56A309CD04FA2EEF181462E59011F075C895480",
            "*3D56A309CD04FA2EEF181462E59011F075C8954",
            "*3D56A309CD04FA2EEF181462E59011F075C8954G",
            "*3D56A309CD04FA2EEF181462E59011F075C895489",
        ] {
            assert!(!is_valid_password_hash(bad), "{bad:?}");
        }
    }
}

//
// Copyright (c) 2024 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
//! Master-key request signing for the Cosmos DB data plane.
//!
//! The data plane does not use a standard `Authorization: Bearer` header.
//! Each request carries a custom token computed over the HTTP verb, the
//! addressed resource, and the request date, signed with the account key.
//! See the access-control documentation for the scheme:
//! <https://learn.microsoft.com/rest/api/cosmos-db/access-control-on-cosmosdb-resources>

use base64::prelude::{Engine as _, BASE64_STANDARD};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::Sha256;

use crate::error::{ia_err, CosmosError};
use crate::resource::ResourceLink;

/// An account master key, held in its decoded form.
#[derive(Clone)]
pub(crate) struct MasterKey {
    key: Vec<u8>,
}

// The key material must never end up in logs.
impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "MasterKey(..)")
    }
}

impl MasterKey {
    pub(crate) fn from_base64(key: &str) -> Result<MasterKey, CosmosError> {
        match BASE64_STANDARD.decode(key) {
            Ok(k) => Ok(MasterKey { key: k }),
            Err(e) => ia_err!("account key is not valid base64: {}", e.to_string()),
        }
    }

    /// Compute the `authorization` header value for one request.
    ///
    /// `date` must be the exact string sent in the `x-ms-date` header: the
    /// signature is over the verb, the resource type and link, and that
    /// date, all lowercased, joined by newlines with a trailing blank line.
    pub(crate) fn sign(&self, verb: &Method, link: &ResourceLink, date: &str) -> String {
        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            verb.as_str().to_lowercase(),
            link.resource_type(),
            link.resource_link(),
            date.to_lowercase(),
        );
        // HMAC accepts keys of any length; new_from_slice cannot fail
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.key).unwrap();
        mac.update(payload.as_bytes());
        let sig = BASE64_STANDARD.encode(mac.finalize().into_bytes());
        url_encode(format!("type=master&ver=1.0&sig={}", sig))
    }
}

pub(crate) fn url_encode(s: impl AsRef<[u8]>) -> String {
    url::form_urlencoded::byte_serialize(s.as_ref()).collect::<String>()
}

/// Format a timestamp the way the `x-ms-date` header wants it: RFC 7231
/// ("Thu, 27 Apr 2017 00:51:12 GMT"), lowercased.
pub(crate) fn to_header_date(t: DateTime<Utc>) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
        .to_lowercase()
}

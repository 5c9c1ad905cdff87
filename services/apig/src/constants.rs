// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Headers used in huawei cloud services.
pub const X_PROJECT_ID: &str = "x-project-id";
pub const X_SECURITY_TOKEN: &str = "x-security-token";
pub const X_SDK_DATE: &str = "x-sdk-date";
pub const X_SDK_CONTENT_SHA_256: &str = "x-sdk-content-sha256";

// Env values used in huawei cloud services.
pub const HUAWEI_CLOUD_ACCESS_KEY_ID: &str = "HUAWEI_CLOUD_ACCESS_KEY_ID";
pub const HUAWEI_CLOUD_SECRET_ACCESS_KEY: &str = "HUAWEI_CLOUD_SECRET_ACCESS_KEY";
pub const HUAWEI_CLOUD_PROJECT_ID: &str = "HUAWEI_CLOUD_PROJECT_ID";
pub const HUAWEI_CLOUD_SECURITY_TOKEN: &str = "HUAWEI_CLOUD_SECURITY_TOKEN";

/// Algorithm identifier carried in the authorization header and the string
/// to sign.
pub const SDK_HMAC_SHA256: &str = "SDK-HMAC-SHA256";

/// The fixed set of headers that participate in the signature, sorted by
/// name. Headers outside this set never enter the canonical request, so
/// collaborators adding headers after installation cannot change what gets
/// signed.
pub const SIGNED_HEADERS: [&str; 6] = [
    "content-type",
    "host",
    X_PROJECT_ID,
    X_SDK_CONTENT_SHA_256,
    X_SDK_DATE,
    X_SECURITY_TOKEN,
];

/// AsciiSet for URI path encoding.
///
/// - Encode every byte except the unreserved characters `A`-`Z`, `a`-`z`,
///   `0`-`9`, `-`, `.`, `_`, `~` and the path separator `/`.
pub static URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// AsciiSet for URI encoding, but used in query keys and values.
pub static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

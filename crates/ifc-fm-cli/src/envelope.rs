// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON response envelopes

use ifc_fm_core::SensorFailure;
use serde::Serialize;

/// `{"status":"success","data":...,"ok":true}`
#[derive(Debug, Serialize)]
pub struct Success<T> {
    status: &'static str,
    data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<SensorFailure>,
    ok: bool,
}

impl<T: Serialize> Success<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: "success",
            data,
            failures: Vec::new(),
            ok: true,
        }
    }

    pub fn with_failures(mut self, failures: Vec<SensorFailure>) -> Self {
        self.failures = failures;
        self
    }
}

/// `{"status":"error","message":...,"ok":false}`
#[derive(Debug, Serialize)]
pub struct Failure {
    status: &'static str,
    message: String,
    ok: bool,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
            ok: false,
        }
    }
}

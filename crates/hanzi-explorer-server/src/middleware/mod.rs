// SPDX-License-Identifier: Apache-2.0

pub(crate) mod audit;
pub(crate) mod request_tracing;

pub(crate) use audit::audit_middleware;
pub(crate) use request_tracing::{request_tracing_middleware, RequestId};

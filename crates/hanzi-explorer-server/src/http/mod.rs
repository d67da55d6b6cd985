// SPDX-License-Identifier: Apache-2.0

pub(crate) mod admin;
pub(crate) mod auth;
pub(crate) mod extract;
pub(crate) mod public;
pub(crate) mod response;

// SPDX-License-Identifier: Apache-2.0

use crate::OutputMode;
use serde_json::Value;

pub(crate) fn emit_ok(output_mode: OutputMode, payload: &Value) -> Result<(), String> {
    let rendered = if output_mode.json {
        serde_json::to_string(payload)
    } else {
        serde_json::to_string_pretty(payload)
    };
    println!("{}", rendered.map_err(|e| e.to_string())?);
    Ok(())
}

//! Text form of the `mix` guest
//!
//! Mirrors `hostmix_guest::mix` compiled for `wasm32`: two `wasm_input(0)`
//! calls bound in order, then a wrapping `i32.add`.

use crate::error::WasmError;
use crate::module::WasmModule;

/// Name of the exported entry point
pub const MIX_EXPORT: &str = "mix";

/// The `mix` guest module
pub const MIX_WAT: &str = r#"
(module
  (import "env" "wasm_input" (func $wasm_input (param i32) (result i32)))
  (func $mix (result i32)
    (local $n i32)
    (local $m i32)
    i32.const 0
    call $wasm_input
    local.set $n
    i32.const 0
    call $wasm_input
    local.set $m
    local.get $n
    local.get $m
    i32.add)
  (export "mix" (func $mix)))
"#;

/// Load the `mix` guest
pub fn mix_module() -> Result<WasmModule, WasmError> {
    WasmModule::from_wat(MIX_WAT)
}

//! # Hostmix WASM Host
//!
//! Loads guest modules and serves their `env.wasm_input` / `env.wasm_output`
//! imports from per-execution input queues.

#![warn(missing_docs)]

/// WASM module loading and validation
pub mod module;

/// WASM execution runtime
pub mod runtime;

/// Host input and output streams
pub mod input;

/// The bundled `mix` guest
pub mod fixture;

/// WASM-specific error types
pub mod error;

/// Test utilities for WASM modules
#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{InputError, WasmError};
pub use fixture::{mix_module, MIX_EXPORT, MIX_WAT};
pub use input::{InputContext, WasmRuntimeIO, PRIVATE_SELECTOR, PUBLIC_SELECTOR};
pub use module::{HostImport, ModuleMetadata, WasmImport, WasmModule, HOST_MODULE};
pub use runtime::{Execution, WasmConfig, WasmRuntime};

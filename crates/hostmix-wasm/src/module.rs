//! WASM module loading and validation

use crate::error::WasmError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::debug;
use wasmtime::{Engine, ExternType, Module, ValType};

/// Module name every host import lives under
pub const HOST_MODULE: &str = "env";

/// Upper bound on accepted module size
const MAX_MODULE_SIZE: usize = 64 * 1024 * 1024;

/// Host functions a guest may import from [`HOST_MODULE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostImport {
    /// `wasm_input: (i32) -> i32`
    WasmInput,
    /// `wasm_output: (i32) -> ()`
    WasmOutput,
}

impl HostImport {
    /// Field name of the import
    pub fn name(self) -> &'static str {
        match self {
            HostImport::WasmInput => "wasm_input",
            HostImport::WasmOutput => "wasm_output",
        }
    }

    /// Resolve an import by module and field name
    pub fn lookup(module: &str, name: &str) -> Option<Self> {
        if module != HOST_MODULE {
            return None;
        }
        match name {
            "wasm_input" => Some(HostImport::WasmInput),
            "wasm_output" => Some(HostImport::WasmOutput),
            _ => None,
        }
    }

    fn params(self) -> &'static [ValType] {
        &[ValType::I32]
    }

    fn results(self) -> &'static [ValType] {
        match self {
            HostImport::WasmInput => &[ValType::I32],
            HostImport::WasmOutput => &[],
        }
    }
}

/// WASM module metadata extracted from the module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleMetadata {
    /// SHA256 hash of the module bytes
    pub hash: String,
    /// Size of the module in bytes
    pub size: usize,
    /// Exported names
    pub exports: Vec<String>,
    /// Host imports required by the module
    pub imports: Vec<WasmImport>,
}

/// Information about a WASM import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasmImport {
    /// Module name (always "env" once validated)
    pub module: String,
    /// Function name
    pub name: String,
    /// Host function this import binds to
    pub host: HostImport,
}

/// WASM module wrapper with validation and metadata
#[derive(Debug, Clone)]
pub struct WasmModule {
    /// Module bytecode
    pub bytes: Vec<u8>,
    /// Module metadata
    pub metadata: ModuleMetadata,
    /// Compiled wasmtime module (cached)
    compiled: Option<Module>,
}

impl WasmModule {
    /// Load a WASM module from bytes with validation
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, WasmError> {
        Self::validate_basic_format(&bytes)?;

        let metadata = Self::extract_metadata(&bytes)?;
        debug!(
            hash = %metadata.hash,
            size = metadata.size,
            imports = metadata.imports.len(),
            "loaded wasm module"
        );

        Ok(WasmModule {
            bytes,
            metadata,
            compiled: None,
        })
    }

    /// Load a WASM module from its text format
    pub fn from_wat(text: &str) -> Result<Self, WasmError> {
        let bytes = wat::parse_str(text).map_err(|e| WasmError::InvalidFormat(e.to_string()))?;
        Self::from_bytes(bytes)
    }

    /// Load a WASM module from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WasmError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(bytes)
    }

    /// Get the compiled wasmtime module, compiling if necessary
    pub fn get_compiled(&mut self, engine: &Engine) -> Result<&Module, WasmError> {
        if self.compiled.is_none() {
            let module = Module::from_binary(engine, &self.bytes)?;
            self.compiled = Some(module);
        }
        self.compiled
            .as_ref()
            .ok_or_else(|| WasmError::ModuleLoad("module compilation cache is empty".to_string()))
    }

    /// Get the module hash
    pub fn hash(&self) -> &str {
        &self.metadata.hash
    }

    /// Check if the module imports a given host function
    pub fn requires_import(&self, import: HostImport) -> bool {
        self.metadata.imports.iter().any(|imp| imp.host == import)
    }

    /// Check if the module exports a given name
    pub fn exports(&self, name: &str) -> bool {
        self.metadata.exports.iter().any(|export| export == name)
    }

    /// Extract metadata from WASM module bytes, rejecting unknown imports
    fn extract_metadata(bytes: &[u8]) -> Result<ModuleMetadata, WasmError> {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hash = format!("{:x}", hasher.finalize());

        // Parse with a throwaway engine; the runtime compiles again with its own config
        let engine = Engine::default();
        let module = Module::from_binary(&engine, bytes)
            .map_err(|e| WasmError::ModuleLoad(e.to_string()))?;

        let exports = module
            .exports()
            .map(|export| export.name().to_string())
            .collect();

        let mut imports = Vec::new();
        for import in module.imports() {
            let host = HostImport::lookup(import.module(), import.name()).ok_or_else(|| {
                WasmError::UnsupportedImport {
                    module: import.module().to_string(),
                    name: import.name().to_string(),
                }
            })?;

            let ExternType::Func(ty) = import.ty() else {
                return Err(WasmError::ModuleValidation(format!(
                    "import {}.{} must be a function",
                    import.module(),
                    import.name()
                )));
            };
            let params: Vec<ValType> = ty.params().collect();
            let results: Vec<ValType> = ty.results().collect();
            if params != host.params() || results != host.results() {
                return Err(WasmError::ModuleValidation(format!(
                    "import {}.{} has signature {:?} -> {:?}, expected {:?} -> {:?}",
                    import.module(),
                    import.name(),
                    params,
                    results,
                    host.params(),
                    host.results()
                )));
            }

            imports.push(WasmImport {
                module: import.module().to_string(),
                name: import.name().to_string(),
                host,
            });
        }

        Ok(ModuleMetadata {
            hash,
            size: bytes.len(),
            exports,
            imports,
        })
    }

    /// Validate basic WASM format before parsing
    fn validate_basic_format(bytes: &[u8]) -> Result<(), WasmError> {
        if bytes.len() < 8 {
            return Err(WasmError::InvalidFormat(
                "WASM module too small (minimum 8 bytes)".to_string(),
            ));
        }

        if &bytes[0..4] != b"\0asm" {
            return Err(WasmError::InvalidFormat(
                "Invalid WASM magic number".to_string(),
            ));
        }

        if bytes.len() > MAX_MODULE_SIZE {
            return Err(WasmError::ModuleValidation(format!(
                "Module too large: {} bytes (max: {} bytes)",
                bytes.len(),
                MAX_MODULE_SIZE
            )));
        }

        Ok(())
    }
}

//! WASM-specific error types

use thiserror::Error;

/// Failures raised by the host input functions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Public input queue drained
    #[error("failed to read public input, no public inputs left")]
    PublicExhausted,

    /// Private input queue drained
    #[error("failed to read private input, no private inputs left")]
    PrivateExhausted,

    /// Selector other than 0 (private) or 1 (public)
    #[error("invalid wasm_input selector: {0} (expected 0 or 1)")]
    InvalidSelector(i32),
}

/// WASM-specific errors
#[derive(Debug, Error)]
pub enum WasmError {
    /// Module loading error
    #[error("Module loading error: {0}")]
    ModuleLoad(String),

    /// Module validation error
    #[error("Module validation error: {0}")]
    ModuleValidation(String),

    /// Invalid module format
    #[error("Invalid module format: {0}")]
    InvalidFormat(String),

    /// Import the host does not provide
    #[error("Unsupported import: {module}.{name}")]
    UnsupportedImport {
        /// Import module name
        module: String,
        /// Import field name
        name: String,
    },

    /// Host input failure that trapped the guest
    #[error("Host input error: {0}")]
    Input(#[from] InputError),

    /// Execution error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Execution exceeded the configured time limit
    #[error("Execution timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Wasmtime error
    #[error("Wasmtime error: {0}")]
    Wasmtime(#[from] wasmtime::Error),
}

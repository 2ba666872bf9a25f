//! Host-side input and output streams backing `env.wasm_input`

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::trace;

/// Selector for the private input stream
pub const PRIVATE_SELECTOR: i32 = 0;

/// Selector for the public input stream
pub const PUBLIC_SELECTOR: i32 = 1;

/// Per-execution host state: queued inputs plus what the guest produced.
#[derive(Debug, Clone, Default)]
pub struct InputContext {
    public_inputs: VecDeque<i32>,
    private_inputs: VecDeque<i32>,
    instance: Vec<i32>,
    outputs: Vec<i32>,
}

/// What a guest consumed publicly and wrote back during one execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasmRuntimeIO {
    /// Public inputs read followed by outputs written, in call order
    pub instance: Vec<i32>,
    /// Values written through `wasm_output`
    pub outputs: Vec<i32>,
}

impl InputContext {
    /// Create a context with the given public and private inputs
    pub fn new(public_inputs: Vec<i32>, private_inputs: Vec<i32>) -> Self {
        Self {
            public_inputs: public_inputs.into(),
            private_inputs: private_inputs.into(),
            ..Self::default()
        }
    }

    /// Context that only carries private inputs, which is what `mix` reads
    pub fn with_private(private_inputs: Vec<i32>) -> Self {
        Self::new(Vec::new(), private_inputs)
    }

    /// Serve one `wasm_input` call
    pub fn wasm_input(&mut self, selector: i32) -> Result<i32, InputError> {
        let value = match selector {
            PUBLIC_SELECTOR => {
                let value = self
                    .public_inputs
                    .pop_front()
                    .ok_or(InputError::PublicExhausted)?;
                self.instance.push(value);
                value
            }
            PRIVATE_SELECTOR => self
                .private_inputs
                .pop_front()
                .ok_or(InputError::PrivateExhausted)?,
            other => return Err(InputError::InvalidSelector(other)),
        };
        trace!(selector, value, "wasm_input");
        Ok(value)
    }

    /// Serve one `wasm_output` call
    pub fn wasm_output(&mut self, value: i32) {
        trace!(value, "wasm_output");
        self.instance.push(value);
        self.outputs.push(value);
    }

    /// Public inputs not yet consumed
    pub fn remaining_public(&self) -> usize {
        self.public_inputs.len()
    }

    /// Private inputs not yet consumed
    pub fn remaining_private(&self) -> usize {
        self.private_inputs.len()
    }

    /// Finish the execution and keep only the recorded IO
    pub fn into_io(self) -> WasmRuntimeIO {
        WasmRuntimeIO {
            instance: self.instance,
            outputs: self.outputs,
        }
    }
}

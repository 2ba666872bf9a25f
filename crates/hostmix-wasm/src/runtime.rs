//! WASM execution runtime

use crate::error::{InputError, WasmError};
use crate::fixture::MIX_EXPORT;
use crate::input::{InputContext, WasmRuntimeIO};
use crate::module::{HostImport, WasmModule, HOST_MODULE};
use std::time::Duration;
use tracing::{debug, warn};
use wasmtime::{Caller, Engine, Linker, Store, WasmParams, WasmResults};

/// How often fuel-metered guests yield back to the executor
const FUEL_YIELD_INTERVAL: u64 = 10_000;

/// Configuration for WASM execution
#[derive(Debug, Clone)]
pub struct WasmConfig {
    /// Maximum execution time (default: 30 seconds)
    pub max_execution_time: Duration,
    /// Maximum fuel (instruction count limit). Without fuel the guest never
    /// yields, so the time limit cannot interrupt a running loop.
    pub max_fuel: Option<u64>,
    /// Maximum wasm stack size in bytes (default: 1MB)
    pub max_wasm_stack: usize,
}

impl Default for WasmConfig {
    fn default() -> Self {
        Self {
            max_execution_time: Duration::from_secs(30),
            max_fuel: Some(1_000_000), // 1M instructions
            max_wasm_stack: 1024 * 1024,
        }
    }
}

/// Outcome of one guest call
#[derive(Debug, Clone, PartialEq)]
pub struct Execution<R> {
    /// Value returned by the guest function
    pub result: R,
    /// Public instance and outputs recorded by the host
    pub io: WasmRuntimeIO,
    /// Fuel burned, when metering is on
    pub fuel_consumed: Option<u64>,
}

/// WASM execution runtime with wasmtime integration
pub struct WasmRuntime {
    /// Wasmtime engine
    engine: Engine,
    /// Runtime configuration
    config: WasmConfig,
}

impl WasmRuntime {
    /// Create a new WASM runtime with default configuration
    pub fn new() -> Result<Self, WasmError> {
        Self::with_config(WasmConfig::default())
    }

    /// Create a new WASM runtime with custom configuration
    pub fn with_config(config: WasmConfig) -> Result<Self, WasmError> {
        let mut wasmtime_config = wasmtime::Config::new();
        wasmtime_config.max_wasm_stack(config.max_wasm_stack);

        if config.max_fuel.is_some() {
            wasmtime_config.consume_fuel(true);
        }

        wasmtime_config.async_support(true);

        let engine = Engine::new(&wasmtime_config)?;

        Ok(WasmRuntime { engine, config })
    }

    /// Bind the host imports to the store's [`InputContext`]
    fn linker(&self) -> Result<Linker<InputContext>, WasmError> {
        let mut linker = Linker::new(&self.engine);

        linker.func_wrap(
            HOST_MODULE,
            HostImport::WasmInput.name(),
            |mut caller: Caller<'_, InputContext>, selector: i32| -> wasmtime::Result<i32> {
                Ok(caller.data_mut().wasm_input(selector)?)
            },
        )?;

        linker.func_wrap(
            HOST_MODULE,
            HostImport::WasmOutput.name(),
            |mut caller: Caller<'_, InputContext>, value: i32| {
                caller.data_mut().wasm_output(value);
            },
        )?;

        Ok(linker)
    }

    /// Execute a WASM function with typed parameters against the given inputs
    pub async fn call_function<Params, Results>(
        &self,
        module: &mut WasmModule,
        function_name: &str,
        params: Params,
        context: InputContext,
    ) -> Result<Execution<Results>, WasmError>
    where
        Params: WasmParams,
        Results: WasmResults,
    {
        if !module.exports(function_name) {
            return Err(WasmError::Execution(format!(
                "Function '{}' is not exported by module {}",
                function_name,
                module.hash()
            )));
        }

        let linker = self.linker()?;
        let compiled_module = module.get_compiled(&self.engine)?;
        let mut store = Store::new(&self.engine, context);

        if let Some(fuel) = self.config.max_fuel {
            // Hand out fuel in slices so the guest yields between them
            let slice = fuel.min(FUEL_YIELD_INTERVAL);
            store.add_fuel(slice)?;
            store.out_of_fuel_async_yield((fuel - slice) / FUEL_YIELD_INTERVAL, FUEL_YIELD_INTERVAL);
        }

        let instance = linker.instantiate_async(&mut store, compiled_module).await?;
        let func = instance.get_typed_func::<Params, Results>(&mut store, function_name)?;

        debug!(function = function_name, "calling guest function");
        let execution_future = func.call_async(&mut store, params);
        let execution_result =
            tokio::time::timeout(self.config.max_execution_time, execution_future).await;

        let result = match execution_result {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                if let Some(input) = e.downcast_ref::<InputError>() {
                    warn!(function = function_name, error = %input, "host input failed");
                    return Err(WasmError::Input(input.clone()));
                }
                warn!(function = function_name, error = %e, "guest trapped");
                return Err(WasmError::Execution(format!("Function call failed: {}", e)));
            }
            Err(_) => {
                warn!(function = function_name, "guest timed out");
                return Err(WasmError::Timeout(self.config.max_execution_time));
            }
        };

        let fuel_consumed = store.fuel_consumed();
        let io = store.into_data().into_io();
        debug!(function = function_name, ?fuel_consumed, outputs = io.outputs.len(), "guest returned");

        Ok(Execution {
            result,
            io,
            fuel_consumed,
        })
    }

    /// Run the exported `mix` entry point
    pub async fn run_mix(
        &self,
        module: &mut WasmModule,
        context: InputContext,
    ) -> Result<Execution<i32>, WasmError> {
        self.call_function::<(), i32>(module, MIX_EXPORT, (), context).await
    }

    /// Get the runtime configuration
    pub fn config(&self) -> &WasmConfig {
        &self.config
    }
}

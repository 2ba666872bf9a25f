//! Command options and execution

use crate::args::parse_inputs;
use anyhow::{Context, Result};
use clap::Parser;
use hostmix_wasm::{mix_module, InputContext, WasmConfig, WasmModule, WasmRuntime, MIX_EXPORT};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Run a guest function with host-supplied inputs
#[derive(Debug, Parser)]
#[command(name = "hostmix", version)]
pub struct Opts {
    /// Guest module (.wasm or .wat); the bundled `mix` guest when omitted
    #[arg(long)]
    pub wasm: Option<PathBuf>,

    /// Exported function to call; must take no arguments and return i32
    #[arg(long, default_value = MIX_EXPORT)]
    pub function: String,

    /// Public input, VALUE:i32, 0xHEX:bytes or 0xHEX:bytes-packed (repeatable, read with selector 1)
    #[arg(long = "public")]
    pub public_inputs: Vec<String>,

    /// Private input, VALUE:i32, 0xHEX:bytes or 0xHEX:bytes-packed (repeatable, read with selector 0)
    #[arg(long = "private")]
    pub private_inputs: Vec<String>,

    /// Fuel limit; 0 disables metering
    #[arg(long, default_value_t = 1_000_000)]
    pub fuel: u64,

    /// Wall-clock limit in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Result of one run, printed as JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Function that was called
    pub function: String,
    /// Value it returned
    pub result: i32,
    /// Public inputs read followed by outputs written
    pub instance: Vec<i32>,
    /// Values written through `wasm_output`
    pub outputs: Vec<i32>,
    /// Fuel burned, when metering is on
    pub fuel_consumed: Option<u64>,
}

impl Opts {
    fn config(&self) -> WasmConfig {
        WasmConfig {
            max_fuel: (self.fuel > 0).then_some(self.fuel),
            max_execution_time: Duration::from_secs(self.timeout_secs),
            ..WasmConfig::default()
        }
    }

    fn load_module(&self) -> Result<WasmModule> {
        let Some(path) = &self.wasm else {
            return Ok(mix_module()?);
        };

        let module = if path.extension().is_some_and(|ext| ext == "wat") {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            WasmModule::from_wat(&text)
        } else {
            WasmModule::from_file(path)
        };
        module.with_context(|| format!("failed to load {}", path.display()))
    }

    /// Load the module, run the function and collect the report
    pub async fn run(&self) -> Result<RunReport> {
        let public_inputs = parse_inputs(&self.public_inputs).context("bad --public input")?;
        let private_inputs = parse_inputs(&self.private_inputs).context("bad --private input")?;

        let mut module = self.load_module()?;
        info!(
            hash = module.hash(),
            function = %self.function,
            public = public_inputs.len(),
            private = private_inputs.len(),
            "running guest"
        );

        let runtime = WasmRuntime::with_config(self.config())?;
        let context = InputContext::new(public_inputs, private_inputs);
        let execution = runtime
            .call_function::<(), i32>(&mut module, &self.function, (), context)
            .await
            .with_context(|| format!("failed to run '{}'", self.function))?;

        Ok(RunReport {
            function: self.function.clone(),
            result: execution.result,
            instance: execution.io.instance,
            outputs: execution.io.outputs,
            fuel_consumed: execution.fuel_consumed,
        })
    }
}

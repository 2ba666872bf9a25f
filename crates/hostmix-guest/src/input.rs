//! Host input seam

/// Seed passed to every `wasm_input` call made by [`crate::mix`].
pub const DEFAULT_SEED: i32 = 0;

/// Source of host-provided integers.
///
/// On `wasm32` this is backed by the `env.wasm_input` import; natively any
/// implementor can stand in for the host.
pub trait HostInput {
    /// Request the next value from the host.
    fn wasm_input(&mut self, seed: i32) -> i32;
}

impl<F> HostInput for F
where
    F: FnMut(i32) -> i32,
{
    fn wasm_input(&mut self, seed: i32) -> i32 {
        self(seed)
    }
}

#[cfg(target_arch = "wasm32")]
mod imported {
    // (import "env" "wasm_input" (func $wasm_input (param i32) (result i32)))
    #[link(wasm_import_module = "env")]
    extern "C" {
        #[link_name = "wasm_input"]
        fn host_wasm_input(seed: i32) -> i32;
    }

    /// The real host import, resolved when the module is instantiated.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct ImportedInput;

    impl super::HostInput for ImportedInput {
        fn wasm_input(&mut self, seed: i32) -> i32 {
            // SAFETY: the import takes and returns plain i32 values.
            unsafe { host_wasm_input(seed) }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use imported::ImportedInput;

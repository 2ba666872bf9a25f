//! Test utilities for WASM module testing

pub mod test_modules {
    use std::sync::OnceLock;

    fn generate_minimal_wasm() -> Vec<u8> {
        wat::parse_str("(module)").unwrap()
    }

    // Reads two public inputs, writes their sum back out, returns it.
    fn generate_output_wasm() -> Vec<u8> {
        wat::parse_str(r#"
            (module
              (import "env" "wasm_input" (func $wasm_input (param i32) (result i32)))
              (import "env" "wasm_output" (func $wasm_output (param i32)))
              (func $publish (result i32)
                (local $sum i32)
                i32.const 1
                call $wasm_input
                i32.const 1
                call $wasm_input
                i32.add
                local.tee $sum
                call $wasm_output
                local.get $sum)
              (export "publish" (func $publish)))
        "#).unwrap()
    }

    fn generate_bad_selector_wasm() -> Vec<u8> {
        wat::parse_str(r#"
            (module
              (import "env" "wasm_input" (func $wasm_input (param i32) (result i32)))
              (func $bad (result i32)
                i32.const 7
                call $wasm_input)
              (export "bad" (func $bad)))
        "#).unwrap()
    }

    fn generate_spin_wasm() -> Vec<u8> {
        wat::parse_str(r#"
            (module
              (func $spin
                (loop $forever
                  br $forever))
              (export "spin" (func $spin)))
        "#).unwrap()
    }

    fn generate_wasi_import_wasm() -> Vec<u8> {
        wat::parse_str(r#"
            (module
              (import "wasi_snapshot_preview1" "fd_write"
                (func $fd_write (param i32 i32 i32 i32) (result i32)))
              (func $_start
                nop)
              (export "_start" (func $_start)))
        "#).unwrap()
    }

    fn generate_wrong_signature_wasm() -> Vec<u8> {
        wat::parse_str(r#"
            (module
              (import "env" "wasm_input" (func $wasm_input (param i32) (result i64))))
        "#).unwrap()
    }

    static MINIMAL_WASM: OnceLock<Vec<u8>> = OnceLock::new();
    static OUTPUT_WASM: OnceLock<Vec<u8>> = OnceLock::new();
    static BAD_SELECTOR_WASM: OnceLock<Vec<u8>> = OnceLock::new();
    static SPIN_WASM: OnceLock<Vec<u8>> = OnceLock::new();
    static WASI_IMPORT_WASM: OnceLock<Vec<u8>> = OnceLock::new();
    static WRONG_SIGNATURE_WASM: OnceLock<Vec<u8>> = OnceLock::new();

    /// A minimal valid WASM module that does nothing
    pub fn minimal_wasm() -> &'static [u8] {
        MINIMAL_WASM.get_or_init(generate_minimal_wasm)
    }

    /// Exports `publish`: sums two public inputs and writes the sum
    pub fn output_wasm() -> &'static [u8] {
        OUTPUT_WASM.get_or_init(generate_output_wasm)
    }

    /// Exports `bad`: calls `wasm_input` with selector 7
    pub fn bad_selector_wasm() -> &'static [u8] {
        BAD_SELECTOR_WASM.get_or_init(generate_bad_selector_wasm)
    }

    /// Exports `spin`: loops forever
    pub fn spin_wasm() -> &'static [u8] {
        SPIN_WASM.get_or_init(generate_spin_wasm)
    }

    /// Imports a WASI function the host does not provide
    pub fn wasi_import_wasm() -> &'static [u8] {
        WASI_IMPORT_WASM.get_or_init(generate_wasi_import_wasm)
    }

    /// Imports `wasm_input` with an i64 result
    pub fn wrong_signature_wasm() -> &'static [u8] {
        WRONG_SIGNATURE_WASM.get_or_init(generate_wrong_signature_wasm)
    }

    /// Invalid WASM with wrong magic number
    pub const INVALID_MAGIC_WASM: &[u8] = &[
        0xFF, 0xFF, 0xFF, 0xFF, // wrong magic
        0x01, 0x00, 0x00, 0x00, // version
    ];
}

//! # Hostmix Guest
//!
//! The `mix` guest function: two values from the host, added with wraparound.

#![warn(missing_docs)]

/// Host input seam and the `env.wasm_input` binding
pub mod input;

pub use input::{HostInput, DEFAULT_SEED};

#[cfg(target_arch = "wasm32")]
pub use input::ImportedInput;

/// Read `n` then `m` from the host and return `n + m` (wrapping).
pub fn mix<H: HostInput + ?Sized>(host: &mut H) -> i32 {
    let n = host.wasm_input(DEFAULT_SEED);
    let m = host.wasm_input(DEFAULT_SEED);
    n.wrapping_add(m)
}

/// Exported entry point invoked by the host.
#[cfg(target_arch = "wasm32")]
#[export_name = "mix"]
pub extern "C" fn mix_export() -> i32 {
    mix(&mut ImportedInput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    /// Hands out queued values and records the seeds it was called with.
    struct ScriptedHost {
        values: VecDeque<i32>,
        seeds: Vec<i32>,
    }

    impl ScriptedHost {
        fn new(values: &[i32]) -> Self {
            Self {
                values: values.iter().copied().collect(),
                seeds: Vec::new(),
            }
        }
    }

    impl HostInput for ScriptedHost {
        fn wasm_input(&mut self, seed: i32) -> i32 {
            self.seeds.push(seed);
            self.values.pop_front().expect("host ran out of values")
        }
    }

    #[test]
    fn test_mix_adds_in_call_order() {
        let mut host = ScriptedHost::new(&[10, 5]);
        assert_eq!(mix(&mut host), 15);
        assert!(host.values.is_empty());
    }

    #[test]
    fn test_mix_requests_values_in_order() {
        // Value depends on the call index the host sees
        let mut observed = Vec::new();
        let mut host = |seed: i32| {
            let index = observed.len();
            observed.push((index, seed));
            match index {
                0 => i32::MAX,
                1 => 1,
                _ => panic!("unexpected third wasm_input call"),
            }
        };
        assert_eq!(mix(&mut host), i32::MIN);
        assert_eq!(observed, vec![(0, DEFAULT_SEED), (1, DEFAULT_SEED)]);
    }

    #[test]
    fn test_mix_passes_default_seed() {
        let mut host = ScriptedHost::new(&[1, 2]);
        mix(&mut host);
        assert_eq!(host.seeds, vec![DEFAULT_SEED, DEFAULT_SEED]);
    }

    #[test]
    fn test_mix_calls_host_exactly_twice() {
        let mut calls = 0;
        let mut host = |_seed: i32| {
            calls += 1;
            1
        };
        assert_eq!(mix(&mut host), 2);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_mix_zero() {
        let mut host = ScriptedHost::new(&[0, 0]);
        assert_eq!(mix(&mut host), 0);
    }

    #[test]
    fn test_mix_wraps_on_overflow() {
        let mut host = ScriptedHost::new(&[i32::MAX, 1]);
        assert_eq!(mix(&mut host), i32::MIN);

        let mut host = ScriptedHost::new(&[i32::MAX, i32::MAX]);
        assert_eq!(mix(&mut host), -2);

        let mut host = ScriptedHost::new(&[i32::MIN, -1]);
        assert_eq!(mix(&mut host), i32::MAX);
    }

    #[test]
    fn test_mix_is_deterministic_with_constant_host() {
        let mut toggle = false;
        let mut host = |_seed: i32| {
            toggle = !toggle;
            if toggle { 3 } else { 4 }
        };
        for _ in 0..16 {
            assert_eq!(mix(&mut host), 7);
        }
    }

    #[test]
    fn test_mix_through_trait_object() {
        let mut host = ScriptedHost::new(&[-7, 2]);
        let host: &mut dyn HostInput = &mut host;
        assert_eq!(mix(host), -5);
    }

    proptest! {
        #[test]
        fn test_mix_matches_wrapping_add(a in any::<i32>(), b in any::<i32>()) {
            let mut host = ScriptedHost::new(&[a, b]);
            prop_assert_eq!(mix(&mut host), a.wrapping_add(b));
        }
    }
}

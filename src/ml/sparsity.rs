// ============================================================
// Layer 3 — Sparsity Checker
// ============================================================
// Measures the fraction of zero-valued weights across a
// model's dense layers — the number a pruning run reports.
//
// The model's use_cache flag (a KV-cache optimization toggle)
// is forced off for the duration of the scan and restored
// afterwards. Restoration is done by a Drop guard so it
// happens on every exit path, not just the happy one.
//
// Degenerate inputs (a layer with no scanned parameters, or a
// model with none at all) are logged and reported as 0.0
// sparsity rather than failing.
//
// Reference: Rust Book §15 (Drop), §9 (Error Handling)

use burn::prelude::*;
use burn::tensor::ElementConversion;

use crate::ml::modules::{find_linear_layers, LayerNode};

// ─── InspectableModel ─────────────────────────────────────────────────────────
/// The introspection surface check_sparsity needs from a model:
/// the cache toggle and the ordered decoder layer list.
pub trait InspectableModel<B: Backend> {
    /// Current value of the KV-cache toggle.
    fn use_cache(&self) -> bool;

    /// Set the KV-cache toggle.
    fn set_use_cache(&mut self, enabled: bool);

    /// The model's decoder layers, in order.
    fn layers(&self) -> Vec<&dyn LayerNode<B>>;
}

// ─── CacheGuard ───────────────────────────────────────────────────────────────
/// Scoped acquisition of the use_cache flag: saves the current
/// value, forces it off, and restores the saved value on drop.
struct CacheGuard<'a, B: Backend, M: InspectableModel<B>> {
    model: &'a mut M,
    saved: bool,
    _backend: std::marker::PhantomData<B>,
}

impl<'a, B: Backend, M: InspectableModel<B>> CacheGuard<'a, B, M> {
    fn new(model: &'a mut M) -> Self {
        let saved = model.use_cache();
        model.set_use_cache(false);
        Self {
            model,
            saved,
            _backend: std::marker::PhantomData,
        }
    }
}

impl<B: Backend, M: InspectableModel<B>> Drop for CacheGuard<'_, B, M> {
    fn drop(&mut self) {
        self.model.set_use_cache(self.saved);
    }
}

impl<B: Backend, M: InspectableModel<B>> std::ops::Deref for CacheGuard<'_, B, M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.model
    }
}

// ─── check_sparsity ───────────────────────────────────────────────────────────
/// Fraction of zero-valued weight entries across all dense
/// sublayers of all decoder layers, in [0, 1].
///
/// Emits one diagnostic line per layer; warns instead of
/// dividing by zero when a layer (or the whole model)
/// contributes no parameters.
pub fn check_sparsity<B: Backend, M: InspectableModel<B>>(model: &mut M) -> f64 {
    let guard = CacheGuard::new(model);

    let mut zero_count   = 0usize;
    let mut total_params = 0usize;

    for (i, layer) in guard.layers().iter().enumerate() {
        let subset = find_linear_layers(*layer);

        let mut layer_zeros  = 0usize;
        let mut layer_params = 0usize;
        for (name, sublayer) in &subset {
            let Some(weight) = sublayer.weight() else {
                continue;
            };
            let zeros = count_zeros(&weight);
            let numel = weight.shape().num_elements();
            tracing::debug!("layer {i} sublayer {name}: {zeros}/{numel} zeros");

            layer_zeros  += zeros;
            layer_params += numel;
        }

        zero_count   += layer_zeros;
        total_params += layer_params;

        if layer_params == 0 {
            tracing::warn!("layer {i} has no scanned parameters");
        } else {
            tracing::info!(
                "layer {i} sparsity {:.6}",
                layer_zeros as f64 / layer_params as f64
            );
        }
    }

    if total_params == 0 {
        tracing::warn!("model has no scanned parameters, reporting sparsity 0.0");
        return 0.0;
    }
    zero_count as f64 / total_params as f64
}

/// Number of exactly-zero entries in a dense weight matrix.
fn count_zeros<B: Backend>(weight: &Tensor<B, 2>) -> usize {
    let zeros: i64 = weight
        .clone()
        .equal_elem(0.0)
        .int()
        .sum()
        .into_scalar()
        .elem();
    zeros as usize
}

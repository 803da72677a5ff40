// ============================================================
// Layer 3 — ML / Introspection Layer (Burn)
// ============================================================
// Everything that touches the module tree or Burn tensors
// lives here; the domain and data layers never import from
// this module.
//
// What's in this layer:
//
//   modules.rs  — The layer-tree abstraction
//                 • LayerKind tags (Linear, QuantizedLinear, ...)
//                 • the LayerNode trait over named children
//                 • adapters: burn nn::Linear, Int8Linear,
//                   ModuleTree containers
//                 • find_layers / find_linear_layers
//
//   sparsity.rs — Weight sparsity measurement
//                 • InspectableModel trait (use_cache + layers)
//                 • CacheGuard RAII save/restore
//                 • check_sparsity
//
// Reference: Burn Book §3 (Building Blocks)

/// Layer-kind tags, the module tree trait, and find_layers
pub mod modules;

/// Zero-weight fraction measurement over a model's layers
pub mod sparsity;

// ============================================================
// Layer 3 — Module Tree & Layer Search
// ============================================================
// A minimal introspection surface over a model's submodule
// tree: every node reports a kind tag, its named children, and
// (for weight-bearing leaves) its dense weight matrix.
//
// The kind tag replaces runtime type reflection. The one
// subtlety is the quantized linear layer: it is NOT a Linear,
// but it specializes one, so layer search must treat it as
// linear-like. That relationship is expressed explicitly by
// LayerKind::base() instead of walking a type hierarchy.
//
// Reference: Rust Book §10 (Traits), §17 (Trait Objects)

use burn::prelude::*;
use std::collections::BTreeMap;

// ─── LayerKind ────────────────────────────────────────────────────────────────
/// Tag identifying what a module node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// A standard dense (fully connected) layer
    Linear,
    /// An int8-quantized dense layer — a specialization of Linear
    QuantizedLinear,
    /// A token or position embedding table
    Embedding,
    /// A normalization layer
    Norm,
    /// A container with children and no weights of its own
    Container,
}

impl LayerKind {
    /// The kind this kind specializes, if any. Search treats a
    /// node whose base kind is targeted as a match, so a
    /// quantized linear layer is found when searching for
    /// Linear.
    pub fn base(&self) -> Option<LayerKind> {
        match self {
            LayerKind::QuantizedLinear => Some(LayerKind::Linear),
            _ => None,
        }
    }
}

/// The default search targets: standard dense layers.
pub const DENSE_TARGETS: &[LayerKind] = &[LayerKind::Linear];

// ─── LayerNode ────────────────────────────────────────────────────────────────
/// One node of a model's module tree.
pub trait LayerNode<B: Backend> {
    /// What this node is.
    fn kind(&self) -> LayerKind;

    /// Immediate children as ordered (name, node) pairs.
    /// Leaves return an empty Vec.
    fn named_children(&self) -> Vec<(String, &dyn LayerNode<B>)> {
        Vec::new()
    }

    /// The dense weight matrix, for weight-bearing leaves.
    /// Quantized layers return their dequantized weights.
    fn weight(&self) -> Option<Tensor<B, 2>> {
        None
    }
}

// ─── Adapters ─────────────────────────────────────────────────────────────────
/// Burn's own dense layer is a Linear leaf.
impl<B: Backend> LayerNode<B> for burn::nn::Linear<B> {
    fn kind(&self) -> LayerKind {
        LayerKind::Linear
    }

    fn weight(&self) -> Option<Tensor<B, 2>> {
        Some(self.weight.val())
    }
}

/// An int8-quantized dense layer: integer weights plus one
/// dequantization scale per output row.
#[derive(Debug)]
pub struct Int8Linear<B: Backend> {
    /// Quantized weights — shape: [d_out, d_in]
    pub weight: Tensor<B, 2, Int>,

    /// Per-row dequantization scales — shape: [d_out]
    pub scales: Tensor<B, 1>,
}

impl<B: Backend> Int8Linear<B> {
    pub fn new(weight: Tensor<B, 2, Int>, scales: Tensor<B, 1>) -> Self {
        Self { weight, scales }
    }
}

impl<B: Backend> LayerNode<B> for Int8Linear<B> {
    fn kind(&self) -> LayerKind {
        LayerKind::QuantizedLinear
    }

    /// Dequantized view: weight[r][c] * scales[r]. A stored
    /// zero stays zero under any scale, so sparsity measured on
    /// this view equals sparsity of the int weights.
    fn weight(&self) -> Option<Tensor<B, 2>> {
        let scales = self.scales.clone().unsqueeze_dim::<2>(1);
        Some(self.weight.clone().float() * scales)
    }
}

/// A named container node for composing submodules into a tree.
pub struct ModuleTree<B: Backend> {
    children: Vec<(String, Box<dyn LayerNode<B>>)>,
}

impl<B: Backend> ModuleTree<B> {
    pub fn new() -> Self {
        Self { children: Vec::new() }
    }

    /// Append a named child; insertion order is child order.
    pub fn with_child(mut self, name: impl Into<String>, child: Box<dyn LayerNode<B>>) -> Self {
        self.children.push((name.into(), child));
        self
    }
}

impl<B: Backend> Default for ModuleTree<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> LayerNode<B> for ModuleTree<B> {
    fn kind(&self) -> LayerKind {
        LayerKind::Container
    }

    fn named_children(&self) -> Vec<(String, &dyn LayerNode<B>)> {
        self.children
            .iter()
            .map(|(name, child)| (name.clone(), child.as_ref()))
            .collect()
    }
}

// ─── find_layers ──────────────────────────────────────────────────────────────
/// Recursively collect every submodule whose kind (or base
/// kind) is in `targets`, keyed by dotted path from `prefix`.
///
/// A matching node is returned as a whole — its children are
/// not searched. Module trees are acyclic by construction, so
/// no visited-set is needed.
pub fn find_layers<'a, B: Backend>(
    module:  &'a dyn LayerNode<B>,
    targets: &[LayerKind],
    prefix:  &str,
) -> BTreeMap<String, &'a dyn LayerNode<B>> {
    let kind = module.kind();
    let matches = targets.contains(&kind)
        || kind.base().is_some_and(|base| targets.contains(&base));
    if matches {
        return BTreeMap::from([(prefix.to_string(), module)]);
    }

    let mut found = BTreeMap::new();
    for (name, child) in module.named_children() {
        let child_prefix = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}.{name}")
        };
        found.extend(find_layers(child, targets, &child_prefix));
    }
    found
}

/// find_layers with the default dense-layer target set.
pub fn find_linear_layers<'a, B: Backend>(
    module: &'a dyn LayerNode<B>,
) -> BTreeMap<String, &'a dyn LayerNode<B>> {
    find_layers(module, DENSE_TARGETS, "")
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type B = NdArray;

    fn linear(values: [[f32; 2]; 2]) -> Box<dyn LayerNode<B>> {
        let device = Default::default();
        let weight = Tensor::<B, 2>::from_floats(values, &device);
        Box::new(burn::nn::Linear {
            weight: burn::module::Param::from_tensor(weight),
            bias: None,
        })
    }

    fn int8_linear(values: [[i32; 2]; 2], scales: [f32; 2]) -> Box<dyn LayerNode<B>> {
        let device = Default::default();
        Box::new(Int8Linear::new(
            Tensor::<B, 2, Int>::from_ints(values, &device),
            Tensor::<B, 1>::from_floats(scales, &device),
        ))
    }

    struct NormStub;
    impl LayerNode<B> for NormStub {
        fn kind(&self) -> LayerKind {
            LayerKind::Norm
        }
    }

    #[test]
    fn test_finds_nested_leaf_by_dotted_path() {
        let tree = ModuleTree::<B>::new()
            .with_child(
                "a",
                Box::new(ModuleTree::new().with_child("b", linear([[1.0, 0.0], [0.0, 1.0]]))),
            )
            .with_child("norm", Box::new(NormStub));

        let found = find_linear_layers(&tree);
        assert_eq!(found.len(), 1);
        assert!(found.contains_key("a.b"));
        assert_eq!(found["a.b"].kind(), LayerKind::Linear);
    }

    #[test]
    fn test_quantized_layer_matches_linear_target() {
        let tree = ModuleTree::<B>::new()
            .with_child("proj", int8_linear([[0, 3], [0, 0]], [0.5, 0.25]));

        let found = find_layers(&tree, &[LayerKind::Linear], "");
        assert_eq!(found.len(), 1);
        assert_eq!(found["proj"].kind(), LayerKind::QuantizedLinear);
    }

    #[test]
    fn test_empty_prefix_has_no_leading_dot() {
        let tree = ModuleTree::<B>::new().with_child("fc", linear([[1.0, 2.0], [3.0, 4.0]]));
        let found = find_layers(&tree, DENSE_TARGETS, "");
        assert!(found.contains_key("fc"));
    }

    #[test]
    fn test_matching_root_keeps_prefix() {
        let leaf = linear([[1.0, 2.0], [3.0, 4.0]]);
        let found = find_layers(leaf.as_ref(), DENSE_TARGETS, "model.layers.0.fc");
        assert_eq!(found.len(), 1);
        assert!(found.contains_key("model.layers.0.fc"));
    }

    #[test]
    fn test_non_target_kinds_excluded() {
        let tree = ModuleTree::<B>::new()
            .with_child("norm", Box::new(NormStub))
            .with_child("fc", linear([[0.0, 0.0], [0.0, 5.0]]));
        let found = find_layers(&tree, &[LayerKind::Norm], "");
        assert_eq!(found.len(), 1);
        assert!(found.contains_key("norm"));
    }

    #[test]
    fn test_int8_dequantized_weight_preserves_zeros() {
        let layer = int8_linear([[0, 4], [0, 0]], [0.5, 0.25]);
        let weight = layer.weight().unwrap();
        let values: Vec<f32> = weight.into_data().convert::<f32>().to_vec().unwrap();
        assert_eq!(values, vec![0.0, 2.0, 0.0, 0.0]);
    }
}

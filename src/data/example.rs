// ============================================================
// Layer 2 — TokenizedExample
// ============================================================
// One tokenized training pair:
//
//   input_ids:  the prompt's token ids, length seq_len
//   target_ids: a copy of input_ids where every position
//               EXCEPT THE LAST is replaced by the ignore
//               sentinel (-100)
//
// The sentinel marks positions excluded from the loss, so only
// the final token of each example contributes — the labelling
// scheme this pipeline's training loop expects.
//
// Tensors are created from a flat id Vec via
// Tensor::from_ints, on whatever device the caller passes.
//
// Reference: Burn Book §4 (Datasets)

use burn::prelude::*;

/// Label value excluded from loss computation.
pub const IGNORE_INDEX: i32 = -100;

/// A tokenized (input, target) tensor pair.
#[derive(Debug, Clone)]
pub struct TokenizedExample<B: Backend> {
    /// Token id sequence — shape: [seq_len]
    pub input_ids: Tensor<B, 1, Int>,

    /// Masked label sequence — shape: [seq_len].
    /// All positions are IGNORE_INDEX except the last, which
    /// equals the last input id.
    pub target_ids: Tensor<B, 1, Int>,
}

/// Build the masked target sequence for a set of input ids:
/// IGNORE_INDEX everywhere except the final position.
pub fn masked_targets(input_ids: &[i32]) -> Vec<i32> {
    let mut targets = vec![IGNORE_INDEX; input_ids.len()];
    if let (Some(last_target), Some(&last_input)) = (targets.last_mut(), input_ids.last()) {
        *last_target = last_input;
    }
    targets
}

impl<B: Backend> TokenizedExample<B> {
    /// Build the pair from raw tokenizer ids.
    pub fn from_ids(ids: &[u32], device: &B::Device) -> Self {
        let input: Vec<i32> = ids.iter().map(|&id| id as i32).collect();
        let target = masked_targets(&input);

        Self {
            input_ids:  Tensor::<B, 1, Int>::from_ints(input.as_slice(), device),
            target_ids: Tensor::<B, 1, Int>::from_ints(target.as_slice(), device),
        }
    }

    /// Sequence length shared by both tensors.
    pub fn seq_len(&self) -> usize {
        self.input_ids.dims()[0]
    }
}

/// Encoded sequence length expected by the classifier
pub const MAX_LEN: usize = 64;

/// Id of the padding token; also marks a masked-out position
pub const PAD_ID: i64 = 0;

/// Token ids and attention mask for one classification attempt.
///
/// Both arrays always hold exactly [`MAX_LEN`] entries; unused positions are
/// [`PAD_ID`] with mask 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedInput {
    pub ids: [i64; MAX_LEN],
    pub mask: [i64; MAX_LEN],
}

impl EncodedInput {
    /// Builds the input from a token sequence, right-padding with [`PAD_ID`].
    ///
    /// The mask is derived from the final ids, so a real token with the
    /// padding id is masked like padding. Tokens past `MAX_LEN` are dropped.
    pub fn from_tokens(tokens: &[i64]) -> Self {
        let mut ids = [PAD_ID; MAX_LEN];
        for (slot, token) in ids.iter_mut().zip(tokens) {
            *slot = *token;
        }
        let mut mask = [0i64; MAX_LEN];
        for (m, id) in mask.iter_mut().zip(ids.iter()) {
            *m = if *id != PAD_ID { 1 } else { 0 };
        }
        Self { ids, mask }
    }

    /// Number of non-padding positions
    pub fn len(&self) -> usize {
        self.mask.iter().filter(|m| **m == 1).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classifier output reduced to the winning index
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub category_index: usize,
    pub scores: Vec<f32>,
}

impl ClassificationResult {
    /// Arg-max over `scores`. Ties go to the lowest index; the running
    /// maximum starts at negative infinity so all-negative vectors still
    /// pick a winner. Returns `None` when no score is comparable (empty or
    /// all NaN).
    pub fn from_scores(scores: Vec<f32>) -> Option<Self> {
        let mut best: Option<usize> = None;
        let mut max = f32::NEG_INFINITY;
        for (i, score) in scores.iter().enumerate() {
            if *score > max || (best.is_none() && *score == max) {
                max = *score;
                best = Some(i);
            }
        }
        best.map(|category_index| Self {
            category_index,
            scores,
        })
    }
}

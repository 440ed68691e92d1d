//! Whole-word tokenizer producing fixed-length classifier input.
//!
//! Words are looked up verbatim after lowercasing; there is no sub-word
//! splitting. Anything not in the vocabulary becomes `[UNK]`.

mod vocabulary;

pub use vocabulary::Vocabulary;

use shared_types::{EncodedInput, MAX_LEN};

pub const CLS_TOKEN: &str = "[CLS]";
pub const SEP_TOKEN: &str = "[SEP]";
pub const UNK_TOKEN: &str = "[UNK]";
pub const PAD_TOKEN: &str = "[PAD]";

/// BERT-style ids used when the vocabulary lacks the special tokens
pub const FALLBACK_CLS_ID: i64 = 101;
pub const FALLBACK_SEP_ID: i64 = 102;
pub const FALLBACK_UNK_ID: i64 = 100;

/// Encodes `text` as `[CLS] word... [SEP]` right-padded to [`MAX_LEN`].
///
/// Word tokens stop once the sequence reaches `MAX_LEN - 1`, leaving room
/// for `[SEP]`. Same vocabulary and text always give the same output.
pub fn tokenize(vocab: &Vocabulary, text: &str) -> EncodedInput {
    let cls = vocab.id(CLS_TOKEN).unwrap_or(FALLBACK_CLS_ID);
    let sep = vocab.id(SEP_TOKEN).unwrap_or(FALLBACK_SEP_ID);
    let unk = vocab.id(UNK_TOKEN).unwrap_or(FALLBACK_UNK_ID);

    let mut tokens = Vec::with_capacity(MAX_LEN);
    tokens.push(cls);

    for word in text.to_lowercase().split_whitespace() {
        tokens.push(vocab.id(word).unwrap_or(unk));
        if tokens.len() >= MAX_LEN - 1 {
            break;
        }
    }

    tokens.push(sep);
    EncodedInput::from_tokens(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::PAD_ID;

    fn bert_vocab() -> Vocabulary {
        let mut tokens: Vec<String> = (0..100).map(|i| format!("[unused{i}]")).collect();
        tokens[0] = PAD_TOKEN.to_string();
        tokens.push(UNK_TOKEN.to_string()); // 100
        tokens.push(CLS_TOKEN.to_string()); // 101
        tokens.push(SEP_TOKEN.to_string()); // 102
        for word in ["sent", "rs.500", "to", "john", "received", "from", "bank"] {
            tokens.push(word.to_string());
        }
        Vocabulary::from_tokens(tokens)
    }

    #[test]
    fn test_known_words() {
        let vocab = bert_vocab();
        let input = tokenize(&vocab, "Sent Rs.500 to John");
        assert_eq!(&input.ids[..6], &[101, 103, 104, 105, 106, 102]);
        assert_eq!(&input.mask[..7], &[1, 1, 1, 1, 1, 1, 0]);
    }

    #[test]
    fn test_output_is_always_max_len() {
        let vocab = bert_vocab();
        let long = "word ".repeat(500);
        for text in ["", "sent", long.as_str()] {
            let input = tokenize(&vocab, text);
            assert_eq!(input.ids.len(), MAX_LEN);
            assert_eq!(input.mask.len(), MAX_LEN);
        }
    }

    #[test]
    fn test_deterministic() {
        let vocab = bert_vocab();
        let text = "Received Rs.500 from ABC Bank";
        assert_eq!(tokenize(&vocab, text), tokenize(&vocab, text));
    }

    #[test]
    fn test_word_count_matches_token_count() {
        let vocab = bert_vocab();
        let text = "sent to john from bank received";
        let input = tokenize(&vocab, text);
        // CLS + words + SEP
        assert_eq!(input.len() - 2, text.split_whitespace().count());
    }

    #[test]
    fn test_unknown_word_maps_to_unk() {
        let vocab = bert_vocab();
        let input = tokenize(&vocab, "sent  zomato");
        assert_eq!(&input.ids[..4], &[101, 103, 100, 102]);
    }

    #[test]
    fn test_fallback_ids_without_special_tokens() {
        let vocab = Vocabulary::from_tokens(["[PAD]", "paid"]);
        let input = tokenize(&vocab, "paid swiggy");
        assert_eq!(&input.ids[..4], &[101, 1, 100, 102]);
    }

    #[test]
    fn test_truncates_long_text_and_keeps_sep() {
        let vocab = bert_vocab();
        let input = tokenize(&vocab, &"sent ".repeat(200));
        assert_eq!(input.ids[0], 101);
        assert_eq!(input.ids[MAX_LEN - 1], 102);
        assert!(input.ids[1..MAX_LEN - 1].iter().all(|id| *id == 103));
        assert_eq!(input.len(), MAX_LEN);
    }

    #[test]
    fn test_empty_text_is_cls_sep() {
        let vocab = bert_vocab();
        let input = tokenize(&vocab, "   ");
        assert_eq!(&input.ids[..3], &[101, 102, PAD_ID]);
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn test_pad_id_token_is_masked() {
        let vocab = Vocabulary::from_tokens(["zero", "[CLS]", "[SEP]"]);
        let input = tokenize(&vocab, "zero");
        assert_eq!(&input.ids[..4], &[1, 0, 2, 0]);
        assert_eq!(&input.mask[..4], &[1, 0, 1, 0]);
    }
}

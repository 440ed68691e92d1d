use shared_types::LoadError;
use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Whole-word vocabulary: line `i` of the vocabulary file is token id `i`.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    token_to_id: HashMap<String, i64>,
}

impl Vocabulary {
    /// Reads a newline-delimited vocabulary file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| LoadError::Vocabulary {
            path: path.display().to_string(),
            source,
        })?;

        let vocab = Self::from_reader(BufReader::new(file)).map_err(|source| {
            LoadError::Vocabulary {
                path: path.display().to_string(),
                source,
            }
        })?;

        tracing::info!("Loaded vocabulary of {} tokens from {}", vocab.len(), path.display());
        Ok(vocab)
    }

    /// Builds a vocabulary from newline-delimited tokens. Each line is
    /// trimmed; a repeated token keeps the id of its last line. Only read
    /// errors fail; invalid UTF-8 is replaced rather than rejected.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut token_to_id = HashMap::new();
        for (index, line) in reader.split(b'\n').enumerate() {
            let line = line?;
            let token = String::from_utf8_lossy(&line).trim().to_string();
            token_to_id.insert(token, index as i64);
        }
        Ok(Self { token_to_id })
    }

    /// Builds a vocabulary from tokens in id order.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let token_to_id = tokens
            .into_iter()
            .enumerate()
            .map(|(index, token)| (token.as_ref().trim().to_string(), index as i64))
            .collect();
        Self { token_to_id }
    }

    pub fn id(&self, token: &str) -> Option<i64> {
        self.token_to_id.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.token_to_id.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.token_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_to_id.is_empty()
    }
}

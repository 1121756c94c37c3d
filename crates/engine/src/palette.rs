//! The fixed set of draggable source tokens.

/// Media type the drag payload channel carries tokens as.
pub const PAYLOAD_MEDIA_TYPE: &str = "text/plain";

/// Default dollhouse furnishing tokens.
pub const DEFAULT_TOKENS: &[&str] = &["🛋️", "🪑", "🛏️", "🪴", "🐶", "🐱", "📺", "💡"];

/// Palette of placeable emoji. The set is fixed for the lifetime of an
/// editor; configuration may swap in a different set at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    tokens: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_TOKENS.iter().map(|s| s.to_string()))
    }
}

impl Palette {
    pub fn new(tokens: impl IntoIterator<Item = String>) -> Self {
        let tokens: Vec<String> = tokens.into_iter().filter(|t| !t.is_empty()).collect();
        if tokens.is_empty() {
            // An empty palette would leave nothing to place
            return Self {
                tokens: DEFAULT_TOKENS.iter().map(|s| s.to_string()).collect(),
            };
        }
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_nonempty() {
        let p = Palette::default();
        assert!(!p.is_empty());
        assert_eq!(p.get(0), Some(DEFAULT_TOKENS[0]));
    }

    #[test]
    fn custom_tokens_drop_empties() {
        let p = Palette::new(vec!["🎈".to_string(), String::new(), "🧸".to_string()]);
        assert_eq!(p.tokens(), &["🎈".to_string(), "🧸".to_string()]);
    }

    #[test]
    fn fully_empty_config_falls_back_to_defaults() {
        let p = Palette::new(Vec::new());
        assert_eq!(p.len(), DEFAULT_TOKENS.len());
    }
}

use serde::{Deserialize, Serialize};

/// Maximum number of tokens a single subject can carry.
pub const MAX_TOKENS: usize = 6;

pub const BUILTIN_TOKENS: &[&str] = &[
    "blessed",
    "bleeding",
    "blinded",
    "charmed",
    "frightened",
    "hasted",
    "poisoned",
    "prone",
    "stunned",
];

/// Index into a [`TokenRegistry`]. Only the registry hands these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenKind(usize);

impl TokenKind {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A status marker attached to a subject. Purely descriptive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
}

/// Set of token kinds available to an application, owned by whoever builds it.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    names: Vec<String>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for name in BUILTIN_TOKENS {
            registry.register(*name);
        }
        registry
    }

    pub fn register(&mut self, name: impl Into<String>) -> TokenKind {
        self.names.push(name.into());
        TokenKind(self.names.len() - 1)
    }

    pub fn lookup(&self, name: &str) -> Option<TokenKind> {
        self.names.iter().position(|n| n == name).map(TokenKind)
    }

    pub fn name(&self, kind: TokenKind) -> Option<&str> {
        self.names.get(kind.0).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenKind, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (TokenKind(i), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

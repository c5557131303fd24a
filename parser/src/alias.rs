//! Option token lookup table.

use std::collections::HashMap;

use tracing::debug;

use crate::descriptor::FieldDescriptor;

/// Maps accepted option tokens (`--name`, `-n`, `--fullname`) to field keys.
///
/// Built fresh for every parse from the command's descriptors. Every key
/// gets its canonical `--key` token; a one-character alias becomes `-a` and
/// a longer one `--alias`. When two declarations produce the same token the
/// later one wins.
#[derive(Debug, Clone, Default)]
pub struct AliasTable<'a> {
    tokens: HashMap<String, FieldDescriptor<'a>>,
}

impl<'a> AliasTable<'a> {
    pub fn build(fields: &[FieldDescriptor<'a>]) -> Self {
        let mut table = Self::default();
        for field in fields {
            table.insert(format!("--{}", field.key()), *field);
            for alias in field.aliases() {
                let token = if alias.chars().count() == 1 {
                    format!("-{alias}")
                } else {
                    format!("--{alias}")
                };
                table.insert(token, *field);
            }
        }
        table
    }

    fn insert(&mut self, token: String, field: FieldDescriptor<'a>) {
        if let Some(previous) = self.tokens.insert(token.clone(), field) {
            debug!(
                token = %token,
                previous = previous.key(),
                current = field.key(),
                "Option token redeclared; later declaration wins"
            );
        }
    }

    /// Exact-match lookup.
    pub fn lookup(&self, token: &str) -> Option<FieldDescriptor<'a>> {
        self.tokens.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

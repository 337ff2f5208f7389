//! Alias symbol table for transform outputs.

use gw_sql::{Expr, SelectItem};
use std::collections::BTreeMap;

/// Maps a transform's output alias to its compiled, aliased select item.
///
/// Created empty for each compilation. A later transform with the same
/// alias replaces the earlier entry.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: BTreeMap<String, SelectItem>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `item` under `alias`, returning the entry it replaced.
    pub fn insert(&mut self, alias: impl Into<String>, item: SelectItem) -> Option<SelectItem> {
        self.entries.insert(alias.into(), item)
    }

    /// The aliased select item, as it should appear in a select-list.
    pub fn item(&self, alias: &str) -> Option<&SelectItem> {
        self.entries.get(alias)
    }

    /// The bare expression behind an alias, for use as an argument.
    pub fn expr(&self, alias: &str) -> Option<&Expr> {
        self.entries.get(alias).and_then(SelectItem::expr)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut aliases = AliasTable::new();
        assert!(aliases.is_empty());

        let item = SelectItem::aliased(Expr::integer(1), "gw_count_fid");
        assert!(aliases.insert("gw_count_fid", item.clone()).is_none());

        assert_eq!(aliases.item("gw_count_fid"), Some(&item));
        assert_eq!(aliases.expr("gw_count_fid"), Some(&Expr::integer(1)));
        assert!(aliases.item("other").is_none());
        assert_eq!(aliases.len(), 1);
    }

    #[test]
    fn test_later_insert_overwrites() {
        let mut aliases = AliasTable::new();
        aliases.insert("a", SelectItem::aliased(Expr::integer(1), "a"));
        let replaced = aliases.insert("a", SelectItem::aliased(Expr::raw("2 + 2"), "a"));

        assert_eq!(replaced, Some(SelectItem::aliased(Expr::integer(1), "a")));
        assert_eq!(aliases.expr("a"), Some(&Expr::raw("2 + 2")));
        assert_eq!(aliases.len(), 1);
    }
}

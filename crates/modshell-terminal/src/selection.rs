//! Default-module selection.
//!
//! Selecting a module changes the prompt and lets users type a command
//! without the module prefix.

use modshell_types::error::{Result, ShellError};

use crate::registry::Registry;

/// Appended to a module name to form its prompt.
const PROMPT_SUFFIX: &str = "> ";

/// The selected default module and its cached prompt.
#[derive(Debug, Default)]
pub struct Selection {
    selected: Option<usize>,
    prompt: String,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the selected module, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    /// Prompt of the selected module, if any.
    pub fn prompt(&self) -> Option<&str> {
        self.selected.map(|_| self.prompt.as_str())
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.prompt.clear();
    }

    /// Select the module called `name`.
    ///
    /// On failure the current selection is left untouched.
    pub fn select(
        &mut self,
        registry: &Registry,
        name: &str,
        max_name_len: usize,
        compare_len: usize,
    ) -> Result<usize> {
        if name.chars().count() > max_name_len {
            return Err(ShellError::ModuleNameTooLong(name.to_string()));
        }
        let index = registry
            .find_by_name(name, compare_len)
            .ok_or_else(|| ShellError::ModuleNotFound(name.to_string()))?;

        self.selected = Some(index);
        self.prompt = format!("{name}{PROMPT_SUFFIX}");
        log::debug!("default module set to {name} ({index})");
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        let mut reg = Registry::with_capacity(4);
        reg.register("net", vec![]).unwrap();
        reg.register("ble", vec![]).unwrap();
        reg
    }

    #[test]
    fn starts_unselected() {
        let sel = Selection::new();
        assert_eq!(sel.selected(), None);
        assert_eq!(sel.prompt(), None);
    }

    #[test]
    fn select_sets_index_and_prompt() {
        let reg = registry();
        let mut sel = Selection::new();
        assert_eq!(sel.select(&reg, "ble", 20, usize::MAX).unwrap(), 1);
        assert_eq!(sel.selected(), Some(1));
        assert_eq!(sel.prompt(), Some("ble> "));
    }

    #[test]
    fn clear_reverts() {
        let reg = registry();
        let mut sel = Selection::new();
        sel.select(&reg, "net", 20, usize::MAX).unwrap();
        sel.clear();
        assert!(!sel.is_selected());
        assert_eq!(sel.prompt(), None);
    }

    #[test]
    fn too_long_leaves_state_unchanged() {
        let reg = registry();
        let mut sel = Selection::new();
        sel.select(&reg, "net", 20, usize::MAX).unwrap();
        let err = sel
            .select(&reg, "averyveryverylongmodulename", 20, usize::MAX)
            .unwrap_err();
        assert!(matches!(err, ShellError::ModuleNameTooLong(_)));
        assert_eq!(sel.selected(), Some(0));
        assert_eq!(sel.prompt(), Some("net> "));
    }

    #[test]
    fn unknown_leaves_state_unchanged() {
        let reg = registry();
        let mut sel = Selection::new();
        let err = sel.select(&reg, "wifi", 20, usize::MAX).unwrap_err();
        assert_eq!(format!("{err}"), "Illegal module wifi, default is not changed");
        assert!(!sel.is_selected());
    }

    #[test]
    fn name_at_limit_accepted() {
        let mut reg = Registry::with_capacity(1);
        reg.register("abc", vec![]).unwrap();
        let mut sel = Selection::new();
        assert!(sel.select(&reg, "abc", 3, usize::MAX).is_ok());
    }
}

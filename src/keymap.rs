use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::TreeAction;

/// Navigation key profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeymapProfile {
    /// Arrows and `hjkl`.
    #[default]
    Default,
    /// `hjkl` only.
    Vim,
    /// Arrows only.
    Arrows,
}

/// Maps crossterm key events to [`TreeAction`]s.
#[derive(Clone, Copy, Debug)]
pub struct TreeKeyBindings {
    profile: KeymapProfile,
}

impl Default for TreeKeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeKeyBindings {
    pub const fn new() -> Self {
        Self {
            profile: KeymapProfile::Default,
        }
    }

    pub const fn with_profile(profile: KeymapProfile) -> Self {
        Self { profile }
    }

    pub const fn profile(&self) -> KeymapProfile {
        self.profile
    }

    pub const fn set_profile(&mut self, profile: KeymapProfile) {
        self.profile = profile;
    }

    pub fn resolve(&self, key: KeyEvent) -> Option<TreeAction> {
        if key.modifiers.contains(KeyModifiers::SHIFT) {
            match key.code {
                KeyCode::Right => return Some(TreeAction::ExpandAll),
                KeyCode::Left => return Some(TreeAction::CollapseAll),
                _ => {}
            }
        }

        let nav = match self.profile {
            KeymapProfile::Default => Self::resolve_vim(key).or(Self::resolve_arrows(key)),
            KeymapProfile::Vim => Self::resolve_vim(key),
            KeymapProfile::Arrows => Self::resolve_arrows(key),
        };
        if nav.is_some() {
            return nav;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(TreeAction::Toggle),
            KeyCode::Char('+') => Some(TreeAction::Expand),
            KeyCode::Char('-') => Some(TreeAction::Collapse),
            KeyCode::Home => Some(TreeAction::SelectFirst),
            KeyCode::End => Some(TreeAction::SelectLast),
            KeyCode::Backspace => Some(TreeAction::SelectParent),
            _ => None,
        }
    }

    const fn resolve_vim(key: KeyEvent) -> Option<TreeAction> {
        match key.code {
            KeyCode::Char('k') => Some(TreeAction::SelectPrev),
            KeyCode::Char('j') => Some(TreeAction::SelectNext),
            KeyCode::Char('h') => Some(TreeAction::Collapse),
            KeyCode::Char('l') => Some(TreeAction::Expand),
            _ => None,
        }
    }

    const fn resolve_arrows(key: KeyEvent) -> Option<TreeAction> {
        match key.code {
            KeyCode::Up => Some(TreeAction::SelectPrev),
            KeyCode::Down => Some(TreeAction::SelectNext),
            KeyCode::Left => Some(TreeAction::Collapse),
            KeyCode::Right => Some(TreeAction::Expand),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn profiles_filter_navigation_keys() {
        let default = TreeKeyBindings::new();
        let vim = TreeKeyBindings::with_profile(KeymapProfile::Vim);
        let arrows = TreeKeyBindings::with_profile(KeymapProfile::Arrows);

        assert_eq!(default.resolve(key(KeyCode::Down)), Some(TreeAction::SelectNext));
        assert_eq!(default.resolve(key(KeyCode::Char('j'))), Some(TreeAction::SelectNext));
        assert_eq!(vim.resolve(key(KeyCode::Down)), None);
        assert_eq!(arrows.resolve(key(KeyCode::Char('j'))), None);
    }

    #[test]
    fn shift_arrows_expand_and_collapse_everything() {
        let bindings = TreeKeyBindings::new();

        assert_eq!(
            bindings.resolve(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT)),
            Some(TreeAction::ExpandAll)
        );
        assert_eq!(bindings.resolve(key(KeyCode::Enter)), Some(TreeAction::Toggle));
    }
}

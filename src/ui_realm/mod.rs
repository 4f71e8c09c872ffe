//! tui-realm UI components and types for the intake form.

#[cfg(test)]
pub mod tests;

pub mod application;
pub mod components;
pub mod messages;
pub mod model;

/// Component identifier enum for the tui-realm Application.
///
/// # Variants
///
/// - `Profile`: pane with the static fields (name, ages, income, savings)
/// - `GoalRow(usize)`: one goal row (indexed), category selector plus the
///   target and horizon inputs
/// - `Footer`: keyboard hints / notice bar
/// - `Status`: submission outcome overlay
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ComponentId {
    Profile,
    GoalRow(usize),
    Footer,
    Status,
}

#[cfg(test)]
mod component_id {
    use super::ComponentId;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    #[test]
    fn constructible() {
        let _ = ComponentId::Profile;
        let _ = ComponentId::GoalRow(0);
        let _ = ComponentId::GoalRow(9);
        let _ = ComponentId::Footer;
        let _ = ComponentId::Status;
    }

    #[test]
    fn hash_behavior() {
        let mut hasher1 = DefaultHasher::new();
        let mut hasher2 = DefaultHasher::new();

        ComponentId::GoalRow(5).hash(&mut hasher1);
        ComponentId::GoalRow(5).hash(&mut hasher2);

        assert_eq!(hasher1.finish(), hasher2.finish());
    }

    #[test]
    fn tuple_variant_equality() {
        assert_eq!(ComponentId::GoalRow(0), ComponentId::GoalRow(0));
        assert_ne!(ComponentId::GoalRow(0), ComponentId::GoalRow(1));
    }
}

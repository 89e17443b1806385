use blueprint_core::NativeView;

/// A plain view with no behaviour of its own; hosts roots and groups
/// children.
#[derive(Debug, Default)]
pub struct ContainerView;

impl NativeView for ContainerView {}

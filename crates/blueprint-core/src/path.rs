use std::fmt;

/// Structural position of an element: the child indices walked from the
/// root. Paths are the keys the reconciler diffs on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementPath {
    components: Vec<usize>,
}

impl ElementPath {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The path of this element's `index`-th child.
    pub fn appending(&self, index: usize) -> Self {
        let mut components = Vec::with_capacity(self.components.len() + 1);
        components.extend_from_slice(&self.components);
        components.push(index);
        Self { components }
    }

    pub fn components(&self) -> &[usize] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn parent(&self) -> Option<ElementPath> {
        let (_, rest) = self.components.split_last()?;
        Some(Self {
            components: rest.to_vec(),
        })
    }
}

impl From<Vec<usize>> for ElementPath {
    fn from(components: Vec<usize>) -> Self {
        Self { components }
    }
}

impl<const N: usize> From<[usize; N]> for ElementPath {
    fn from(components: [usize; N]) -> Self {
        Self {
            components: components.to_vec(),
        }
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{component}")?;
        }
        f.write_str("]")
    }
}

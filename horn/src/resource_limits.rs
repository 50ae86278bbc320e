/// Limits applied while resolving queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLimits {
    /// Maximum number of nested resolutions: rule-body evaluations and
    /// validation probes each add one level
    pub max_recursion_depth: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        ResourceLimits {
            max_recursion_depth: 512,
        }
    }
}

impl ResourceLimits {
    pub fn with_max_recursion_depth(depth: usize) -> Self {
        ResourceLimits {
            max_recursion_depth: depth,
        }
    }
}

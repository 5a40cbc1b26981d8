//! Configuration for the task dependency graph.

use pyo3::prelude::*;

/// Runtime options of a [`crate::TaskDependencyGraph`].
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl GraphConfig {
    pub fn with_verbosity(verbosity: u8) -> Self {
        Self { verbosity }
    }
}

#[pymethods]
impl GraphConfig {
    #[new]
    #[pyo3(signature = (verbosity=0))]
    fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    fn __repr__(&self) -> String {
        format!("GraphConfig(verbosity={})", self.verbosity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GraphConfig::default();
        assert_eq!(config.verbosity, 0);
        assert_eq!(GraphConfig::with_verbosity(3).verbosity, 3);
    }
}

//! Camera registry — the ordered, immutable set of configured cameras.

use std::collections::HashSet;

use crate::camera::CameraDescriptor;
use crate::error::ValidationError;

/// Ordered collection of cameras, in configuration order.
///
/// Read-only after construction, so it can be shared freely behind an `Arc`
/// between the dispatcher and the bus session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraRegistry {
    cameras: Vec<CameraDescriptor>,
}

impl CameraRegistry {
    /// Build a registry, rejecting duplicate camera names.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateCamera`] for the first name that
    /// appears twice.
    pub fn new(cameras: Vec<CameraDescriptor>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(cameras.len());
        for camera in &cameras {
            if !seen.insert(camera.name()) {
                return Err(ValidationError::DuplicateCamera(camera.name().to_string()));
            }
        }
        Ok(Self { cameras })
    }

    /// First camera whose name equals `name` exactly (case-sensitive).
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&CameraDescriptor> {
        self.cameras.iter().find(|camera| camera.name() == name)
    }

    /// Iterate cameras in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &CameraDescriptor> {
        self.cameras.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}

impl<'a> IntoIterator for &'a CameraRegistry {
    type Item = &'a CameraDescriptor;
    type IntoIter = std::slice::Iter<'a, CameraDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.cameras.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(name: &str) -> CameraDescriptor {
        CameraDescriptor::builder()
            .name(name)
            .start_detection_url(format!("http://{name}/start"))
            .pause_detection_url(format!("http://{name}/pause"))
            .state_url(format!("http://{name}/state"))
            .build()
            .unwrap()
    }

    #[test]
    fn should_find_camera_by_exact_name() {
        let registry = CameraRegistry::new(vec![camera("1"), camera("2")]).unwrap();
        let found = registry.find("2").unwrap();
        assert_eq!(found.state_url(), "http://2/state");
    }

    #[test]
    fn should_return_none_for_unknown_name() {
        let registry = CameraRegistry::new(vec![camera("1")]).unwrap();
        assert!(registry.find("3").is_none());
    }

    #[test]
    fn should_match_names_case_sensitively() {
        let registry = CameraRegistry::new(vec![camera("Porch")]).unwrap();
        assert!(registry.find("porch").is_none());
        assert!(registry.find("Porch").is_some());
    }

    #[test]
    fn should_preserve_configuration_order() {
        let registry = CameraRegistry::new(vec![camera("b"), camera("a"), camera("c")])
            .unwrap();
        let names: Vec<_> = registry.iter().map(CameraDescriptor::name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn should_reject_duplicate_names() {
        let result = CameraRegistry::new(vec![camera("1"), camera("2"), camera("1")]);
        assert_eq!(
            result,
            Err(ValidationError::DuplicateCamera("1".to_string()))
        );
    }

    #[test]
    fn should_allow_empty_registry() {
        let registry = CameraRegistry::new(Vec::new()).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}

//! Recursive expansion of sub-file references into one flat edge list
use tracing::{debug, warn};

use crate::error::PartResult;
use crate::geometry::{Edge, SubfileReference};
use crate::library::{PartLibrary, PartSource};

/// Nesting bound used by [`PartLibrary::resolve`] unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Something that made a resolved drawing incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    /// The branch nested deeper than the bound and was cut off.
    DepthExceeded { name: String, depth: usize },
    /// The file could not be found or read; the branch contributes nothing.
    Unresolved {
        name: String,
        depth: usize,
        reason: String,
    },
}

/// A part with every reference expanded into the root's coordinate space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPart {
    pub name: String,
    pub edges: Vec<Edge>,
    pub warnings: Vec<ResolveWarning>,
}

impl ResolvedPart {
    /// True when nothing was truncated or skipped.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl<S: PartSource> PartLibrary<S> {
    /// Resolve `name` with the library's depth bound.
    ///
    /// Never fails. A missing root yields an empty edge list, which renders
    /// as the placeholder drawing.
    pub fn resolve(&self, name: &str) -> ResolvedPart {
        self.resolve_recursive(name, 0, self.max_depth)
    }

    /// Like [`PartLibrary::resolve`], but a root that cannot be read is an
    /// error. Nested failures still only drop their own branch.
    pub fn try_resolve(&self, name: &str) -> PartResult<ResolvedPart> {
        let root = self.parse_file(name)?;

        let mut warnings = Vec::new();
        let edges = self.flatten(root.edges, &root.references, 0, self.max_depth, &mut warnings);

        Ok(ResolvedPart {
            name: root.name,
            edges,
            warnings,
        })
    }

    /// Resolve `name` as if found `depth` levels below the root.
    pub fn resolve_recursive(&self, name: &str, depth: usize, max_depth: usize) -> ResolvedPart {
        let mut warnings = Vec::new();
        let (part_name, edges) = self
            .expand_named(name, depth, max_depth, &mut warnings)
            .unwrap_or_default();

        ResolvedPart {
            name: part_name,
            edges,
            warnings,
        }
    }

    fn expand(
        &self,
        name: &str,
        depth: usize,
        max_depth: usize,
        warnings: &mut Vec<ResolveWarning>,
    ) -> Vec<Edge> {
        self.expand_named(name, depth, max_depth, warnings)
            .map(|(_, edges)| edges)
            .unwrap_or_default()
    }

    /// Returns `None` when this branch contributes nothing, with the reason
    /// pushed onto `warnings`.
    fn expand_named(
        &self,
        name: &str,
        depth: usize,
        max_depth: usize,
        warnings: &mut Vec<ResolveWarning>,
    ) -> Option<(String, Vec<Edge>)> {
        if depth > max_depth {
            warn!(name, depth, max_depth, "Max recursion depth reached");
            warnings.push(ResolveWarning::DepthExceeded {
                name: name.to_string(),
                depth,
            });
            return None;
        }

        let part = match self.parse_file(name) {
            Ok(part) => part,
            Err(err) => {
                warn!(name, depth, error = %err, "Skipping unresolved part");
                warnings.push(ResolveWarning::Unresolved {
                    name: name.to_string(),
                    depth,
                    reason: err.to_string(),
                });
                return None;
            }
        };

        let edges = self.flatten(part.edges, &part.references, depth, max_depth, warnings);
        debug!(name, depth, edges = edges.len(), "Resolved part");
        Some((part.name, edges))
    }

    /// Own edges first, then each reference's edges in file order.
    fn flatten(
        &self,
        mut edges: Vec<Edge>,
        references: &[SubfileReference],
        depth: usize,
        max_depth: usize,
        warnings: &mut Vec<ResolveWarning>,
    ) -> Vec<Edge> {
        for reference in references {
            let branch = self.expand(&reference.filename, depth + 1, max_depth, warnings);
            edges.extend(branch.iter().map(|edge| reference.placement.apply_edge(edge)));
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::MemorySource;
    use nalgebra::Point3;

    fn library(files: &[(&str, &str)]) -> PartLibrary<MemorySource> {
        let mut source = MemorySource::new();
        for (path, contents) in files {
            source.insert(format!("lib/{path}"), *contents);
        }
        PartLibrary::with_source("lib", source)
    }

    #[test]
    fn test_part_without_references() {
        let lib = library(&[("parts/test.dat", "0 Simple Part\n2 24 0 0 0 10 10 10\n")]);
        let resolved = lib.resolve("test.dat");
        assert_eq!(resolved.name, "Simple Part");
        assert_eq!(resolved.edges.len(), 1);
        assert!(resolved.is_complete());
    }

    #[test]
    fn test_reference_is_placed() {
        let lib = library(&[
            (
                "parts/brick.dat",
                "0 Brick\n1 16 5 10 15 1 0 0 0 1 0 0 0 1 s\\side.dat\n2 24 0 0 0 1 0 0\n",
            ),
            ("parts/s/side.dat", "0 Side\n2 4 0 0 0 10 10 10\n"),
        ]);

        let resolved = lib.resolve("brick");
        assert_eq!(resolved.name, "Brick");
        assert_eq!(resolved.edges.len(), 2);
        assert_eq!(resolved.edges[0].start, Point3::new(0.0, 0.0, 0.0));

        let placed = resolved.edges[1];
        assert_eq!(placed.start, Point3::new(5.0, 10.0, 15.0));
        assert_eq!(placed.end, Point3::new(15.0, 20.0, 25.0));
        assert_eq!(placed.color, Some(4));
    }

    #[test]
    fn test_nested_placements_compose() {
        let lib = library(&[
            ("parts/a.dat", "1 16 100 0 0 1 0 0 0 1 0 0 0 1 b.dat\n"),
            ("parts/b.dat", "1 16 0 0 0 2 0 0 0 2 0 0 0 2 c.dat\n"),
            ("p/c.dat", "2 24 1 1 1 2 2 2\n"),
        ]);

        let resolved = lib.resolve("a.dat");
        assert_eq!(resolved.edges.len(), 1);
        assert_eq!(resolved.edges[0].start, Point3::new(102.0, 2.0, 2.0));
        assert_eq!(resolved.edges[0].end, Point3::new(104.0, 4.0, 4.0));
    }

    #[test]
    fn test_self_reference_stops_at_max_depth() {
        let lib = library(&[(
            "parts/test.dat",
            "0 Recursive Part\n1 16 0 0 0 1 0 0 0 1 0 0 0 1 test.dat\n2 24 0 0 0 10 10 10\n",
        )]);

        let resolved = lib.resolve_recursive("test.dat", 0, 1);
        assert_eq!(resolved.edges.len(), 2);
        assert_eq!(
            resolved.warnings,
            vec![ResolveWarning::DepthExceeded {
                name: "test.dat".to_string(),
                depth: 2,
            }]
        );
    }

    #[test]
    fn test_default_depth_bound() {
        let lib = library(&[(
            "parts/loop.dat",
            "1 16 0 0 0 1 0 0 0 1 0 0 0 1 loop.dat\n2 24 0 0 0 1 0 0\n",
        )]);

        let resolved = lib.resolve("loop.dat");
        assert_eq!(resolved.edges.len(), DEFAULT_MAX_DEPTH + 1);

        let resolved = lib.clone().with_max_depth(0).resolve("loop.dat");
        assert_eq!(resolved.edges.len(), 1);
    }

    #[test]
    fn test_missing_reference_drops_only_its_branch() {
        let lib = library(&[
            (
                "parts/root.dat",
                "0 Root\n\
                 1 16 0 0 0 1 0 0 0 1 0 0 0 1 missing.dat\n\
                 1 16 0 0 0 1 0 0 0 1 0 0 0 1 present.dat\n\
                 2 24 0 0 0 1 0 0\n",
            ),
            ("parts/present.dat", "2 24 0 0 0 0 1 0\n"),
        ]);

        let resolved = lib.resolve("root.dat");
        assert_eq!(resolved.edges.len(), 2);
        assert!(matches!(
            &resolved.warnings[..],
            [ResolveWarning::Unresolved { name, depth: 1, .. }] if name == "missing.dat"
        ));
    }

    #[test]
    fn test_missing_root_yields_empty() {
        let lib = library(&[]);
        let resolved = lib.resolve("nonexistent.dat");
        assert!(resolved.edges.is_empty());
        assert!(resolved.name.is_empty());
        assert_eq!(resolved.warnings.len(), 1);
    }

    #[test]
    fn test_try_resolve_missing_root_is_error() {
        let lib = library(&[("parts/root.dat", "1 16 0 0 0 1 0 0 0 1 0 0 0 1 gone.dat\n")]);
        assert!(lib.try_resolve("nonexistent.dat").is_err());

        let resolved = lib.try_resolve("root.dat").unwrap();
        assert!(resolved.edges.is_empty());
        assert!(!resolved.is_complete());
    }
}

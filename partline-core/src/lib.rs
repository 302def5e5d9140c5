//! Partline Core Library - LDraw geometry resolution and projection
//!
//! Flattens composite LDraw parts into a single list of 3D edges and projects
//! them into 2D. Stateless: every value is built per call.

pub mod error;
pub mod geometry;
pub mod library;
pub mod parser;
pub mod projection;
pub mod resolver;
pub mod transform;

// Re-export commonly used types
pub use error::{PartError, PartResult};
pub use geometry::{Edge, ParsedPart, SubfileReference};
pub use library::{FsSource, MemorySource, PartLibrary, PartSource};
pub use parser::{parse_part, LineDiagnostic};
pub use projection::{project_edge, project_edges, Bounds, ProjectedEdge};
pub use resolver::{ResolveWarning, ResolvedPart, DEFAULT_MAX_DEPTH};
pub use transform::Placement;

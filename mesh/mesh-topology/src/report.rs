//! Diagnostic report and findings.

use std::collections::BTreeMap;
use std::fmt;

use mesh_types::{EdgeKey, Vector3};
use tracing::{error, info, warn};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Worth reporting; meshing usually still works.
    Warning,
    /// Likely to break volume meshing; blocks the pipeline.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A single defect found by the analyzer.
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    /// The soup has no facets.
    EmptyMesh,
    /// Edges shared by more than two facets.
    NonManifoldEdges(usize),
    /// Edges used by exactly one facet.
    HoleEdges(usize),
    /// More than one connected body.
    MultipleBodies(usize),
    /// Facets with zero area, by index.
    DegenerateFaces(Vec<usize>),
    /// A stored normal points toward the centroid.
    InwardNormals {
        /// First offending facet in file order.
        first_face: usize,
    },
    /// Bounding-box extents are not all equal.
    NonUniformScaling {
        /// Extent along each axis.
        extents: Vector3<f64>,
    },
    /// Repeated vertex occurrences.
    DuplicateVertices(usize),
    /// Repeated facets.
    DuplicateFaces(usize),
}

impl Finding {
    /// Severity of this finding.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::EmptyMesh
            | Self::NonManifoldEdges(_)
            | Self::HoleEdges(_)
            | Self::MultipleBodies(_)
            | Self::DegenerateFaces(_) => Severity::Error,
            Self::InwardNormals { .. }
            | Self::NonUniformScaling { .. }
            | Self::DuplicateVertices(_)
            | Self::DuplicateFaces(_) => Severity::Warning,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMesh => write!(f, "Mesh has no faces"),
            Self::NonManifoldEdges(n) => write!(f, "Non-manifold edges: {n}"),
            Self::HoleEdges(n) => write!(f, "Holes in the model: {n} open edges"),
            Self::MultipleBodies(n) => write!(f, "Multiple bodies: {n}"),
            Self::DegenerateFaces(faces) => write!(f, "Degenerate faces: {faces:?}"),
            Self::InwardNormals { first_face } => {
                write!(f, "Normals are incorrectly oriented (first at face {first_face})")
            }
            Self::NonUniformScaling { extents } => write!(
                f,
                "Non-uniform scaling: extents {:.4} x {:.4} x {:.4}",
                extents.x, extents.y, extents.z
            ),
            Self::DuplicateVertices(n) => write!(f, "Duplicate vertices: {n}"),
            Self::DuplicateFaces(n) => write!(f, "Duplicate faces: {n}"),
        }
    }
}

/// Everything the analyzer found about one soup.
///
/// Serious defects (non-manifold edges, holes, multiple bodies, degenerate
/// faces) block the pipeline. Warnings are reported and do not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticReport {
    /// Number of facets.
    pub face_count: usize,
    /// Number of vertex occurrences (`3 x face_count`).
    pub vertex_count: usize,
    /// Number of distinct vertex positions.
    pub unique_vertex_count: usize,
    /// Number of distinct edges.
    pub edge_count: usize,

    /// Edges with incidence greater than two, with their counts.
    pub non_manifold_edges: BTreeMap<EdgeKey, usize>,
    /// Edges with incidence exactly one.
    pub hole_edges: Vec<EdgeKey>,
    /// Number of connected bodies.
    pub body_count: usize,
    /// Indices of zero-area facets.
    pub degenerate_faces: Vec<usize>,

    /// Whether every stored normal passed the centroid test.
    pub normals_outward: bool,
    /// First facet that failed the centroid test.
    pub first_inward_face: Option<usize>,
    /// Whether the bounding-box extents differ.
    pub non_uniform_scaling: bool,
    /// Bounding-box extents; zero for an empty soup.
    pub extents: Vector3<f64>,
    /// Corner positions repeated within a facet.
    pub duplicate_vertex_count: usize,
    /// Facets minus distinct ordered vertex triples.
    pub duplicate_face_count: usize,
}

impl DiagnosticReport {
    /// Vertex occurrences beyond the first for each distinct position.
    ///
    /// Informational: every closed soup repeats each position once per
    /// incident facet.
    #[must_use]
    pub fn shared_vertex_occurrences(&self) -> usize {
        self.vertex_count.saturating_sub(self.unique_vertex_count)
    }

    /// Whether no edge has incidence greater than two.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edges.is_empty()
    }

    /// Whether no edge has incidence one.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.hole_edges.is_empty()
    }

    /// All findings, errors first, in a stable order.
    #[must_use]
    pub fn findings(&self) -> Vec<Finding> {
        let mut findings = Vec::new();

        if self.face_count == 0 {
            findings.push(Finding::EmptyMesh);
        }
        if !self.non_manifold_edges.is_empty() {
            findings.push(Finding::NonManifoldEdges(self.non_manifold_edges.len()));
        }
        if !self.hole_edges.is_empty() {
            findings.push(Finding::HoleEdges(self.hole_edges.len()));
        }
        if self.body_count > 1 {
            findings.push(Finding::MultipleBodies(self.body_count));
        }
        if !self.degenerate_faces.is_empty() {
            findings.push(Finding::DegenerateFaces(self.degenerate_faces.clone()));
        }

        if let Some(first_face) = self.first_inward_face {
            findings.push(Finding::InwardNormals { first_face });
        }
        if self.non_uniform_scaling {
            findings.push(Finding::NonUniformScaling {
                extents: self.extents,
            });
        }
        if self.duplicate_vertex_count > 0 {
            findings.push(Finding::DuplicateVertices(self.duplicate_vertex_count));
        }
        if self.duplicate_face_count > 0 {
            findings.push(Finding::DuplicateFaces(self.duplicate_face_count));
        }

        findings
    }

    /// Whether any finding is an [`Severity::Error`].
    #[must_use]
    pub fn has_blocking_errors(&self) -> bool {
        self.findings()
            .iter()
            .any(|f| f.severity() == Severity::Error)
    }

    /// Whether any finding is a [`Severity::Warning`].
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.findings()
            .iter()
            .any(|f| f.severity() == Severity::Warning)
    }

    /// Whether the analyzer found nothing at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings().is_empty()
    }

    /// Emit the findings through `tracing`: errors at `error`, warnings at
    /// `warn`, a clean mesh at `info`.
    pub fn log(&self) {
        let findings = self.findings();
        if findings.is_empty() {
            info!(faces = self.face_count, "no mesh defects found");
            return;
        }
        for finding in &findings {
            match finding.severity() {
                Severity::Error => error!("{finding}"),
                Severity::Warning => warn!("{finding}"),
            }
        }
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mesh Report:")?;
        writeln!(f, "  Faces: {}", self.face_count)?;
        writeln!(
            f,
            "  Vertices: {} ({} unique)",
            self.vertex_count, self.unique_vertex_count
        )?;
        writeln!(f, "  Edges: {}", self.edge_count)?;
        writeln!(f, "  Bodies: {}", self.body_count)?;

        let findings = self.findings();
        if findings.is_empty() {
            writeln!(f)?;
            return writeln!(f, "No mesh defects found.");
        }

        for severity in [Severity::Error, Severity::Warning] {
            let mut section = findings.iter().filter(|x| x.severity() == severity).peekable();
            if section.peek().is_none() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "-------------------{severity}-------------------")?;
            for finding in section {
                writeln!(f, "{finding}")?;
            }
            if severity == Severity::Error {
                writeln!(
                    f,
                    "These will likely cause issues with the meshing process, \
                     please fix them before proceeding."
                )?;
            }
        }

        Ok(())
    }
}

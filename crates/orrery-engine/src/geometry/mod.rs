//! Mesh builders.
//!
//! Everything here produces plain [`MeshData`]: positions, normals, indices
//! and a topology tag. Builders are one-shot setup calls; nothing retains
//! state. Construction parameters that the demos treat as optional named
//! settings live in config structs with documented defaults
//! ([`LatheConfig`], [`TubeConfig`]).
//!
//! Families:
//! - flat + boxed primitives: [`box_mesh`], [`plane`], [`circle`], [`ring`]
//! - analytic surfaces: [`sphere`], [`torus`]
//! - surfaces of revolution: [`lathe`], [`cylinder`], [`cone`]
//! - parametric grids: [`parametric`]
//! - subdivided polyhedra: [`tetrahedron`] .. [`dodecahedron`]
//! - swept tubes along a [`Curve`]: [`tube`], [`torus_knot`]
//! - line derivations: [`wireframe`], [`edges`]

mod curve;
mod lines;
mod mesh;
mod parametric;
mod polyhedron;
mod primitives;
mod revolve;

pub use curve::{Curve, TorusKnotCurve, TubeConfig, torus_knot, tube};
pub use lines::{edges, wireframe};
pub use mesh::{Aabb, MeshData, Topology};
pub use parametric::parametric;
pub use polyhedron::{dodecahedron, icosahedron, octahedron, polyhedron, tetrahedron};
pub use primitives::{box_mesh, circle, plane, ring, sphere, torus};
pub use revolve::{LatheConfig, cone, cylinder, lathe};

//! Deck loads - caller supplied forces along the road deck

use serde::{Deserialize, Serialize};

use crate::mesh::{BridgeLayout, Mesh};

/// A load acting on the upper deck chord as a function of x
///
/// Implementations must be pure: the load is evaluated once per upper
/// chord node, in increasing x order.
pub trait DeckLoad {
    /// Force `(fx, fy)` applied to the deck node at `x`
    fn force_at(&self, x: f64) -> (f64, f64);
}

impl<F> DeckLoad for F
where
    F: Fn(f64) -> (f64, f64),
{
    fn force_at(&self, x: f64) -> (f64, f64) {
        self(x)
    }
}

/// The same nodal force at every upper chord node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UniformDeckLoad {
    /// Force in X direction (N)
    pub fx: f64,
    /// Force in Y direction (N)
    pub fy: f64,
}

impl UniformDeckLoad {
    pub fn new(fx: f64, fy: f64) -> Self {
        Self { fx, fy }
    }

    /// Create a downward load (negative global Y)
    pub fn downward(magnitude: f64) -> Self {
        Self::new(0.0, -magnitude.abs())
    }
}

impl DeckLoad for UniformDeckLoad {
    fn force_at(&self, _x: f64) -> (f64, f64) {
        (self.fx, self.fy)
    }
}

/// Build the force vector from a deck load
///
/// # Arguments
/// * `mesh` - Generated bridge mesh
/// * `layout` - Layout of the generated mesh
/// * `load` - Load evaluated at both upper chord nodes of every deck panel
/// * `block_size` - Force components per node (2 for bars, 3 for frames)
///
/// # Returns
/// A vector of `block_size` entries per node, zero except at upper chord
/// deck nodes. Restrained nodes receive their load too.
pub fn assign_deck_loads<L: DeckLoad + ?Sized>(
    mesh: &Mesh,
    layout: &BridgeLayout,
    load: &L,
    block_size: usize,
) -> Vec<f64> {
    let mut rhs = vec![0.0; mesh.node_count() * block_size];

    for panel in 0..layout.segments_count {
        let (start, mid) = layout.upper_chord_nodes(panel);
        for node in [start, mid] {
            let (fx, fy) = load.force_at(mesh.nodes[node].x);
            rhs[node * block_size] = fx;
            rhs[node * block_size + 1] = fy;
        }
    }

    log::info!(
        "assigned deck loads to {} upper chord nodes",
        2 * layout.segments_count
    );
    rhs
}

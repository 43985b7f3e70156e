//! Parametric mesh generation for the suspension bridge
//!
//! Deck panel layout (node ids relative to `4 * panel`):
//!
//! ```text
//!       0    1    0'
//!       +----+----+
//!       |   /|\   |
//!       |  / | \  |
//!       | /  |  \ |
//!       |/   |   \|
//!       +----+----+
//!       2    3    2'
//! ```
//!
//! Primed ids belong to the next panel, or to the closing column after the
//! last panel.

use serde::{Deserialize, Serialize};

use crate::elements::{Element, ElementGeometry, MemberRole, Node, Support};
use crate::error::{BridgeError, BridgeResult};
use crate::math::{Line, Parabola};
use crate::params::{BridgeParams, DECK_HEIGHT, DECK_SECTION_HEIGHT, MAIN_CABLE_SAG_OFFSET};

/// Nodes and elements of a 2D structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub nodes: Vec<Node>,
    pub elements: Vec<Element>,
}

impl Mesh {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Compute dx, dy and length of every element
    ///
    /// Must run after all node coordinates are final.
    pub fn finalize_elements(&mut self) -> BridgeResult<()> {
        let nodes = &self.nodes;

        for element in self.elements.iter_mut() {
            let (start, end) = match (nodes.get(element.start), nodes.get(element.end)) {
                (Some(start), Some(end)) => (start, end),
                _ => {
                    return Err(BridgeError::InvalidGeometry(format!(
                        "element {} references nodes {} -> {} outside the {} node table",
                        element.id,
                        element.start,
                        element.end,
                        nodes.len()
                    )))
                }
            };

            let dx = end.x - start.x;
            let dy = end.y - start.y;
            let length = (dx * dx + dy * dy).sqrt();

            if element.start == element.end || !length.is_finite() || length < 1e-10 {
                return Err(BridgeError::ZeroLengthElement {
                    element: element.id,
                    start: element.start,
                    end: element.end,
                });
            }

            element.geometry = Some(ElementGeometry { dx, dy, length });
        }

        Ok(())
    }

    /// Number of restrained translational DOFs
    pub fn restrained_dof_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| node.support.restrained_dofs().len())
            .sum()
    }
}

/// Encapsulates the node and element id counters during generation
#[derive(Debug, Default)]
pub struct MeshBuilder {
    mesh: Mesh,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next allocated node will receive
    pub fn next_node_id(&self) -> usize {
        self.mesh.nodes.len()
    }

    /// Id the next allocated element will receive
    pub fn next_element_id(&self) -> usize {
        self.mesh.elements.len()
    }

    /// Create a node and return its id
    pub fn allocate_node(&mut self, x: f64, y: f64, support: Support) -> usize {
        let id = self.next_node_id();
        self.mesh.nodes.push(Node::new(id, x, y).with_support(support));
        id
    }

    /// Create an element between two nodes and return its id
    pub fn allocate_element(&mut self, a: usize, b: usize, role: MemberRole) -> usize {
        let id = self.next_element_id();
        self.mesh.elements.push(Element::with_role(id, a, b, role));
        id
    }

    pub fn finish(self) -> Mesh {
        self.mesh
    }
}

/// Where the notable parts of a generated bridge are
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BridgeLayout {
    /// Number of deck panels
    pub segments_count: usize,
    /// Deck panels the towers stand on
    pub left_tower_panel: usize,
    pub right_tower_panel: usize,
    pub left_tower_bottom: usize,
    pub left_tower_top: usize,
    pub right_tower_bottom: usize,
    pub right_tower_top: usize,
    /// Upper deck node at the far bank
    pub last_road_node: usize,
    /// Fitted side span cables and main cable
    pub left_cable: Line,
    pub right_cable: Line,
    pub main_cable: Parabola,
}

impl BridgeLayout {
    /// Upper chord deck nodes of panel `panel` (start, mid)
    pub fn upper_chord_nodes(&self, panel: usize) -> (usize, usize) {
        (panel * 4, panel * 4 + 1)
    }
}

/// A generated bridge mesh together with its layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeMesh {
    pub mesh: Mesh,
    pub layout: BridgeLayout,
}

/// Generate the bridge mesh: deck, towers, side spans, main span
pub fn generate(params: &BridgeParams) -> BridgeResult<BridgeMesh> {
    params.validate()?;

    let segments_count = params.segments_count()?;
    let mut builder = MeshBuilder::new();

    let last_road_node = fill_road_part(&mut builder, params, segments_count);
    let towers = fill_tower_part(&mut builder, params);
    log::debug!(
        "towers at x = {} and x = {}",
        params.panel_mid_x(towers.left_panel),
        params.panel_mid_x(towers.right_panel)
    );

    let (left_cable, right_cable) =
        fill_side_spans(&mut builder, params, &towers, segments_count, last_road_node)?;
    let main_cable = fill_main_span(&mut builder, params, &towers)?;
    log::debug!(
        "main cable y = {:e} x^2 + {:e} x + {:e}",
        main_cable.a,
        main_cable.b,
        main_cable.c
    );

    let mesh = builder.finish();
    log::info!(
        "generated bridge mesh: {} panels, {} nodes, {} elements",
        segments_count,
        mesh.node_count(),
        mesh.element_count()
    );

    Ok(BridgeMesh {
        mesh,
        layout: BridgeLayout {
            segments_count,
            left_tower_panel: towers.left_panel,
            right_tower_panel: towers.right_panel,
            left_tower_bottom: towers.left_bottom,
            left_tower_top: towers.left_top,
            right_tower_bottom: towers.right_bottom,
            right_tower_top: towers.right_top,
            last_road_node,
            left_cable,
            right_cable,
            main_cable,
        },
    })
}

/// Road deck truss; returns the upper deck node at the far bank
fn fill_road_part(builder: &mut MeshBuilder, params: &BridgeParams, segments_count: usize) -> usize {
    let s = params.segment_length;
    let dx = s / 2.0;
    let top = DECK_HEIGHT;
    let bottom = DECK_HEIGHT - DECK_SECTION_HEIGHT;

    for panel in 0..segments_count {
        let x = s * panel as f64;
        let support = if panel == 0 { Support::fixed() } else { Support::free() };

        builder.allocate_node(x, top, support);
        builder.allocate_node(x + dx, top, Support::free());
        builder.allocate_node(x, bottom, support);
        builder.allocate_node(x + dx, bottom, Support::free());
    }

    let end_x = s * segments_count as f64;
    let last_top = builder.allocate_node(end_x, top, Support::fixed());
    let last_bottom = builder.allocate_node(end_x, bottom, Support::fixed());

    for panel in 0..segments_count {
        let n1 = panel * 4;
        let n2 = n1 + 1;
        let n3 = n1 + 2;
        let n4 = n1 + 3;

        // The closing column is laid out top then bottom
        let n1_next = (panel + 1) * 4;
        let n3_next = if panel == segments_count - 1 { last_bottom } else { n1_next + 2 };

        builder.allocate_element(n1, n3, MemberRole::Deck);
        builder.allocate_element(n2, n4, MemberRole::Deck);
        builder.allocate_element(n1, n2, MemberRole::Deck);
        builder.allocate_element(n3, n4, MemberRole::Deck);
        builder.allocate_element(n3, n2, MemberRole::Deck);
        builder.allocate_element(n2, n3_next, MemberRole::Deck);
        builder.allocate_element(n2, n1_next, MemberRole::Deck);
        builder.allocate_element(n4, n3_next, MemberRole::Deck);
    }

    builder.allocate_element(last_top, last_bottom, MemberRole::Deck);

    last_top
}

struct Towers {
    left_panel: usize,
    right_panel: usize,
    left_bottom: usize,
    left_top: usize,
    right_bottom: usize,
    right_top: usize,
}

impl Towers {
    fn left_x(&self, params: &BridgeParams) -> f64 {
        params.panel_mid_x(self.left_panel)
    }

    fn right_x(&self, params: &BridgeParams) -> f64 {
        params.panel_mid_x(self.right_panel)
    }
}

fn fill_tower_part(builder: &mut MeshBuilder, params: &BridgeParams) -> Towers {
    let (left_panel, right_panel) = params.tower_panels();
    let left_x = params.panel_mid_x(left_panel);
    let right_x = params.panel_mid_x(right_panel);

    let left_bottom = builder.allocate_node(left_x, 0.0, Support::fixed());
    let left_top = builder.allocate_node(left_x, params.tower_height, Support::free());
    let right_bottom = builder.allocate_node(right_x, 0.0, Support::fixed());
    let right_top = builder.allocate_node(right_x, params.tower_height, Support::free());

    builder.allocate_element(left_bottom, left_top, MemberRole::Tower);
    builder.allocate_element(right_bottom, right_top, MemberRole::Tower);

    Towers {
        left_panel,
        right_panel,
        left_bottom,
        left_top,
        right_bottom,
        right_top,
    }
}

/// Hang a cable from `from` to `to` over the given deck panels
///
/// Each panel gets a cable node at its mid x on `curve`, a hanger down to
/// the panel's upper mid node and a cable segment to the previous cable node.
fn hang_cable<F>(
    builder: &mut MeshBuilder,
    params: &BridgeParams,
    from: usize,
    to: usize,
    panels: std::ops::Range<usize>,
    curve: F,
) where
    F: Fn(f64) -> f64,
{
    let mut previous = from;

    for panel in panels {
        let x = params.panel_mid_x(panel);
        let rope_bottom = panel * 4 + 1;
        let rope_top = builder.allocate_node(x, curve(x), Support::free());

        builder.allocate_element(rope_bottom, rope_top, MemberRole::Hanger);
        builder.allocate_element(previous, rope_top, MemberRole::Cable);
        previous = rope_top;
    }

    builder.allocate_element(previous, to, MemberRole::Cable);
}

fn fill_side_spans(
    builder: &mut MeshBuilder,
    params: &BridgeParams,
    towers: &Towers,
    segments_count: usize,
    last_road_node: usize,
) -> BridgeResult<(Line, Line)> {
    let left_x = towers.left_x(params);
    let right_x = towers.right_x(params);
    let end_x = params.segment_length * segments_count as f64;

    let left = Line::through((0.0, DECK_HEIGHT), (left_x, params.tower_height))?;
    hang_cable(builder, params, 0, towers.left_top, 0..towers.left_panel, |x| left.y_at(x));
    builder.allocate_element(towers.left_top, towers.left_panel * 4 + 1, MemberRole::Hanger);

    let right = Line::through((right_x, params.tower_height), (end_x, DECK_HEIGHT))?;
    hang_cable(
        builder,
        params,
        towers.right_top,
        last_road_node,
        towers.right_panel + 1..segments_count,
        |x| right.y_at(x),
    );
    builder.allocate_element(towers.right_top, towers.right_panel * 4 + 1, MemberRole::Hanger);

    Ok((left, right))
}

fn fill_main_span(
    builder: &mut MeshBuilder,
    params: &BridgeParams,
    towers: &Towers,
) -> BridgeResult<Parabola> {
    let cable = Parabola::through(
        (towers.left_x(params), params.tower_height),
        (params.mid_span_x(), DECK_HEIGHT + MAIN_CABLE_SAG_OFFSET),
        (towers.right_x(params), params.tower_height),
    )?;

    hang_cable(
        builder,
        params,
        towers.left_top,
        towers.right_top,
        towers.left_panel + 1..towers.right_panel,
        |x| cable.y_at(x),
    );

    Ok(cable)
}

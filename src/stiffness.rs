//! Per-element stiffness in global coordinates

use crate::analysis::ElementKind;
use crate::elements::{Element, FRAME_MOMENT_OF_INERTIA};
use crate::error::BridgeResult;
use crate::math::{self, Mat4, Mat6};

/// Element stiffness matrix rotated into the global frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementStiffness {
    Bar(Mat4),
    Frame(Mat6),
}

impl ElementStiffness {
    /// Compute `T^T * k_local * T` for one finalized element
    pub fn compute(element: &Element, kind: ElementKind) -> BridgeResult<Self> {
        let geometry = element.finalized_geometry()?;
        let (cos, sin) = geometry.direction_cosines();

        Ok(match kind {
            ElementKind::Bar => {
                let k_local = math::bar_local_stiffness(element.e, element.area, geometry.length);
                let t = math::bar_transformation_matrix(cos, sin);
                ElementStiffness::Bar(t.transpose() * k_local * t)
            }
            ElementKind::Frame => {
                let k_local = math::frame_local_stiffness(
                    element.e,
                    element.area,
                    FRAME_MOMENT_OF_INERTIA,
                    geometry.length,
                );
                let t = math::frame_transformation_matrix(cos, sin);
                ElementStiffness::Frame(t.transpose() * k_local * t)
            }
        })
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ElementStiffness::Bar(_) => ElementKind::Bar,
            ElementStiffness::Frame(_) => ElementKind::Frame,
        }
    }

    /// Entry (row, col) of the element matrix
    pub fn get(&self, row: usize, col: usize) -> f64 {
        match self {
            ElementStiffness::Bar(k) => k[(row, col)],
            ElementStiffness::Frame(k) => k[(row, col)],
        }
    }

    pub fn is_symmetric(&self, tol: f64) -> bool {
        let n = self.kind().element_matrix_size();
        (0..n).all(|i| (0..i).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol))
    }
}

/// Compute the global stiffness of every element
pub fn build_element_stiffness(
    elements: &[Element],
    kind: ElementKind,
) -> BridgeResult<Vec<ElementStiffness>> {
    let stiffness = elements
        .iter()
        .map(|element| ElementStiffness::compute(element, kind))
        .collect::<BridgeResult<Vec<_>>>()?;

    log::info!("computed {:?} stiffness for {} elements", kind, stiffness.len());
    Ok(stiffness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{MemberRole, Section, Support};
    use crate::mesh::MeshBuilder;
    use approx::assert_relative_eq;

    fn single_element(x: f64, y: f64, section: Section) -> Element {
        let mut builder = MeshBuilder::new();
        builder.allocate_node(0.0, 0.0, Support::fixed());
        builder.allocate_node(x, y, Support::free());
        let mut mesh = builder.finish();
        mesh.elements.push(Element::new(0, 0, 1, section, MemberRole::Deck));
        mesh.finalize_elements().unwrap();
        mesh.elements.remove(0)
    }

    #[test]
    fn test_horizontal_bar_is_axial_pattern() {
        let element = single_element(2.0, 0.0, Section::new(1.0, 100.0));
        let k = ElementStiffness::compute(&element, ElementKind::Bar).unwrap();

        let ae_l = 50.0;
        for i in 0..4 {
            for j in 0..4 {
                let expected = match (i, j) {
                    (0, 0) | (2, 2) => ae_l,
                    (0, 2) | (2, 0) => -ae_l,
                    _ => 0.0,
                };
                assert_relative_eq!(k.get(i, j), expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_inclined_bar_is_symmetric() {
        let element = single_element(3.0, 4.0, MemberRole::Cable.section());
        let k = ElementStiffness::compute(&element, ElementKind::Bar).unwrap();
        assert!(k.is_symmetric(1e-6 * k.get(0, 0).abs()));

        // cos = 0.6, sin = 0.8
        let ae_l = 0.36 * 2e11 / 5.0;
        assert_relative_eq!(k.get(0, 0), ae_l * 0.36, max_relative = 1e-12);
        assert_relative_eq!(k.get(0, 1), ae_l * 0.48, max_relative = 1e-12);
        assert_relative_eq!(k.get(1, 3), -ae_l * 0.64, max_relative = 1e-12);
    }

    #[test]
    fn test_inclined_frame_is_symmetric() {
        let element = single_element(-2.0, 7.0, MemberRole::Tower.section());
        let k = ElementStiffness::compute(&element, ElementKind::Frame).unwrap();
        let scale = (0..6).map(|i| k.get(i, i).abs()).fold(0.0, f64::max);
        assert!(k.is_symmetric(1e-12 * scale));
    }

    #[test]
    fn test_frame_rotation_dof_unchanged() {
        // Rotational terms do not depend on the element direction
        let a = single_element(5.0, 0.0, Section::new(1.0, 1.0));
        let b = single_element(3.0, 4.0, Section::new(1.0, 1.0));
        let ka = ElementStiffness::compute(&a, ElementKind::Frame).unwrap();
        let kb = ElementStiffness::compute(&b, ElementKind::Frame).unwrap();
        assert_relative_eq!(ka.get(2, 2), kb.get(2, 2), max_relative = 1e-12);
        assert_relative_eq!(ka.get(2, 5), kb.get(2, 5), max_relative = 1e-12);
    }

    #[test]
    fn test_unfinalized_element_rejected() {
        let element = Element::with_role(0, 0, 1, MemberRole::Deck);
        assert!(ElementStiffness::compute(&element, ElementKind::Bar).is_err());
    }
}

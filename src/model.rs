//! Bridge model - runs the whole pipeline from parameters to linear system

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analysis::AssemblyOptions;
use crate::assembly::assemble_global_stiffness;
use crate::error::BridgeResult;
use crate::export;
use crate::loads::{assign_deck_loads, DeckLoad};
use crate::mesh::{self, BridgeLayout, Mesh};
use crate::params::BridgeParams;
use crate::results::AssembledSystem;
use crate::stiffness::{build_element_stiffness, ElementStiffness};

/// A generated suspension bridge with its assembled stiffness system
#[derive(Debug, Clone)]
pub struct BridgeModel {
    params: BridgeParams,
    mesh: Mesh,
    layout: BridgeLayout,
    stiffness: Vec<ElementStiffness>,
    system: AssembledSystem,
}

impl BridgeModel {
    /// Generate, finalize and assemble a bridge
    ///
    /// # Arguments
    /// * `load` - Deck load evaluated at every upper chord node
    /// * `params` - Bridge dimensions
    /// * `options` - Element formulation and diagnostic handling
    ///
    /// # Returns
    /// The model, or the first error of whichever phase failed. Assembly
    /// diagnostics are errors only with `options.strict`.
    pub fn new<L: DeckLoad + ?Sized>(
        load: &L,
        params: BridgeParams,
        options: &AssemblyOptions,
    ) -> BridgeResult<Self> {
        params.validate()?;

        let mesh::BridgeMesh { mut mesh, layout } = mesh::generate(&params)?;
        mesh.finalize_elements()?;

        let stiffness = build_element_stiffness(&mesh.elements, options.kind)?;
        let assembly = assemble_global_stiffness(&mesh, &stiffness, options)?;
        let rhs = assign_deck_loads(&mesh, &layout, load, options.kind.dofs_per_node());

        Ok(Self {
            params,
            mesh,
            layout,
            stiffness,
            system: AssembledSystem {
                kind: options.kind,
                matrix: assembly.matrix,
                rhs,
                diagnostics: assembly.diagnostics,
            },
        })
    }

    pub fn params(&self) -> &BridgeParams {
        &self.params
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn layout(&self) -> &BridgeLayout {
        &self.layout
    }

    /// Global stiffness of every element, indexed by element id
    pub fn stiffness(&self) -> &[ElementStiffness] {
        &self.stiffness
    }

    pub fn system(&self) -> &AssembledSystem {
        &self.system
    }

    /// Hand the assembled system to a solver
    pub fn into_system(self) -> AssembledSystem {
        self.system
    }

    /// Write `nodes`, `forces`, `elements` and `bridge.vtk` into `dir`
    pub fn export_to_dir<P: AsRef<Path>>(&self, dir: P) -> BridgeResult<()> {
        let dir = dir.as_ref();
        let bs = self.system.kind.dofs_per_node();

        write_file(&dir.join("nodes"), |w| Ok(export::write_nodes(w, &self.mesh)?))?;
        write_file(&dir.join("forces"), |w| {
            export::write_forces(w, &self.mesh, &self.system.rhs, bs)
        })?;
        write_file(&dir.join("elements"), |w| Ok(export::write_elements(w, &self.mesh)?))?;
        write_file(&dir.join("bridge.vtk"), |w| export::write_vtk(w, &self.mesh, None, bs))?;

        log::info!("exported bridge model to {}", dir.display());
        Ok(())
    }
}

fn write_file<F>(path: &Path, write: F) -> BridgeResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> BridgeResult<()>,
{
    let mut w = BufWriter::new(File::create(path)?);
    write(&mut w)?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ElementKind;
    use crate::error::BridgeError;
    use crate::loads::UniformDeckLoad;

    fn small_params() -> BridgeParams {
        BridgeParams {
            main_span: 6.0,
            side_span: 3.0,
            tower_height: 100.0,
            segment_length: 1.0,
        }
    }

    #[test]
    fn test_small_bar_model() {
        let model = BridgeModel::new(
            &UniformDeckLoad::downward(10.0),
            small_params(),
            &AssemblyOptions::bar(),
        )
        .unwrap();

        let system = model.system();
        assert!(system.is_consistent());
        assert_eq!(system.kind, ElementKind::Bar);
        assert_eq!(system.rhs.len(), 2 * model.mesh().node_count());
        assert_eq!(
            system.matrix.nnzb(),
            model.mesh().node_count() + 2 * model.mesh().element_count()
        );
        assert_eq!(model.stiffness().len(), model.mesh().element_count());
        assert_eq!(system.force(5), &[0.0, -10.0]);
    }

    #[test]
    fn test_frame_model_block_size() {
        let model = BridgeModel::new(
            &|_x: f64| (0.0, -1.0),
            small_params(),
            &AssemblyOptions::frame().strict(),
        )
        .unwrap();
        let system = model.into_system();
        assert_eq!(system.matrix.block_size(), 3);
        assert_eq!(system.force(1), &[0.0, -1.0, 0.0]);
    }

    #[test]
    fn test_invalid_params_stop_pipeline() {
        let params = BridgeParams::new(1280.0, 345.0);
        let err = BridgeModel::new(&UniformDeckLoad::default(), params, &AssemblyOptions::bar())
            .unwrap_err();
        assert!(matches!(err, BridgeError::IndivisibleSpan { .. }));
    }

    #[test]
    fn test_export_to_dir() {
        let dir = std::env::temp_dir().join(format!("bridge-fem-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let model = BridgeModel::new(
            &UniformDeckLoad::downward(1.0),
            small_params(),
            &AssemblyOptions::bar(),
        )
        .unwrap();
        model.export_to_dir(&dir).unwrap();

        let nodes = std::fs::read_to_string(dir.join("nodes")).unwrap();
        assert_eq!(nodes.lines().next(), Some("69"));
        let vtk = std::fs::read_to_string(dir.join("bridge.vtk")).unwrap();
        assert!(vtk.starts_with("# vtk DataFile Version 3.0\n"));
        let parsed = vtkio::Vtk::parse_legacy_be(vtk.as_bytes()).unwrap();
        assert_eq!(parsed.title, "vtk output");
        assert!(dir.join("forces").exists());
        assert!(dir.join("elements").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

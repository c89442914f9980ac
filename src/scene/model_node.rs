use std::cell::{Cell, Ref, RefCell};

use crate::tessellation::TubeMesh;

use super::{DisplayProperties, MeshSink};

/// In-memory [`MeshSink`] that keeps the last committed mesh.
#[derive(Debug)]
pub struct ModelNode {
    id: String,
    mesh: RefCell<TubeMesh>,
    modified_count: Cell<u64>,
    display: Cell<Option<DisplayProperties>>,
}

impl ModelNode {
    /// Creates a node with no geometry and no display properties.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mesh: RefCell::new(TubeMesh::default()),
            modified_count: Cell::new(0),
            display: Cell::new(None),
        }
    }

    /// Borrows the stored mesh.
    ///
    /// # Panics
    ///
    /// Panics if called while the mesh is being replaced.
    #[must_use]
    pub fn mesh(&self) -> Ref<'_, TubeMesh> {
        self.mesh.borrow()
    }

    /// Returns how many times the node has been marked modified.
    #[must_use]
    pub fn modified_count(&self) -> u64 {
        self.modified_count.get()
    }
}

impl MeshSink for ModelNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_geometry(&self, mesh: &TubeMesh) {
        self.mesh.borrow_mut().clone_from(mesh);
    }

    fn mark_modified(&self) {
        self.modified_count.set(self.modified_count.get() + 1);
    }

    fn display_properties(&self) -> Option<DisplayProperties> {
        self.display.get()
    }

    fn set_display_properties(&self, properties: DisplayProperties) {
        self.display.set(Some(properties));
    }
}

mod model_node;
mod point_list;

pub use model_node::ModelNode;
pub use point_list::PointList;

use crate::config::Color;
use crate::geometry::{ControlPoint, ControlPointSet};
use crate::math::Point3;
use crate::tessellation::TubeMesh;

slotmap::new_key_type! {
    /// Handle returned by [`PointSource::subscribe`], used to unsubscribe.
    pub struct SubscriptionId;
}

/// Display settings a host attaches to a generated mesh.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayProperties {
    pub color: Color,
}

/// An externally owned, ordered list of control points.
///
/// Methods take `&self`; implementors use interior mutability and must
/// release their own borrows before invoking listeners.
pub trait PointSource {
    /// Stable identity used to link this source to a destination.
    fn id(&self) -> &str;

    /// Returns the number of control points.
    fn count(&self) -> usize;

    /// Returns the position of point `index`.
    fn position(&self, index: usize) -> Option<Point3>;

    /// Returns the label of point `index`, if it has one.
    fn label(&self, index: usize) -> Option<String>;

    /// Registers a listener called after every change to the points.
    fn subscribe(&self, listener: Box<dyn FnMut()>) -> SubscriptionId;

    /// Removes a listener. Unknown handles are ignored.
    fn unsubscribe(&self, id: SubscriptionId);

    /// Copies the current points into a [`ControlPointSet`].
    fn control_points(&self) -> ControlPointSet {
        (0..self.count())
            .filter_map(|i| {
                let position = self.position(i)?;
                Some(match self.label(i) {
                    Some(label) => ControlPoint::labeled(position, label),
                    None => ControlPoint::new(position),
                })
            })
            .collect()
    }
}

/// An externally owned entity that displays the generated tube.
pub trait MeshSink {
    /// Stable identity used to link a source to this destination.
    fn id(&self) -> &str;

    /// Replaces the stored geometry.
    fn set_geometry(&self, mesh: &TubeMesh);

    /// Flags the entity as changed.
    fn mark_modified(&self);

    /// Returns the current display properties, if any are assigned.
    fn display_properties(&self) -> Option<DisplayProperties>;

    /// Assigns display properties.
    fn set_display_properties(&self, properties: DisplayProperties);
}

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::SlotMap;

use crate::error::{Result, SceneError};
use crate::geometry::ControlPoint;
use crate::math::Point3;

use super::{PointSource, SubscriptionId};

type Listener = Rc<RefCell<Box<dyn FnMut()>>>;

/// In-memory [`PointSource`] for hosts without a scene graph of their own.
///
/// Every mutation notifies all subscribed listeners once the point storage
/// is no longer borrowed, so listeners may read the list back.
pub struct PointList {
    id: String,
    points: RefCell<Vec<ControlPoint>>,
    listeners: RefCell<SlotMap<SubscriptionId, Listener>>,
}

impl std::fmt::Debug for PointList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointList")
            .field("id", &self.id)
            .field("points", &self.points.borrow())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl PointList {
    /// Creates an empty list.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_points(id, Vec::new())
    }

    /// Creates a list holding `points`.
    #[must_use]
    pub fn with_points(id: impl Into<String>, points: impl IntoIterator<Item = ControlPoint>) -> Self {
        Self {
            id: id.into(),
            points: RefCell::new(points.into_iter().collect()),
            listeners: RefCell::new(SlotMap::with_key()),
        }
    }

    /// Appends a point.
    pub fn push(&self, point: ControlPoint) {
        self.points.borrow_mut().push(point);
        self.notify();
    }

    /// Moves point `index` to `position`, keeping its label.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::PointIndexOutOfRange`] if `index` is out of range.
    pub fn set_position(&self, index: usize, position: Point3) -> Result<()> {
        {
            let mut points = self.points.borrow_mut();
            let len = points.len();
            let slot = points
                .get_mut(index)
                .ok_or(SceneError::PointIndexOutOfRange { index, len })?;
            *slot = match slot.label() {
                Some(label) => ControlPoint::labeled(position, label),
                None => ControlPoint::new(position),
            };
        }
        self.notify();
        Ok(())
    }

    /// Removes and returns point `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::PointIndexOutOfRange`] if `index` is out of range.
    pub fn remove(&self, index: usize) -> Result<ControlPoint> {
        let removed = {
            let mut points = self.points.borrow_mut();
            let len = points.len();
            if index >= len {
                return Err(SceneError::PointIndexOutOfRange { index, len }.into());
            }
            points.remove(index)
        };
        self.notify();
        Ok(removed)
    }

    /// Removes all points.
    pub fn clear(&self) {
        self.points.borrow_mut().clear();
        self.notify();
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn notify(&self) {
        let listeners: Vec<Listener> = self.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            // A listener that is already running is not re-entered.
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (*callback)();
            }
        }
    }
}

impl PointSource for PointList {
    fn id(&self) -> &str {
        &self.id
    }

    fn count(&self) -> usize {
        self.points.borrow().len()
    }

    fn position(&self, index: usize) -> Option<Point3> {
        self.points.borrow().get(index).map(ControlPoint::position)
    }

    fn label(&self, index: usize) -> Option<String> {
        self.points
            .borrow()
            .get(index)
            .and_then(|p| p.label().map(str::to_owned))
    }

    fn subscribe(&self, listener: Box<dyn FnMut()>) -> SubscriptionId {
        self.listeners
            .borrow_mut()
            .insert(Rc::new(RefCell::new(listener)))
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.borrow_mut().remove(id);
    }
}

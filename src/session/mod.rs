mod links;

pub use links::CurveLinks;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::config::{Color, CurveConfig, InterpolationMode, LinearClosure};
use crate::error::{Result, SceneError};
use crate::geometry::{ControlPointSet, CurvePath, SplineBoundary};
use crate::operations::creation::BuildPath;
use crate::operations::query::MeasureLength;
use crate::scene::{DisplayProperties, MeshSink, PointSource, SubscriptionId};
use crate::tessellation::{ExtrudeTube, TubeMesh};

struct SourceBinding {
    source: Weak<dyn PointSource>,
    subscription: SubscriptionId,
}

/// Keeps a tube model in sync with a list of control points.
///
/// The session holds weak references to its source and destination, so
/// either may be dropped by the host at any time; a dropped end counts as
/// unbound. Every regeneration rebuilds the path, length and mesh from
/// scratch.
pub struct CurveSession {
    config: CurveConfig,
    automatic_update: bool,
    source: Option<SourceBinding>,
    destination: Option<Weak<dyn MeshSink>>,
    links: CurveLinks,
    path: CurvePath,
    mesh: TubeMesh,
    length: Option<f64>,
}

impl std::fmt::Debug for CurveSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurveSession")
            .field("config", &self.config)
            .field("automatic_update", &self.automatic_update)
            .field("source", &self.source_id())
            .field("destination", &self.destination_id())
            .field("path_len", &self.path.len())
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

impl Default for CurveSession {
    fn default() -> Self {
        Self::new(CurveConfig::default())
    }
}

impl CurveSession {
    /// Creates an unbound session with automatic update off.
    #[must_use]
    pub fn new(config: CurveConfig) -> Self {
        Self {
            config,
            automatic_update: false,
            source: None,
            destination: None,
            links: CurveLinks::new(),
            path: CurvePath::empty(),
            mesh: TubeMesh::default(),
            length: None,
        }
    }

    /// Wraps a new session for use with [`Self::bind_source`].
    #[must_use]
    pub fn shared(config: CurveConfig) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(config)))
    }

    // --- Bindings ---

    /// Binds `source` and subscribes to its change notifications.
    ///
    /// Any previously bound source is unsubscribed first. The listener only
    /// holds a weak reference to the session.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::SessionBusy`] if `session` is already borrowed,
    /// for example when called from inside one of its own listeners. Nothing
    /// is rebound in that case.
    pub fn bind_source<S: PointSource + 'static>(
        session: &Rc<RefCell<Self>>,
        source: &Rc<S>,
    ) -> Result<()> {
        let Ok(mut this) = session.try_borrow_mut() else {
            warn!(source = source.id(), "curve session busy, source not bound");
            return Err(SceneError::SessionBusy.into());
        };
        this.release_source();

        let listener_session = Rc::downgrade(session);
        let subscription = source.subscribe(Box::new(move || {
            let Some(session) = listener_session.upgrade() else {
                return;
            };
            match session.try_borrow_mut() {
                Ok(mut session) => session.control_points_updated(),
                Err(_) => warn!("curve session busy, control point change ignored"),
            };
        }));
        let weak: Weak<S> = Rc::downgrade(source);
        this.source = Some(SourceBinding {
            source: weak as Weak<dyn PointSource>,
            subscription,
        });
        trace!(source = source.id(), "bound point source");
        this.bindings_changed();
        Ok(())
    }

    /// Binds the mesh destination.
    pub fn bind_destination<M: MeshSink + 'static>(&mut self, destination: &Rc<M>) {
        let weak: Weak<M> = Rc::downgrade(destination);
        self.destination = Some(weak as Weak<dyn MeshSink>);
        trace!(destination = destination.id(), "bound mesh destination");
        self.bindings_changed();
    }

    /// Unsubscribes from and forgets the bound source.
    pub fn unbind_source(&mut self) {
        self.release_source();
        self.bindings_changed();
    }

    pub fn unbind_destination(&mut self) {
        self.destination = None;
        self.bindings_changed();
    }

    fn release_source(&mut self) {
        if let Some(binding) = self.source.take() {
            if let Some(source) = binding.source.upgrade() {
                source.unsubscribe(binding.subscription);
                trace!(source = source.id(), "released point source");
            }
        }
    }

    fn bindings_changed(&mut self) {
        match self.bound_pair() {
            Some((source, destination)) => {
                self.links.link(source.id(), destination.id());
                self.regenerate();
            }
            None => {
                if self.automatic_update {
                    trace!("binding incomplete, automatic update switched off");
                }
                self.automatic_update = false;
            }
        }
    }

    fn bound_pair(&self) -> Option<(Rc<dyn PointSource>, Rc<dyn MeshSink>)> {
        let source = self.source.as_ref()?.source.upgrade()?;
        let destination = self.destination.as_ref()?.upgrade()?;
        Some((source, destination))
    }

    // --- Update control ---

    /// Returns `true` if both a live source and a live destination are bound.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.bound_pair().is_some()
    }

    #[must_use]
    pub fn is_automatic_update(&self) -> bool {
        self.automatic_update
    }

    /// Switches automatic update and regenerates when turning it on.
    pub fn set_automatic_update(&mut self, enabled: bool) {
        self.automatic_update = enabled;
        self.regenerate();
    }

    /// Regenerates once regardless of the automatic update flag.
    pub fn generate_once(&mut self) {
        let previous = self.automatic_update;
        self.automatic_update = true;
        self.regenerate();
        self.automatic_update = previous;
    }

    /// Called when the bound source reports a change.
    pub fn control_points_updated(&mut self) {
        trace!("control points changed");
        self.regenerate();
    }

    /// Rebuilds the path, length and mesh and commits the mesh to the
    /// destination.
    ///
    /// Does nothing unless automatic update is on and both ends are bound. A
    /// failing pipeline is logged and leaves the previous output in place.
    pub fn regenerate(&mut self) {
        if !self.automatic_update {
            trace!("automatic update off, regeneration skipped");
            return;
        }
        let Some((source, destination)) = self.bound_pair() else {
            trace!("source or destination unbound, regeneration skipped");
            return;
        };

        let points = source.control_points();
        if points.len() < 2 {
            self.path = CurvePath::empty();
            self.length = Some(0.0);
            self.mesh = TubeMesh::default();
            Self::commit(&*destination, &self.mesh);
            debug!(points = points.len(), "too few control points, mesh cleared");
            return;
        }

        if destination.display_properties().is_none() {
            destination.set_display_properties(DisplayProperties {
                color: self.config.color(),
            });
        }

        match self.run_pipeline(&points) {
            Ok((path, length, mesh)) => {
                debug!(
                    points = points.len(),
                    samples = path.len(),
                    length,
                    "curve regenerated"
                );
                self.path = path;
                self.length = Some(length);
                self.mesh = mesh;
                Self::commit(&*destination, &self.mesh);
            }
            Err(err) => warn!(%err, "curve regeneration failed, keeping previous output"),
        }
    }

    fn run_pipeline(&self, points: &ControlPointSet) -> Result<(CurvePath, f64, TubeMesh)> {
        let path = BuildPath::from_config(points, &self.config).execute()?;
        let length = MeasureLength::new(&path).execute();
        let mesh = ExtrudeTube::new(&path, self.config.profile()).execute();
        Ok((path, length, mesh))
    }

    fn commit(destination: &dyn MeshSink, mesh: &TubeMesh) {
        destination.set_geometry(mesh);
        destination.mark_modified();
    }

    // --- Configuration ---

    /// Sets the tube radius and regenerates.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is not positive and finite. The previous
    /// radius is kept and nothing regenerates.
    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        self.apply_config(|config| config.set_radius(radius))
    }

    /// Sets the number of ring vertices and regenerates.
    ///
    /// # Errors
    ///
    /// Returns an error below 3 sides. The previous value is kept and nothing
    /// regenerates.
    pub fn set_side_count(&mut self, side_count: usize) -> Result<()> {
        self.apply_config(|config| config.set_side_count(side_count))
    }

    /// Sets the spline resolution and regenerates.
    ///
    /// # Errors
    ///
    /// Returns an error for zero. The previous value is kept and nothing
    /// regenerates.
    pub fn set_resolution(&mut self, resolution: usize) -> Result<()> {
        self.apply_config(|config| config.set_resolution(resolution))
    }

    pub fn set_interpolation_mode(&mut self, mode: InterpolationMode) {
        self.config.set_mode(mode);
        self.regenerate();
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.config.set_closed(closed);
        self.regenerate();
    }

    pub fn set_boundary(&mut self, boundary: SplineBoundary) {
        self.config.set_boundary(boundary);
        self.regenerate();
    }

    pub fn set_linear_closure(&mut self, closure: LinearClosure) {
        self.config.set_linear_closure(closure);
        self.regenerate();
    }

    /// Sets the color given to destinations without display properties.
    ///
    /// Destinations that already have a color keep it.
    pub fn set_color(&mut self, color: Color) {
        self.config.set_color(color);
    }

    /// Replaces the whole configuration and regenerates.
    pub fn set_config(&mut self, config: CurveConfig) {
        self.config = config;
        self.regenerate();
    }

    fn apply_config(&mut self, update: impl FnOnce(&mut CurveConfig) -> Result<()>) -> Result<()> {
        if let Err(err) = update(&mut self.config) {
            warn!(%err, "curve setting rejected");
            return Err(err);
        }
        self.regenerate();
        Ok(())
    }

    // --- Accessors ---

    #[must_use]
    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Returns the path from the last regeneration.
    #[must_use]
    pub fn path(&self) -> &CurvePath {
        &self.path
    }

    /// Returns the mesh from the last regeneration.
    #[must_use]
    pub fn mesh(&self) -> &TubeMesh {
        &self.mesh
    }

    /// Returns the path length, or `None` if nothing has been measured yet.
    #[must_use]
    pub fn length(&self) -> Option<f64> {
        self.length
    }

    #[must_use]
    pub fn links(&self) -> &CurveLinks {
        &self.links
    }

    /// Returns the destination last generated from `source_id`.
    #[must_use]
    pub fn linked_destination(&self, source_id: &str) -> Option<&str> {
        self.links.destination_for(source_id)
    }

    /// Returns the id of the bound source, if it is still alive.
    #[must_use]
    pub fn source_id(&self) -> Option<String> {
        let source = self.source.as_ref()?.source.upgrade()?;
        Some(source.id().to_owned())
    }

    /// Returns the id of the bound destination, if it is still alive.
    #[must_use]
    pub fn destination_id(&self) -> Option<String> {
        let destination = self.destination.as_ref()?.upgrade()?;
        Some(destination.id().to_owned())
    }
}

impl Drop for CurveSession {
    fn drop(&mut self) {
        self.release_source();
    }
}

use tracing::debug;

use crate::drawing::Shape;
use crate::error::DrawingError;
use crate::geom::{planar_area, LatLng, CIRCLE_POINTS};
use crate::region::{AreaGauge, AreaLimit, Validation};

/// Drawing tool selectable on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingTool {
    Polygon,
    Rectangle,
    Circle,
}

/// What the drawing surface is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingMode {
    #[default]
    None,
    Polygon,
    Rectangle,
    Circle,
    Edit,
}

impl From<DrawingTool> for DrawingMode {
    fn from(tool: DrawingTool) -> Self {
        match tool {
            DrawingTool::Polygon => Self::Polygon,
            DrawingTool::Rectangle => Self::Rectangle,
            DrawingTool::Circle => Self::Circle,
        }
    }
}

impl DrawingMode {
    #[inline]
    pub fn is_drawing(self) -> bool { matches!(self, Self::Polygon | Self::Rectangle | Self::Circle) }
}

/// In-progress shape, before it is committed as a region.
///
/// Holds at most one pending shape: a newly created shape replaces the
/// previous one. Never persisted.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    name: String,
    coordinates: Vec<LatLng>,
    mode: DrawingMode,
    circle_points: usize,
}

impl Default for DrawingSession {
    fn default() -> Self { Self::new(CIRCLE_POINTS) }
}

impl DrawingSession {
    pub fn new(circle_points: usize) -> Self {
        Self { name: String::new(), coordinates: Vec::new(), mode: DrawingMode::None, circle_points }
    }

    #[inline] pub fn name(&self) -> &str { &self.name }

    #[inline] pub fn coordinates(&self) -> &[LatLng] { &self.coordinates }

    #[inline] pub fn mode(&self) -> DrawingMode { self.mode }

    #[inline] pub fn has_pending_shape(&self) -> bool { !self.coordinates.is_empty() }

    pub fn set_name(&mut self, name: impl Into<String>) { self.name = name.into() }

    /// Activate a drawing tool, replacing any tool already active.
    pub fn select_tool(&mut self, tool: DrawingTool) -> Result<(), DrawingError> {
        if self.mode == DrawingMode::Edit {
            return Err(DrawingError::InvalidTransition { mode: self.mode, action: "select a drawing tool" });
        }
        self.mode = tool.into();
        Ok(())
    }

    /// Put the active tool away without drawing anything.
    pub fn cancel_tool(&mut self) {
        if self.mode.is_drawing() { self.mode = DrawingMode::None }
    }

    /// A tool finished a shape: it becomes the single pending shape.
    pub fn shape_created(&mut self, shape: &Shape) -> Result<(), DrawingError> {
        if !self.mode.is_drawing() {
            return Err(DrawingError::InvalidTransition { mode: self.mode, action: "create a shape" });
        }
        self.coordinates = shape.extract_coordinates(self.circle_points);
        self.mode = DrawingMode::None;
        debug!(points = self.coordinates.len(), "shape created");
        Ok(())
    }

    /// Start editing the pending shape's vertices.
    pub fn begin_edit(&mut self) -> Result<(), DrawingError> {
        if self.mode != DrawingMode::None {
            return Err(DrawingError::InvalidTransition { mode: self.mode, action: "start editing" });
        }
        if !self.has_pending_shape() { return Err(DrawingError::NoPendingShape("edit")) }
        self.mode = DrawingMode::Edit;
        Ok(())
    }

    /// Drag one vertex while editing. Applied immediately.
    pub fn move_vertex(&mut self, index: usize, to: LatLng) -> Result<(), DrawingError> {
        if self.mode != DrawingMode::Edit {
            return Err(DrawingError::InvalidTransition { mode: self.mode, action: "move a vertex" });
        }
        let len = self.coordinates.len();
        let vertex = self.coordinates.get_mut(index)
            .ok_or(DrawingError::NoSuchVertex { index, len })?;
        *vertex = to;
        Ok(())
    }

    /// Finish editing, keeping the vertices as moved.
    pub fn finish_edit(&mut self) -> Result<(), DrawingError> {
        if self.mode != DrawingMode::Edit {
            return Err(DrawingError::InvalidTransition { mode: self.mode, action: "finish editing" });
        }
        self.mode = DrawingMode::None;
        Ok(())
    }

    /// Finish editing with the shape re-read from the map.
    pub fn finish_edit_with(&mut self, edited: &Shape) -> Result<(), DrawingError> {
        self.finish_edit()?;
        self.coordinates = edited.extract_coordinates(self.circle_points);
        Ok(())
    }

    /// Leave edit mode. Vertices already moved stay moved: no snapshot of the
    /// pre-edit ring is kept.
    pub fn cancel_edit(&mut self) -> Result<(), DrawingError> {
        if self.mode != DrawingMode::Edit {
            return Err(DrawingError::InvalidTransition { mode: self.mode, action: "cancel editing" });
        }
        self.mode = DrawingMode::None;
        Ok(())
    }

    /// Discard the pending shape, from any mode.
    pub fn delete_shape(&mut self) -> Result<(), DrawingError> {
        if !self.has_pending_shape() { return Err(DrawingError::NoPendingShape("delete")) }
        self.coordinates.clear();
        self.mode = DrawingMode::None;
        Ok(())
    }

    /// Load an imported shape as the pending shape, ready for editing.
    pub fn load_imported(&mut self, name: impl Into<String>, coordinates: Vec<LatLng>) {
        self.name = name.into();
        self.coordinates = coordinates;
        self.mode = DrawingMode::None;
    }

    /// Back to the empty state (after save, cancel or closing the view).
    pub fn reset(&mut self) {
        self.name.clear();
        self.coordinates.clear();
        self.mode = DrawingMode::None;
    }

    /// Live planar area of the pending shape in km².
    pub fn area(&self) -> f64 { planar_area(&self.coordinates) }

    pub fn gauge(&self, limit: AreaLimit) -> AreaGauge { limit.gauge(self.area()) }

    /// Whether the pending shape may be saved under `limit`.
    pub fn validate(&self, limit: AreaLimit) -> Validation {
        Validation::check(&self.name, &self.coordinates, self.area(), Some(limit))
    }
}

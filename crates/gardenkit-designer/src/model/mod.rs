//! Document model: placed items, their silhouettes, layouts and gardens.

mod bezier;
mod corner_radii;
mod curvature;
mod document;
mod item;
mod polygon;
mod shape_path;
mod workspace;

pub use bezier::{BezierHandle, BezierPath, BezierPoint};
pub use corner_radii::{Corner, CornerRadii};
pub use curvature::{CurvaturePath, CurvePoint};
pub use document::{CanvasSize, ItemArena, LayoutDoc};
pub use item::{ItemId, ItemMeta, ItemStyle, ItemType, Shadow, StudioItem, TreeMeta};
pub use polygon::PolygonPath;
pub use shape_path::{outline_for, rect_outline, sample_path, ShapeMode, ShapeOutline, ShapePath};
pub use workspace::{Garden, GardenId, Layout, LayoutId, WorkspaceData};

pub(crate) use workspace::new_id;

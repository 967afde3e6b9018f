use gardenkit_core::constants::MIN_ITEM_SIZE;
use gardenkit_core::{rotate_about, rotated_rect_bounds, Point, Rect};
use serde::{Deserialize, Serialize};

use super::ShapePath;

/// Identifier of a placed item, unique within a workspace.
pub type ItemId = String;

/// Kind of placed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Bed,
    Zone,
    Path,
    Structure,
    Label,
    Tree,
}

impl ItemType {
    pub const ALL: [ItemType; 6] = [
        ItemType::Bed,
        ItemType::Zone,
        ItemType::Path,
        ItemType::Structure,
        ItemType::Label,
        ItemType::Tree,
    ];

    /// Prefix of the sequential human-readable code, for types that get one.
    pub fn code_prefix(&self) -> Option<&'static str> {
        match self {
            ItemType::Bed => Some("BED"),
            ItemType::Tree => Some("TREE"),
            _ => None,
        }
    }

    /// Size used when the item is first placed.
    pub fn default_size(&self) -> (f64, f64) {
        match self {
            ItemType::Bed => (120.0, 80.0),
            ItemType::Zone => (240.0, 160.0),
            ItemType::Path => (200.0, 40.0),
            ItemType::Structure => (120.0, 120.0),
            ItemType::Label => (120.0, 32.0),
            ItemType::Tree => (80.0, 80.0),
        }
    }

    /// Trees are drawn as canopies and keep a square footprint.
    pub fn locks_aspect(&self) -> bool {
        matches!(self, ItemType::Tree)
    }

    pub fn allows_rotation(&self) -> bool {
        !matches!(self, ItemType::Tree)
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            ItemType::Bed => "Bed",
            ItemType::Zone => "Zone",
            ItemType::Path => "Path",
            ItemType::Structure => "Structure",
            ItemType::Label => "Label",
            ItemType::Tree => "Tree",
        }
    }

    pub fn default_style(&self) -> ItemStyle {
        let (fill, stroke) = match self {
            ItemType::Bed => ("#8d6e63", "#5d4037"),
            ItemType::Zone => ("#c5e1a5", "#7cb342"),
            ItemType::Path => ("#d7ccc8", "#a1887f"),
            ItemType::Structure => ("#b0bec5", "#546e7a"),
            ItemType::Label => ("#ffffff", "#9e9e9e"),
            ItemType::Tree => ("#66bb6a", "#2e7d32"),
        };
        ItemStyle {
            fill: fill.to_string(),
            stroke: stroke.to_string(),
            fill_opacity: if matches!(self, ItemType::Zone) { 0.5 } else { 1.0 },
            corner_radius: match self {
                ItemType::Bed => 6.0,
                ItemType::Tree => 40.0,
                _ => 0.0,
            },
            ..ItemStyle::default()
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.default_label())
    }
}

/// Species data for tree items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeMeta {
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub variant: String,
    #[serde(rename = "canopyM", default)]
    pub canopy_m: f64,
}

/// Non-geometric item attributes.
///
/// `shape` holds at most one silhouette encoding. It is flattened so the
/// stored JSON carries exactly one of `cornerRadii`, `polygon`,
/// `curvature` or `bezier`, or none of them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMeta {
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<TreeMeta>,
    #[serde(flatten)]
    pub shape: Option<ShapePath>,
}

/// Drop shadow descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub color: String,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStyle {
    pub fill: String,
    pub fill_opacity: f64,
    pub stroke: String,
    pub stroke_opacity: f64,
    pub stroke_width: f64,
    /// Uniform radius used when no shape path is set.
    pub corner_radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}

impl Default for ItemStyle {
    fn default() -> Self {
        Self {
            fill: "#cccccc".to_string(),
            fill_opacity: 1.0,
            stroke: "#333333".to_string(),
            stroke_opacity: 1.0,
            stroke_width: 2.0,
            corner_radius: 0.0,
            shadow: None,
        }
    }
}

/// A placed design object.
///
/// `x, y` is the top-left of the unrotated box; `r` rotates the box in
/// degrees about its own center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioItem {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub r: f64,
    pub order: i64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub meta: ItemMeta,
    pub style: ItemStyle,
}

impl StudioItem {
    /// Creates an item of `item_type` with its default size centered at `center`.
    pub fn new(id: ItemId, item_type: ItemType, center: Point, order: i64) -> Self {
        let (w, h) = item_type.default_size();
        Self {
            id,
            item_type,
            x: center.x - w / 2.0,
            y: center.y - h / 2.0,
            w,
            h,
            r: 0.0,
            order,
            label: item_type.default_label().to_string(),
            meta: ItemMeta {
                tree: matches!(item_type, ItemType::Tree).then(TreeMeta::default),
                ..ItemMeta::default()
            },
            style: item_type.default_style(),
        }
    }

    /// Unrotated box in world coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Axis-aligned bounds of the rotated box.
    pub fn world_bounds(&self) -> Rect {
        rotated_rect_bounds(&self.rect(), self.r)
    }

    /// Maps a point in the local `[0,w]×[0,h]` box to world coordinates.
    pub fn local_to_world(&self, local: Point) -> Point {
        rotate_about(
            Point::new(self.x + local.x, self.y + local.y),
            self.center(),
            self.r,
        )
    }

    /// Inverse of [`StudioItem::local_to_world`].
    pub fn world_to_local(&self, world: Point) -> Point {
        let p = rotate_about(world, self.center(), -self.r);
        Point::new(p.x - self.x, p.y - self.y)
    }

    /// Corner positions in world space, in `tl, tr, br, bl` order.
    pub fn world_corners(&self) -> [Point; 4] {
        [
            self.local_to_world(Point::new(0.0, 0.0)),
            self.local_to_world(Point::new(self.w, 0.0)),
            self.local_to_world(Point::new(self.w, self.h)),
            self.local_to_world(Point::new(0.0, self.h)),
        ]
    }

    /// Hit test against the rotated box.
    pub fn contains_world(&self, world: Point) -> bool {
        let local = self.world_to_local(world);
        local.x >= 0.0 && local.x <= self.w && local.y >= 0.0 && local.y <= self.h
    }

    /// Enforces the minimum footprint.
    pub fn clamp_size(&mut self) {
        self.w = self.w.max(MIN_ITEM_SIZE);
        self.h = self.h.max(MIN_ITEM_SIZE);
    }

    pub fn is_locked(&self) -> bool {
        self.meta.locked
    }
}

//! Stage records: nodes in a company's recruitment pipeline.

use crate::utils::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque stage identifier.
pub type StageId = String;

/// Opaque tenant identifier. All stage operations are scoped to one company;
/// there is no cross-tenant visibility.
pub type CompanyId = String;

/// Descriptive tag for the kind of work a stage represents.
///
/// Purely informational: transition logic never consults it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageType {
    /// Initial intake stage; new applications land here.
    Application,
    /// Resume or phone screening.
    Screening,
    /// A live interview round.
    Interview,
    /// Take-home or skills assessment.
    Assessment,
    /// Internal review / debrief.
    Review,
    /// Offer extended.
    Offer,
    /// Anything the company defines itself.
    Custom,
}

impl Default for StageType {
    fn default() -> Self {
        Self::Custom
    }
}

impl StageType {
    /// Returns the lowercase slug used by UI projections.
    #[must_use]
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Screening => "screening",
            Self::Interview => "interview",
            Self::Assessment => "assessment",
            Self::Review => "review",
            Self::Offer => "offer",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for StageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Enumerated swatch token identifying a stage's display color.
///
/// Not a hex value: the rendering collaborator maps tokens to its palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageColor {
    /// Neutral gray.
    Slate,
    /// Blue.
    Blue,
    /// Green.
    Green,
    /// Amber.
    Amber,
    /// Orange.
    Orange,
    /// Red.
    Red,
    /// Violet.
    Violet,
    /// Pink.
    Pink,
    /// Teal.
    Teal,
}

impl Default for StageColor {
    fn default() -> Self {
        Self::Slate
    }
}

/// A node in a company's recruitment pipeline.
///
/// The stage set may be flat-sequential (no `parent_id` anywhere) or
/// tree-structured. `order_index` orders stages company-wide and must be
/// unique per company at any committed point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    /// Unique identifier.
    pub id: StageId,
    /// Owning tenant.
    pub company_id: CompanyId,
    /// Optional parent stage in the same company; `None` means root.
    /// Must never form a cycle when the parent chain is followed upward.
    pub parent_id: Option<StageId>,
    /// Display name. Also the join key to `Application::current_stage.name`
    /// in board flows, so active stages within a company should not share
    /// a name.
    pub name: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Swatch token for display.
    #[serde(default)]
    pub color: StageColor,
    /// Company-wide position, 1-based. Drives list display order and the
    /// sequential transition rule when no hierarchy is present.
    pub order_index: i64,
    /// Descriptive tag; not used in transition logic.
    #[serde(default)]
    pub stage_type: StageType,
    /// True for the stage new applications land in automatically. Cannot
    /// be deleted.
    #[serde(default)]
    pub is_default: bool,
    /// Soft-delete flag; inactive stages are excluded from fetch results.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Whether hard deletion is permitted.
    #[serde(default = "default_true")]
    pub can_be_deleted: bool,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last modification time.
    pub updated_at: Timestamp,
}

fn default_true() -> bool {
    true
}

impl Stage {
    /// Returns true if this stage has no parent.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Payload for creating a stage: a [`Stage`] without id and timestamps.
///
/// The caller supplies `order_index` (typically current count + 1); storage
/// rejects duplicate `(company, order_index)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStage {
    /// Owning tenant.
    pub company_id: CompanyId,
    /// Optional parent stage.
    pub parent_id: Option<StageId>,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Swatch token.
    pub color: StageColor,
    /// Caller-chosen company-wide position.
    pub order_index: i64,
    /// Descriptive tag.
    pub stage_type: StageType,
    /// Whether new applications land here automatically.
    pub is_default: bool,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Whether hard deletion is permitted.
    pub can_be_deleted: bool,
}

impl NewStage {
    /// Creates a new stage payload with defaults: root, custom type,
    /// slate color, active, deletable, order index 0 (set it before
    /// inserting).
    #[must_use]
    pub fn new(company_id: impl Into<CompanyId>, name: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            parent_id: None,
            name: name.into(),
            description: None,
            color: StageColor::default(),
            order_index: 0,
            stage_type: StageType::default(),
            is_default: false,
            is_active: true,
            can_be_deleted: true,
        }
    }

    /// Sets the parent stage.
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<StageId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the color token.
    #[must_use]
    pub fn with_color(mut self, color: StageColor) -> Self {
        self.color = color;
        self
    }

    /// Sets the order index.
    #[must_use]
    pub fn with_order_index(mut self, order_index: i64) -> Self {
        self.order_index = order_index;
        self
    }

    /// Sets the stage type tag.
    #[must_use]
    pub fn with_stage_type(mut self, stage_type: StageType) -> Self {
        self.stage_type = stage_type;
        self
    }

    /// Marks this stage as the default landing stage. Default stages are
    /// protected from deletion.
    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self.can_be_deleted = false;
        self
    }

    /// Materializes a full [`Stage`] with the given id and timestamps.
    #[must_use]
    pub fn into_stage(self, id: impl Into<StageId>, now: Timestamp) -> Stage {
        Stage {
            id: id.into(),
            company_id: self.company_id,
            parent_id: self.parent_id,
            name: self.name,
            description: self.description,
            color: self.color,
            order_index: self.order_index,
            stage_type: self.stage_type,
            is_default: self.is_default,
            is_active: self.is_active,
            can_be_deleted: self.can_be_deleted,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update to a stage. Only provided fields are changed.
///
/// `parent_id` uses a nested `Option` so that re-parenting to root
/// (`Some(None)`) is distinct from leaving the parent untouched (`None`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagePatch {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New parent (`Some(None)` clears it). Note: setting a parent here
    /// performs no cycle check; callers such as the tree editor must run
    /// the check before issuing the update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<StageId>>,
    /// New color token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<StageColor>,
    /// New order index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i64>,
    /// New stage type tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_type: Option<StageType>,
    /// New active flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// New deletion-protection flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_be_deleted: Option<bool>,
}

impl StagePatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the parent stage.
    #[must_use]
    pub fn with_parent(mut self, parent_id: Option<StageId>) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the order index.
    #[must_use]
    pub fn with_order_index(mut self, order_index: i64) -> Self {
        self.order_index = Some(order_index);
        self
    }

    /// Sets the color token.
    #[must_use]
    pub fn with_color(mut self, color: StageColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Returns true if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies the patch to a stage record in place, bumping `updated_at`.
    pub fn apply_to(&self, stage: &mut Stage, now: Timestamp) {
        if let Some(ref name) = self.name {
            stage.name = name.clone();
        }
        if let Some(ref description) = self.description {
            stage.description = Some(description.clone());
        }
        if let Some(ref parent_id) = self.parent_id {
            stage.parent_id = parent_id.clone();
        }
        if let Some(color) = self.color {
            stage.color = color;
        }
        if let Some(order_index) = self.order_index {
            stage.order_index = order_index;
        }
        if let Some(stage_type) = self.stage_type {
            stage.stage_type = stage_type;
        }
        if let Some(is_active) = self.is_active {
            stage.is_active = is_active;
        }
        if let Some(can_be_deleted) = self.can_be_deleted {
            stage.can_be_deleted = can_be_deleted;
        }
        stage.updated_at = now;
    }
}

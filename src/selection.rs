use crate::data::Table;
use crate::error::{Result, ScatterError};
use serde::{Deserialize, Serialize};

/// One column picked for a role, by position and display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelection {
    pub index: usize,
    pub name: String,
}

impl FieldSelection {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    pub fn by_name(table: &Table, name: &str) -> Result<Self> {
        let index = table.column_index(name)?;
        let name = table
            .column(index)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| name.to_string());
        Ok(Self { index, name })
    }

    pub fn by_index(table: &Table, index: usize) -> Result<Self> {
        let column = table.column(index).ok_or(ScatterError::ColumnOutOfRange {
            index,
            width: table.columns.len(),
        })?;
        Ok(Self::new(index, column.name.clone()))
    }

    /// Resolve `spec` as a zero-based index if it is one, otherwise as a name
    pub fn resolve(table: &Table, spec: &str) -> Result<Self> {
        let spec = spec.trim();
        match spec.parse::<usize>() {
            Ok(index) if table.column_index(spec).is_err() => Self::by_index(table, index),
            _ => Self::by_name(table, spec),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    XAxis,
    YAxis,
    Category,
}

/// All three selections, present together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFields<'a> {
    pub x_axis: &'a FieldSelection,
    pub y_axis: &'a FieldSelection,
    pub category: &'a FieldSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState<'a> {
    /// At least one role has no column yet
    Unconfigured,
    Ready(ResolvedFields<'a>),
}

/// Field configuration the host exposes to the user for picking columns.
///
/// Serializes as `{"xAxis": {...}, "yAxis": {...}, "category": {...}}` with
/// missing or `null` entries for unresolved roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelector {
    #[serde(rename = "xAxis", default)]
    pub x_axis: Option<FieldSelection>,
    #[serde(rename = "yAxis", default)]
    pub y_axis: Option<FieldSelection>,
    #[serde(default)]
    pub category: Option<FieldSelection>,
}

impl FieldSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn get(&self, role: FieldRole) -> Option<&FieldSelection> {
        match role {
            FieldRole::XAxis => self.x_axis.as_ref(),
            FieldRole::YAxis => self.y_axis.as_ref(),
            FieldRole::Category => self.category.as_ref(),
        }
    }

    /// Set or clear (`None`) the column for a role
    pub fn set(&mut self, role: FieldRole, selection: Option<FieldSelection>) {
        let slot = match role {
            FieldRole::XAxis => &mut self.x_axis,
            FieldRole::YAxis => &mut self.y_axis,
            FieldRole::Category => &mut self.category,
        };
        *slot = selection;
    }

    pub fn state(&self) -> SelectorState<'_> {
        match (&self.x_axis, &self.y_axis, &self.category) {
            (Some(x_axis), Some(y_axis), Some(category)) => SelectorState::Ready(ResolvedFields {
                x_axis,
                y_axis,
                category,
            }),
            _ => SelectorState::Unconfigured,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state(), SelectorState::Ready(_))
    }
}

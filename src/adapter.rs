use crate::category::extract_categories;
use crate::chart::{build_chart_spec, ChartSpec, Presentation};
use crate::data::Table;
use crate::palette::{ColorAssigner, PaletteColorAssigner};
use crate::render::RenderTarget;
use crate::selection::{FieldSelector, ResolvedFields, SelectorState};
use crate::series::{build_series, ColumnRoles};

/// Chart spec produced by one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOutput {
    pub spec: ChartSpec,
    pub skipped_rows: usize,
}

/// Run the full pipeline: categories, series, chart spec
pub fn transform<C: ColorAssigner + ?Sized>(
    fields: ResolvedFields<'_>,
    table: &Table,
    colors: &mut C,
    presentation: &Presentation,
) -> PlotOutput {
    let roles = ColumnRoles {
        x: fields.x_axis.index,
        y: fields.y_axis.index,
        category: fields.category.index,
    };

    let categories = extract_categories(roles.category, &table.rows);
    log::debug!(
        "Found {} categories in column '{}' over {} rows",
        categories.len(),
        fields.category.name,
        table.rows.len()
    );

    let build = build_series(roles, &categories, &table.rows, colors);
    log::debug!(
        "Built {} series with {} points",
        build.series.len(),
        build.point_count()
    );

    let spec = build_chart_spec(
        &fields.x_axis.name,
        &fields.y_axis.name,
        &fields.category.name,
        build.series,
        presentation,
    );

    PlotOutput {
        spec,
        skipped_rows: build.skipped_rows,
    }
}

/// Holds the field configuration for one render surface and redraws it from
/// scratch on every [`PlotAdapter::render`] call.
pub struct PlotAdapter<T: RenderTarget, C: ColorAssigner = PaletteColorAssigner> {
    surface_id: String,
    selector: FieldSelector,
    presentation: Presentation,
    colors: C,
    target: T,
}

impl<T: RenderTarget> PlotAdapter<T> {
    pub fn new(surface_id: impl Into<String>, target: T) -> Self {
        Self {
            surface_id: surface_id.into(),
            selector: FieldSelector::new(),
            presentation: Presentation::default(),
            colors: PaletteColorAssigner::default(),
            target,
        }
    }
}

impl<T: RenderTarget, C: ColorAssigner> PlotAdapter<T, C> {
    pub fn with_colors<C2: ColorAssigner>(self, colors: C2) -> PlotAdapter<T, C2> {
        PlotAdapter {
            surface_id: self.surface_id,
            selector: self.selector,
            presentation: self.presentation,
            colors,
            target: self.target,
        }
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn with_selector(mut self, selector: FieldSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    /// The configuration handle the host binds its column pickers to
    pub fn field_selector(&self) -> &FieldSelector {
        &self.selector
    }

    pub fn field_selector_mut(&mut self) -> &mut FieldSelector {
        &mut self.selector
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    /// Draw `table` on the bound surface.
    ///
    /// Does nothing until all three fields are selected. Returns the number of
    /// rows skipped for lack of a category series, or `None` if nothing was
    /// drawn.
    pub fn render(&mut self, table: &Table) -> Option<usize> {
        let fields = match self.selector.state() {
            SelectorState::Ready(fields) => fields,
            SelectorState::Unconfigured => {
                log::debug!("Skipping render of '{}': fields not selected", self.surface_id);
                return None;
            }
        };

        let output = transform(fields, table, &mut self.colors, &self.presentation);
        self.target.draw(&self.surface_id, &output.spec);
        Some(output.skipped_rows)
    }
}

// Render target collaborators

use crate::chart::ChartSpec;
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;

/// A drawable surface that turns chart specs into output.
///
/// Failures stay inside the target; they are logged, not returned.
pub trait RenderTarget {
    fn draw(&mut self, surface_id: &str, spec: &ChartSpec);
}

impl<T: RenderTarget + ?Sized> RenderTarget for &mut T {
    fn draw(&mut self, surface_id: &str, spec: &ChartSpec) {
        (**self).draw(surface_id, spec)
    }
}

impl<T: RenderTarget + ?Sized> RenderTarget for Box<T> {
    fn draw(&mut self, surface_id: &str, spec: &ChartSpec) {
        (**self).draw(surface_id, spec)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Highcharts scatter options
    #[default]
    Highcharts,
    /// The library-agnostic chart spec
    Spec,
}

/// Writes each chart as one JSON document, tagged with its surface id
pub struct JsonTarget<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
}

impl<W: Write> JsonTarget<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn document(&self, surface_id: &str, spec: &ChartSpec) -> Result<Value> {
        let chart = match self.format {
            OutputFormat::Highcharts => spec.to_highcharts(),
            OutputFormat::Spec => serde_json::to_value(spec).context("Failed to serialize chart spec")?,
        };
        Ok(serde_json::json!({ "target": surface_id, "chart": chart }))
    }

    fn write_document(&mut self, surface_id: &str, spec: &ChartSpec) -> Result<()> {
        let doc = self.document(surface_id, spec)?;
        let written = if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &doc)
        } else {
            serde_json::to_writer(&mut self.writer, &doc)
        };
        written.context("Failed to write chart JSON")?;
        writeln!(self.writer).context("Failed to write chart JSON")?;
        self.writer.flush().context("Failed to flush output")?;
        Ok(())
    }
}

impl<W: Write> RenderTarget for JsonTarget<W> {
    fn draw(&mut self, surface_id: &str, spec: &ChartSpec) {
        if let Err(e) = self.write_document(surface_id, spec) {
            log::error!("Rendering to '{}' failed: {:#}", surface_id, e);
        }
    }
}

/// Keeps every drawn spec in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    pub draws: Vec<(String, ChartSpec)>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&ChartSpec> {
        self.draws.last().map(|(_, spec)| spec)
    }
}

impl RenderTarget for RecordingTarget {
    fn draw(&mut self, surface_id: &str, spec: &ChartSpec) {
        self.draws.push((surface_id.to_string(), spec.clone()));
    }
}

//! seqpng-core: sequence diagram parser, layout engine and PNG renderer
//!
//! # Example
//!
//! ```no_run
//! let input = r#"
//! Alice->+Bob: Hello
//! loop every minute
//! Bob-->-Alice: Hi there
//! end
//! "#;
//!
//! let png = seqpng_core::render_png(input).unwrap();
//! assert!(png.starts_with(b"\x89PNG"));
//! ```
//!
//! # Inspecting the layout
//!
//! ```
//! use seqpng_core::{Config, Engine, FixedMetrics, Rasterizer};
//!
//! let engine = Engine::from_parts(Config::default(), Rasterizer::bundled())
//!     .with_metrics(FixedMetrics::default());
//! let diagram = engine.layout("a->n:hi\nn->a:bye").unwrap();
//! let names: Vec<_> = diagram.actors().iter().map(|a| a.name.as_str()).collect();
//! assert_eq!(names, ["a", "n"]);
//! ```

pub mod ast;
pub mod canvas;
pub mod config;
pub mod diagram;
pub mod geom;
pub mod layout;
pub mod metrics;
pub mod parser;
pub mod raster;
pub mod renderer;
pub mod stack;

pub use ast::*;
pub use canvas::{Canvas, SvgCanvas};
pub use config::{Colors, Config};
pub use diagram::{BuildError, Diagram, DiagramBuilder};
pub use geom::{Point, Rect, Size};
pub use metrics::{EstimatedMetrics, FixedMetrics, TextMetrics};
pub use parser::{parse, ParseError, ParsedLine};
pub use raster::{RasterError, Rasterizer};

/// Any failure on the way from text to image
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Text to image pipeline with its configuration, text metrics and rasteriser.
///
/// Cheap to share: wrap it in an `Arc` and render from any thread.
pub struct Engine {
    config: Config,
    metrics: Box<dyn TextMetrics + Send + Sync>,
    rasterizer: Rasterizer,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("rasterizer", &self.rasterizer)
            .finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Default configuration, estimated metrics, system fonts
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::from_parts(config, Rasterizer::new())
    }

    /// Build around an existing rasteriser, skipping system font discovery
    pub fn from_parts(config: Config, rasterizer: Rasterizer) -> Self {
        Self {
            config,
            metrics: Box::new(EstimatedMetrics),
            rasterizer,
        }
    }

    /// Replace the text measurement used by layout
    pub fn with_metrics(mut self, metrics: impl TextMetrics + Send + Sync + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse, build and lay out a document
    pub fn layout(&self, input: &str) -> Result<Diagram, Error> {
        let mut diagram = Diagram::parse(input)?;
        layout::layout(&mut diagram, &self.config, self.metrics.as_ref());
        Ok(diagram)
    }

    pub fn render_svg(&self, input: &str) -> Result<String, Error> {
        let diagram = self.layout(input)?;
        Ok(renderer::render_svg(&diagram, &self.config))
    }

    pub fn render_png(&self, input: &str) -> Result<Vec<u8>, Error> {
        let svg = self.render_svg(input)?;
        Ok(self.rasterizer.png(&svg)?)
    }
}

/// Render a document to SVG with the default engine
pub fn render_svg(input: &str) -> Result<String, Error> {
    Engine::new().render_svg(input)
}

/// Render a document to PNG with the default engine
pub fn render_png(input: &str) -> Result<Vec<u8>, Error> {
    Engine::new().render_png(input)
}

//! Chart specifications and the transformers that build them.
//!
//! A [`ChartSpec`] is the renderer-independent description of one chart:
//! traces (geometry + value encoding), a minimal layout, and animation frames.
//! It serialises to the object shapes Plotly expects, which keeps
//! [`crate::render`] a thin adapter.

pub mod animation;
pub mod categorical;
pub mod choropleth;
pub mod flow;
pub mod hierarchy;
pub mod matrix;
pub mod timeseries;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ChartSpec {
    pub data: Vec<Trace>,
    pub layout: Layout,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<animation::Frame>,
}

impl ChartSpec {
    pub fn new(data: Vec<Trace>, layout: Layout) -> Self {
        Self {
            data,
            layout,
            frames: Vec::new(),
        }
    }
}

/// One visual series. The variant decides the Plotly `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Heatmap(HeatmapTrace),
    Treemap(TreemapTrace),
    Sankey(SankeyTrace),
    Choropleth(ChoroplethTrace),
    Scatter(ScatterTrace),
    Bar(BarTrace),
    Pie(PieTrace),
    Box(BoxTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapTrace {
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub z: Vec<Vec<f64>>,
    pub colorscale: &'static str,
    pub hovertemplate: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapTrace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    /// Subtree aggregates, so `branchvalues = "total"` holds by construction.
    pub values: Vec<f64>,
    pub branchvalues: &'static str,
    pub marker: TreemapMarker,
    pub textinfo: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapMarker {
    pub colors: Vec<f64>,
    pub colorscale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyTrace {
    pub node: SankeyNodes,
    pub link: SankeyLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyNodes {
    pub label: Vec<String>,
    pub color: Vec<String>,
    pub pad: u32,
    pub thickness: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyLinks {
    pub source: Vec<usize>,
    pub target: Vec<usize>,
    pub value: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethTrace {
    pub locationmode: &'static str,
    pub locations: Vec<String>,
    pub z: Vec<f64>,
    pub text: Vec<String>,
    pub zauto: bool,
    pub zmin: f64,
    pub zmax: f64,
    pub colorscale: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub name: String,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub x: Vec<serde_json::Value>,
    pub y: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub hole: f64,
    pub textinfo: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxTrace {
    pub y: Vec<f64>,
    pub name: String,
    pub boxpoints: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sliders: Vec<animation::Slider>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub updatemenus: Vec<animation::PlaybackMenu>,
}

impl Layout {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_axes(mut self, x: &str, y: &str) -> Self {
        self.xaxis = Some(Axis::titled(x));
        self.yaxis = Some(Axis::titled(y));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Axis {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryorder: Option<&'static str>,
}

impl Axis {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}

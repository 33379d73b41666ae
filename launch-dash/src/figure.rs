//! Plotly figure descriptions
//!
//! Figures serialize to the `{"data": [...], "layout": {...}}` shape that
//! `Plotly.react` accepts, so the browser renders them without any further
//! translation.

use crate::aggregate::{PointGroup, Slice};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: FigureLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie {
        labels: Vec<String>,
        values: Vec<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        sort: bool,
    },
    Scatter {
        x: Vec<f64>,
        y: Vec<f64>,
        mode: String,
        name: String,
        legendgroup: String,
        showlegend: bool,
    },
}

impl Trace {
    pub fn pie(slices: &[Slice]) -> Self {
        Trace::Pie {
            labels: slices.iter().map(|s| s.label.clone()).collect(),
            values: slices.iter().map(|s| s.value).collect(),
            name: None,
            // keep the aggregate's ordering
            sort: false,
        }
    }

    pub fn markers(group: &PointGroup) -> Self {
        Trace::Scatter {
            x: group.payload_mass_kg.clone(),
            y: group.class.iter().map(|&c| f64::from(c)).collect(),
            mode: "markers".to_string(),
            name: group.category.clone(),
            legendgroup: group.category.clone(),
            showlegend: true,
        }
    }

    /// Number of slices or points in the trace
    pub fn len(&self) -> usize {
        match self {
            Trace::Pie { values, .. } => values.len(),
            Trace::Scatter { x, .. } => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureLayout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

impl FigureLayout {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Title::new(title),
            xaxis: None,
            yaxis: None,
            legend: None,
        }
    }
}

impl Figure {
    pub fn pie_chart(title: impl Into<String>, slices: &[Slice]) -> Self {
        Self {
            data: vec![Trace::pie(slices)],
            layout: FigureLayout::titled(title),
        }
    }

    /// One marker trace per color group, axes labelled with the source column names
    pub fn scatter_chart(
        title: impl Into<String>,
        groups: &[PointGroup],
        x_title: &str,
        y_title: &str,
        color_title: &str,
    ) -> Self {
        let mut layout = FigureLayout::titled(title);
        layout.xaxis = Some(Axis {
            title: Title::new(x_title),
        });
        layout.yaxis = Some(Axis {
            title: Title::new(y_title),
        });
        layout.legend = Some(Legend {
            title: Title::new(color_title),
        });

        Self {
            data: groups.iter().map(Trace::markers).collect(),
            layout,
        }
    }

    /// True when no trace carries a slice or point
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(Trace::is_empty)
    }

    pub fn point_count(&self) -> usize {
        self.data.iter().map(Trace::len).sum()
    }
}

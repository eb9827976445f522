use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Color scheme the graph is drawn in. Passed in explicitly by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphTheme {
    #[default]
    Light,
    Dark,
}

/// Concrete colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphPalette {
    pub node: &'static str,
    pub highlight_node: &'static str,
    pub link: &'static str,
    pub background: &'static str,
}

const HIGHLIGHT_NODE: &str = "#ef4444";

impl GraphTheme {
    pub fn palette(self) -> GraphPalette {
        match self {
            Self::Light => GraphPalette {
                node: "#16a34a",
                highlight_node: HIGHLIGHT_NODE,
                link: "rgba(0,0,0,0.1)",
                background: "#ffffff",
            },
            Self::Dark => GraphPalette {
                node: "#22c55e",
                highlight_node: HIGHLIGHT_NODE,
                link: "rgba(255,255,255,0.2)",
                background: "#0f172a",
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl Display for GraphTheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphTheme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unsupported theme `{other}`; expected light|dark")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GraphTheme;

    #[test]
    fn themes_differ_except_for_highlight() {
        let light = GraphTheme::Light.palette();
        let dark = GraphTheme::Dark.palette();
        assert_ne!(light.node, dark.node);
        assert_ne!(light.background, dark.background);
        assert_eq!(light.highlight_node, dark.highlight_node);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("DARK".parse::<GraphTheme>(), Ok(GraphTheme::Dark));
        assert!("sepia".parse::<GraphTheme>().is_err());
    }
}

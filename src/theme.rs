use crate::graph::{EdgeColor, NodeColor};

#[derive(Debug, Clone)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub title_font_size: f32,
    pub station_color: String,
    pub plain_color: String,
    pub forward_color: String,
    pub reverse_color: String,
    pub node_text_color: String,
    pub label_text_color: String,
    pub label_background: String,
    pub label_border: String,
    pub background: String,
}

impl Theme {
    /// Colors of the classic networkx/matplotlib rendering.
    pub fn classic() -> Self {
        Self {
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
            font_size: 11.0,
            title_font_size: 16.0,
            station_color: "green".to_string(),
            plain_color: "grey".to_string(),
            forward_color: "black".to_string(),
            reverse_color: "red".to_string(),
            node_text_color: "#000000".to_string(),
            label_text_color: "#1C2430".to_string(),
            label_background: "#FFFFFF".to_string(),
            label_border: "#2E7D32".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            title_font_size: 15.0,
            station_color: "#2FA36B".to_string(),
            plain_color: "#9AA5B8".to_string(),
            forward_color: "#3A4656".to_string(),
            reverse_color: "#D64545".to_string(),
            node_text_color: "#1C2430".to_string(),
            label_text_color: "#1C2430".to_string(),
            label_background: "#F8FAFF".to_string(),
            label_border: "#C7D2E5".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn node_fill(&self, color: NodeColor) -> &str {
        match color {
            NodeColor::Station => &self.station_color,
            NodeColor::Plain => &self.plain_color,
        }
    }

    pub fn edge_stroke(&self, color: EdgeColor) -> &str {
        match color {
            EdgeColor::Forward => &self.forward_color,
            EdgeColor::Reverse => &self.reverse_color,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

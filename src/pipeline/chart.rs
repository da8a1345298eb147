use crate::constants::DEFAULT_CHART_TYPE;
use crate::markdown::render_markdown_html;
use crate::types::ConfigValue;
use serde::Serialize;

/// The pieces a chart renderer consumes from a normalized configuration
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderableChart {
    pub chart_type: String,
    pub series: ConfigValue,
    pub options: ConfigValue,
    pub caption: Option<String>,
}

impl RenderableChart {
    /// Chart type comes from top-level `type`, then `options.chart.type`,
    /// then the default. Missing series and options are empty.
    pub fn from_config(config: &ConfigValue) -> Self {
        let chart_type = config
            .get("type")
            .and_then(ConfigValue::as_str)
            .or_else(|| {
                config
                    .get_path(&["options", "chart", "type"])
                    .and_then(ConfigValue::as_str)
            })
            .unwrap_or(DEFAULT_CHART_TYPE)
            .to_string();
        let series = match config.get("series") {
            Some(series @ ConfigValue::Array(_)) => series.clone(),
            _ => ConfigValue::Array(Vec::new()),
        };
        let options = match config.get("options") {
            Some(options @ ConfigValue::Object(_)) => options.clone(),
            _ => ConfigValue::object(),
        };
        let caption = config
            .get("caption")
            .and_then(ConfigValue::as_str)
            .filter(|caption| !caption.trim().is_empty())
            .map(str::to_string);
        Self {
            chart_type,
            series,
            options,
            caption,
        }
    }

    pub fn caption_html(&self) -> Option<String> {
        self.caption.as_deref().map(render_markdown_html)
    }
}

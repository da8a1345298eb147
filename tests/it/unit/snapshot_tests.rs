//! Snapshot tests using the insta crate.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::{config, sales_answer, sales_chart};
use answerviz::answer::AnswerDocument;
use answerviz::pipeline::normalize_chart_config;
use answerviz::settings::Settings;
use serde_json::json;

#[test]
fn snapshot_empty_config_normalized() {
    let normalized = normalize_chart_config(config(json!({})), &Settings::default());
    insta::assert_json_snapshot!(normalized.config, @r###"
    {
      "options": {
        "chart": {
          "animations": {
            "enabled": true
          },
          "toolbar": {
            "export": {
              "csv": {
                "filename": "mtcenter-ventas"
              },
              "png": {
                "filename": "mtcenter-ventas"
              },
              "svg": {
                "filename": "mtcenter-ventas"
              }
            },
            "show": true,
            "tools": {
              "download": true,
              "pan": true,
              "reset": true,
              "selection": true,
              "zoom": true,
              "zoomin": true,
              "zoomout": true
            }
          },
          "zoom": {
            "enabled": false
          }
        }
      }
    }
    "###);
}

#[test]
fn snapshot_sales_chart_report() {
    let normalized = normalize_chart_config(config(sales_chart()), &Settings::default());
    insta::assert_json_snapshot!(normalized.report, @r###"
    {
      "failures": [
        {
          "path": "root.options.tooltip.y.formatter",
          "expression": "function(val) { return val +",
          "error": "syntax error at 28: expected expression, found end of input"
        }
      ],
      "removed": [
        {
          "path": "root.options.tooltip.y.formatter",
          "key": "formatter",
          "value": "function(val) { return val +"
        }
      ]
    }
    "###);
}

#[test]
fn snapshot_answer_table_html() {
    let answer = AnswerDocument::new(sales_answer());
    insta::assert_snapshot!(
        answer.table_html().unwrap(),
        @"<table><thead><tr><th>Mes</th><th>Ventas</th></tr></thead><tbody><tr><td>Ene</td><td>$1,500</td></tr><tr><td>Feb</td><td>$2,300</td></tr><tr><td>Mar</td><td>$1,800</td></tr></tbody></table>"
    );
}

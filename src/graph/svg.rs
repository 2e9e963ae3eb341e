//! SVG export of the current graph view.
//!
//! Nodes are drawn at their hinted positions after shifting the whole view
//! so that every coordinate is positive. Edges get an arrowhead and an
//! amount label; self-loops are drawn as a small arc.

use super::store::GraphStore;
use super::types::{Node, NodeKind, Position};

const PADDING: f64 = 60.0;
const NODE_RADIUS: f64 = 14.0;
const MIN_SIZE: f64 = 200.0;

// Tokyo Night colors
const BG_COLOR: &str = "#1a1b26";
const TEXT_COLOR: &str = "#c0caf5";
const FOCAL_COLOR: &str = "#e0af68";
const COUNTERPARTY_COLOR: &str = "#7aa2f7";
const PLACEHOLDER_COLOR: &str = "#565f89";
const LABEL_COLOR: &str = "#9ece6a";

/// Render the store as a standalone SVG document.
///
/// `symbol` is appended to edge amounts (e.g. `ETH`).
#[must_use]
pub fn render(store: &GraphStore, symbol: &str) -> String {
    if store.is_empty() {
        return empty_svg();
    }

    let (min, max) = bounds(store.nodes());
    let width = (max.x - min.x + PADDING * 2.0).max(MIN_SIZE);
    let height = (max.y - min.y + PADDING * 2.0).max(MIN_SIZE);
    let shift = |p: Position| p.offset(PADDING - min.x, PADDING - min.y);

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width:.0} {height:.0}" width="{width:.0}" height="{height:.0}">
<defs>
  <marker id="arrowhead" markerWidth="10" markerHeight="7" refX="9" refY="3.5" orient="auto">
    <polygon points="0 0, 10 3.5, 0 7" fill="context-stroke"/>
  </marker>
</defs>
<rect width="100%" height="100%" fill="{BG_COLOR}"/>
"#
    ));

    for edge in store.edges() {
        let (Some(source), Some(target)) = (store.node(&edge.source), store.node(&edge.target))
        else {
            continue;
        };
        let from = shift(source.position);
        let to = shift(target.position);
        let label = escape_xml(&edge.label(symbol));

        if edge.is_self_loop() {
            svg.push_str(&format!(
                r#"<path d="M {:.1} {:.1} C {:.1} {:.1} {:.1} {:.1} {:.1} {:.1}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                from.x,
                from.y - NODE_RADIUS,
                from.x + 40.0,
                from.y - 50.0,
                from.x + 40.0,
                from.y + 50.0,
                from.x,
                from.y + NODE_RADIUS,
                edge.style.stroke,
                edge.style.stroke_width
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" fill="{LABEL_COLOR}" font-family="monospace" font-size="10">{label}</text>"#,
                from.x + 44.0,
                from.y
            ));
        } else {
            let marker = if edge.style.arrow_marker {
                r#" marker-end="url(#arrowhead)""#
            } else {
                ""
            };
            svg.push_str(&format!(
                r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{}"{marker}/>"#,
                from.x, from.y, to.x, to.y, edge.style.stroke, edge.style.stroke_width
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" fill="{LABEL_COLOR}" font-family="monospace" font-size="10" text-anchor="middle">{label}</text>"#,
                (from.x + to.x) / 2.0,
                (from.y + to.y) / 2.0 - 4.0
            ));
        }
        svg.push('\n');
    }

    for node in store.nodes() {
        let p = shift(node.position);
        let fill = match node.kind {
            NodeKind::Focal => FOCAL_COLOR,
            NodeKind::Counterparty => COUNTERPARTY_COLOR,
            NodeKind::Placeholder => PLACEHOLDER_COLOR,
        };
        svg.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="{NODE_RADIUS}" fill="{fill}" data-shape="{}"/>"#,
            p.x,
            p.y,
            node.kind.shape()
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" fill="{TEXT_COLOR}" font-family="monospace" font-size="11" text-anchor="middle">{}</text>"#,
            p.x,
            p.y + NODE_RADIUS + 14.0,
            escape_xml(&node.label)
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

fn bounds(nodes: &[Node]) -> (Position, Position) {
    let mut min = Position::new(f64::INFINITY, f64::INFINITY);
    let mut max = Position::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for node in nodes {
        min.x = min.x.min(node.position.x);
        min.y = min.y.min(node.position.y);
        max.x = max.x.max(node.position.x);
        max.y = max.y.max(node.position.y);
    }
    (min, max)
}

fn empty_svg() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {MIN_SIZE} 60" width="{MIN_SIZE}" height="60">
<rect width="100%" height="100%" fill="{BG_COLOR}"/>
<text x="100" y="35" fill="{TEXT_COLOR}" font-family="monospace" font-size="12" text-anchor="middle">No transfers</text>
</svg>
"#
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

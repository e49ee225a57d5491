//! SVG drawing stage: [`ChartLayout`] in, SVG text out.
//!
//! Output contract (machine-checkable): every leaf becomes a `rect.tile` carrying
//! `data-name`, `data-category`, `data-value` attributes; labels are `text.tile-label` with
//! one `tspan` per wrapped line; the legend is `g#legend` with `rect.legend-item` swatches;
//! the tooltip is `g#tooltip`, opacity-toggled by an embedded pointer script.

use crate::model::ChartLayout;
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `<svg id="...">`; also namespaces nothing else, so keep it DOM-unique.
    pub chart_id: Option<String>,
    /// When true, emit the tooltip group and the pointer-event script. Turn off for raster
    /// backends, which cannot run scripts.
    pub interactive: bool,
    /// Caption prefixed to the formatted value on the tooltip's third line.
    pub tooltip_value_caption: String,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            chart_id: None,
            interactive: true,
            tooltip_value_caption: "Box Office Receipts: $".to_string(),
        }
    }
}

/// Line height for wrapped tile labels, in em (the original chart's `lineHeight`).
const LABEL_LINE_HEIGHT_EM: f64 = 1.1;
/// First-line baseline offset below the tile's top edge, in em.
const LABEL_FIRST_DY_EM: f64 = 0.5;
/// Vertical offset of the label block below the tile's top edge, in px.
const LABEL_TOP_OFFSET: f64 = 5.0;

pub fn render_chart_svg(layout: &ChartLayout, options: &SvgRenderOptions) -> String {
    let chart_id = options.chart_id.as_deref().unwrap_or("treemap-chart");
    let total_height = layout.height + layout.header_height;

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="graphics-document document" aria-roledescription="treemap">"#,
        id = escape_attr(chart_id),
        w = fmt(layout.width),
        h = fmt(total_height),
    );

    let _ = write!(&mut out, "<style>{}</style>", chart_css(chart_id, layout));

    // Header band: title + description, centered like the original page chrome.
    let _ = write!(
        &mut out,
        r#"<text id="title" x="{x}" y="28" text-anchor="middle">{text}</text>"#,
        x = fmt(layout.width / 2.0),
        text = escape_xml(&layout.title)
    );
    let _ = write!(
        &mut out,
        r#"<text id="description" x="{x}" y="54" text-anchor="middle">{text}</text>"#,
        x = fmt(layout.width / 2.0),
        text = escape_xml(&layout.description)
    );

    let _ = write!(
        &mut out,
        r#"<g class="chartBody" transform="translate(0, {ty})">"#,
        ty = fmt(layout.header_height)
    );

    render_tiles(&mut out, layout);
    render_labels(&mut out, layout);
    render_legend(&mut out, layout);

    out.push_str("</g>");

    if options.interactive {
        render_tooltip(&mut out);
        render_script(&mut out, options);
    }

    out.push_str("</svg>\n");
    out
}

fn render_tiles(out: &mut String, layout: &ChartLayout) {
    out.push_str(r#"<g class="tiles">"#);
    for leaf in &layout.leaves {
        let _ = write!(
            out,
            r#"<rect class="tile" x="{x}" y="{y}" width="{w}" height="{h}" data-name="{name}" data-category="{category}" data-value="{value}" data-formatted="{formatted}" fill="{fill}"/>"#,
            x = fmt(leaf.x0),
            y = fmt(leaf.y0),
            w = fmt(leaf.width()),
            h = fmt(leaf.height()),
            name = escape_attr(&leaf.name),
            category = escape_attr(&leaf.category),
            value = fmt(leaf.value),
            formatted = escape_attr(&format_value(leaf.value)),
            fill = escape_attr(&leaf.fill),
        );
    }
    out.push_str("</g>");
}

fn render_labels(out: &mut String, layout: &ChartLayout) {
    out.push_str(r#"<g class="labels">"#);
    for leaf in &layout.leaves {
        if leaf.label_lines.is_empty() || leaf.width() <= 0.0 || leaf.height() <= 0.0 {
            continue;
        }
        let x = fmt(leaf.x0);
        let y = fmt(leaf.y0 + LABEL_TOP_OFFSET);
        let _ = write!(out, r#"<text class="tile-label" x="{x}" y="{y}">"#);
        for (i, line) in leaf.label_lines.iter().enumerate() {
            let dy = LABEL_FIRST_DY_EM + i as f64 * LABEL_LINE_HEIGHT_EM;
            let _ = write!(
                out,
                r#"<tspan x="{x}" y="{y}" dy="{dy}em">{text}</tspan>"#,
                dy = fmt(dy),
                text = escape_xml(line)
            );
        }
        out.push_str("</text>");
    }
    out.push_str("</g>");
}

fn render_legend(out: &mut String, layout: &ChartLayout) {
    out.push_str(r#"<g id="legend">"#);
    for entry in &layout.legend.entries {
        let _ = write!(
            out,
            r#"<rect class="legend-item" x="{x}" y="{y}" width="{side}" height="{side}" fill="{fill}"/>"#,
            x = fmt(entry.swatch_x),
            y = fmt(entry.swatch_y),
            side = fmt(layout.legend.swatch_side),
            fill = escape_attr(&entry.color),
        );
    }
    for entry in &layout.legend.entries {
        let _ = write!(
            out,
            r#"<text class="legend-label" x="{x}" y="{y}">{text}</text>"#,
            x = fmt(entry.label_x),
            y = fmt(entry.label_y),
            text = escape_xml(&entry.label),
        );
    }
    out.push_str("</g>");
}

fn render_tooltip(out: &mut String) {
    let _ = write!(
        out,
        concat!(
            r#"<g id="tooltip" opacity="0" pointer-events="none">"#,
            r#"<rect class="tooltip-bg" width="230" height="58" rx="4"/>"#,
            r#"<text id="tooltip-name" x="8" y="16"/>"#,
            r#"<text id="tooltip-category" x="8" y="32"/>"#,
            r#"<text id="tooltip-value" x="8" y="48"/>"#,
            "</g>"
        ),
    );
}

fn render_script(out: &mut String, options: &SvgRenderOptions) {
    let caption = escape_js(&options.tooltip_value_caption);
    let _ = write!(
        out,
        r#"<script><![CDATA[
(function () {{
  var tooltip = document.getElementById('tooltip');
  if (!tooltip) {{ return; }}
  var name = document.getElementById('tooltip-name');
  var category = document.getElementById('tooltip-category');
  var value = document.getElementById('tooltip-value');
  document.querySelectorAll('.tile').forEach(function (tile) {{
    tile.addEventListener('pointerenter', function (evt) {{
      tile.setAttribute('stroke', '#000');
      tile.setAttribute('stroke-width', '0.4');
      name.textContent = tile.getAttribute('data-name');
      category.textContent = tile.getAttribute('data-category');
      value.textContent = '{caption}' + tile.getAttribute('data-formatted');
      tooltip.setAttribute('data-value', tile.getAttribute('data-value'));
      tooltip.setAttribute('transform', 'translate(' + (evt.clientX + 16) + ',' + (evt.clientY - 16) + ')');
      tooltip.setAttribute('opacity', '0.9');
    }});
    tile.addEventListener('pointerleave', function () {{
      tile.removeAttribute('stroke');
      tile.removeAttribute('stroke-width');
      tooltip.setAttribute('opacity', '0');
    }});
  }});
}})();
]]></script>"#
    );
}

fn chart_css(chart_id: &str, layout: &ChartLayout) -> String {
    format!(
        concat!(
            "#{id} text {{ font-family: 'trebuchet ms', verdana, arial, sans-serif; }}\n",
            "#{id} #title {{ font-size: 24px; }}\n",
            "#{id} #description {{ font-size: 14px; fill: #444; }}\n",
            "#{id} .tile-label {{ font-size: {label_fs}px; overflow-wrap: normal; }}\n",
            "#{id} .legend-label {{ font-size: 12px; }}\n",
            "#{id} .tooltip-bg {{ fill: #fff; stroke: #999; fill-opacity: 0.95; }}\n",
            "#{id} #tooltip text {{ font-size: 12px; }}\n",
        ),
        id = chart_id,
        label_fs = fmt(layout.label_font_size),
    )
}

/// Stringifies numbers for SVG attributes the way D3 does: round-trippable decimals without
/// `-0` or tiny float noise.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    escape_xml(text)
}

fn escape_js(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            ']' => out.push_str("\\u005d"),
            '<' => out.push_str("\\u003c"),
            _ => out.push(ch),
        }
    }
    out
}

/// Thousands-separated value formatting, matching D3's `format(',')` for the values these
/// datasets carry.
pub fn format_value(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        return format_int_with_commas(value.round() as i64);
    }
    let raw = format!("{value}");
    let Some((head, tail)) = raw.split_once('.') else {
        return raw;
    };
    let int_part = head
        .parse::<i64>()
        .ok()
        .map(format_int_with_commas)
        .unwrap_or_else(|| head.to_string());
    if tail.is_empty() {
        return int_part;
    }
    format!("{int_part}.{tail}")
}

fn format_int_with_commas(n: i64) -> String {
    let mut s = n.abs().to_string();
    let mut out = String::new();
    while s.len() > 3 {
        let split_at = s.len() - 3;
        let tail = &s[split_at..];
        if out.is_empty() {
            out = tail.to_string();
        } else {
            out = format!("{tail},{out}");
        }
        s.truncate(split_at);
    }
    if out.is_empty() {
        out = s;
    } else {
        out = format!("{s},{out}");
    }
    if n < 0 { format!("-{out}") } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_values_with_thousands_separators() {
        assert_eq!(format_value(760000000.0), "760,000,000");
        assert_eq!(format_value(659363944.0), "659,363,944");
        assert_eq!(format_value(999.0), "999");
        assert_eq!(format_value(1000.0), "1,000");
        assert_eq!(format_value(0.0), "0");
    }

    #[test]
    fn fractional_values_keep_their_tail() {
        assert_eq!(format_value(1234.5), "1,234.5");
    }

    #[test]
    fn fmt_drops_float_noise() {
        assert_eq!(fmt(700.0000000001), "700");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(2.5), "2.5");
        assert_eq!(fmt(f64::NAN), "0");
    }

    #[test]
    fn escapes_markup_in_labels() {
        assert_eq!(
            escape_xml(r#"Fast & "Furious" <7>"#),
            "Fast &amp; &quot;Furious&quot; &lt;7&gt;"
        );
    }

    #[test]
    fn script_caption_survives_quotes() {
        assert_eq!(escape_js("It's a caption"), "It\\'s a caption");
    }
}
